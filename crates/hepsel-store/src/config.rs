//! Store configuration parameters.

/// Capacity hints for the per-event collections.
///
/// Collections grow past these sizes when needed; the hints only avoid
/// reallocation on the first few events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Initial capacity of each lepton collection.
    ///
    /// Default: 8.
    pub lepton_capacity: usize,

    /// Initial capacity of the jet collection.
    ///
    /// Default: 16.
    pub jet_capacity: usize,

    /// Initial capacity of the photon collection.
    ///
    /// Default: 4.
    pub photon_capacity: usize,

    /// Initial capacity of the per-variant missing-energy table.
    ///
    /// Default: 4.
    pub met_capacity: usize,
}

impl StoreConfig {
    /// Default lepton collection capacity.
    pub const DEFAULT_LEPTON_CAPACITY: usize = 8;

    /// Default jet collection capacity.
    pub const DEFAULT_JET_CAPACITY: usize = 16;

    /// Default photon collection capacity.
    pub const DEFAULT_PHOTON_CAPACITY: usize = 4;

    /// Default missing-energy table capacity.
    pub const DEFAULT_MET_CAPACITY: usize = 4;

    /// Create a config with default capacities.
    pub fn new() -> Self {
        Self {
            lepton_capacity: Self::DEFAULT_LEPTON_CAPACITY,
            jet_capacity: Self::DEFAULT_JET_CAPACITY,
            photon_capacity: Self::DEFAULT_PHOTON_CAPACITY,
            met_capacity: Self::DEFAULT_MET_CAPACITY,
        }
    }

    /// Builder-style jet capacity, for dense-jet workloads.
    pub fn with_jet_capacity(mut self, jet_capacity: usize) -> Self {
        self.jet_capacity = jet_capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
