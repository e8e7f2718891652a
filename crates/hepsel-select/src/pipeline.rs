//! Per-event selection pipeline.
//!
//! [`Selector`] turns the raw collections in an [`EventStore`] into the
//! baseline and signal tiers an analysis consumes. Each tier is an
//! [`ObjectSet`] of borrowed views tagged with the [`Stage`] it reached:
//!
//! ```text
//! Raw ─pT cuts─▶ Baseline ─overlap, SFOS veto─▶ OverlapRemoved ─quality─▶ Signal
//! ```
//!
//! The pipeline is re-entrant per systematic variant: [`Selector::select`]
//! switches the store to a variant and rebuilds both tiers from scratch.
//! Every set borrows the store, so the borrow checker rules out holding a
//! selection across a variant switch.

use std::error::Error;
use std::fmt;

use hepsel_core::{
    AnalysisType, Electron, EventInfo, Jet, Met, Muon, Photon, SystematicVariant, Tau,
};
use hepsel_store::{EventStore, ObjRef};

use crate::config::{ConfigError, SelectionConfig};
use crate::cuts;
use crate::leptons::{build_leptons, build_leptons_with_taus, LeptonRef};
use crate::overlap::{remove_sfos_pairs, OverlapRemover};
use crate::pairing;

// Compile-time assertion: a Selector can be shared between event workers.
const _: () = {
    #[allow(dead_code)]
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<Selector>();
    }
};

// ── Stage ──────────────────────────────────────────────────────────

/// How far an [`ObjectSet`] has progressed through the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Straight from the store.
    Raw,
    /// Baseline pT cuts applied.
    Baseline,
    /// Overlap removal and the low-mass SFOS veto applied.
    OverlapRemoved,
    /// Signal quality requirements applied.
    Signal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Raw => "raw",
            Self::Baseline => "baseline",
            Self::OverlapRemoved => "overlap-removed",
            Self::Signal => "signal",
        };
        f.write_str(name)
    }
}

// ── SelectionError ─────────────────────────────────────────────────

/// Errors from the selection pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// An operation received a set at the wrong pipeline stage.
    StageOrder {
        /// The stage the operation requires.
        expected: Stage,
        /// The stage of the set it was given.
        found: Stage,
    },
    /// No missing-energy record exists for the selected variant.
    MissingMet {
        /// The variant that was looked up.
        variant: SystematicVariant,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageOrder { expected, found } => {
                write!(f, "expected object set at stage {expected}, got {found}")
            }
            Self::MissingMet { variant } => {
                write!(f, "no missing-energy record for variant {variant}")
            }
        }
    }
}

impl Error for SelectionError {}

// ── ObjectSet ──────────────────────────────────────────────────────

/// Borrowed views of the selected objects of one event.
#[derive(Clone, Debug)]
pub struct ObjectSet<'a> {
    stage: Stage,
    electrons: Vec<ObjRef<'a, Electron>>,
    muons: Vec<ObjRef<'a, Muon>>,
    taus: Vec<ObjRef<'a, Tau>>,
    jets: Vec<ObjRef<'a, Jet>>,
    photons: Vec<ObjRef<'a, Photon>>,
}

impl<'a> ObjectSet<'a> {
    /// Every object in the store, at [`Stage::Raw`].
    pub fn from_store(store: &'a EventStore) -> Self {
        Self {
            stage: Stage::Raw,
            electrons: store.electrons(),
            muons: store.muons(),
            taus: store.taus(),
            jets: store.jets(),
            photons: store.photons(),
        }
    }

    /// Pipeline stage this set reached.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Selected electrons, in store order.
    pub fn electrons(&self) -> &[ObjRef<'a, Electron>] {
        &self.electrons
    }

    /// Selected muons, in store order.
    pub fn muons(&self) -> &[ObjRef<'a, Muon>] {
        &self.muons
    }

    /// Selected taus, in store order.
    pub fn taus(&self) -> &[ObjRef<'a, Tau>] {
        &self.taus
    }

    /// Selected jets, in store order.
    pub fn jets(&self) -> &[ObjRef<'a, Jet>] {
        &self.jets
    }

    /// Photons, in store order.
    pub fn photons(&self) -> &[ObjRef<'a, Photon>] {
        &self.photons
    }

    /// Electrons and muons merged, descending pT.
    pub fn leptons(&self) -> Vec<LeptonRef<'a>> {
        build_leptons(&self.electrons, &self.muons)
    }

    /// Electrons, muons and taus merged, descending pT.
    pub fn leptons_with_taus(&self) -> Vec<LeptonRef<'a>> {
        build_leptons_with_taus(&self.electrons, &self.muons, &self.taus)
    }

    /// Number of light leptons.
    pub fn n_light_leptons(&self) -> usize {
        self.electrons.len() + self.muons.len()
    }
}

// ── SelectedEvent ──────────────────────────────────────────────────

/// Both tiers of one event under one systematic variant.
#[derive(Clone, Debug)]
pub struct SelectedEvent<'a> {
    /// Event metadata.
    pub info: &'a EventInfo,
    /// The variant the store was switched to.
    pub variant: SystematicVariant,
    /// Baseline objects after overlap removal.
    pub baseline: ObjectSet<'a>,
    /// Signal objects.
    pub signal: ObjectSet<'a>,
    /// Missing energy for `variant`, if the store has it.
    pub met: Option<&'a Met>,
}

impl<'a> SelectedEvent<'a> {
    /// The missing-energy record, or [`SelectionError::MissingMet`].
    pub fn require_met(&self) -> Result<&'a Met, SelectionError> {
        self.met.ok_or(SelectionError::MissingMet {
            variant: self.variant,
        })
    }
}

// ── Selector ───────────────────────────────────────────────────────

/// Builds baseline and signal object sets from an [`EventStore`].
///
/// Read-only after construction except for [`set_analysis`](Self::set_analysis).
#[derive(Clone, Debug)]
pub struct Selector {
    config: SelectionConfig,
    overlap: OverlapRemover,
}

impl Selector {
    /// Validate `config` and build a selector.
    pub fn new(config: SelectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let overlap = OverlapRemover::new(config.overlap.clone());
        Ok(Self { config, overlap })
    }

    /// The active configuration.
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// The active analysis preset.
    pub fn analysis(&self) -> AnalysisType {
        self.config.analysis
    }

    /// Switch the analysis preset, which selects the signal-jet pT cut.
    pub fn set_analysis(&mut self, analysis: AnalysisType) {
        tracing::debug!(from = %self.config.analysis, to = %analysis, "analysis preset changed");
        self.config.analysis = analysis;
    }

    /// Whether any of `jets` is b-tagged at the configured working point.
    pub fn has_b_jet(&self, jets: &[ObjRef<'_, Jet>]) -> bool {
        pairing::has_b_jet(jets, self.config.cuts.btag_wp)
    }

    /// Baseline pT cuts on the store's current variant.
    ///
    /// Taus are collected only when tau selection is enabled. Photons pass
    /// unchanged.
    pub fn pre_objects<'a>(&self, store: &'a EventStore) -> ObjectSet<'a> {
        let cuts = &self.config.cuts;
        let raw = ObjectSet::from_store(store);
        let taus = if self.config.select_taus {
            raw.taus
                .into_iter()
                .filter(|t| cuts::is_baseline_tau(t, cuts))
                .collect()
        } else {
            Vec::new()
        };
        let set = ObjectSet {
            stage: Stage::Baseline,
            electrons: raw
                .electrons
                .into_iter()
                .filter(|e| cuts::is_baseline_electron(e, cuts))
                .collect(),
            muons: raw
                .muons
                .into_iter()
                .filter(|m| cuts::is_baseline_muon(m, cuts))
                .collect(),
            taus,
            jets: raw
                .jets
                .into_iter()
                .filter(|j| cuts::is_baseline_jet(j, cuts))
                .collect(),
            photons: raw.photons,
        };
        tracing::debug!(
            variant = %store.state(),
            electrons = set.electrons.len(),
            muons = set.muons.len(),
            taus = set.taus.len(),
            jets = set.jets.len(),
            "pre-objects selected"
        );
        set
    }

    /// Pre-objects, then overlap removal, then the low-mass SFOS veto.
    pub fn baseline_objects<'a>(&self, store: &'a EventStore) -> ObjectSet<'a> {
        let mut set = self.pre_objects(store);
        self.overlap
            .perform_overlap(&mut set.electrons, &mut set.muons, &mut set.jets);
        if self.config.select_taus {
            self.overlap.perform_tau_overlap(
                &set.electrons,
                &set.muons,
                &mut set.taus,
                &mut set.jets,
            );
        }
        remove_sfos_pairs(&mut set.electrons, self.config.mll_min);
        remove_sfos_pairs(&mut set.muons, self.config.mll_min);
        set.stage = Stage::OverlapRemoved;
        tracing::debug!(
            electrons = set.electrons.len(),
            muons = set.muons.len(),
            taus = set.taus.len(),
            jets = set.jets.len(),
            "baseline objects selected"
        );
        set
    }

    /// Signal objects from an overlap-removed baseline set.
    ///
    /// # Errors
    ///
    /// [`SelectionError::StageOrder`] unless `baseline` is at
    /// [`Stage::OverlapRemoved`].
    pub fn signal_objects<'a>(
        &self,
        baseline: &ObjectSet<'a>,
        info: &EventInfo,
    ) -> Result<ObjectSet<'a>, SelectionError> {
        if baseline.stage != Stage::OverlapRemoved {
            return Err(SelectionError::StageOrder {
                expected: Stage::OverlapRemoved,
                found: baseline.stage,
            });
        }
        Ok(self.apply_signal_cuts(baseline, info))
    }

    /// Signal objects straight from the store's raw collections.
    ///
    /// Runs the full baseline stage first, so the result equals
    /// [`signal_objects`](Self::signal_objects) applied to
    /// [`baseline_objects`](Self::baseline_objects).
    pub fn signal_objects_from_store<'a>(&self, store: &'a EventStore) -> ObjectSet<'a> {
        let baseline = self.baseline_objects(store);
        self.apply_signal_cuts(&baseline, store.info())
    }

    /// Switch the store to `variant` and build both tiers.
    ///
    /// A missing MET record for `variant` is not an error here; it is
    /// reported through [`SelectedEvent::require_met`].
    pub fn select<'a>(
        &self,
        store: &'a mut EventStore,
        variant: SystematicVariant,
    ) -> Result<SelectedEvent<'a>, SelectionError> {
        store.set_state(variant);
        let store: &'a EventStore = store;
        let baseline = self.baseline_objects(store);
        let signal = self.signal_objects(&baseline, store.info())?;
        Ok(SelectedEvent {
            info: store.info(),
            variant,
            baseline,
            signal,
            met: store.met(variant),
        })
    }

    fn apply_signal_cuts<'a>(&self, baseline: &ObjectSet<'a>, info: &EventInfo) -> ObjectSet<'a> {
        let cuts = &self.config.cuts;
        let (n_vtx, is_mc) = (info.n_vtx, info.is_mc);
        let analysis = self.config.analysis;
        let set = ObjectSet {
            stage: Stage::Signal,
            electrons: baseline
                .electrons
                .iter()
                .copied()
                .filter(|e| cuts::is_signal_electron(e, n_vtx, is_mc, cuts))
                .collect(),
            muons: baseline
                .muons
                .iter()
                .copied()
                .filter(|m| cuts::is_signal_muon(m, n_vtx, is_mc, cuts))
                .collect(),
            taus: baseline
                .taus
                .iter()
                .copied()
                .filter(|t| cuts::is_signal_tau(t))
                .collect(),
            jets: baseline
                .jets
                .iter()
                .copied()
                .filter(|j| cuts::is_signal_jet(j, analysis, cuts))
                .collect(),
            photons: baseline.photons.clone(),
        };
        tracing::debug!(
            electrons = set.electrons.len(),
            muons = set.muons.len(),
            taus = set.taus.len(),
            jets = set.jets.len(),
            "signal objects selected"
        );
        set
    }
}

impl Default for Selector {
    fn default() -> Self {
        let config = SelectionConfig::default();
        let overlap = OverlapRemover::new(config.overlap.clone());
        Self { config, overlap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hepsel_core::{LeptonCommon, Particle};

    fn electron(pt: f64, eta: f64, phi: f64, q: i32) -> Electron {
        let mut e = Electron::new(
            Particle::from_pt_eta_phi_m(pt, eta, phi, 0.000511),
            LeptonCommon::with_charge(q),
        );
        e.tight_llh = true;
        e
    }

    fn muon(pt: f64, eta: f64, phi: f64, q: i32) -> Muon {
        Muon::new(
            Particle::from_pt_eta_phi_m(pt, eta, phi, 0.105),
            LeptonCommon::with_charge(q),
        )
    }

    fn jet(pt: f64, eta: f64, phi: f64) -> Jet {
        Jet::new(Particle::from_pt_eta_phi_m(pt, eta, phi, 5.0))
    }

    #[test]
    fn pre_objects_apply_pt_cuts() {
        let mut store = EventStore::new();
        store.begin_event(EventInfo::default());
        store.push(electron(9.0, 0.0, 0.0, 1));
        store.push(electron(25.0, 0.0, 1.0, -1));
        store.push(muon(12.0, 1.0, 2.0, 1));
        store.push(jet(15.0, 0.0, -2.0));
        store.push(jet(35.0, 0.0, -1.0));
        let set = Selector::default().pre_objects(&store);
        assert_eq!(set.stage(), Stage::Baseline);
        assert_eq!(set.electrons().len(), 1);
        assert_eq!(set.muons().len(), 1);
        assert_eq!(set.jets().len(), 1);
        assert!(set.taus().is_empty());
    }

    #[test]
    fn signal_objects_reject_unfinished_sets() {
        let mut store = EventStore::new();
        store.begin_event(EventInfo::default());
        store.push(electron(25.0, 0.0, 1.0, -1));
        let selector = Selector::default();
        let pre = selector.pre_objects(&store);
        let err = selector.signal_objects(&pre, store.info()).unwrap_err();
        assert_eq!(
            err,
            SelectionError::StageOrder {
                expected: Stage::OverlapRemoved,
                found: Stage::Baseline,
            }
        );
        assert_eq!(
            err.to_string(),
            "expected object set at stage overlap-removed, got baseline"
        );
    }

    #[test]
    fn select_reports_missing_met() {
        let mut store = EventStore::new();
        store.begin_event(EventInfo::default());
        store.push(muon(30.0, 0.0, 0.0, 1));
        let selector = Selector::default();
        let event = selector.select(&mut store, SystematicVariant::Nominal).unwrap();
        assert_eq!(event.signal.muons().len(), 1);
        assert_eq!(
            event.require_met(),
            Err(SelectionError::MissingMet {
                variant: SystematicVariant::Nominal
            })
        );
    }

    #[test]
    fn analysis_switch_changes_jet_preset() {
        let mut store = EventStore::new();
        store.begin_event(EventInfo::default());
        store.push(jet(25.0, 0.5, 0.0));
        let mut selector = Selector::default();
        assert_eq!(selector.signal_objects_from_store(&store).jets().len(), 1);
        selector.set_analysis(AnalysisType::TwoLep);
        assert_eq!(selector.analysis(), AnalysisType::TwoLep);
        assert!(selector.signal_objects_from_store(&store).jets().is_empty());
    }

    #[test]
    fn b_jet_query_uses_configured_working_point() {
        let mut store = EventStore::new();
        store.begin_event(EventInfo::default());
        let mut tagged = jet(40.0, 0.5, 0.0);
        tagged.mv1 = 0.5;
        store.push(tagged);
        store.push(jet(35.0, -1.0, 2.0));
        let loose = Selector::default();
        let signal = loose.signal_objects_from_store(&store);
        assert_eq!(signal.jets().len(), 2);
        assert!(loose.has_b_jet(signal.jets()));

        let mut config = SelectionConfig::default();
        config.cuts.btag_wp = 0.6;
        let tight = Selector::new(config).unwrap();
        assert!(!tight.has_b_jet(tight.signal_objects_from_store(&store).jets()));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SelectionConfig::default();
        config.overlap.e_j = -0.4;
        assert!(matches!(
            Selector::new(config),
            Err(ConfigError::InvalidThreshold { name: "overlap.e_j", .. })
        ));
    }
}
