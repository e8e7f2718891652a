//! Per-event metadata and the analysis-type switch.

use std::fmt;

use crate::id::{DatasetId, EventNumber, RunNumber};

/// Which analysis the selection is configured for.
///
/// The analysis type switches preset thresholds (notably the signal jet pT
/// cut) in the selection layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnalysisType {
    /// Electroweak dilepton.
    TwoLep,
    /// Electroweak trilepton.
    #[default]
    ThreeLep,
    /// Four leptons, electroweak or R-parity violating.
    FourLep,
    /// Chargino-neutralino via WH, same-sign plus jets.
    TwoLepWh,
    /// Strong production, same-sign or three leptons.
    Ss3l,
    /// Direct stop to two leptons.
    Stop2l,
    /// Lepton-flavour-violating Higgs decays.
    Hlfv,
    /// Not configured.
    Unknown,
}

impl AnalysisType {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoLep => "Ana_2Lep",
            Self::ThreeLep => "Ana_3Lep",
            Self::FourLep => "Ana_4Lep",
            Self::TwoLepWh => "Ana_2LepWH",
            Self::Ss3l => "Ana_SS3L",
            Self::Stop2l => "Ana_Stop2L",
            Self::Hlfv => "Ana_HLFV",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether the dilepton jet preset applies.
    pub fn is_dilepton(&self) -> bool {
        matches!(self, Self::TwoLep)
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event-level metadata and weight components.
#[derive(Clone, Debug, PartialEq)]
pub struct EventInfo {
    /// Run number.
    pub run: RunNumber,
    /// Event number.
    pub event: EventNumber,
    /// Simulated dataset id, zero for data.
    pub dataset: DatasetId,
    /// Simulation flag.
    pub is_mc: bool,
    /// Number of reconstructed primary vertices.
    pub n_vtx: u32,
    /// Generator weight.
    pub gen_weight: f64,
    /// Pileup reweighting factor.
    pub pileup_weight: f64,
    /// Cross section times efficiency, in pb.
    pub xsec: f64,
    /// Sum of generator weights over the full simulated sample.
    pub sum_w: f64,
}

impl EventInfo {
    /// Metadata for a collision-data event.
    pub fn data(run: RunNumber, event: EventNumber) -> Self {
        Self {
            run,
            event,
            ..Self::default()
        }
    }

    /// Metadata for a simulated event.
    pub fn simulation(dataset: DatasetId, event: EventNumber) -> Self {
        Self {
            dataset,
            event,
            is_mc: true,
            ..Self::default()
        }
    }

    /// Normalised event weight for an integrated luminosity `lumi` (pb⁻¹).
    ///
    /// `w_gen · w_pileup · xsec · lumi / sumw` for simulation, exactly 1 for
    /// data.
    pub fn weight(&self, lumi: f64) -> f64 {
        if !self.is_mc {
            return 1.0;
        }
        self.gen_weight * self.pileup_weight * self.xsec * lumi / self.sum_w
    }
}

impl Default for EventInfo {
    fn default() -> Self {
        Self {
            run: RunNumber(0),
            event: EventNumber(0),
            dataset: DatasetId(0),
            is_mc: false,
            n_vtx: 1,
            gen_weight: 1.0,
            pileup_weight: 1.0,
            xsec: 1.0,
            sum_w: 1.0,
        }
    }
}
