//! Selection configuration, validation, and error types.
//!
//! [`SelectionConfig`] gathers every threshold the selection layer applies.
//! All defaults are the documented analysis values; [`validate()`](SelectionConfig::validate)
//! rejects negative or non-finite thresholds before a
//! [`Selector`](crate::Selector) is built.

use std::error::Error;
use std::fmt;

use hepsel_core::AnalysisType;

// ── OverlapConfig ──────────────────────────────────────────────────

/// ΔR thresholds for each overlap-removal stage.
///
/// A pair overlaps when its ΔR is at or below the threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlapConfig {
    /// Electron–electron. Default: 0.05.
    pub e_e: f64,
    /// Jet removed near an electron. Default: 0.2.
    pub j_e: f64,
    /// Electron removed near a jet. Default: 0.4.
    pub e_j: f64,
    /// Muon removed near a jet. Default: 0.4.
    pub m_j: f64,
    /// Electron–muon, both removed. Default: 0.01.
    pub e_m: f64,
    /// Muon–muon, both removed. Default: 0.05.
    pub m_m: f64,
    /// Tau removed near an electron. Default: 0.2.
    pub t_e: f64,
    /// Tau removed near a muon. Default: 0.2.
    pub t_m: f64,
    /// Jet removed near a tau. Default: 0.2.
    pub j_t: f64,
}

impl OverlapConfig {
    /// Default electron–electron threshold.
    pub const DEFAULT_E_E: f64 = 0.05;
    /// Default jet-near-electron threshold.
    pub const DEFAULT_J_E: f64 = 0.2;
    /// Default electron-near-jet threshold.
    pub const DEFAULT_E_J: f64 = 0.4;
    /// Default muon-near-jet threshold.
    pub const DEFAULT_M_J: f64 = 0.4;
    /// Default electron–muon threshold.
    pub const DEFAULT_E_M: f64 = 0.01;
    /// Default muon–muon threshold.
    pub const DEFAULT_M_M: f64 = 0.05;
    /// Default threshold for the three tau stages.
    pub const DEFAULT_TAU: f64 = 0.2;

    /// Configuration with every default threshold.
    pub fn new() -> Self {
        Self {
            e_e: Self::DEFAULT_E_E,
            j_e: Self::DEFAULT_J_E,
            e_j: Self::DEFAULT_E_J,
            m_j: Self::DEFAULT_M_J,
            e_m: Self::DEFAULT_E_M,
            m_m: Self::DEFAULT_M_M,
            t_e: Self::DEFAULT_TAU,
            t_m: Self::DEFAULT_TAU,
            j_t: Self::DEFAULT_TAU,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 9] {
        [
            ("overlap.e_e", self.e_e),
            ("overlap.j_e", self.j_e),
            ("overlap.e_j", self.e_j),
            ("overlap.m_j", self.m_j),
            ("overlap.e_m", self.e_m),
            ("overlap.m_m", self.m_m),
            ("overlap.t_e", self.t_e),
            ("overlap.t_m", self.t_m),
            ("overlap.j_t", self.j_t),
        ]
    }
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ── Object cuts ────────────────────────────────────────────────────

/// Minimum pT (GeV) for the pre-selected collections.
#[derive(Clone, Debug, PartialEq)]
pub struct BaselineCuts {
    /// Default: 10.
    pub electron_pt: f64,
    /// Default: 10.
    pub muon_pt: f64,
    /// Default: 20.
    pub tau_pt: f64,
    /// Default: 20.
    pub jet_pt: f64,
}

impl Default for BaselineCuts {
    fn default() -> Self {
        Self {
            electron_pt: 10.0,
            muon_pt: 10.0,
            tau_pt: 20.0,
            jet_pt: 20.0,
        }
    }
}

/// Signal electron requirements.
#[derive(Clone, Debug, PartialEq)]
pub struct ElectronCuts {
    /// Upper bound on `ptcone30 / pT`. Default: 0.16.
    pub ptcone30_rel: f64,
    /// Upper bound on the pileup-corrected `etconetopo30 / pT`. Default: 0.18.
    pub topo_etcone30_rel: f64,
    /// Pileup slope per vertex for simulation. Default: 0.01794.
    pub topo_slope_mc: f64,
    /// Pileup slope per vertex for data. Default: 0.02015.
    pub topo_slope_data: f64,
    /// Upper bound on `|d0 / σ(d0)|`. Default: 5.
    pub d0_sig: f64,
    /// Upper bound on `|z0 sin θ|` (mm). Default: 0.4.
    pub z0_sin_theta: f64,
}

impl Default for ElectronCuts {
    fn default() -> Self {
        Self {
            ptcone30_rel: 0.16,
            topo_etcone30_rel: 0.18,
            topo_slope_mc: 0.01794,
            topo_slope_data: 0.02015,
            d0_sig: 5.0,
            z0_sin_theta: 0.4,
        }
    }
}

/// Signal muon requirements.
#[derive(Clone, Debug, PartialEq)]
pub struct MuonCuts {
    /// Upper bound on the pileup-corrected `ptcone30 / pT`. Default: 0.12.
    pub ptcone30_rel: f64,
    /// Pileup slope per vertex for simulation. Default: 0.00627.
    pub ptcone_slope_mc: f64,
    /// Pileup slope per vertex for data. Default: 0.01098.
    pub ptcone_slope_data: f64,
    /// Linear `etcone30` pileup term for simulation. Default: 0.0692.
    pub etcone_k1_mc: f64,
    /// Quadratic `etcone30` pileup term for simulation. Default: 0.00076.
    pub etcone_k2_mc: f64,
    /// Linear `etcone30` pileup term for data. Default: 0.0648.
    pub etcone_k1_data: f64,
    /// Quadratic `etcone30` pileup term for data. Default: 0.00098.
    pub etcone_k2_data: f64,
    /// Upper bound on `|d0 / σ(d0)|`. Default: 3.
    pub d0_sig: f64,
    /// Upper bound on `|z0 sin θ|` (mm). Default: 1.
    pub z0_sin_theta: f64,
}

impl Default for MuonCuts {
    fn default() -> Self {
        Self {
            ptcone30_rel: 0.12,
            ptcone_slope_mc: 0.00627,
            ptcone_slope_data: 0.01098,
            etcone_k1_mc: 0.0692,
            etcone_k2_mc: 0.00076,
            etcone_k1_data: 0.0648,
            etcone_k2_data: 0.00098,
            d0_sig: 3.0,
            z0_sin_theta: 1.0,
        }
    }
}

/// Signal jet requirements.
#[derive(Clone, Debug, PartialEq)]
pub struct JetCuts {
    /// pT preset for the dilepton analysis. Default: 30.
    pub pt_dilepton: f64,
    /// pT preset for every other analysis. Default: 20.
    pub pt_default: f64,
    /// Upper bound on `|η|`. Default: 2.5.
    pub max_abs_eta: f64,
    /// Lower bound on the jet vertex fraction. Default: 0.75.
    pub min_jvf: f64,
}

impl JetCuts {
    /// The pT preset for `analysis`.
    pub fn pt_for(&self, analysis: AnalysisType) -> f64 {
        if analysis.is_dilepton() {
            self.pt_dilepton
        } else {
            self.pt_default
        }
    }
}

impl Default for JetCuts {
    fn default() -> Self {
        Self {
            pt_dilepton: 30.0,
            pt_default: 20.0,
            max_abs_eta: 2.5,
            min_jvf: 0.75,
        }
    }
}

/// Every per-object requirement.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectCuts {
    /// Pre-selection pT thresholds.
    pub baseline: BaselineCuts,
    /// Signal electrons.
    pub electron: ElectronCuts,
    /// Signal muons.
    pub muon: MuonCuts,
    /// Signal jets.
    pub jet: JetCuts,
    /// MV1 b-tag working point. Default: 0.3511 (80 % efficiency).
    pub btag_wp: f64,
}

impl ObjectCuts {
    /// MV1 discriminant at the 80 % efficiency working point.
    pub const MV1_80: f64 = 0.3511;

    /// Cuts with every default value.
    pub fn new() -> Self {
        Self {
            baseline: BaselineCuts::default(),
            electron: ElectronCuts::default(),
            muon: MuonCuts::default(),
            jet: JetCuts::default(),
            btag_wp: Self::MV1_80,
        }
    }

    fn entries(&self) -> [(&'static str, f64); 22] {
        let (b, e, m, j) = (&self.baseline, &self.electron, &self.muon, &self.jet);
        [
            ("baseline.electron_pt", b.electron_pt),
            ("baseline.muon_pt", b.muon_pt),
            ("baseline.tau_pt", b.tau_pt),
            ("baseline.jet_pt", b.jet_pt),
            ("electron.ptcone30_rel", e.ptcone30_rel),
            ("electron.topo_etcone30_rel", e.topo_etcone30_rel),
            ("electron.topo_slope_mc", e.topo_slope_mc),
            ("electron.topo_slope_data", e.topo_slope_data),
            ("electron.d0_sig", e.d0_sig),
            ("electron.z0_sin_theta", e.z0_sin_theta),
            ("muon.ptcone30_rel", m.ptcone30_rel),
            ("muon.ptcone_slope_mc", m.ptcone_slope_mc),
            ("muon.ptcone_slope_data", m.ptcone_slope_data),
            ("muon.etcone_k1_mc", m.etcone_k1_mc),
            ("muon.etcone_k2_mc", m.etcone_k2_mc),
            ("muon.etcone_k1_data", m.etcone_k1_data),
            ("muon.etcone_k2_data", m.etcone_k2_data),
            ("muon.d0_sig", m.d0_sig),
            ("muon.z0_sin_theta", m.z0_sin_theta),
            ("jet.max_abs_eta", j.max_abs_eta),
            ("jet.min_jvf", j.min_jvf),
            ("btag_wp", self.btag_wp),
        ]
    }
}

impl Default for ObjectCuts {
    fn default() -> Self {
        Self::new()
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SelectionConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// An overlap ΔR threshold is negative, NaN or infinite.
    InvalidThreshold {
        /// Which threshold.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// An object cut is negative, NaN or infinite.
    InvalidCut {
        /// Which cut.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A signal jet pT preset is not finite and positive.
    InvalidJetPreset {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThreshold { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::InvalidCut { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::InvalidJetPreset { value } => {
                write!(f, "jet pT preset must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── SelectionConfig ────────────────────────────────────────────────

/// Complete configuration for a [`Selector`](crate::Selector).
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionConfig {
    /// Which analysis preset applies.
    pub analysis: AnalysisType,
    /// Overlap-removal thresholds.
    pub overlap: OverlapConfig,
    /// Per-object requirements.
    pub cuts: ObjectCuts,
    /// SFOS pairs below this invariant mass (GeV) are vetoed. Default: 12.
    pub mll_min: f64,
    /// Run the tau overlap stages and keep taus in the selected sets.
    pub select_taus: bool,
}

impl SelectionConfig {
    /// Default low-mass SFOS veto threshold.
    pub const DEFAULT_MLL_MIN: f64 = 12.0;

    /// Default configuration for `analysis`.
    pub fn new(analysis: AnalysisType) -> Self {
        Self {
            analysis,
            overlap: OverlapConfig::new(),
            cuts: ObjectCuts::new(),
            mll_min: Self::DEFAULT_MLL_MIN,
            select_taus: false,
        }
    }

    /// Builder-style tau selection switch.
    pub fn with_taus(mut self, select_taus: bool) -> Self {
        self.select_taus = select_taus;
        self
    }

    /// Check every threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Overlap thresholds.
        for (name, value) in self.overlap.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        // 2. Object cuts and the SFOS veto.
        let mll = ("mll_min", self.mll_min);
        for (name, value) in self.cuts.entries().into_iter().chain(std::iter::once(mll)) {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCut { name, value });
            }
        }
        // 3. Jet presets.
        for value in [self.cuts.jet.pt_dilepton, self.cuts.jet.pt_default] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidJetPreset { value });
            }
        }
        Ok(())
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::new(AnalysisType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = SelectionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.overlap.e_j, 0.4);
        assert_eq!(cfg.cuts.btag_wp, 0.3511);
        assert_eq!(cfg.mll_min, 12.0);
        assert!(!cfg.select_taus);
    }

    #[test]
    fn jet_preset_follows_analysis() {
        let cuts = JetCuts::default();
        assert_eq!(cuts.pt_for(AnalysisType::TwoLep), 30.0);
        assert_eq!(cuts.pt_for(AnalysisType::ThreeLep), 20.0);
        assert_eq!(cuts.pt_for(AnalysisType::Ss3l), 20.0);
    }

    #[test]
    fn negative_threshold_rejected() {
        let mut cfg = SelectionConfig::default();
        cfg.overlap.m_m = -0.1;
        match cfg.validate() {
            Err(ConfigError::InvalidThreshold { name: "overlap.m_m", .. }) => {}
            other => panic!("expected InvalidThreshold(overlap.m_m), got {other:?}"),
        }
    }

    #[test]
    fn nan_cut_rejected() {
        let mut cfg = SelectionConfig::default();
        cfg.cuts.muon.d0_sig = f64::NAN;
        match cfg.validate() {
            Err(ConfigError::InvalidCut { name: "muon.d0_sig", .. }) => {}
            other => panic!("expected InvalidCut(muon.d0_sig), got {other:?}"),
        }
    }

    #[test]
    fn zero_jet_preset_rejected() {
        let mut cfg = SelectionConfig::default();
        cfg.cuts.jet.pt_dilepton = 0.0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidJetPreset { value: 0.0 })
        );
    }

    #[test]
    fn negative_mll_rejected() {
        let mut cfg = SelectionConfig::default();
        cfg.mll_min = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidCut { name: "mll_min", .. })
        ));
    }
}
