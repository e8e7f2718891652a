//! Lepton records: electrons, muons and taus.
//!
//! All three flavours compose a [`Particle`] with the flavour-independent
//! [`LeptonCommon`] block and add their own identification variables.

use std::fmt;

use crate::particle::{ObjectKind, Particle};
use crate::traits::{impl_physics_object, Lepton};

/// Lepton flavour tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flavor {
    /// Electron.
    Electron,
    /// Muon.
    Muon,
    /// Tau.
    Tau,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Electron => "e",
            Self::Muon => "mu",
            Self::Tau => "tau",
        };
        f.write_str(name)
    }
}

/// Fixed-width set of matched trigger chains.
///
/// Bit `i` is set when the lepton was matched to the external trigger with
/// index `i`. Indices at or beyond [`TriggerBits::WIDTH`] are never matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TriggerBits(u64);

impl TriggerBits {
    /// Number of addressable trigger indices.
    pub const WIDTH: usize = 64;

    /// No trigger matched.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from a raw bit pattern.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Raw bit pattern.
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Whether trigger `index` is matched.
    pub fn is_matched(&self, index: usize) -> bool {
        index < Self::WIDTH && self.0 & (1u64 << index) != 0
    }

    /// Set or clear trigger `index`. Returns `false` if the index is out of
    /// range, in which case nothing changes.
    pub fn set(&mut self, index: usize, matched: bool) -> bool {
        if index >= Self::WIDTH {
            return false;
        }
        if matched {
            self.0 |= 1u64 << index;
        } else {
            self.0 &= !(1u64 << index);
        }
        true
    }

    /// Number of matched triggers.
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

/// Isolation working-point decisions computed upstream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IsolationFlags {
    /// GradientLoose working point.
    pub gradient_loose: bool,
    /// Gradient working point.
    pub gradient: bool,
    /// LooseTrackOnly working point.
    pub loose_track_only: bool,
    /// Loose working point.
    pub loose: bool,
    /// FixedCutTightTrackOnly working point.
    pub fixed_cut_tight_track_only: bool,
}

/// Attributes shared by every lepton flavour.
#[derive(Clone, Debug, PartialEq)]
pub struct LeptonCommon {
    /// Position in the stored flavour collection.
    pub index: usize,
    /// Electric charge, ±1.
    pub charge: i32,
    /// Baseline flag computed upstream.
    pub is_baseline: bool,
    /// Signal flag computed upstream.
    pub is_signal: bool,
    /// Topological calorimeter isolation, ΔR < 0.2.
    pub etconetopo20: f64,
    /// Topological calorimeter isolation, ΔR < 0.3.
    pub etconetopo30: f64,
    /// Track isolation, ΔR < 0.2.
    pub ptcone20: f64,
    /// Track isolation, ΔR < 0.3.
    pub ptcone30: f64,
    /// Variable-cone track isolation, max ΔR 0.2.
    pub ptvarcone20: f64,
    /// Variable-cone track isolation, max ΔR 0.3.
    pub ptvarcone30: f64,
    /// Isolation working points.
    pub isolation: IsolationFlags,
    /// Transverse impact parameter at the primary vertex.
    pub d0: f64,
    /// Uncertainty on `d0`.
    pub err_d0: f64,
    /// Beam-spot corrected d0 significance.
    pub d0_sig_bs_corr: f64,
    /// Longitudinal impact parameter at the primary vertex.
    pub z0: f64,
    /// Uncertainty on `z0`.
    pub err_z0: f64,
    /// Truth classifier particle type.
    pub mc_type: u32,
    /// Truth classifier particle origin.
    pub mc_origin: u32,
    /// Matched to a truth lepton.
    pub matched_to_truth: bool,
    /// Truth-match category, -1 when unset.
    pub truth_type: i32,
    /// Efficiency scale factor.
    pub eff_sf: f64,
    /// Matched trigger chains.
    pub trigger_bits: TriggerBits,
}

impl LeptonCommon {
    /// Defaults for a lepton of the given charge: zero isolation, unit
    /// impact-parameter errors, unit scale factor.
    pub fn with_charge(charge: i32) -> Self {
        Self {
            charge,
            ..Self::default()
        }
    }
}

impl Default for LeptonCommon {
    fn default() -> Self {
        Self {
            index: 0,
            charge: 0,
            is_baseline: false,
            is_signal: false,
            etconetopo20: 0.0,
            etconetopo30: 0.0,
            ptcone20: 0.0,
            ptcone30: 0.0,
            ptvarcone20: 0.0,
            ptvarcone30: 0.0,
            isolation: IsolationFlags::default(),
            d0: 0.0,
            err_d0: 1.0,
            d0_sig_bs_corr: 0.0,
            z0: 0.0,
            err_z0: 1.0,
            mc_type: 0,
            mc_origin: 0,
            matched_to_truth: false,
            truth_type: -1,
            eff_sf: 1.0,
            trigger_bits: TriggerBits::empty(),
        }
    }
}

/// A reconstructed electron.
#[derive(Clone, Debug, PartialEq)]
pub struct Electron {
    /// Kinematic record.
    pub particle: Particle,
    /// Flavour-independent lepton attributes.
    pub lepton: LeptonCommon,
    /// Calorimeter cluster energy.
    pub clus_e: f64,
    /// Calorimeter cluster pseudorapidity.
    pub clus_eta: f64,
    /// Calorimeter cluster azimuth.
    pub clus_phi: f64,
    /// Inner-detector track pt.
    pub track_pt: f64,
    /// Very-loose likelihood identification.
    pub very_loose_llh: bool,
    /// Loose likelihood identification.
    pub loose_llh: bool,
    /// Medium likelihood identification.
    pub medium_llh: bool,
    /// Tight likelihood identification.
    pub tight_llh: bool,
    /// Loose likelihood without the d0 requirement.
    pub loose_llh_nod0: bool,
    /// Medium likelihood without the d0 requirement.
    pub medium_llh_nod0: bool,
    /// Tight likelihood without the d0 requirement.
    pub tight_llh_nod0: bool,
    /// Truth-level charge flip.
    pub is_charge_flip: bool,
}

impl Electron {
    /// An electron with default identification (all flags off).
    pub fn new(particle: Particle, lepton: LeptonCommon) -> Self {
        Self {
            particle,
            lepton,
            clus_e: 0.0,
            clus_eta: 0.0,
            clus_phi: 0.0,
            track_pt: 0.0,
            very_loose_llh: false,
            loose_llh: false,
            medium_llh: false,
            tight_llh: false,
            loose_llh_nod0: false,
            medium_llh_nod0: false,
            tight_llh_nod0: false,
            is_charge_flip: false,
        }
    }
}

impl_physics_object!(Electron, ObjectKind::Electron);

impl Lepton for Electron {
    fn flavor(&self) -> Flavor {
        Flavor::Electron
    }

    fn common(&self) -> &LeptonCommon {
        &self.lepton
    }
}

/// A reconstructed muon.
#[derive(Clone, Debug, PartialEq)]
pub struct Muon {
    /// Kinematic record.
    pub particle: Particle,
    /// Flavour-independent lepton attributes.
    pub lepton: LeptonCommon,
    /// Combined inner-detector + spectrometer track.
    pub is_combined: bool,
    /// Calorimeter isolation, ΔR < 0.3.
    pub etcone30: f64,
    /// Inner-detector track pt.
    pub id_track_pt: f64,
    /// Spectrometer track pt.
    pub ms_track_pt: f64,
}

impl Muon {
    /// A combined muon with zero calorimeter isolation.
    pub fn new(particle: Particle, lepton: LeptonCommon) -> Self {
        Self {
            particle,
            lepton,
            is_combined: true,
            etcone30: 0.0,
            id_track_pt: 0.0,
            ms_track_pt: 0.0,
        }
    }
}

impl_physics_object!(Muon, ObjectKind::Muon);

impl Lepton for Muon {
    fn flavor(&self) -> Flavor {
        Flavor::Muon
    }

    fn common(&self) -> &LeptonCommon {
        &self.lepton
    }
}

/// A reconstructed hadronic tau.
#[derive(Clone, Debug, PartialEq)]
pub struct Tau {
    /// Kinematic record.
    pub particle: Particle,
    /// Flavour-independent lepton attributes.
    pub lepton: LeptonCommon,
    /// Number of associated tracks.
    pub n_track: u32,
    /// Loose BDT jet discrimination.
    pub loose_bdt: bool,
    /// Medium BDT jet discrimination.
    pub medium_bdt: bool,
    /// Tight BDT jet discrimination.
    pub tight_bdt: bool,
    /// Passes the electron veto.
    pub electron_veto: bool,
    /// Passes the muon veto.
    pub muon_veto: bool,
}

impl Tau {
    /// A one-prong tau with no identification flags.
    pub fn new(particle: Particle, lepton: LeptonCommon) -> Self {
        Self {
            particle,
            lepton,
            n_track: 1,
            loose_bdt: false,
            medium_bdt: false,
            tight_bdt: false,
            electron_veto: false,
            muon_veto: false,
        }
    }
}

impl_physics_object!(Tau, ObjectKind::Tau);

impl Lepton for Tau {
    fn flavor(&self) -> Flavor {
        Flavor::Tau
    }

    fn common(&self) -> &LeptonCommon {
        &self.lepton
    }
}
