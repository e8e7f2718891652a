//! The kinematic record shared by every reconstructed object.

use std::fmt;

use crate::lorentz::LorentzVector;
use crate::variant::{SystematicVariant, VariantShifts};

/// Identity tag of a reconstructed object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    /// Electron.
    Electron,
    /// Muon.
    Muon,
    /// Hadronically decaying tau.
    Tau,
    /// Hadronic jet.
    Jet,
    /// Photon.
    Photon,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Electron => "electron",
            Self::Muon => "muon",
            Self::Tau => "tau",
            Self::Jet => "jet",
            Self::Photon => "photon",
        };
        f.write_str(name)
    }
}

/// Four-momentum with a systematic-variant state.
///
/// The particle keeps its nominal four-vector and a table of relative scale
/// factors. [`set_state`](Particle::set_state) recomputes the current
/// four-vector from the nominal one, so switching is idempotent and the
/// order of switches never matters.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    nominal: LorentzVector,
    p4: LorentzVector,
    state: SystematicVariant,
    shifts: VariantShifts,
}

impl Particle {
    /// A particle in the nominal state with no stored shifts.
    pub fn new(nominal: LorentzVector) -> Self {
        Self {
            nominal,
            p4: nominal,
            state: SystematicVariant::Nominal,
            shifts: VariantShifts::new(),
        }
    }

    /// Shorthand for [`LorentzVector::from_pt_eta_phi_m`].
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        Self::new(LorentzVector::from_pt_eta_phi_m(pt, eta, phi, m))
    }

    /// Attach a scale-factor table. The current state is re-applied.
    pub fn with_shifts(mut self, shifts: VariantShifts) -> Self {
        self.shifts = shifts;
        self.set_state(self.state);
        self
    }

    /// Switch the four-momentum to `variant`.
    pub fn set_state(&mut self, variant: SystematicVariant) {
        self.state = variant;
        self.p4 = self.nominal.scaled(self.shifts.factor(variant));
    }

    /// The variant the four-momentum currently reflects.
    pub fn state(&self) -> SystematicVariant {
        self.state
    }

    /// Current four-momentum.
    pub fn p4(&self) -> &LorentzVector {
        &self.p4
    }

    /// Nominal four-momentum regardless of state.
    pub fn nominal(&self) -> &LorentzVector {
        &self.nominal
    }

    /// Stored scale factors.
    pub fn shifts(&self) -> &VariantShifts {
        &self.shifts
    }

    /// Mutable access to the scale factors.
    ///
    /// Call [`set_state`](Self::set_state) afterwards to refresh the current
    /// four-vector.
    pub fn shifts_mut(&mut self) -> &mut VariantShifts {
        &mut self.shifts
    }
}
