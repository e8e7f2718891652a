//! Missing transverse energy.

use crate::lorentz::{LorentzVector, TransverseVector};
use crate::variant::SystematicVariant;

/// Missing transverse energy computed under one systematic variant.
///
/// The event store keeps one record per variant; the record itself never
/// changes state.
#[derive(Clone, Debug, PartialEq)]
pub struct Met {
    /// Magnitude.
    pub et: f64,
    /// Azimuth.
    pub phi: f64,
    /// Scalar sum of transverse energy.
    pub sum_et: f64,
    /// Variant this record was computed under.
    pub variant: SystematicVariant,
}

impl Met {
    /// A nominal record with zero scalar sum.
    pub fn new(et: f64, phi: f64) -> Self {
        Self {
            et,
            phi,
            sum_et: 0.0,
            variant: SystematicVariant::Nominal,
        }
    }

    /// Builder-style variant tag.
    pub fn with_variant(mut self, variant: SystematicVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Massless four-vector at zero pseudorapidity.
    pub fn lv(&self) -> LorentzVector {
        LorentzVector::from_pt_eta_phi_e(self.et, 0.0, self.phi, self.et)
    }

    /// Two-component vector.
    pub fn vector(&self) -> TransverseVector {
        TransverseVector::from_polar(self.et, self.phi)
    }

    /// x component.
    pub fn px(&self) -> f64 {
        self.et * self.phi.cos()
    }

    /// y component.
    pub fn py(&self) -> f64 {
        self.et * self.phi.sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lv_is_transverse_and_massless() {
        let met = Met::new(80.0, 1.3);
        let lv = met.lv();
        assert!((lv.pt() - 80.0).abs() < 1e-9);
        assert!(lv.pz().abs() < 1e-12);
        assert!(lv.m().abs() < 1e-3);
        assert!((lv.phi() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn vector_matches_components() {
        let met = Met::new(50.0, -0.4).with_variant(SystematicVariant::JesUp);
        let v = met.vector();
        assert!((v.x() - met.px()).abs() < 1e-12);
        assert!((v.y() - met.py()).abs() < 1e-12);
        assert_eq!(met.variant, SystematicVariant::JesUp);
    }
}
