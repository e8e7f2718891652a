//! Four-vectors and transverse two-vectors.
//!
//! [`LorentzVector`] stores Cartesian components `(px, py, pz, E)` and
//! derives the collider coordinates (pt, eta, phi, mass) on demand. The sign
//! conventions match the usual HEP toolkits: masses of space-like vectors are
//! returned as `-sqrt(-m²)`, and azimuthal differences are wrapped into
//! `[-π, π)`.

use std::f64::consts::PI;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Pseudorapidity reported for vectors along the beam axis.
const BEAM_AXIS_ETA: f64 = 1e10;

/// Wrap an azimuthal angle into `[-π, π)`.
pub fn wrap_phi(mut phi: f64) -> f64 {
    if !phi.is_finite() {
        return phi;
    }
    while phi >= PI {
        phi -= 2.0 * PI;
    }
    while phi < -PI {
        phi += 2.0 * PI;
    }
    phi
}

/// A Lorentz four-vector in Cartesian components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LorentzVector {
    px: f64,
    py: f64,
    pz: f64,
    e: f64,
}

impl LorentzVector {
    /// Build from Cartesian components.
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Build from transverse momentum, pseudorapidity, azimuth and mass.
    ///
    /// A negative mass is treated as a space-like vector with
    /// `E = sqrt(max(p² - m², 0))`.
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        let pt = pt.abs();
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        let e = if m >= 0.0 {
            (p2 + m * m).sqrt()
        } else {
            (p2 - m * m).max(0.0).sqrt()
        };
        Self { px, py, pz, e }
    }

    /// Build from transverse momentum, pseudorapidity, azimuth and energy.
    pub fn from_pt_eta_phi_e(pt: f64, eta: f64, phi: f64, e: f64) -> Self {
        let pt = pt.abs();
        Self {
            px: pt * phi.cos(),
            py: pt * phi.sin(),
            pz: pt * eta.sinh(),
            e,
        }
    }

    /// x component of the momentum.
    pub fn px(&self) -> f64 {
        self.px
    }

    /// y component of the momentum.
    pub fn py(&self) -> f64 {
        self.py
    }

    /// z component of the momentum.
    pub fn pz(&self) -> f64 {
        self.pz
    }

    /// Energy.
    pub fn e(&self) -> f64 {
        self.e
    }

    /// Squared transverse momentum.
    pub fn perp2(&self) -> f64 {
        self.px * self.px + self.py * self.py
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.perp2().sqrt()
    }

    /// Magnitude of the three-momentum.
    pub fn p(&self) -> f64 {
        (self.perp2() + self.pz * self.pz).sqrt()
    }

    /// Azimuthal angle in `(-π, π]`; zero for a vector along the beam axis.
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 {
            0.0
        } else {
            self.py.atan2(self.px)
        }
    }

    /// Polar angle.
    pub fn theta(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 && self.pz == 0.0 {
            0.0
        } else {
            self.pt().atan2(self.pz)
        }
    }

    /// Pseudorapidity.
    ///
    /// Vectors along the beam axis report `±1e10` instead of infinity.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        let cos_theta = if p == 0.0 { 1.0 } else { self.pz / p };
        if cos_theta * cos_theta < 1.0 {
            -0.5 * ((1.0 - cos_theta) / (1.0 + cos_theta)).ln()
        } else if self.pz == 0.0 {
            0.0
        } else if self.pz > 0.0 {
            BEAM_AXIS_ETA
        } else {
            -BEAM_AXIS_ETA
        }
    }

    /// Minkowski norm `E² - p²`.
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.perp2() - self.pz * self.pz
    }

    /// Invariant mass, negative for space-like vectors.
    pub fn m(&self) -> f64 {
        let mm = self.m2();
        if mm < 0.0 {
            -(-mm).sqrt()
        } else {
            mm.sqrt()
        }
    }

    /// Transverse mass `sqrt(E² - pz²)`, negative when `|pz| > E`.
    pub fn mt(&self) -> f64 {
        let mm = self.e * self.e - self.pz * self.pz;
        if mm < 0.0 {
            -(-mm).sqrt()
        } else {
            mm.sqrt()
        }
    }

    /// Transverse energy `E · pt / p`.
    pub fn et(&self) -> f64 {
        let pt2 = self.perp2();
        let p2 = pt2 + self.pz * self.pz;
        if p2 == 0.0 {
            return 0.0;
        }
        let etet = self.e * self.e * pt2 / p2;
        if self.e < 0.0 {
            -etet.sqrt()
        } else {
            etet.sqrt()
        }
    }

    /// Azimuthal separation `phi(self) - phi(other)` wrapped into `[-π, π)`.
    pub fn delta_phi(&self, other: &LorentzVector) -> f64 {
        wrap_phi(self.phi() - other.phi())
    }

    /// Angular distance `sqrt(Δη² + Δφ²)`.
    pub fn delta_r(&self, other: &LorentzVector) -> f64 {
        let deta = self.eta() - other.eta();
        let dphi = self.delta_phi(other);
        (deta * deta + dphi * dphi).sqrt()
    }

    /// Multiply every component by `factor`.
    ///
    /// Direction (eta, phi) is preserved; pt, energy and mass scale together.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            px: self.px * factor,
            py: self.py * factor,
            pz: self.pz * factor,
            e: self.e * factor,
        }
    }

    /// The transverse components as a two-vector.
    pub fn transverse(&self) -> TransverseVector {
        TransverseVector::new(self.px, self.py)
    }
}

impl fmt::Display for LorentzVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(pt={:.3}, eta={:.3}, phi={:.3}, m={:.3})",
            self.pt(),
            self.eta(),
            self.phi(),
            self.m()
        )
    }
}

impl Add for LorentzVector {
    type Output = LorentzVector;

    fn add(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector::new(
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
            self.e + rhs.e,
        )
    }
}

impl<'a> Add<&'a LorentzVector> for &'a LorentzVector {
    type Output = LorentzVector;

    fn add(self, rhs: &'a LorentzVector) -> LorentzVector {
        *self + *rhs
    }
}

impl AddAssign for LorentzVector {
    fn add_assign(&mut self, rhs: LorentzVector) {
        *self = *self + rhs;
    }
}

impl Sub for LorentzVector {
    type Output = LorentzVector;

    fn sub(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector::new(
            self.px - rhs.px,
            self.py - rhs.py,
            self.pz - rhs.pz,
            self.e - rhs.e,
        )
    }
}

impl Neg for LorentzVector {
    type Output = LorentzVector;

    fn neg(self) -> LorentzVector {
        LorentzVector::new(-self.px, -self.py, -self.pz, -self.e)
    }
}

impl Sum for LorentzVector {
    fn sum<I: Iterator<Item = LorentzVector>>(iter: I) -> Self {
        iter.fold(LorentzVector::default(), |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a LorentzVector> for LorentzVector {
    fn sum<I: Iterator<Item = &'a LorentzVector>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A vector in the transverse plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransverseVector {
    x: f64,
    y: f64,
}

impl TransverseVector {
    /// Build from Cartesian components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build from magnitude and azimuth.
    pub fn from_polar(magnitude: f64, phi: f64) -> Self {
        Self::new(magnitude * phi.cos(), magnitude * phi.sin())
    }

    /// x component.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// y component.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Squared magnitude.
    pub fn mag2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Magnitude.
    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }

    /// Azimuth in `(-π, π]`.
    pub fn phi(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    /// Dot product.
    pub fn dot(&self, other: &TransverseVector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Multiply both components by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for TransverseVector {
    type Output = TransverseVector;

    fn add(self, rhs: TransverseVector) -> TransverseVector {
        TransverseVector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for TransverseVector {
    type Output = TransverseVector;

    fn sub(self, rhs: TransverseVector) -> TransverseVector {
        TransverseVector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn pt_eta_phi_m_round_trip() {
        let v = LorentzVector::from_pt_eta_phi_m(40.0, 1.2, -2.1, 0.105);
        assert!((v.pt() - 40.0).abs() < EPS);
        assert!((v.eta() - 1.2).abs() < EPS);
        assert!((v.phi() + 2.1).abs() < EPS);
        assert!((v.m() - 0.105).abs() < 1e-6);
    }

    #[test]
    fn delta_phi_wraps_across_pi() {
        let a = LorentzVector::from_pt_eta_phi_m(10.0, 0.0, 3.1, 0.0);
        let b = LorentzVector::from_pt_eta_phi_m(10.0, 0.0, -3.1, 0.0);
        let dphi = a.delta_phi(&b);
        assert!((dphi - (6.2 - 2.0 * PI)).abs() < EPS);
        assert!(dphi.abs() < 0.1);
    }

    #[test]
    fn delta_r_combines_eta_and_phi() {
        let a = LorentzVector::from_pt_eta_phi_m(10.0, 0.3, 0.0, 0.0);
        let b = LorentzVector::from_pt_eta_phi_m(20.0, 0.0, 0.4, 0.0);
        assert!((a.delta_r(&b) - 0.5).abs() < EPS);
    }

    #[test]
    fn back_to_back_massless_pair_mass() {
        // Two 45.6 GeV massless particles back to back in the transverse
        // plane have an invariant mass of 91.2 GeV.
        let a = LorentzVector::from_pt_eta_phi_m(45.6, 0.0, 0.0, 0.0);
        let b = LorentzVector::from_pt_eta_phi_m(45.6, 0.0, PI, 0.0);
        assert!(((a + b).m() - 91.2).abs() < 1e-9);
    }

    #[test]
    fn space_like_mass_is_negative() {
        let v = LorentzVector::new(3.0, 0.0, 4.0, 3.0);
        assert!((v.m() + 4.0).abs() < EPS);
    }

    #[test]
    fn transverse_mass_uses_energy_and_pz() {
        let v = LorentzVector::new(3.0, 4.0, 12.0, 13.0);
        assert!((v.mt() - 5.0).abs() < EPS);
    }

    #[test]
    fn beam_axis_eta_is_finite() {
        let v = LorentzVector::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(v.eta(), BEAM_AXIS_ETA);
        let w = LorentzVector::new(0.0, 0.0, -5.0, 5.0);
        assert_eq!(w.eta(), -BEAM_AXIS_ETA);
    }

    #[test]
    fn scaled_preserves_direction() {
        let v = LorentzVector::from_pt_eta_phi_m(50.0, -0.7, 1.0, 10.0);
        let s = v.scaled(1.02);
        assert!((s.pt() - 51.0).abs() < 1e-9);
        assert!((s.eta() - v.eta()).abs() < EPS);
        assert!((s.phi() - v.phi()).abs() < EPS);
    }

    #[test]
    fn sum_of_vectors() {
        let vs = [
            LorentzVector::new(1.0, 0.0, 0.0, 2.0),
            LorentzVector::new(0.0, 1.0, 0.0, 2.0),
        ];
        let total: LorentzVector = vs.iter().sum();
        assert_eq!(total, LorentzVector::new(1.0, 1.0, 0.0, 4.0));
    }

    #[test]
    fn transverse_polar_components() {
        let t = TransverseVector::from_polar(2.0, PI / 2.0);
        assert!(t.x().abs() < EPS);
        assert!((t.y() - 2.0).abs() < EPS);
        assert!((t.phi() - PI / 2.0).abs() < EPS);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrapped_phi_in_range(phi in -100.0f64..100.0) {
                let w = wrap_phi(phi);
                prop_assert!((-PI..PI).contains(&w));
            }

            #[test]
            fn delta_r_is_symmetric(
                eta1 in -2.5f64..2.5, phi1 in -3.14f64..3.14,
                eta2 in -2.5f64..2.5, phi2 in -3.14f64..3.14,
            ) {
                let a = LorentzVector::from_pt_eta_phi_m(20.0, eta1, phi1, 0.0);
                let b = LorentzVector::from_pt_eta_phi_m(30.0, eta2, phi2, 0.0);
                prop_assert!((a.delta_r(&b) - b.delta_r(&a)).abs() < 1e-9);
            }
        }
    }
}
