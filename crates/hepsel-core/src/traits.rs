//! Capability traits shared by all reconstructed objects.
//!
//! Selection code is written against these traits rather than concrete
//! types so the same overlap and pairing routines serve stored objects,
//! borrowed views of them, and the flavour-tagged lepton sum type.

use crate::lepton::{Flavor, LeptonCommon};
use crate::lorentz::LorentzVector;
use crate::particle::{ObjectKind, Particle};
use crate::variant::SystematicVariant;

/// Anything with a four-momentum.
pub trait Kinematic {
    /// The current four-momentum.
    fn p4(&self) -> &LorentzVector;

    /// Transverse momentum.
    fn pt(&self) -> f64 {
        self.p4().pt()
    }

    /// Pseudorapidity.
    fn eta(&self) -> f64 {
        self.p4().eta()
    }

    /// Azimuth.
    fn phi(&self) -> f64 {
        self.p4().phi()
    }

    /// Angular distance to another object.
    fn delta_r<K: Kinematic + ?Sized>(&self, other: &K) -> f64
    where
        Self: Sized,
    {
        self.p4().delta_r(other.p4())
    }
}

impl<T: Kinematic + ?Sized> Kinematic for &T {
    fn p4(&self) -> &LorentzVector {
        (**self).p4()
    }
}

/// A stored reconstructed object with a systematic-variant state.
pub trait PhysicsObject: Kinematic {
    /// Identity tag of the concrete type.
    const KIND: ObjectKind;

    /// The kinematic record.
    fn particle(&self) -> &Particle;

    /// Mutable kinematic record.
    fn particle_mut(&mut self) -> &mut Particle;

    /// Switch the four-momentum to `variant`. Scalar attributes are never
    /// touched.
    fn set_state(&mut self, variant: SystematicVariant) {
        self.particle_mut().set_state(variant);
    }

    /// The variant the four-momentum currently reflects.
    fn state(&self) -> SystematicVariant {
        self.particle().state()
    }
}

/// Common lepton capabilities, dispatched by flavour tag.
pub trait Lepton: Kinematic {
    /// Lepton flavour.
    fn flavor(&self) -> Flavor;

    /// Attributes shared by all lepton flavours.
    fn common(&self) -> &LeptonCommon;

    /// Electric charge, ±1.
    fn charge(&self) -> i32 {
        self.common().charge
    }

    /// Whether this is an electron.
    fn is_ele(&self) -> bool {
        self.flavor() == Flavor::Electron
    }

    /// Whether this is a muon.
    fn is_mu(&self) -> bool {
        self.flavor() == Flavor::Muon
    }

    /// Whether this is a tau.
    fn is_tau(&self) -> bool {
        self.flavor() == Flavor::Tau
    }

    /// Transverse impact-parameter significance `d0 / σ(d0)`.
    ///
    /// Not absolute-valued; callers apply `|x| < cut`.
    fn d0_sig(&self) -> f64 {
        let c = self.common();
        c.d0 / c.err_d0
    }

    /// Longitudinal impact parameter `z0 · sin θ`.
    ///
    /// Not absolute-valued; callers apply `|x| < cut`.
    fn z0_sin_theta(&self) -> f64 {
        self.common().z0 * self.p4().theta().sin()
    }
}

impl<T: Lepton + ?Sized> Lepton for &T {
    fn flavor(&self) -> Flavor {
        (**self).flavor()
    }

    fn common(&self) -> &LeptonCommon {
        (**self).common()
    }
}

/// Implements [`Kinematic`] and [`PhysicsObject`] for a struct holding a
/// `particle: Particle` field.
macro_rules! impl_physics_object {
    ($ty:ty, $kind:expr) => {
        impl $crate::traits::Kinematic for $ty {
            fn p4(&self) -> &$crate::lorentz::LorentzVector {
                self.particle.p4()
            }
        }

        impl $crate::traits::PhysicsObject for $ty {
            const KIND: $crate::particle::ObjectKind = $kind;

            fn particle(&self) -> &$crate::particle::Particle {
                &self.particle
            }

            fn particle_mut(&mut self) -> &mut $crate::particle::Particle {
                &mut self.particle
            }
        }
    };
}

pub(crate) use impl_physics_object;
