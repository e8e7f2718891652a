//! Jets and photons.

use crate::particle::{ObjectKind, Particle};
use crate::traits::impl_physics_object;

/// A reconstructed hadronic jet.
#[derive(Clone, Debug, PartialEq)]
pub struct Jet {
    /// Kinematic record.
    pub particle: Particle,
    /// Position in the stored jet collection.
    pub index: usize,
    /// MV1 b-tagging discriminant.
    pub mv1: f64,
    /// Jet vertex fraction, used for pileup rejection.
    pub jvf: f64,
    /// Truth flavour label (5 for b, 4 for c, 0 for light).
    pub truth_label: i32,
}

impl Jet {
    /// A jet with full vertex fraction and no b-tag weight.
    pub fn new(particle: Particle) -> Self {
        Self {
            particle,
            index: 0,
            mv1: 0.0,
            jvf: 1.0,
            truth_label: 0,
        }
    }
}

impl_physics_object!(Jet, ObjectKind::Jet);

/// A reconstructed photon.
#[derive(Clone, Debug, PartialEq)]
pub struct Photon {
    /// Kinematic record.
    pub particle: Particle,
    /// Position in the stored photon collection.
    pub index: usize,
    /// Tight identification.
    pub tight: bool,
    /// Isolation working point.
    pub isolated: bool,
    /// Converted photon.
    pub is_conv: bool,
}

impl Photon {
    /// An unconverted, tight, isolated photon.
    pub fn new(particle: Particle) -> Self {
        Self {
            particle,
            index: 0,
            tight: true,
            isolated: true,
            is_conv: false,
        }
    }
}

impl_physics_object!(Photon, ObjectKind::Photon);
