//! Core types and traits for hepsel.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! reconstructed-object model every other crate works on: four-vectors,
//! systematic variants, leptons, jets, photons, missing energy, per-event
//! metadata, and the traits that let selection code treat them uniformly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod id;
pub mod jet;
pub mod lepton;
pub mod lorentz;
pub mod met;
pub mod particle;
pub mod traits;
pub mod variant;

pub use error::PairingError;
pub use event::{AnalysisType, EventInfo};
pub use id::{DatasetId, EventNumber, Generation, RunNumber};
pub use jet::{Jet, Photon};
pub use lepton::{Electron, Flavor, LeptonCommon, Muon, Tau, TriggerBits};
pub use lorentz::{LorentzVector, TransverseVector};
pub use met::Met;
pub use particle::{ObjectKind, Particle};
pub use traits::{Kinematic, Lepton, PhysicsObject};
pub use variant::{SystematicVariant, VariantShifts};
