//! Object selection for collider events.
//!
//! Builds baseline and signal tiers of electrons, muons, taus and jets from
//! an [`EventStore`](hepsel_store::EventStore), and provides the derived
//! quantities analyses cut on: pair predicates and Z-candidate search,
//! transverse and contransverse masses, MT2, relative missing energy, and
//! the dilepton top veto.
//!
//! The [`Selector`] drives the per-event pipeline. The building blocks it
//! uses ([`OverlapRemover`], the functions in [`cuts`], [`pairing`] and
//! [`kinematics`]) are public and generic over the
//! [`Kinematic`](hepsel_core::Kinematic) and [`Lepton`](hepsel_core::Lepton)
//! traits, so they also work on plain references.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod cuts;
pub mod kinematics;
pub mod leptons;
pub mod mt2;
pub mod overlap;
pub mod pairing;
pub mod pipeline;
pub mod toptag;

pub use config::{
    BaselineCuts, ConfigError, ElectronCuts, JetCuts, MuonCuts, ObjectCuts, OverlapConfig,
    SelectionConfig,
};
pub use leptons::{build_leptons, build_leptons_with_taus, LeptonRef};
pub use mt2::Mt2Solver;
pub use overlap::{remove_sfos_pairs, OverlapRemover};
pub use pipeline::{ObjectSet, SelectedEvent, SelectionError, Selector, Stage};
pub use toptag::{pass_top_tag, TopTagMode};
