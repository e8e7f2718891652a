//! hepsel: object selection and derived kinematics for collider events.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! hepsel sub-crates. For most users, adding `hepsel` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hepsel::prelude::*;
//! use std::f64::consts::PI;
//!
//! // One event: an e+e- pair near the Z mass.
//! let mut store = EventStore::new();
//! store.begin_event(EventInfo::default());
//! for (pt, eta, phi, q) in [(40.0, 0.65, 0.0, 1), (35.0, -0.65, PI, -1)] {
//!     let mut e = Electron::new(
//!         Particle::from_pt_eta_phi_m(pt, eta, phi, 0.0),
//!         LeptonCommon::with_charge(q),
//!     );
//!     e.tight_llh = true;
//!     store.push(e);
//! }
//! store.insert_met(Met::new(40.0, 1.2));
//!
//! let selector = Selector::new(SelectionConfig::default())?;
//! let event = selector.select(&mut store, SystematicVariant::Nominal)?;
//! let leptons = event.signal.leptons();
//! assert_eq!(leptons.len(), 2);
//! assert!(has_z(&leptons, 10.0));
//! assert_eq!(best_z(&leptons)?, (0, 1));
//! assert!(mt2(&leptons, event.require_met()?) >= 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `hepsel-core` | Four-vectors, variants, object records, core traits |
//! | [`store`] | `hepsel-store` | Per-event store, handles, event sources |
//! | [`select`] | `hepsel-select` | Overlap removal, cuts, pairing, kinematics, pipeline |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Object model and core traits (`hepsel-core`).
///
/// Contains [`types::LorentzVector`], the systematic-variant machinery, the
/// reconstructed object records, and the [`types::Kinematic`] and
/// [`types::Lepton`] traits.
pub use hepsel_core as types;

/// Per-event object store (`hepsel-store`).
///
/// [`store::EventStore`] owns one event's collections;
/// [`store::EventSource`] is the trait event readers implement.
pub use hepsel_store as store;

/// Selection and derived quantities (`hepsel-select`).
///
/// [`select::Selector`] runs the baseline/signal pipeline; the
/// [`select::pairing`] and [`select::kinematics`] modules hold the
/// analysis-level functions.
pub use hepsel_select as select;

/// Common imports for typical hepsel usage.
///
/// ```rust
/// use hepsel::prelude::*;
///
/// let selector = Selector::default();
/// assert_eq!(selector.analysis(), AnalysisType::ThreeLep);
/// ```
pub mod prelude {
    // Object model
    pub use hepsel_core::{
        AnalysisType, Electron, EventInfo, Flavor, Jet, Kinematic, Lepton, LeptonCommon,
        LorentzVector, Met, Muon, PairingError, Particle, Photon, PhysicsObject,
        SystematicVariant, Tau, TransverseVector,
    };

    // Store
    pub use hepsel_store::{EventSource, EventStore, Handle, ObjRef, StoreError};

    // Selection
    pub use hepsel_select::{
        LeptonRef, ObjectSet, SelectedEvent, SelectionConfig, SelectionError, Selector, Stage,
        TopTagMode,
    };

    // Analysis functions
    pub use hepsel_select::kinematics::{mct, meff, met_rel, mll, mt, mt2};
    pub use hepsel_select::pairing::{best_z, has_b_jet, has_sfos, has_z, is_sfos};
    pub use hepsel_select::pass_top_tag;
}
