//! Per-event object store for hepsel.
//!
//! The store owns the reconstructed objects of the event being processed.
//! Selection code never copies or moves the records; it works on
//! collections of [`ObjRef`] views whose lifetime is bounded by a borrow of
//! the store.
//!
//! # Lifecycle
//!
//! 1. [`EventSource::load_entry`] calls [`EventStore::begin_event`] and
//!    pushes the event's objects and missing-energy records.
//! 2. [`EventStore::set_state`] switches every four-momentum to one
//!    systematic variant.
//! 3. Selection borrows the store and builds `Vec<ObjRef<'_, T>>`
//!    collections.
//! 4. The next `begin_event` bumps the generation; any [`Handle`] kept from
//!    the previous event is now stale.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod source;
pub mod store;

pub use config::StoreConfig;
pub use error::StoreError;
pub use handle::{Handle, ObjRef};
pub use source::EventSource;
pub use store::{EventStore, StoredObject};
