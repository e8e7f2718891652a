//! The event-record collaborator.
//!
//! Reading events from files is outside this workspace. An [`EventSource`]
//! fills an [`EventStore`] for one entry at a time; everything downstream
//! works on the store.

use crate::error::StoreError;
use crate::store::EventStore;

/// A random-access sequence of events.
pub trait EventSource {
    /// Number of entries available.
    fn entry_count(&self) -> u64;

    /// Refill `store` with entry `entry`.
    ///
    /// Implementations call [`EventStore::begin_event`] first. Entries at or
    /// beyond [`entry_count`](EventSource::entry_count) yield
    /// [`StoreError::EntryOutOfRange`].
    fn load_entry(&mut self, entry: u64, store: &mut EventStore) -> Result<(), StoreError>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn entry_count(&self) -> u64 {
        (**self).entry_count()
    }

    fn load_entry(&mut self, entry: u64, store: &mut EventStore) -> Result<(), StoreError> {
        (**self).load_entry(entry, store)
    }
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn entry_count(&self) -> u64 {
        (**self).entry_count()
    }

    fn load_entry(&mut self, entry: u64, store: &mut EventStore) -> Result<(), StoreError> {
        (**self).load_entry(entry, store)
    }
}
