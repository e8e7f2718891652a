//! Test utilities and mock types for hepsel development.
//!
//! Provides an owned [`EventFixture`] with a fluent builder, a
//! [`MockEventSource`] implementing [`EventSource`], and object builders in
//! [`fixtures`] for constructing test scenarios.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use hepsel_core::{Electron, EventInfo, Generation, Jet, Met, Muon, Photon, Tau};
use hepsel_store::{EventSource, EventStore, StoreError};

/// One event's worth of owned objects.
///
/// [`fill`](EventFixture::fill) copies everything into a store, so the same
/// fixture can be replayed into any number of stores.
#[derive(Clone, Debug, Default)]
pub struct EventFixture {
    pub info: EventInfo,
    pub electrons: Vec<Electron>,
    pub muons: Vec<Muon>,
    pub taus: Vec<Tau>,
    pub jets: Vec<Jet>,
    pub photons: Vec<Photon>,
    pub mets: Vec<Met>,
}

impl EventFixture {
    pub fn builder(info: EventInfo) -> EventBuilder {
        EventBuilder {
            fixture: Self {
                info,
                ..Self::default()
            },
        }
    }

    /// Start a new event in `store` and push every object.
    pub fn fill(&self, store: &mut EventStore) -> Generation {
        let generation = store.begin_event(self.info.clone());
        for e in &self.electrons {
            store.push(e.clone());
        }
        for m in &self.muons {
            store.push(m.clone());
        }
        for t in &self.taus {
            store.push(t.clone());
        }
        for j in &self.jets {
            store.push(j.clone());
        }
        for p in &self.photons {
            store.push(p.clone());
        }
        for met in &self.mets {
            store.insert_met(met.clone());
        }
        generation
    }

    /// A fresh store holding only this event.
    pub fn to_store(&self) -> EventStore {
        let mut store = EventStore::new();
        self.fill(&mut store);
        store
    }
}

/// Fluent construction of an [`EventFixture`].
#[derive(Clone, Debug)]
pub struct EventBuilder {
    fixture: EventFixture,
}

impl EventBuilder {
    pub fn electron(mut self, e: Electron) -> Self {
        self.fixture.electrons.push(e);
        self
    }

    pub fn muon(mut self, m: Muon) -> Self {
        self.fixture.muons.push(m);
        self
    }

    pub fn tau(mut self, t: Tau) -> Self {
        self.fixture.taus.push(t);
        self
    }

    pub fn jet(mut self, j: Jet) -> Self {
        self.fixture.jets.push(j);
        self
    }

    pub fn photon(mut self, p: Photon) -> Self {
        self.fixture.photons.push(p);
        self
    }

    pub fn met(mut self, met: Met) -> Self {
        self.fixture.mets.push(met);
        self
    }

    pub fn build(self) -> EventFixture {
        self.fixture
    }
}

/// In-memory [`EventSource`] over a list of fixtures.
///
/// Optionally fails on one entry with [`StoreError::SourceFailed`] to
/// exercise error paths.
#[derive(Clone, Debug, Default)]
pub struct MockEventSource {
    events: Vec<EventFixture>,
    fail_at: Option<u64>,
    loads: usize,
}

impl MockEventSource {
    pub fn new(events: Vec<EventFixture>) -> Self {
        Self {
            events,
            fail_at: None,
            loads: 0,
        }
    }

    /// Make [`load_entry`](EventSource::load_entry) fail for `entry`.
    pub fn failing_at(mut self, entry: u64) -> Self {
        self.fail_at = Some(entry);
        self
    }

    /// Number of successful loads so far.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl EventSource for MockEventSource {
    fn entry_count(&self) -> u64 {
        self.events.len() as u64
    }

    fn load_entry(&mut self, entry: u64, store: &mut EventStore) -> Result<(), StoreError> {
        let count = self.entry_count();
        let fixture = usize::try_from(entry)
            .ok()
            .and_then(|i| self.events.get(i))
            .ok_or(StoreError::EntryOutOfRange { entry, count })?;
        if self.fail_at == Some(entry) {
            return Err(StoreError::SourceFailed {
                entry,
                reason: "injected failure".into(),
            });
        }
        fixture.fill(store);
        self.loads += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{met, signal_electron, signal_jet};

    #[test]
    fn fixture_fills_store() {
        let fixture = EventFixture::builder(EventInfo::default())
            .electron(signal_electron(30.0, 0.0, 0.0, -1))
            .jet(signal_jet(40.0, 1.0, 2.0))
            .met(met(50.0, 1.0))
            .build();
        let store = fixture.to_store();
        assert_eq!(store.electrons().len(), 1);
        assert_eq!(store.jets().len(), 1);
        assert!(store.met(Default::default()).is_some());
    }

    #[test]
    fn mock_source_bounds_and_failures() {
        let events = vec![EventFixture::default(), EventFixture::default()];
        let mut source = MockEventSource::new(events).failing_at(1);
        let mut store = EventStore::new();
        assert_eq!(source.entry_count(), 2);
        assert!(source.load_entry(0, &mut store).is_ok());
        assert!(matches!(
            source.load_entry(1, &mut store),
            Err(StoreError::SourceFailed { entry: 1, .. })
        ));
        assert_eq!(
            source.load_entry(2, &mut store),
            Err(StoreError::EntryOutOfRange { entry: 2, count: 2 })
        );
        assert_eq!(source.loads(), 1);
    }
}
