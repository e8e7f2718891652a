//! The per-event object store.
//!
//! [`EventStore`] owns every reconstructed record of one event. It is
//! refilled in place for each event: [`EventStore::begin_event`] clears the
//! collections (keeping their allocations) and bumps the generation, which
//! invalidates every [`Handle`] taken for the previous event.
//!
//! ```text
//! EventStore
//! ├── EventInfo            run/event numbers, weights
//! ├── Vec<Electron>  ─┐
//! ├── Vec<Muon>       │    one collection per object kind,
//! ├── Vec<Tau>        ├─── indexed by Handle<T>
//! ├── Vec<Jet>        │
//! ├── Vec<Photon>    ─┘
//! └── IndexMap<SystematicVariant, Met>
//! ```

use indexmap::IndexMap;

use hepsel_core::{
    Electron, EventInfo, Generation, Jet, Met, Muon, ObjectKind, Photon, PhysicsObject,
    SystematicVariant, Tau,
};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::handle::{Handle, ObjRef};

mod sealed {
    pub trait Sealed {}
}

/// Object types with a collection in the [`EventStore`].
///
/// Sealed: the store has a fixed set of collections.
pub trait StoredObject: PhysicsObject + sealed::Sealed + Sized {
    /// The collection holding this type.
    fn collection(store: &EventStore) -> &[Self];

    /// Mutable access to the collection.
    fn collection_mut(store: &mut EventStore) -> &mut Vec<Self>;

    /// Record the object's position in its collection.
    fn set_index(&mut self, index: usize);
}

macro_rules! impl_stored_object {
    ($ty:ty, $field:ident, |$obj:ident, $idx:ident| $set:expr) => {
        impl sealed::Sealed for $ty {}

        impl StoredObject for $ty {
            fn collection(store: &EventStore) -> &[Self] {
                &store.$field
            }

            fn collection_mut(store: &mut EventStore) -> &mut Vec<Self> {
                &mut store.$field
            }

            fn set_index(&mut self, $idx: usize) {
                let $obj = self;
                $set;
            }
        }
    };
}

impl_stored_object!(Electron, electrons, |e, i| e.lepton.index = i);
impl_stored_object!(Muon, muons, |m, i| m.lepton.index = i);
impl_stored_object!(Tau, taus, |t, i| t.lepton.index = i);
impl_stored_object!(Jet, jets, |j, i| j.index = i);
impl_stored_object!(Photon, photons, |p, i| p.index = i);

/// Owner of one event's reconstructed objects.
pub struct EventStore {
    generation: Generation,
    state: SystematicVariant,
    info: EventInfo,
    electrons: Vec<Electron>,
    muons: Vec<Muon>,
    taus: Vec<Tau>,
    jets: Vec<Jet>,
    photons: Vec<Photon>,
    mets: IndexMap<SystematicVariant, Met>,
}

impl EventStore {
    /// An empty store with default capacities.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// An empty store with the given capacity hints.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            generation: Generation::default(),
            state: SystematicVariant::Nominal,
            info: EventInfo::default(),
            electrons: Vec::with_capacity(config.lepton_capacity),
            muons: Vec::with_capacity(config.lepton_capacity),
            taus: Vec::with_capacity(config.lepton_capacity),
            jets: Vec::with_capacity(config.jet_capacity),
            photons: Vec::with_capacity(config.photon_capacity),
            mets: IndexMap::with_capacity(config.met_capacity),
        }
    }

    /// Clear all collections and start a new event.
    ///
    /// Returns the new generation. Handles from earlier generations resolve
    /// to [`StoreError::StaleHandle`].
    pub fn begin_event(&mut self, info: EventInfo) -> Generation {
        self.generation = self.generation.next();
        self.state = SystematicVariant::Nominal;
        self.info = info;
        self.electrons.clear();
        self.muons.clear();
        self.taus.clear();
        self.jets.clear();
        self.photons.clear();
        self.mets.clear();
        tracing::trace!(
            generation = %self.generation,
            run = %self.info.run,
            event = %self.info.event,
            "begin event"
        );
        self.generation
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Metadata of the current event.
    pub fn info(&self) -> &EventInfo {
        &self.info
    }

    /// Mutable metadata of the current event.
    pub fn info_mut(&mut self) -> &mut EventInfo {
        &mut self.info
    }

    /// The variant every stored four-momentum currently reflects.
    pub fn state(&self) -> SystematicVariant {
        self.state
    }

    /// Add an object to its collection.
    ///
    /// The object's index field is overwritten with its position and its
    /// four-momentum is switched to the store's current variant.
    pub fn push<T: StoredObject>(&mut self, mut object: T) -> Handle<T> {
        let state = self.state;
        let collection = T::collection_mut(self);
        let index = collection.len();
        object.set_index(index);
        object.set_state(state);
        collection.push(object);
        Handle::new(self.generation, index)
    }

    /// Store the missing-energy record for its variant, returning any record
    /// it replaces.
    pub fn insert_met(&mut self, met: Met) -> Option<Met> {
        self.mets.insert(met.variant, met)
    }

    /// Switch every stored object to `variant`.
    ///
    /// Only four-momenta change; scalar attributes are untouched. Switching
    /// to the current variant again is a no-op.
    pub fn set_state(&mut self, variant: SystematicVariant) {
        self.electrons.iter_mut().for_each(|o| o.set_state(variant));
        self.muons.iter_mut().for_each(|o| o.set_state(variant));
        self.taus.iter_mut().for_each(|o| o.set_state(variant));
        self.jets.iter_mut().for_each(|o| o.set_state(variant));
        self.photons.iter_mut().for_each(|o| o.set_state(variant));
        self.state = variant;
    }

    /// Number of stored objects of type `T`.
    pub fn len_of<T: StoredObject>(&self) -> usize {
        T::collection(self).len()
    }

    /// Views of every stored object of type `T`, in storage order.
    pub fn objects<T: StoredObject>(&self) -> Vec<ObjRef<'_, T>> {
        let generation = self.generation;
        T::collection(self)
            .iter()
            .enumerate()
            .map(|(i, o)| ObjRef::new(Handle::new(generation, i), o))
            .collect()
    }

    /// Views of every stored electron.
    pub fn electrons(&self) -> Vec<ObjRef<'_, Electron>> {
        self.objects()
    }

    /// Views of every stored muon.
    pub fn muons(&self) -> Vec<ObjRef<'_, Muon>> {
        self.objects()
    }

    /// Views of every stored tau.
    pub fn taus(&self) -> Vec<ObjRef<'_, Tau>> {
        self.objects()
    }

    /// Views of every stored jet.
    pub fn jets(&self) -> Vec<ObjRef<'_, Jet>> {
        self.objects()
    }

    /// Views of every stored photon.
    pub fn photons(&self) -> Vec<ObjRef<'_, Photon>> {
        self.objects()
    }

    /// Resolve a handle to a view of its object.
    pub fn resolve<T: StoredObject>(&self, handle: Handle<T>) -> Result<ObjRef<'_, T>, StoreError> {
        self.check_generation(handle)?;
        let collection = T::collection(self);
        collection
            .get(handle.index())
            .map(|o| ObjRef::new(handle, o))
            .ok_or(StoreError::OutOfBounds {
                kind: T::KIND,
                index: handle.index(),
                len: collection.len(),
            })
    }

    /// Resolve a handle for in-place modification.
    pub fn get_mut<T: StoredObject>(&mut self, handle: Handle<T>) -> Result<&mut T, StoreError> {
        self.check_generation(handle)?;
        let collection = T::collection_mut(self);
        let len = collection.len();
        collection
            .get_mut(handle.index())
            .ok_or(StoreError::OutOfBounds {
                kind: T::KIND,
                index: handle.index(),
                len,
            })
    }

    /// The missing-energy record computed under `variant`.
    ///
    /// A missing record is not an error for the store; it is logged and the
    /// caller decides.
    pub fn met(&self, variant: SystematicVariant) -> Option<&Met> {
        let met = self.mets.get(&variant);
        if met.is_none() {
            tracing::warn!(
                %variant,
                run = %self.info.run,
                event = %self.info.event,
                "no missing-energy record for variant"
            );
        }
        met
    }

    /// Every stored missing-energy record, in insertion order.
    pub fn mets(&self) -> impl Iterator<Item = &Met> + '_ {
        self.mets.values()
    }

    /// Number of stored objects of the given kind.
    pub fn count(&self, kind: ObjectKind) -> usize {
        match kind {
            ObjectKind::Electron => self.electrons.len(),
            ObjectKind::Muon => self.muons.len(),
            ObjectKind::Tau => self.taus.len(),
            ObjectKind::Jet => self.jets.len(),
            ObjectKind::Photon => self.photons.len(),
        }
    }

    fn check_generation<T>(&self, handle: Handle<T>) -> Result<(), StoreError> {
        if handle.generation() != self.generation {
            return Err(StoreError::StaleHandle {
                handle_generation: handle.generation(),
                current: self.generation,
            });
        }
        Ok(())
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}
