//! Typed object handles and borrowed object views.
//!
//! A [`Handle`] names one object in one collection of the [`EventStore`]
//! for one event. It is generation-scoped: the `generation` field allows
//! O(1) staleness checks after the store has moved on to the next event.
//!
//! An [`ObjRef`] pairs a handle with a shared borrow of the object. Selection
//! collections are `Vec<ObjRef<'a, T>>`, so removing an element from a
//! collection never touches the stored record, and the borrow of the store
//! ties every collection to the current event.
//!
//! [`EventStore`]: crate::EventStore

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::Deref;

use hepsel_core::{Flavor, Generation, Kinematic, Lepton, LeptonCommon, LorentzVector};

/// Location of an object within the event store.
///
/// Handles are `Copy` regardless of `T`; the type parameter only selects
/// which collection the index refers to.
#[must_use]
pub struct Handle<T> {
    generation: Generation,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Create a new handle.
    pub(crate) fn new(generation: Generation, index: usize) -> Self {
        Self {
            generation,
            index,
            _marker: PhantomData,
        }
    }

    /// The store generation this handle belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Position in the typed collection.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && self.index == other.index
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.generation.hash(state);
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("generation", &self.generation)
            .field("index", &self.index)
            .finish()
    }
}

impl<T> fmt::Display for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle(gen={}, idx={})", self.generation, self.index)
    }
}

/// A non-owning view of a stored object.
///
/// Dereferences to `T` and forwards the [`Kinematic`] and [`Lepton`]
/// capabilities, so selection routines accept views wherever they accept
/// the stored types.
pub struct ObjRef<'a, T> {
    handle: Handle<T>,
    object: &'a T,
}

impl<'a, T> ObjRef<'a, T> {
    pub(crate) fn new(handle: Handle<T>, object: &'a T) -> Self {
        Self { handle, object }
    }

    /// The handle this view was resolved from.
    pub fn handle(&self) -> Handle<T> {
        self.handle
    }

    /// Position in the stored collection.
    pub fn index(&self) -> usize {
        self.handle.index
    }

    /// The borrowed object, with the store's lifetime.
    pub fn get(&self) -> &'a T {
        self.object
    }
}

impl<T> Clone for ObjRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ObjRef<'_, T> {}

impl<T> PartialEq for ObjRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<T> Eq for ObjRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for ObjRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjRef")
            .field("handle", &self.handle)
            .field("object", self.object)
            .finish()
    }
}

impl<T> Deref for ObjRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.object
    }
}

impl<T: Kinematic> Kinematic for ObjRef<'_, T> {
    fn p4(&self) -> &LorentzVector {
        self.object.p4()
    }
}

impl<T: Lepton> Lepton for ObjRef<'_, T> {
    fn flavor(&self) -> Flavor {
        self.object.flavor()
    }

    fn common(&self) -> &LeptonCommon {
        self.object.common()
    }
}
