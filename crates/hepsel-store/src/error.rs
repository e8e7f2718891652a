//! Store-specific error types.

use std::error::Error;
use std::fmt;

use hepsel_core::{Generation, ObjectKind};

/// Errors that can occur while filling or resolving from the event store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// A [`Handle`](crate::Handle) taken before the last `begin_event`.
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: Generation,
        /// The store's current generation.
        current: Generation,
    },
    /// A handle whose index is past the end of its collection.
    OutOfBounds {
        /// Collection the handle points into.
        kind: ObjectKind,
        /// Index encoded in the handle.
        index: usize,
        /// Current collection length.
        len: usize,
    },
    /// The source was asked for an entry it does not have.
    EntryOutOfRange {
        /// Requested entry.
        entry: u64,
        /// Number of entries the source holds.
        count: u64,
    },
    /// The source failed to decode an entry.
    SourceFailed {
        /// Entry being loaded.
        entry: u64,
        /// Source-provided description.
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleHandle {
                handle_generation,
                current,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, store at {current}"
                )
            }
            Self::OutOfBounds { kind, index, len } => {
                write!(f, "{kind} index {index} out of bounds (len {len})")
            }
            Self::EntryOutOfRange { entry, count } => {
                write!(f, "entry {entry} out of range ({count} entries)")
            }
            Self::SourceFailed { entry, reason } => {
                write!(f, "failed to load entry {entry}: {reason}")
            }
        }
    }
}

impl Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_collection() {
        let err = StoreError::OutOfBounds {
            kind: ObjectKind::Jet,
            index: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "jet index 4 out of bounds (len 2)");
    }

    #[test]
    fn display_stale() {
        let err = StoreError::StaleHandle {
            handle_generation: Generation(3),
            current: Generation(5),
        };
        assert_eq!(err.to_string(), "stale handle: generation 3, store at 5");
    }
}
