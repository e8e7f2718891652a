//! Error types shared across hepsel crates.

use std::error::Error;
use std::fmt;

/// Errors from combinatorial pair searches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PairingError {
    /// No same-flavour opposite-sign pair exists among the candidates.
    ///
    /// This is a caller precondition violation: check `has_sfos` before
    /// asking for the best Z candidate.
    NoCandidatePair {
        /// Number of leptons that were scanned.
        candidates: usize,
    },
}

impl fmt::Display for PairingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCandidatePair { candidates } => {
                write!(f, "no SFOS pair among {candidates} leptons")
            }
        }
    }
}

impl Error for PairingError {}
