//! Error types for arena allocation and bounded sequences.
//!
//! Failures are returned as values; nothing in the Cairn crates panics on
//! an exhausted arena or a full sequence. Callers that consider these
//! conditions fatal opt in themselves (e.g. with `expect`).

use std::error::Error;
use std::fmt;

/// Errors from bump allocation in a fixed-capacity arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The request does not fit in the space left after the cursor
    /// (including any alignment padding). The cursor is left unchanged.
    OutOfSpace {
        /// Number of bytes requested, excluding padding.
        requested: usize,
        /// Bytes between the cursor and the end of the buffer.
        remaining: usize,
    },
    /// The requested alignment is not a power of two.
    InvalidAlignment {
        /// The offending alignment.
        align: usize,
    },
    /// The requested alignment is stricter than the backing storage's
    /// own alignment, so rounding the offset would not align the address.
    UnsupportedAlignment {
        /// The requested alignment.
        align: usize,
        /// The strictest alignment this arena can honour.
        max: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena out of space: requested {requested} bytes, {remaining} bytes remaining"
                )
            }
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {align} is not a power of two")
            }
            Self::UnsupportedAlignment { align, max } => {
                write!(
                    f,
                    "alignment {align} exceeds the arena's storage alignment of {max}"
                )
            }
        }
    }
}

impl Error for ArenaError {}

/// Errors from bounded sequence insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// The sequence already holds its fixed maximum number of elements.
    CapacityExceeded {
        /// The fixed element capacity.
        capacity: usize,
    },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "sequence capacity of {capacity} elements exceeded")
            }
        }
    }
}

impl Error for SequenceError {}
