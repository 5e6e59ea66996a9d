//! Capacity-bounded sequences backed by a single embedded arena.
//!
//! A [`BoundedSequence<T, N>`] reserves room for exactly `N` elements from
//! its own [`Arena`](cairn_arena::Arena) when it is created and never asks
//! for more. Elements therefore never relocate while the sequence stays
//! put, and an insertion past `N` is rejected instead of growing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod sequence;

pub use cairn_core::SequenceError;
pub use error::CapacityError;
pub use sequence::BoundedSequence;
