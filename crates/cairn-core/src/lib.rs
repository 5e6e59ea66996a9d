//! Core types and traits for the Cairn fixed-capacity storage crates.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! error taxonomy shared by the arena and the bounded sequence, and the
//! [`ElementAllocator`] trait that typed arena handles implement.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod traits;

pub use error::{ArenaError, SequenceError};
pub use traits::ElementAllocator;
