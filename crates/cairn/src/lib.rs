//! Cairn: fixed-capacity bump arenas and capacity-bounded sequences.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the Cairn sub-crates. Nothing here ever grows: an arena serves requests
//! from one inline buffer until it is exhausted, and a bounded sequence
//! holds at most `N` elements drawn from its own arena.
//!
//! # Quick start
//!
//! ```rust
//! use cairn::prelude::*;
//!
//! let mut scores = BoundedSequence::<u32, 3>::new();
//! scores.push(10).unwrap();
//! scores.push(20).unwrap();
//! scores.push(30).unwrap();
//!
//! // The fourth push is rejected and the value handed back.
//! let rejected = scores.push(40).unwrap_err();
//! assert_eq!(rejected.into_element(), 40);
//! assert_eq!(scores.iter().sum::<u32>(), 60);
//!
//! // A raw arena: 24 bytes, aligned mode.
//! let arena = ByteArena::<24>::new();
//! let ints = arena.handle::<i32>();
//! ints.allocate(3).unwrap();
//! assert!(matches!(ints.allocate(4), Err(ArenaError::OutOfSpace { .. })));
//! assert_eq!(arena.used(), 12);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `cairn-arena` | `Arena`, storages, typed handles, alignment config |
//! | [`seq`] | `cairn-seq` | `BoundedSequence`, `CapacityError` |
//! | [`types`] | `cairn-core` | Error taxonomy and the `ElementAllocator` trait |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Bump arenas, backing storages and typed handles (`cairn-arena`).
pub use cairn_arena as arena;

/// Capacity-bounded sequences (`cairn-seq`).
pub use cairn_seq as seq;

/// Error types and the allocator trait (`cairn-core`).
pub use cairn_core as types;

/// Common imports for typical Cairn usage.
///
/// ```rust
/// use cairn::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use cairn_arena::{AlignMode, Arena, ArenaAlloc, ByteArena, Bytes, Slots, Storage};

    // Sequence
    pub use cairn_seq::{BoundedSequence, CapacityError};

    // Core types and traits
    pub use cairn_core::{ArenaError, ElementAllocator, SequenceError};
}
