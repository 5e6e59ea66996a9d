//! Fixed-capacity bump allocation for Cairn.
//!
//! An [`Arena`] owns one fixed-size buffer and a cursor. Requests are served
//! by rounding the cursor up to the element alignment (or not, in packed
//! mode) and advancing it past the new region. The arena never grows: a
//! request that does not fit fails with [`ArenaError::OutOfSpace`].
//!
//! # Architecture
//!
//! ```text
//! Arena<S, ALIGN>
//! ├── buffer: S (Bytes<C> | Slots<T, N>), inline, >= 64-byte aligned
//! ├── cursor: Cell<usize>, 0 ..= S::CAPACITY
//! └── ArenaAlloc<'a, T> × any (borrowed views, shared cursor)
//!     ├── ElementAllocator  (typed allocate / deallocate / rebind)
//!     └── allocator_api2::Allocator  (aligned mode only)
//! ```
//!
//! # Reclaiming space
//!
//! Only the most recent live allocation can be handed back. Anything else
//! stays consumed until [`Arena::reset`] or drop.
//!
//! # Unsafe code
//!
//! Confined to `arena.rs` (pointer offsetting into the inline buffer),
//! `storage.rs` (the `Storage` capacity contract), `handle.rs` and
//! `alloc_api.rs` (the allocator traits). The rest of the crate denies it.
//!
//! Handing memory back is `unsafe`: a tail block returned while still in
//! use would be served again by the next allocation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod align;
mod alloc_api;
pub mod arena;
pub mod config;
pub mod handle;
pub mod storage;

// Public re-exports for the primary API surface.
pub use arena::{Arena, ByteArena};
pub use cairn_core::ArenaError;
pub use config::AlignMode;
pub use handle::ArenaAlloc;
pub use storage::{Bytes, Slots, Storage};
