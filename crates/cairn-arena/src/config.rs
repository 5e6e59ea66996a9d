//! Alignment mode and arena sizing.
//!
//! Arenas are configured entirely at compile time: the backing storage
//! type fixes the capacity and a const flag fixes the alignment mode.
//! [`AlignMode`] is the runtime view of that flag.

use std::mem;

/// Whether allocations are rounded up to the element alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignMode {
    /// The cursor is rounded up to each request's alignment before
    /// placing it. Costs up to `align - 1` bytes of padding per request.
    #[default]
    Aligned,
    /// Requests are placed byte-adjacent with no padding. Pointers may be
    /// unaligned for their type and must be accessed with
    /// `read_unaligned` / `write_unaligned`.
    Packed,
}

impl AlignMode {
    /// The mode selected by an arena's `ALIGN` flag.
    pub const fn from_flag(aligned: bool) -> Self {
        if aligned {
            Self::Aligned
        } else {
            Self::Packed
        }
    }

    /// `true` for [`AlignMode::Aligned`].
    pub const fn is_aligned(self) -> bool {
        matches!(self, Self::Aligned)
    }
}

/// Bytes an arena needs to serve one allocation of `count` values of `T`
/// regardless of where the cursor stands.
///
/// In aligned mode this adds the worst-case padding of
/// `align_of::<T>() - 1` bytes. Usable as a const generic argument:
///
/// ```rust
/// use cairn_arena::config::{capacity_for, AlignMode};
/// use cairn_arena::ByteArena;
///
/// let arena = ByteArena::<{ capacity_for::<u64>(4, AlignMode::Aligned) }>::new();
/// assert_eq!(arena.capacity(), 39);
/// assert!(arena.handle::<u64>().allocate(4).is_ok());
/// ```
pub const fn capacity_for<T>(count: usize, mode: AlignMode) -> usize {
    let bytes = count * mem::size_of::<T>();
    match mode {
        AlignMode::Aligned if bytes > 0 => bytes + mem::align_of::<T>() - 1,
        _ => bytes,
    }
}
