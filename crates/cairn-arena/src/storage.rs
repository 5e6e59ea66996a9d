//! Fixed-size backing storage for arenas.
//!
//! A storage type only describes a layout: its size bounds the arena's
//! capacity and its alignment bounds the alignments the arena can honour.
//! Arenas hold it as `MaybeUninit`, so it is never constructed or dropped.

#![allow(unsafe_code)]

use std::mem;

/// A fixed-size region an [`Arena`](crate::Arena) bump-allocates from.
///
/// # Safety
///
/// [`CAPACITY`](Storage::CAPACITY) must not exceed `size_of::<Self>()`.
/// The arena hands out pointers up to `CAPACITY` bytes past the start of
/// the region.
pub unsafe trait Storage: Sized {
    /// Number of bytes available for allocation.
    const CAPACITY: usize;
}

/// Exactly `C` bytes, aligned to 64.
///
/// The alignment exceeds what most element types need, so aligned-mode
/// rounding of the cursor offset also aligns the resulting address.
#[repr(C, align(64))]
pub struct Bytes<const C: usize>(#[allow(dead_code)] [u8; C]);

// SAFETY: `Bytes<C>` contains a `[u8; C]`, so it spans at least `C` bytes.
unsafe impl<const C: usize> Storage for Bytes<C> {
    const CAPACITY: usize = C;
}

/// Room for exactly `N` values of `T`, aligned to 64 or to `T`,
/// whichever is stricter.
#[repr(C, align(64))]
pub struct Slots<T, const N: usize>(#[allow(dead_code)] [T; N]);

// SAFETY: `Slots<T, N>` contains a `[T; N]`, which spans
// `N * size_of::<T>()` bytes.
unsafe impl<T, const N: usize> Storage for Slots<T, N> {
    const CAPACITY: usize = N * mem::size_of::<T>();
}
