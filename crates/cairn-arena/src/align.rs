//! Alignment arithmetic for cursor placement.

use std::ptr::{self, NonNull};

/// Round `offset` up to the next multiple of `align`.
///
/// `align` must be a power of two. Returns `None` if the rounded value
/// does not fit in a `usize`.
///
/// # Examples
///
/// ```rust
/// use cairn_arena::align::align_up;
///
/// assert_eq!(align_up(0, 4), Some(0));
/// assert_eq!(align_up(13, 8), Some(16));
/// assert_eq!(align_up(usize::MAX, 2), None);
/// ```
pub const fn align_up(offset: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    let mask = align - 1;
    match offset.checked_add(mask) {
        Some(bumped) => Some(bumped & !mask),
        None => None,
    }
}

/// A non-null pointer with address `align`, used for empty allocations.
///
/// It carries no provenance and must never be dereferenced.
pub(crate) fn dangling(align: usize) -> NonNull<u8> {
    NonNull::new(ptr::without_provenance_mut(align)).unwrap_or(NonNull::dangling())
}
