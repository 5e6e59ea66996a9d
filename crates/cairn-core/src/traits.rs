//! The element allocator interface implemented by typed arena handles.

#![allow(unsafe_code)]

use std::ptr::NonNull;

use crate::error::ArenaError;

/// A typed allocator view: hands out storage for `count` values of
/// [`Value`](ElementAllocator::Value) at a time.
///
/// Equality is identity of the underlying storage, not structural
/// equality: two allocators compare equal iff memory obtained from one
/// may be handed back to the other.
pub trait ElementAllocator: Clone + PartialEq {
    /// The element type this view allocates for.
    type Value;

    /// The same allocator, viewed for element type `U`.
    type Rebind<U>: ElementAllocator<Value = U>;

    /// Reserve uninitialised storage for `count` contiguous values.
    ///
    /// A `count` of zero returns a dangling, well-aligned pointer without
    /// consuming any space.
    fn allocate(&self, count: usize) -> Result<NonNull<Self::Value>, ArenaError>;

    /// Return storage previously obtained from [`allocate`](Self::allocate)
    /// with the same `count`.
    ///
    /// Implementations may ignore the call; the storage is then reclaimed
    /// when the backing memory itself goes away.
    ///
    /// # Safety
    ///
    /// The `count` values at `ptr` must not be read or written after this
    /// call. The storage may be handed out again by the next `allocate`.
    unsafe fn deallocate(&self, ptr: NonNull<Self::Value>, count: usize);

    /// Produce a view for element type `U` that shares this allocator's
    /// backing state.
    ///
    /// The result compares equal to `self`.
    fn rebind<U>(&self) -> Self::Rebind<U>;
}
