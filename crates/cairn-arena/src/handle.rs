//! Typed allocator handles over an arena.
//!
//! An [`ArenaAlloc`] is a borrowed view of an [`Arena`] that allocates in
//! units of `T`. It holds no state of its own: the cursor stays in the
//! arena, so copies and rebinds of a handle always see the same free
//! space and can never hand out overlapping regions.

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use cairn_core::{ArenaError, ElementAllocator};

use crate::arena::Arena;
use crate::storage::Storage;

/// An allocator for values of `T`, backed by a borrowed [`Arena`].
///
/// Handles are `Copy`. Two handles compare equal iff they borrow the same
/// arena, whatever their element types.
///
/// In packed mode (`ALIGN = false`) returned pointers may be unaligned
/// for `T`; access them with `read_unaligned` / `write_unaligned`.
pub struct ArenaAlloc<'a, T, S: Storage, const ALIGN: bool = true> {
    arena: &'a Arena<S, ALIGN>,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T, S: Storage, const ALIGN: bool> ArenaAlloc<'a, T, S, ALIGN> {
    /// Create a handle over `arena`.
    pub fn new(arena: &'a Arena<S, ALIGN>) -> Self {
        Self {
            arena,
            _marker: PhantomData,
        }
    }

    /// Reserve uninitialised room for `count` contiguous values of `T`.
    ///
    /// A `count` of zero returns [`NonNull::dangling`] and consumes nothing.
    pub fn allocate(&self, count: usize) -> Result<NonNull<T>, ArenaError> {
        if count == 0 {
            return Ok(NonNull::dangling());
        }
        self.arena
            .allocate(count, mem::size_of::<T>(), mem::align_of::<T>())
            .map(NonNull::cast)
    }

    /// Return `count` values at `ptr` to the arena.
    ///
    /// Only the most recent allocation is actually reclaimed; see
    /// [`Arena::deallocate`].
    ///
    /// # Safety
    ///
    /// The `count` values at `ptr` must not be read or written after this
    /// call, through this handle or any other view of the arena.
    ///
    /// ```compile_fail,E0133
    /// let arena = cairn_arena::ByteArena::<32>::new();
    /// let words = arena.handle::<u64>();
    /// let live = words.allocate(2).unwrap();
    /// words.deallocate(live, 2);
    /// ```
    pub unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { self.arena.deallocate(ptr.cast(), count, mem::size_of::<T>()) };
    }

    /// A handle for element type `U` over the same arena and cursor.
    pub fn rebind<U>(&self) -> ArenaAlloc<'a, U, S, ALIGN> {
        ArenaAlloc::new(self.arena)
    }

    /// The arena this handle allocates from.
    pub fn arena(&self) -> &'a Arena<S, ALIGN> {
        self.arena
    }
}

impl<'a, T, S: Storage, const ALIGN: bool> From<&'a Arena<S, ALIGN>>
    for ArenaAlloc<'a, T, S, ALIGN>
{
    fn from(arena: &'a Arena<S, ALIGN>) -> Self {
        Self::new(arena)
    }
}

impl<T, S: Storage, const ALIGN: bool> Clone for ArenaAlloc<'_, T, S, ALIGN> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: Storage, const ALIGN: bool> Copy for ArenaAlloc<'_, T, S, ALIGN> {}

impl<T, U, S, R, const A: bool, const B: bool> PartialEq<ArenaAlloc<'_, U, R, B>>
    for ArenaAlloc<'_, T, S, A>
where
    S: Storage,
    R: Storage,
{
    fn eq(&self, other: &ArenaAlloc<'_, U, R, B>) -> bool {
        ptr::addr_eq(self.arena, other.arena)
    }
}

impl<T, S: Storage, const ALIGN: bool> Eq for ArenaAlloc<'_, T, S, ALIGN> {}

impl<T, S: Storage, const ALIGN: bool> fmt::Debug for ArenaAlloc<'_, T, S, ALIGN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaAlloc")
            .field("element", &std::any::type_name::<T>())
            .field("arena", &self.arena.base())
            .finish()
    }
}

impl<'a, T, S: Storage, const ALIGN: bool> ElementAllocator for ArenaAlloc<'a, T, S, ALIGN> {
    type Value = T;
    type Rebind<U> = ArenaAlloc<'a, U, S, ALIGN>;

    fn allocate(&self, count: usize) -> Result<NonNull<T>, ArenaError> {
        ArenaAlloc::allocate(self, count)
    }

    unsafe fn deallocate(&self, ptr: NonNull<T>, count: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { ArenaAlloc::deallocate(self, ptr, count) };
    }

    fn rebind<U>(&self) -> ArenaAlloc<'a, U, S, ALIGN> {
        ArenaAlloc::rebind(self)
    }
}
