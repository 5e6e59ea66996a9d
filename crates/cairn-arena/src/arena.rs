//! The fixed-capacity bump arena.
//!
//! [`Arena`] owns its buffer inline and hands out disjoint sub-regions by
//! advancing a cursor. It never grows and never falls back to the heap: a
//! request that does not fit is rejected with [`ArenaError::OutOfSpace`]
//! and leaves the cursor where it was. Space is only given back when the
//! most recent allocation is returned (LIFO), or when the whole arena is
//! reset or dropped.

#![allow(unsafe_code)]

use std::cell::{Cell, UnsafeCell};
use std::fmt;
use std::mem::{self, MaybeUninit};
use std::ptr::NonNull;

use cairn_core::ArenaError;

use crate::align::{align_up, dangling};
use crate::config::AlignMode;
use crate::handle::ArenaAlloc;
use crate::storage::{Bytes, Storage};

/// A bump allocator over an owned, fixed-size buffer.
///
/// The capacity comes from the storage type `S` and the alignment mode
/// from `ALIGN` (see [`AlignMode`]). Both are fixed at compile time.
///
/// The cursor lives in a `Cell`, so allocation only needs `&self` and any
/// number of [`ArenaAlloc`] handles can share one arena. The arena is
/// therefore `!Sync`; one arena per thread, or external locking, is the
/// only supported concurrent use.
///
/// ```compile_fail
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<cairn_arena::ByteArena<16>>();
/// ```
///
/// Allocations are raw pointers into the inline buffer. Moving, resetting
/// or dropping the arena invalidates every one of them. Typed handles
/// borrow the arena, which rules all three out while a handle is alive.
pub struct Arena<S: Storage, const ALIGN: bool = true> {
    /// Backing bytes. The arena never reads or writes them itself.
    buffer: UnsafeCell<MaybeUninit<S>>,
    /// Offset of the first free byte, `0 <= cursor <= S::CAPACITY`.
    cursor: Cell<usize>,
}

/// An arena over exactly `C` bytes.
pub type ByteArena<const C: usize, const ALIGN: bool = true> = Arena<Bytes<C>, ALIGN>;

impl<S: Storage, const ALIGN: bool> Arena<S, ALIGN> {
    /// Usable bytes in the buffer.
    pub const CAPACITY: usize = S::CAPACITY;

    /// Strictest alignment an aligned-mode request may ask for.
    pub const MAX_ALIGN: usize = mem::align_of::<S>();

    /// Create an empty arena with the cursor at zero.
    pub const fn new() -> Self {
        Self {
            buffer: UnsafeCell::new(MaybeUninit::uninit()),
            cursor: Cell::new(0),
        }
    }

    /// Bump-allocate room for `count` values of `size` bytes each.
    ///
    /// In aligned mode the cursor is first rounded up to `align`; in
    /// packed mode the region starts exactly at the cursor. On success the
    /// cursor moves to the end of the returned region.
    ///
    /// A `count` of zero returns a dangling pointer aligned to `align`
    /// without touching the cursor.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidAlignment`] if `align` is not a power of two.
    /// - [`ArenaError::UnsupportedAlignment`] in aligned mode if `align`
    ///   exceeds [`MAX_ALIGN`](Self::MAX_ALIGN).
    /// - [`ArenaError::OutOfSpace`] if the region would extend past the
    ///   end of the buffer.
    pub fn allocate(
        &self,
        count: usize,
        size: usize,
        align: usize,
    ) -> Result<NonNull<u8>, ArenaError> {
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }
        if count == 0 {
            return Ok(dangling(align));
        }

        let cursor = self.cursor.get();
        let start = if ALIGN {
            if align > Self::MAX_ALIGN {
                return Err(ArenaError::UnsupportedAlignment {
                    align,
                    max: Self::MAX_ALIGN,
                });
            }
            align_up(cursor, align)
        } else {
            Some(cursor)
        };

        let placement = start.and_then(|start| {
            let end = start.checked_add(count.checked_mul(size)?)?;
            (end <= S::CAPACITY).then_some((start, end))
        });
        let Some((start, end)) = placement else {
            let requested = count.saturating_mul(size);
            let remaining = S::CAPACITY - cursor;
            tracing::debug!(requested, remaining, "arena allocation rejected");
            return Err(ArenaError::OutOfSpace {
                requested,
                remaining,
            });
        };

        self.cursor.set(end);
        // SAFETY: `start <= end <= S::CAPACITY <= size_of::<S>()`, so the
        // offset stays within (or one past) the buffer.
        Ok(unsafe { self.base().add(start) })
    }

    /// Give back `count` values of `size` bytes starting at `ptr`.
    ///
    /// Space is reclaimed only when the region ends exactly at the cursor,
    /// i.e. it is the most recent live allocation; the cursor then rewinds
    /// to the start of the region. Every other call is ignored and the
    /// space stays used until the arena is reset or dropped.
    ///
    /// # Safety
    ///
    /// The `count * size` bytes at `ptr` must not be read or written after
    /// this call. If they form the most recent allocation, the next request
    /// is served from the same address.
    ///
    /// Handing back a block that is still in use therefore needs `unsafe`:
    ///
    /// ```compile_fail,E0133
    /// let arena = cairn_arena::ByteArena::<16>::new();
    /// let live = arena.allocate(1, 8, 8).unwrap();
    /// arena.deallocate(live, 1, 8);
    /// ```
    pub unsafe fn deallocate(&self, ptr: NonNull<u8>, count: usize, size: usize) {
        let cursor = self.cursor.get();
        let tail = self
            .offset_of(ptr)
            .zip(count.checked_mul(size))
            .filter(|&(offset, bytes)| count > 0 && offset.checked_add(bytes) == Some(cursor));

        match tail {
            Some((offset, bytes)) => {
                self.cursor.set(offset);
                tracing::trace!(offset, bytes, "reclaimed tail allocation");
            }
            None => {
                tracing::trace!(count, size, cursor, "deallocation is not the tail, ignored");
            }
        }
    }

    /// A typed allocator handle over this arena.
    ///
    /// All handles from one arena share its cursor.
    pub fn handle<T>(&self) -> ArenaAlloc<'_, T, S, ALIGN> {
        ArenaAlloc::new(self)
    }

    /// Rewind the cursor to zero, releasing every allocation at once.
    ///
    /// Takes `&mut self`, so no handle can be alive across the reset.
    /// Raw pointers obtained earlier must not be used afterwards.
    pub fn reset(&mut self) {
        let used = mem::replace(self.cursor.get_mut(), 0);
        tracing::trace!(used, "arena reset");
    }

    /// Total usable bytes.
    pub fn capacity(&self) -> usize {
        S::CAPACITY
    }

    /// Bytes consumed so far, i.e. the cursor position.
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        S::CAPACITY - self.cursor.get()
    }

    /// The alignment mode selected by `ALIGN`.
    pub const fn align_mode(&self) -> AlignMode {
        AlignMode::from_flag(ALIGN)
    }

    /// Address of the first byte of the buffer.
    ///
    /// This address is the arena's identity while it stays in place.
    pub fn base(&self) -> NonNull<u8> {
        // SAFETY: `UnsafeCell::get` returns a pointer derived from a
        // reference to a live field, which is never null.
        unsafe { NonNull::new_unchecked(self.buffer.get().cast::<u8>()) }
    }

    /// Offset of `ptr` from the start of the buffer, if it falls within
    /// `[base, base + capacity]`. The end address is included so that
    /// empty regions at the very end still resolve.
    pub fn offset_of(&self, ptr: NonNull<u8>) -> Option<usize> {
        let offset = ptr
            .as_ptr()
            .addr()
            .checked_sub(self.base().as_ptr().addr())?;
        (offset <= S::CAPACITY).then_some(offset)
    }

    /// Whether `ptr` addresses a byte inside the buffer.
    pub fn contains(&self, ptr: NonNull<u8>) -> bool {
        self.offset_of(ptr).is_some_and(|offset| offset < S::CAPACITY)
    }
}

impl<S: Storage, const ALIGN: bool> Default for Arena<S, ALIGN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Storage, const ALIGN: bool> fmt::Debug for Arena<S, ALIGN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &S::CAPACITY)
            .field("used", &self.cursor.get())
            .field("align_mode", &self.align_mode())
            .finish()
    }
}
