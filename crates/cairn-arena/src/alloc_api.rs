//! `allocator_api2` support, so standard-shaped containers can run over
//! an arena.
//!
//! Only aligned handles implement [`Allocator`]: the trait requires every
//! block to satisfy its layout's alignment, which packed mode does not.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;

use allocator_api2::alloc::{AllocError, Allocator};

use crate::handle::ArenaAlloc;
use crate::storage::Storage;

// SAFETY: blocks come from an aligned-mode arena, so each one is aligned
// to `layout.align()` (or the request is rejected) and disjoint from every
// other live block. The handle borrows the arena, so blocks stay valid for
// as long as the handle or any copy of it exists. All copies share one
// arena, so a block may be freed through any of them.
unsafe impl<T, S: Storage> Allocator for ArenaAlloc<'_, T, S, true> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let ptr = self
            .arena()
            .allocate(1, layout.size(), layout.align())
            .map_err(|_| AllocError)?;
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: the `Allocator` contract says `ptr` is a live block of
        // `layout` from this arena that the caller is done with.
        unsafe { self.arena().deallocate(ptr, 1, layout.size()) };
    }
}

#[cfg(test)]
mod tests {
    use allocator_api2::vec::Vec;

    use crate::arena::ByteArena;

    #[test]
    fn vec_runs_over_reserved_arena_storage() {
        let arena = ByteArena::<1024>::new();
        let mut values = Vec::with_capacity_in(10, arena.handle::<f64>());
        for i in 0..10 {
            values.push(i as f64 * 2.5);
        }
        assert_eq!(values.len(), 10);
        assert_eq!(values[9], 22.5);
        assert!(arena.contains(std::ptr::NonNull::from(&values[0]).cast()));
        assert_eq!(arena.used(), 80);
    }

    #[test]
    fn dropping_the_only_vec_reclaims_its_tail() {
        let arena = ByteArena::<256>::new();
        {
            let mut values = Vec::with_capacity_in(8, arena.handle::<u32>());
            values.extend_from_slice(&[1, 2, 3]);
            assert_eq!(arena.used(), 32);
        }
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn exhausted_arena_surfaces_as_reserve_error() {
        let arena = ByteArena::<16>::new();
        let mut values: Vec<u64, _> = Vec::new_in(arena.handle::<u64>());
        assert!(values.try_reserve_exact(2).is_ok());
        assert!(values.try_reserve_exact(8).is_err());
        assert_eq!(values.capacity(), 2);
    }

    #[test]
    fn growth_past_the_tail_leaves_old_block_in_place() {
        let arena = ByteArena::<256>::new();
        let mut values = Vec::with_capacity_in(2, arena.handle::<u32>());
        values.extend_from_slice(&[1, 2]);
        let _fence = arena.handle::<u8>().allocate(1).unwrap();
        values.reserve_exact(2);
        // Old 8-byte block, 1-byte fence, padding, new 16-byte block.
        assert_eq!(arena.used(), 28);
        assert_eq!(&values[..], &[1, 2]);
    }
}
