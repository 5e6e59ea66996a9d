//! The bounded sequence container.
//!
//! [`BoundedSequence`] embeds an [`Arena`] sized for exactly `N` values of
//! `T` and takes all `N` slots from it in one reservation at construction.
//! It remembers where that reservation starts as an offset from the arena
//! buffer, not as a pointer, so moving the sequence (and with it the
//! inline buffer) needs no fix-up: every access re-derives the element
//! pointer from the buffer's current address.

#![allow(unsafe_code)]

use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};
use std::slice;

use cairn_arena::{Arena, Slots};
use cairn_core::SequenceError;

use crate::error::CapacityError;

/// A growable array with a fixed maximum of `N` elements.
///
/// All storage lives inline in the embedded arena. Element addresses stay
/// the same across every insertion up to `N` for as long as the sequence
/// itself is not moved (and the borrow checker forbids moving it while a
/// reference to an element is alive).
///
/// Insertion past `N` fails deterministically: [`push`](Self::push) hands
/// the value back in a [`CapacityError`], [`emplace`](Self::emplace)
/// returns [`SequenceError::CapacityExceeded`] without running its
/// constructor.
///
/// Slice operations (`iter`, `get`, indexing, `get_unchecked`, ...) come
/// through `Deref<Target = [T]>` over the live elements `[0, len)`.
///
/// The embedded arena always runs in aligned mode. Slots hand out `&T`
/// and `&mut T`, and a reference to a misaligned `T` is undefined
/// behaviour, so there is no packed variant. Use a packed
/// [`ByteArena`](cairn_arena::ByteArena) with `read_unaligned` /
/// `write_unaligned` for byte-exact layouts.
///
/// The sequence cannot be cloned or copied; it can only be moved.
///
/// ```compile_fail,E0277
/// fn assert_clone<T: Clone>() {}
/// assert_clone::<cairn_seq::BoundedSequence<u8, 4>>();
/// ```
///
/// Shared references may cross threads when `T: Sync`, as with `Vec`.
pub struct BoundedSequence<T, const N: usize> {
    /// Backing arena; its whole capacity is reserved by `new`.
    arena: Arena<Slots<T, N>>,
    /// Start of the reserved slots, relative to the arena buffer.
    offset: usize,
    /// Live elements. Slots `[0, len)` are initialised.
    len: usize,
}

impl<T, const N: usize> BoundedSequence<T, N> {
    /// Maximum number of elements.
    pub const CAPACITY: usize = N;

    /// Create an empty sequence with all `N` slots reserved.
    pub fn new() -> Self {
        let arena = Arena::new();
        let offset = reserve_slots(&arena);
        Self {
            arena,
            offset,
            len: 0,
        }
    }

    /// Append `value`.
    ///
    /// # Errors
    ///
    /// If the sequence already holds `N` elements, `value` is returned
    /// inside a [`CapacityError`] and the length is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), CapacityError<T>> {
        if self.len == N {
            Self::reject(1);
            return Err(CapacityError::new(value, N));
        }
        // SAFETY: `len < N`, so the slot lies inside the reservation and
        // holds no live value.
        unsafe { self.slots().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Construct a new last element in place with `make`.
    ///
    /// `make` is only called when a slot is free.
    ///
    /// # Errors
    ///
    /// [`SequenceError::CapacityExceeded`] if the sequence is full.
    pub fn emplace<F>(&mut self, make: F) -> Result<&mut T, SequenceError>
    where
        F: FnOnce() -> T,
    {
        if self.len == N {
            Self::reject(1);
            return Err(SequenceError::CapacityExceeded { capacity: N });
        }
        // SAFETY: `len < N`, so the slot lies inside the reservation.
        let slot = unsafe { self.slots().add(self.len) };
        // SAFETY: the slot holds no live value. If `make` panics nothing
        // has been written and `len` is unchanged.
        unsafe { slot.write(make()) };
        self.len += 1;
        // SAFETY: the slot was just initialised and `&mut self` guarantees
        // exclusive access for the returned lifetime.
        Ok(unsafe { &mut *slot.as_ptr() })
    }

    /// Append clones of every element of `items`, or none of them.
    ///
    /// # Errors
    ///
    /// [`SequenceError::CapacityExceeded`] if `items` does not fit in the
    /// remaining capacity; the sequence is left untouched.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), SequenceError>
    where
        T: Clone,
    {
        self.reserve(items.len())?;
        for item in items {
            // SAFETY: `reserve` confirmed room for all of `items`, so
            // `len < N` on every iteration.
            unsafe { self.slots().add(self.len).write(item.clone()) };
            self.len += 1;
        }
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was initialised and is now outside the live
        // range, so it is read exactly once.
        Some(unsafe { self.slots().add(self.len).read() })
    }

    /// Drop every element past `len`. No effect if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail = self.len - len;
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = len;
        // SAFETY: slots `[len, len + tail)` were initialised and are no
        // longer reachable through the sequence.
        unsafe {
            let start = self.slots().add(len).as_ptr();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, tail));
        }
    }

    /// Drop all elements.
    ///
    /// The slots stay reserved: the arena cursor does not move, and the
    /// sequence can be refilled up to `N` again.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Check that `additional` more elements would fit.
    ///
    /// The storage never grows, so this only validates the request.
    ///
    /// # Errors
    ///
    /// [`SequenceError::CapacityExceeded`] if they would not.
    pub fn reserve(&self, additional: usize) -> Result<(), SequenceError> {
        if additional <= N - self.len {
            Ok(())
        } else {
            Self::reject(additional);
            Err(SequenceError::CapacityExceeded { capacity: N })
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the next insertion would be rejected.
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// The fixed maximum number of elements, `N`.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Insertions left before the sequence is full.
    pub fn remaining_capacity(&self) -> usize {
        N - self.len
    }

    /// The live elements.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialised and aligned, and
        // `&self` keeps them from being mutated for the borrow.
        unsafe { slice::from_raw_parts(self.slots().as_ptr(), self.len) }
    }

    /// The live elements, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`; `&mut self` makes the borrow unique.
        unsafe { slice::from_raw_parts_mut(self.slots().as_ptr(), self.len) }
    }

    /// Pointer to the first slot. Valid until the sequence moves.
    pub fn as_ptr(&self) -> *const T {
        self.slots().as_ptr()
    }

    /// Mutable pointer to the first slot. Valid until the sequence moves.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slots().as_ptr()
    }

    /// Bytes of the embedded arena held by the slot reservation.
    ///
    /// All `N` slots are reserved up front, so this is `N * size_of::<T>()`
    /// whatever the current length.
    pub const fn reserved_bytes(&self) -> usize {
        N * mem::size_of::<T>()
    }

    /// First slot, re-derived from the arena's current address.
    fn slots(&self) -> NonNull<T> {
        // SAFETY: `offset` was produced by this arena for a reservation
        // inside its buffer; offsets are position-independent.
        unsafe { self.arena.base().add(self.offset).cast() }
    }

    fn reject(requested: usize) {
        tracing::debug!(capacity = N, requested, "bounded sequence insertion rejected");
    }
}

/// Take all `N` slots from a fresh arena and return their offset.
fn reserve_slots<T, const N: usize>(arena: &Arena<Slots<T, N>>) -> usize {
    let slots = arena
        .handle::<T>()
        .allocate(N)
        .expect("a fresh Slots<T, N> arena always fits N elements of T");
    // An empty reservation is a dangling pointer outside the buffer; a
    // zero-length region may sit at any offset.
    arena.offset_of(slots.cast()).unwrap_or(0)
}

// SAFETY: the arena's cursor `Cell` is only written by `new`. Every
// `&self` method reads the buffer address or the live elements, so shared
// access is exactly shared access to `[T]`.
unsafe impl<T: Sync, const N: usize> Sync for BoundedSequence<T, N> {}

impl<T, const N: usize> Drop for BoundedSequence<T, N> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, const N: usize> Default for BoundedSequence<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for BoundedSequence<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> DerefMut for BoundedSequence<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> AsRef<[T]> for BoundedSequence<T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> AsMut<[T]> for BoundedSequence<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedSequence<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut BoundedSequence<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for BoundedSequence<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq, const N: usize, const M: usize> PartialEq<BoundedSequence<T, M>>
    for BoundedSequence<T, N>
{
    fn eq(&self, other: &BoundedSequence<T, M>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, const N: usize> Eq for BoundedSequence<T, N> {}

#[cfg(test)]
mod tests {
    use cairn_test_utils::{DropCounter, Point3, Tracked};

    use super::*;

    #[test]
    fn new_sequence_reserves_full_capacity() {
        let seq = BoundedSequence::<u64, 8>::new();
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), 8);
        assert_eq!(seq.arena.used(), 8 * mem::size_of::<u64>());
        assert_eq!(seq.arena.remaining(), 0);
        assert_eq!(seq.reserved_bytes(), seq.arena.used());
    }

    #[test]
    fn shared_sequence_is_readable_from_other_threads() {
        fn assert_sync<S: Sync>(_: &S) {}

        let mut seq = BoundedSequence::<i32, 8>::new();
        seq.extend_from_slice(&[1, 2, 3, 4]).unwrap();
        assert_sync(&seq);

        let shared = &seq;
        let sums: Vec<i32> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..2)
                .map(|_| scope.spawn(|| shared.iter().sum::<i32>()))
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });
        assert_eq!(sums, vec![10, 10]);
    }

    #[test]
    fn accepts_exactly_n_pushes() {
        let mut seq = BoundedSequence::<i32, 5>::new();
        for i in 0..5 {
            seq.push(i).unwrap();
        }
        assert!(seq.is_full());

        let err = seq.push(99).unwrap_err();
        assert_eq!(err.into_element(), 99);
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn emplace_builds_in_place_and_returns_reference() {
        let mut seq = BoundedSequence::<Point3, 2>::new();
        let point = seq.emplace(|| Point3::new(1.0, 2.0, 3.0)).unwrap();
        point.z = 30.0;
        assert_eq!(seq[0], Point3::new(1.0, 2.0, 30.0));
    }

    #[test]
    fn emplace_on_full_sequence_skips_constructor() {
        let mut seq = BoundedSequence::<u8, 1>::new();
        seq.push(1).unwrap();
        let mut called = false;
        let err = seq
            .emplace(|| {
                called = true;
                2
            })
            .unwrap_err();
        assert_eq!(err, SequenceError::CapacityExceeded { capacity: 1 });
        assert!(!called);
    }

    #[test]
    fn element_addresses_never_change() {
        let mut seq = BoundedSequence::<u32, 16>::new();
        seq.push(0).unwrap();
        let first: *const u32 = &seq[0];
        let base = seq.as_ptr();
        for i in 1..16 {
            seq.push(i).unwrap();
            assert_eq!(&seq[0] as *const u32, first);
            assert_eq!(seq.as_ptr(), base);
        }
    }

    #[test]
    fn moving_the_sequence_keeps_its_contents() {
        fn build() -> BoundedSequence<String, 4> {
            let mut seq = BoundedSequence::new();
            seq.push("a".to_string()).unwrap();
            seq.push("b".to_string()).unwrap();
            seq
        }

        let seq = build();
        let boxed = Box::new(seq);
        assert_eq!(boxed.as_slice(), &["a", "b"]);
        assert_eq!(boxed.as_ptr().cast::<u8>(), boxed.arena.base().as_ptr().cast_const());
    }

    #[test]
    fn pop_returns_elements_in_reverse() {
        let mut seq = BoundedSequence::<i32, 3>::new();
        seq.extend_from_slice(&[1, 2, 3]).unwrap();
        assert_eq!(seq.pop(), Some(3));
        assert_eq!(seq.pop(), Some(2));
        seq.push(7).unwrap();
        assert_eq!(seq.as_slice(), &[1, 7]);
        assert_eq!(seq.pop(), Some(7));
        assert_eq!(seq.pop(), Some(1));
        assert_eq!(seq.pop(), None);
    }

    #[test]
    fn extend_from_slice_is_all_or_nothing() {
        let mut seq = BoundedSequence::<i32, 4>::new();
        seq.extend_from_slice(&[1, 2]).unwrap();
        let err = seq.extend_from_slice(&[3, 4, 5]).unwrap_err();
        assert_eq!(err, SequenceError::CapacityExceeded { capacity: 4 });
        assert_eq!(seq.as_slice(), &[1, 2]);
        seq.extend_from_slice(&[3, 4]).unwrap();
        assert!(seq.is_full());
    }

    #[test]
    fn reserve_validates_without_growing() {
        let mut seq = BoundedSequence::<u8, 4>::new();
        seq.push(1).unwrap();
        assert!(seq.reserve(3).is_ok());
        assert!(seq.reserve(4).is_err());
        assert_eq!(seq.capacity(), 4);
    }

    #[test]
    fn clear_keeps_reservation() {
        let mut seq = BoundedSequence::<u16, 4>::new();
        seq.extend_from_slice(&[1, 2, 3, 4]).unwrap();
        let used = seq.arena.used();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.arena.used(), used);
        seq.extend_from_slice(&[5, 6, 7, 8]).unwrap();
        assert_eq!(seq.as_slice(), &[5, 6, 7, 8]);
    }

    #[test]
    fn clear_truncate_and_drop_release_each_element_once() {
        let counter = DropCounter::new();
        let mut seq = BoundedSequence::<Tracked, 6>::new();
        for id in 0..6 {
            seq.push(counter.track(id)).unwrap();
        }
        seq.truncate(4);
        assert_eq!(counter.drops(), 2);
        assert_eq!(seq.last().map(|t| t.id), Some(3));
        seq.clear();
        assert_eq!(counter.drops(), 6);

        for id in 0..3 {
            seq.push(counter.track(id)).unwrap();
        }
        drop(seq);
        assert_eq!(counter.drops(), 9);
    }

    #[test]
    fn rejected_push_does_not_drop_the_element() {
        let counter = DropCounter::new();
        let mut seq = BoundedSequence::<Tracked, 0>::new();
        let err = seq.push(counter.track(7)).unwrap_err();
        assert_eq!(counter.drops(), 0);
        assert_eq!(err.element().id, 7);
        drop(err.into_element());
        assert_eq!(counter.drops(), 1);
    }

    #[test]
    fn popped_elements_are_owned_by_the_caller() {
        let counter = DropCounter::new();
        let mut seq = BoundedSequence::<Tracked, 2>::new();
        seq.push(counter.track(1)).unwrap();
        let popped = seq.pop().unwrap();
        drop(seq);
        assert_eq!(counter.drops(), 0);
        drop(popped);
        assert_eq!(counter.drops(), 1);
    }

    #[test]
    fn iteration_covers_live_elements_only() {
        let mut seq = BoundedSequence::<i32, 8>::new();
        seq.extend_from_slice(&[1, 2, 3]).unwrap();
        for value in &mut seq {
            *value *= 10;
        }
        let collected: Vec<i32> = seq.iter().copied().collect();
        assert_eq!(collected, vec![10, 20, 30]);
        assert_eq!((&seq).into_iter().count(), 3);
    }

    #[test]
    fn checked_and_unchecked_access() {
        let mut seq = BoundedSequence::<char, 3>::new();
        seq.extend_from_slice(&['x', 'y']).unwrap();
        assert_eq!(seq.get(1), Some(&'y'));
        assert_eq!(seq.get(2), None);
        // SAFETY: index 0 < len.
        assert_eq!(unsafe { *seq.get_unchecked(0) }, 'x');
        seq[1] = 'z';
        assert_eq!(seq.as_slice(), &['x', 'z']);
    }

    #[test]
    #[should_panic]
    fn indexing_past_len_panics() {
        let mut seq = BoundedSequence::<i32, 4>::new();
        seq.push(1).unwrap();
        let _value = seq[1];
    }

    #[test]
    fn zero_sized_elements() {
        let mut seq = BoundedSequence::<(), 3>::new();
        assert_eq!(seq.arena.used(), 0);
        for _ in 0..3 {
            seq.push(()).unwrap();
        }
        assert!(seq.push(()).is_err());
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn zero_capacity_sequence() {
        let mut seq = BoundedSequence::<u64, 0>::new();
        assert!(seq.is_full());
        assert!(seq.push(1).is_err());
        assert_eq!(seq.as_slice(), &[] as &[u64]);
    }

    #[test]
    fn equality_and_debug_follow_contents() {
        let mut a = BoundedSequence::<i32, 4>::new();
        let mut b = BoundedSequence::<i32, 8>::new();
        a.extend_from_slice(&[1, 2]).unwrap();
        b.extend_from_slice(&[1, 2]).unwrap();
        assert!(a == b);
        b.push(3).unwrap();
        assert!(a != b);
        assert_eq!(format!("{a:?}"), "[1, 2]");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Clone, Debug)]
        enum Op {
            Push(i64),
            Pop,
            Truncate(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => any::<i64>().prop_map(Op::Push),
                1 => Just(Op::Pop),
                1 => (0usize..10).prop_map(Op::Truncate),
            ]
        }

        proptest! {
            #[test]
            fn mirrors_a_vec_within_capacity(ops in proptest::collection::vec(op(), 0..60)) {
                let mut seq = BoundedSequence::<i64, 8>::new();
                let mut model: Vec<i64> = Vec::new();
                let base = seq.as_ptr();
                for op in ops {
                    match op {
                        Op::Push(v) => {
                            let accepted = seq.push(v).is_ok();
                            prop_assert_eq!(accepted, model.len() < 8);
                            if accepted {
                                model.push(v);
                            }
                        }
                        Op::Pop => prop_assert_eq!(seq.pop(), model.pop()),
                        Op::Truncate(n) => {
                            seq.truncate(n);
                            model.truncate(n);
                        }
                    }
                    prop_assert!(seq.len() <= 8);
                    prop_assert_eq!(seq.as_slice(), model.as_slice());
                    prop_assert_eq!(seq.as_ptr(), base);
                }
            }
        }
    }
}
