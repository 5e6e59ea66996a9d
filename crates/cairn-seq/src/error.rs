//! The rejected-push error, which hands the element back.

use std::error::Error;
use std::fmt;

use cairn_core::SequenceError;

/// A push rejected because the sequence was full.
///
/// Carries the element that did not fit so the caller can keep it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CapacityError<T> {
    element: T,
    capacity: usize,
}

impl<T> CapacityError<T> {
    pub(crate) fn new(element: T, capacity: usize) -> Self {
        Self { element, capacity }
    }

    /// The element that was not inserted.
    pub fn element(&self) -> &T {
        &self.element
    }

    /// Take back the element that was not inserted.
    pub fn into_element(self) -> T {
        self.element
    }

    /// The fixed capacity of the sequence that rejected the push.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The element-free error kind.
    pub fn error(&self) -> SequenceError {
        SequenceError::CapacityExceeded {
            capacity: self.capacity,
        }
    }
}

impl<T> From<CapacityError<T>> for SequenceError {
    fn from(err: CapacityError<T>) -> Self {
        err.error()
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityError")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error(), f)
    }
}

impl<T> Error for CapacityError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_rejected_element() {
        let err = CapacityError::new(String::from("late"), 3);
        assert_eq!(err.element(), "late");
        assert_eq!(err.capacity(), 3);
        assert_eq!(err.into_element(), "late");
    }

    #[test]
    fn converts_to_sequence_error() {
        let err: SequenceError = CapacityError::new(7u8, 5).into();
        assert_eq!(err, SequenceError::CapacityExceeded { capacity: 5 });
    }

    #[test]
    fn formats_without_requiring_debug_elements() {
        struct Opaque;
        let err = CapacityError::new(Opaque, 2);
        assert_eq!(format!("{err:?}"), "CapacityError { capacity: 2, .. }");
        assert_eq!(err.to_string(), "sequence capacity of 2 elements exceeded");
    }
}
