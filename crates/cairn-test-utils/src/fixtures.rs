//! Element types for exercising arenas and sequences.

use std::cell::Cell;
use std::rc::Rc;

/// Counts how many [`Tracked`] values it issued have been dropped.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new value whose drop is recorded by this counter.
    pub fn track(&self, id: u32) -> Tracked {
        Tracked {
            id,
            drops: Rc::clone(&self.drops),
        }
    }

    /// Number of issued values dropped so far.
    pub fn drops(&self) -> usize {
        self.drops.get()
    }
}

/// A value that reports its drop to the [`DropCounter`] that issued it.
#[derive(Debug)]
pub struct Tracked {
    pub id: u32,
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// A small composite element, the kind typically built in place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// An element whose alignment exceeds the 64-byte arena storage alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(align(128))]
pub struct Overaligned(pub u64);
