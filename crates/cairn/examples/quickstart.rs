//! Cairn quickstart: fixed-capacity storage that never grows.
//!
//! Demonstrates:
//!   1. A bounded sequence of integers
//!   2. A raw byte arena in packed mode
//!   3. A standard-shaped vector running over an arena
//!   4. Building user structs in place with `emplace`
//!   5. What happens at the capacity limit
//!
//! Run with:
//!   cargo run --example quickstart

use allocator_api2::vec::Vec as ArenaVec;
use cairn::prelude::*;

#[derive(Debug)]
struct Point {
    x: f32,
    y: f32,
    z: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ─── 1. Bounded sequence ────────────────────────────────────
    println!("1. BoundedSequence<i32, 10>");
    let mut numbers = BoundedSequence::<i32, 10>::new();
    for i in 0..5 {
        numbers.push(i * 10)?;
    }
    println!("   contents: {numbers:?}");
    println!(
        "   len {} / capacity {}, arena bytes reserved: {}\n",
        numbers.len(),
        numbers.capacity(),
        numbers.reserved_bytes()
    );

    // ─── 2. Packed byte arena ───────────────────────────────────
    println!("2. ByteArena<16, packed>");
    let packed = ByteArena::<16, false>::new();
    let tag = packed.handle::<u8>().allocate(1)?;
    let word = packed.handle::<u32>().allocate(1)?;
    println!(
        "   u8 at offset {:?}, u32 at offset {:?} (no padding), used {}\n",
        packed.offset_of(tag),
        packed.offset_of(word.cast()),
        packed.used()
    );

    // ─── 3. Vector over an arena ────────────────────────────────
    println!("3. allocator_api2 Vec over ByteArena<1024>");
    let arena = ByteArena::<1024>::new();
    let mut samples = ArenaVec::with_capacity_in(10, arena.handle::<f64>());
    for i in 0..10 {
        samples.push(f64::from(i) * 1.5);
    }
    println!("   contents: {:?}", samples.as_slice());
    println!("   arena used {} of {}\n", arena.used(), arena.capacity());

    // ─── 4. In-place construction ───────────────────────────────
    println!("4. BoundedSequence<Point, 5> with emplace");
    let mut points = BoundedSequence::<Point, 5>::new();
    points.emplace(|| Point { x: 1.0, y: 2.0, z: 3.0 })?;
    points.emplace(|| Point { x: 4.0, y: 5.0, z: 6.0 })?;
    points.emplace(|| Point { x: 7.0, y: 8.0, z: 9.0 })?;
    for p in &points {
        print!("   ({}, {}, {})", p.x, p.y, p.z);
    }
    println!("\n");

    // ─── 5. Capacity limit ──────────────────────────────────────
    println!("5. BoundedSequence<i32, 3> at its limit");
    let mut small = BoundedSequence::<i32, 3>::new();
    small.extend_from_slice(&[1, 2, 3])?;
    match small.push(4) {
        Ok(()) => println!("   unexpected: push accepted"),
        Err(err) => {
            let reason = err.to_string();
            println!("   push rejected: {reason}, got back {}", err.into_element());
        }
    }
    println!("   len stays {}", small.len());

    Ok(())
}
