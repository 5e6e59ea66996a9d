//! Benchmark workloads for Cairn arenas and bounded sequences.
//!
//! - [`REQUEST_MIX`]: a fixed mix of (count, size, align) requests
//! - [`run_request_mix`]: replay the mix against an arena until it fills
//! - [`fill_sequence`]: push `0..N` into a fresh bounded sequence

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cairn_arena::{Arena, Storage};
use cairn_seq::BoundedSequence;

/// Mixed request shapes: small scalars, short arrays, and wide records.
pub const REQUEST_MIX: [(usize, usize, usize); 6] = [
    (1, 1, 1),
    (1, 4, 4),
    (4, 4, 4),
    (1, 8, 8),
    (2, 16, 16),
    (3, 12, 4),
];

/// Replay [`REQUEST_MIX`] round-robin until the arena rejects a request.
///
/// Returns the number of successful allocations.
pub fn run_request_mix<S: Storage, const ALIGN: bool>(arena: &Arena<S, ALIGN>) -> usize {
    let mut served = 0;
    for &(count, size, align) in REQUEST_MIX.iter().cycle() {
        if arena.allocate(count, size, align).is_err() {
            break;
        }
        served += 1;
    }
    served
}

/// Push `0..N` into a fresh sequence.
pub fn fill_sequence<const N: usize>() -> BoundedSequence<u64, N> {
    let mut seq = BoundedSequence::new();
    for i in 0..N as u64 {
        if seq.push(i).is_err() {
            break;
        }
    }
    seq
}
