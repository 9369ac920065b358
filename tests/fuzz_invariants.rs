//! Deterministic fuzz loop driving random alloc/free/realloc traffic against a
//! `VecSubstrate`-backed heap, checking invariants after every operation.
//!
//! No `proptest`/`quickcheck` dependency is introduced here — a small xorshift
//! generator seeded with a fixed constant gives fully reproducible runs with no
//! extra crate.

mod common;

use common::VecSubstrate;
use explicit_free_list_alloc::heap::Heap;

const SCRATCH: usize = 4 << 20;
const OPS: usize = 20_000;

/// A minimal xorshift64* generator. Not cryptographic; good enough to drive
/// reproducible fuzz traffic.
struct Xorshift64(u64);

impl Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn next_below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// One entry in the shadow table of currently-live allocations, tracked
/// independently of the heap so the test can verify content integrity and
/// non-overlap (P2/P4) rather than trusting the allocator's own bookkeeping.
struct Live {
    ptr: *mut u8,
    len: usize,
    pattern: u8,
}

fn fill(ptr: *mut u8, len: usize, pattern: u8) {
    // SAFETY: caller guarantees `ptr` names a live allocation of at least `len` bytes.
    unsafe {
        core::ptr::write_bytes(ptr, pattern, len);
    }
}

fn verify(ptr: *mut u8, len: usize, pattern: u8) {
    // SAFETY: caller guarantees `ptr` names a live allocation of at least `len` bytes.
    unsafe {
        for i in 0..len {
            assert_eq!(
                core::ptr::read(ptr.add(i)),
                pattern,
                "content corrupted at offset {i} of a live {len}-byte allocation"
            );
        }
    }
}

/// P2: no two live allocations' byte ranges overlap.
fn assert_no_overlap(live: &[Live]) {
    for (i, a) in live.iter().enumerate() {
        let a_lo = a.ptr as usize;
        let a_hi = a_lo + a.len;
        for b in &live[i + 1..] {
            let b_lo = b.ptr as usize;
            let b_hi = b_lo + b.len;
            assert!(
                a_hi <= b_lo || b_hi <= a_lo,
                "live allocations overlap: [{a_lo:#x}, {a_hi:#x}) vs [{b_lo:#x}, {b_hi:#x})"
            );
        }
    }
}

#[test]
fn random_traffic_preserves_every_checkable_invariant() {
    common::init_logging();
    let mut heap = Heap::init(VecSubstrate::with_capacity(SCRATCH)).expect("init");
    let mut rng = Xorshift64(0x9E37_79B9_7F4A_7C15);
    let mut live: Vec<Live> = Vec::new();
    let mut next_pattern: u8 = 1;

    for step in 0..OPS {
        let choice = rng.next_below(10);
        if choice < 5 || live.is_empty() {
            let size = 1 + rng.next_below(1024);
            let p = heap.alloc(size);
            if p.is_null() {
                continue;
            }
            let pattern = next_pattern;
            next_pattern = next_pattern.wrapping_add(1).max(1);
            fill(p, size, pattern);
            live.push(Live { ptr: p, len: size, pattern });
        } else if choice < 8 {
            let idx = rng.next_below(live.len());
            let entry = live.swap_remove(idx);
            verify(entry.ptr, entry.len, entry.pattern);
            heap.free(entry.ptr);
        } else {
            let idx = rng.next_below(live.len());
            let entry = &mut live[idx];
            verify(entry.ptr, entry.len, entry.pattern);
            let new_size = 1 + rng.next_below(1024);
            let moved = heap.realloc(entry.ptr, new_size);
            if moved.is_null() {
                continue;
            }
            let kept = entry.len.min(new_size);
            // SAFETY: `realloc` preserves at least `min(old, new)` bytes of content.
            unsafe {
                for i in 0..kept {
                    assert_eq!(core::ptr::read(moved.add(i)), entry.pattern);
                }
            }
            entry.ptr = moved;
            entry.len = new_size;
            fill(moved, new_size, entry.pattern);
        }

        assert_no_overlap(&live);
        heap.check().unwrap_or_else(|e| {
            panic!("heap invariant violated after {} operations at step {step}: {e}", step + 1)
        });
    }

    for entry in &live {
        verify(entry.ptr, entry.len, entry.pattern);
    }
    for entry in live {
        heap.free(entry.ptr);
    }
    heap.check().expect("draining every allocation must leave a fully consistent heap");
}
