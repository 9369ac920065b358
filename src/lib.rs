//! # Explicit Free-List Heap Allocator
//!
//! A boundary-tagged, explicit-free-list heap allocator over a contiguous,
//! monotonically-growable byte range. It sits between a client (anything
//! requesting untyped memory) and a [`substrate::HeapSubstrate`] — a
//! "sbrk-like" primitive that can only extend the managed range, never shrink
//! it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Heap<S> (heap module)                 │
//! │   init / alloc / free / realloc / check, heap extension  │
//! └───────┬───────────────┬───────────────┬──────────────────┘
//!         │               │               │
//!         ▼               ▼               ▼
//!    find::find_fit  place::place   coalesce::coalesce
//!         │               │               │
//!         └───────────────┴───────┬───────┘
//!                                 ▼
//!                    free_list::{insert_at_front, unlink}
//!                                 │
//!                                 ▼
//!                      block (tag & address arithmetic)
//!                                 │
//!                                 ▼
//!                   substrate::HeapSubstrate (external)
//! ```
//!
//! `alloc` asks the finder for a first-fit free block; on a miss it extends
//! the heap and retries the placer against the newly-stamped block. `free`
//! re-tags the block and hands it to the coalescer, which merges with any
//! free physical neighbor before inserting into the free list. `realloc`
//! decides between an in-place shrink, a no-op, or an alloc-copy-free based
//! on the requested size relative to the current block.
//!
//! ## Single-threaded by design
//!
//! [`heap::Heap`] holds no locks and performs no synchronization; it is an
//! owned value the embedder places behind whatever concurrency primitive
//! fits their environment (a spinlock around a `#[global_allocator]`, a
//! `Mutex` in a hosted test, or nothing at all in a single-threaded fuzz
//! harness). See `SPEC_FULL.md` §5 and `DESIGN.md` for the reasoning.
//!
//! ## What this crate does not do
//!
//! Thread safety, best-fit/segregated-list placement, an `mmap` fallback for
//! oversized requests, hardening against malicious client pointers, support
//! for alignment greater than 8 bytes, and address-space reclamation are all
//! out of scope — see `spec.md` §1.

#![cfg_attr(not(any(test, doctest)), no_std)]

mod block;
mod check;
mod coalesce;
mod find;
mod free_list;
mod place;

pub mod error;
pub mod heap;
pub mod substrate;
