//! Heap substrate adapter.
//!
//! The allocator core never talks to an operating system, a bootloader, or a
//! test harness directly. It only knows about [`HeapSubstrate`]: a "sbrk-like"
//! primitive that hands out more address space on request and reports the
//! current extent of what it has handed out so far. Everything that actually
//! backs that address space — a `.bss` array, `mmap`, a bump pointer into
//! firmware-reserved RAM — lives outside this crate.
//!
//! # Example
//! ```
//! use explicit_free_list_alloc::substrate::HeapSubstrate;
//!
//! struct Fixed {
//!     buf: Box<[u8]>,
//!     used: usize,
//! }
//!
//! impl HeapSubstrate for Fixed {
//!     fn lo(&self) -> *mut u8 {
//!         self.buf.as_ptr() as *mut u8
//!     }
//!
//!     fn hi(&self) -> *mut u8 {
//!         unsafe { self.lo().add(self.used) }
//!     }
//!
//!     fn grow(&mut self, bytes: usize) -> Result<*mut u8, explicit_free_list_alloc::error::SubstrateOom> {
//!         if self.used + bytes > self.buf.len() {
//!             return Err(explicit_free_list_alloc::error::SubstrateOom);
//!         }
//!         let old_hi = self.hi();
//!         self.used += bytes;
//!         Ok(old_hi)
//!     }
//! }
//! ```

use crate::error::SubstrateOom;

/// A growable byte-range heap provider.
///
/// Implementations must uphold:
/// - `grow(n)` extends the managed range by exactly `n` bytes and returns the
///   address of the first new byte, which equals the previous [`hi`](Self::hi).
/// - When `n` is a multiple of 8, the returned address is 8-byte aligned.
/// - The managed range never shrinks: `lo()` is stable, `hi()` only moves
///   forward (and only as a result of a successful `grow`).
pub trait HeapSubstrate {
    /// The inclusive low bound of the managed range.
    fn lo(&self) -> *mut u8;

    /// The exclusive high bound of the managed range (the current break).
    fn hi(&self) -> *mut u8;

    /// Extend the managed range by `bytes`, returning the previous `hi()`.
    ///
    /// # Errors
    /// Returns [`SubstrateOom`] if the provider cannot supply `bytes` more bytes.
    fn grow(&mut self, bytes: usize) -> Result<*mut u8, SubstrateOom>;
}
