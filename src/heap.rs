//! Allocator surface: `init`, `alloc`, `free`, `realloc`, `check`, and the heap
//! extender that backs all of them.

use crate::block::{
    ALIGNMENT, CHUNK_WORDS, DWORD, MIN_BLOCK, WORD, align_up, block_size, next_block, pack,
    write_tags,
};
use crate::check;
use crate::coalesce::coalesce;
use crate::error::{CheckError, InitError};
use crate::find::find_fit;
use crate::place::place;
use crate::substrate::HeapSubstrate;
use core::ptr;
use log::{trace, warn};

const CHUNK_BYTES: usize = CHUNK_WORDS * WORD;
/// Bytes needed to stamp the leading pad, the prologue block, and the
/// epilogue header, with zero slack left over.
const PROLOGUE_REGION: usize = WORD + MIN_BLOCK + WORD;

/// An explicit-free-list heap over a substrate `S`.
///
/// Owns the free-list head and the prologue address; no process-wide statics
/// are involved (see `spec.md` §9's design note on reifying allocator state as
/// fields of an owned value). Thread safety, if needed, is the embedder's
/// concern — wrap a `Heap<S>` in whatever lock fits the target.
pub struct Heap<S: HeapSubstrate> {
    substrate: S,
    prologue: *mut u8,
    free_list_head: *mut u8,
}

impl<S: HeapSubstrate> Heap<S> {
    /// Initialize a heap over `substrate`.
    ///
    /// Stamps the leading pad, a fully-tagged prologue block, and an epilogue
    /// header, then performs the first [`CHUNK_WORDS`]-word extension so the
    /// free list starts out non-empty.
    ///
    /// # Errors
    /// Returns [`InitError::OutOfMemory`] if the substrate cannot supply the
    /// initial prologue region or the first chunk extension.
    pub fn init(mut substrate: S) -> Result<Self, InitError> {
        let base = substrate.grow(PROLOGUE_REGION)?;

        // SAFETY: `grow` just handed us `PROLOGUE_REGION` fresh, exclusively-owned bytes.
        unsafe {
            ptr::write(base.cast::<u32>(), 0); // leading pad
            let prologue_bp = base.add(WORD + WORD);
            write_tags(prologue_bp, MIN_BLOCK, true);
            ptr::write_bytes(prologue_bp, 0, DWORD + DWORD); // zero the link slots
            let epilogue_bp = next_block(prologue_bp);
            ptr::write(epilogue_bp.sub(WORD).cast::<u32>(), pack(0, true));

            let mut heap = Self {
                substrate,
                prologue: prologue_bp,
                free_list_head: prologue_bp,
            };
            heap.extend(CHUNK_BYTES).map_err(InitError::from)?;
            Ok(heap)
        }
    }

    /// Allocate at least `size` bytes, 8-byte aligned.
    ///
    /// Returns a null pointer if `size == 0` or the substrate is out of memory.
    #[must_use]
    pub fn alloc(&mut self, size: usize) -> *mut u8 {
        if size == 0 {
            return ptr::null_mut();
        }
        let adjusted = adjusted_size(size);

        // SAFETY: `free_list_head` always names a valid block in this heap.
        unsafe {
            if let Some(bp) = find_fit(self.free_list_head, adjusted) {
                return place(&mut self.free_list_head, bp, adjusted);
            }
        }

        let extend_by = adjusted.max(CHUNK_BYTES);
        let Ok(bp) = self.extend(extend_by) else {
            warn!("alloc: heap substrate out of memory for {size} bytes");
            return ptr::null_mut();
        };
        unsafe { place(&mut self.free_list_head, bp, adjusted) }
    }

    /// Free a block previously returned by [`Self::alloc`] or [`Self::realloc`].
    ///
    /// A null `p` is a no-op. Passing a pointer not obtained from this heap,
    /// or freeing the same pointer twice, is undefined behavior (`spec.md`
    /// §7.2) — not detected here.
    pub fn free(&mut self, p: *mut u8) {
        if p.is_null() {
            return;
        }
        // SAFETY: caller guarantees `p` is a live block from this heap.
        unsafe {
            let size = block_size(p);
            write_tags(p, size, false);
            coalesce(&mut self.free_list_head, p);
        }
    }

    /// Resize the allocation at `p` to `size` bytes, preserving the leading
    /// `min(old, new)` bytes of content.
    ///
    /// `realloc(null, n)` behaves like `alloc(n)`; `realloc(p, 0)` behaves like
    /// `free(p)` followed by returning null.
    ///
    /// The copy length on growth is `min(size, old_block_size)`, where
    /// `old_block_size` includes header/footer overhead — this is the
    /// original implementation's permissive behavior, preserved deliberately
    /// (see `DESIGN.md`); it can read a few uninitialized bytes past what the
    /// caller actually wrote to the old allocation, so callers must not rely
    /// on content above their own prior write extent being meaningful.
    #[must_use]
    pub fn realloc(&mut self, p: *mut u8, size: usize) -> *mut u8 {
        if size == 0 {
            self.free(p);
            return ptr::null_mut();
        }
        if p.is_null() {
            return self.alloc(size);
        }

        let adjusted = adjusted_size(size);
        // SAFETY: caller guarantees `p` is a live block from this heap.
        let old_size = unsafe { block_size(p) };

        if old_size == adjusted {
            return p;
        }

        if adjusted <= old_size {
            if old_size - adjusted < MIN_BLOCK {
                return p;
            }
            // SAFETY: splitting a live block we own into two legally-sized blocks.
            unsafe {
                write_tags(p, adjusted, true);
                let tail = next_block(p);
                write_tags(tail, old_size - adjusted, false);
                coalesce(&mut self.free_list_head, tail);
            }
            return p;
        }

        let new_p = self.alloc(size);
        if new_p.is_null() {
            return ptr::null_mut();
        }
        let copy_len = size.min(old_size);
        // SAFETY: `p` and `new_p` are both live, non-overlapping blocks of at
        // least `copy_len` bytes (see the doc comment above on the permissive
        // copy-length choice).
        unsafe {
            ptr::copy_nonoverlapping(p, new_p, copy_len);
        }
        self.free(p);
        new_p
    }

    /// Validate heap invariants (diagnostic only; never affects allocator
    /// behavior).
    ///
    /// # Errors
    /// Returns the first [`CheckError`] encountered.
    pub fn check(&self) -> Result<(), CheckError> {
        // SAFETY: `prologue`/`free_list_head` are always valid for this heap.
        unsafe {
            check::check(
                self.prologue,
                self.free_list_head,
                self.substrate.lo(),
                self.substrate.hi(),
            )
        }
    }

    /// Grow the heap by at least `min_bytes`, stamping a new free block and a
    /// fresh epilogue, then coalescing with whatever was previously at the
    /// tail. Returns the (possibly merged) free block pointer.
    fn extend(&mut self, min_bytes: usize) -> Result<*mut u8, crate::error::SubstrateOom> {
        let words = min_bytes.div_ceil(WORD);
        let even_words = (words + 1) & !1;
        let size = (even_words * WORD).max(MIN_BLOCK);

        let bp = self.substrate.grow(size)?;
        trace!("extend: grew heap by {size} bytes at {bp:p}");

        // SAFETY: `grow` handed us `size` fresh bytes whose start aliases the
        // previous epilogue header, so overwriting it with a free tag and
        // placing a new epilogue at the new high-water mark is exactly the
        // invariant-preserving stamp `spec.md` §4.7 describes. Zeroing the
        // payload first means the free-list links `coalesce`/`insert_at_front`
        // are about to write land on known bytes rather than whatever the
        // substrate happened to hand back.
        unsafe {
            ptr::write_bytes(bp, 0, size - DWORD);
            write_tags(bp, size, false);
            let epilogue_bp = next_block(bp);
            ptr::write(epilogue_bp.sub(WORD).cast::<u32>(), pack(0, true));
            Ok(coalesce(&mut self.free_list_head, bp))
        }
    }
}

/// Adjust a client-requested size to a legally-placeable block size: aligned
/// payload plus boundary-tag overhead, floored to [`MIN_BLOCK`].
#[inline]
#[must_use]
fn adjusted_size(size: usize) -> usize {
    (align_up(size, ALIGNMENT) + DWORD).max(MIN_BLOCK)
}
