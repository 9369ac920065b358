//! Diagnostic consistency checker.
//!
//! Validates the invariants listed in `spec.md` §3 and returns the first
//! violation found. Nothing in the allocator surface depends on this for
//! correctness — it exists purely so a caller (typically a test, or a panic
//! handler dumping state before it aborts) can ask "is the heap still sane?"

use crate::block::{
    ALIGNMENT, MIN_BLOCK, get_next_free, get_prev_free, next_block, read_footer, read_header,
    tag_allocated, tag_size,
};
use crate::error::CheckError;
use log::error;

/// Walk the heap from the prologue to the epilogue and the free list from
/// `head`, checking every invariant `spec.md` §4.8 names.
///
/// # Safety
/// `prologue`, `head`, `lo`, and `hi` must describe a heap previously
/// initialized by [`crate::heap::Heap::init`] and never concurrently mutated
/// during this call.
pub(crate) unsafe fn check(
    prologue: *mut u8,
    head: *mut u8,
    lo: *mut u8,
    hi: *mut u8,
) -> Result<(), CheckError> {
    unsafe {
        let prologue_header = read_header(prologue);
        if tag_size(prologue_header) != MIN_BLOCK || !tag_allocated(prologue_header) {
            error!("consistency check: bad prologue header");
            return Err(CheckError::BadPrologue);
        }

        // Physical walk: alignment, header/footer agreement, no two adjacent free
        // blocks, until the zero-size allocated epilogue is reached.
        let mut bp = prologue;
        let mut prev_was_free = false;
        loop {
            if (bp as usize) % ALIGNMENT != 0 {
                error!("consistency check: {bp:p} is not 8-byte aligned");
                return Err(CheckError::Misaligned);
            }

            let header = read_header(bp);
            let size = tag_size(header);
            let allocated = tag_allocated(header);

            if size == 0 {
                // Epilogue: terminates the physical walk.
                break;
            }

            let footer = read_footer(bp, size);
            if header != footer {
                error!("consistency check: header/footer mismatch at {bp:p}");
                return Err(CheckError::TagMismatch);
            }

            if !allocated && prev_was_free {
                error!("consistency check: adjacent free blocks at {bp:p}");
                return Err(CheckError::AdjacentFreeBlocks);
            }
            prev_was_free = !allocated;

            bp = next_block(bp);
        }

        // Free-list walk: every member's links must point inside [lo, hi).
        let mut bp = head;
        while !tag_allocated(read_header(bp)) {
            let prev = get_prev_free(bp);
            let next = get_next_free(bp);
            if !prev.is_null() && !(lo..hi).contains(&prev) {
                error!("consistency check: prev link {prev:p} out of bounds");
                return Err(CheckError::LinkOutOfBounds);
            }
            if !(lo..hi).contains(&next) {
                error!("consistency check: next link {next:p} out of bounds");
                return Err(CheckError::LinkOutOfBounds);
            }
            bp = next;
        }

        Ok(())
    }
}
