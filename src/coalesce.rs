//! Merges a just-freed block with its free physical neighbors, then inserts the
//! result into the free list.
//!
//! On entry, `bp` already carries free-tagged header/footer words but is not
//! yet a member of the free list — the caller ([`crate::free::free`], the
//! placer's split residue, and the heap extender) is responsible for stamping
//! the free tag before calling in here. Four cases are possible depending on
//! whether the physical predecessor and successor are themselves free; see
//! `spec.md` §4.4 for the table. Reading the predecessor's footer is always
//! safe even when the predecessor turns out to be allocated, because the
//! tiling invariant guarantees a valid footer word sits there regardless.

use crate::block::{block_size, next_block, prev_block, read_header, tag_allocated, write_tags};
use crate::free_list::{insert_at_front, unlink};
use log::trace;

/// Coalesce `bp` with any free physical neighbors and insert the result at the
/// front of the free list. Returns the (possibly relocated) block pointer.
///
/// # Safety
/// - `bp` must carry a free header/footer and must not already be on the free
///   list.
/// - The physical blocks immediately before and after `bp` must be valid,
///   tagged blocks (guaranteed by the tiling invariant).
pub(crate) unsafe fn coalesce(head: &mut *mut u8, bp: *mut u8) -> *mut u8 {
    unsafe {
        let prev = prev_block(bp);
        let next = next_block(bp);
        let prev_allocated = tag_allocated(read_header(prev)) || prev == bp;
        let next_allocated = tag_allocated(read_header(next));
        let mut size = block_size(bp);
        let mut bp = bp;

        match (prev_allocated, next_allocated) {
            (true, true) => {
                trace!("coalesce: no free neighbor");
            }
            (true, false) => {
                trace!("coalesce: merging forward with next block");
                size += block_size(next);
                unlink(head, next);
                write_tags(bp, size, false);
            }
            (false, true) => {
                trace!("coalesce: merging backward with prev block");
                size += block_size(prev);
                unlink(head, prev);
                bp = prev;
                write_tags(bp, size, false);
            }
            (false, false) => {
                trace!("coalesce: merging with both neighbors");
                size += block_size(prev) + block_size(next);
                unlink(head, prev);
                unlink(head, next);
                bp = prev;
                write_tags(bp, size, false);
            }
        }

        insert_at_front(head, bp);
        bp
    }
}
