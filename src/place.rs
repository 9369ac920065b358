//! Given a located free block and a request size, either splits it or hands
//! the whole block to the caller.

use crate::block::{MIN_BLOCK, block_size, next_block, write_tags};
use crate::coalesce::coalesce;
use crate::free_list::unlink;

/// Place a request of `requested` bytes into the free block `bp`, splitting it
/// if the residue would still be a legally-sized (`>= MIN_BLOCK`) block.
///
/// Returns `bp`, now tagged allocated with either `requested` or the whole
/// original block size.
///
/// # Safety
/// - `bp` must currently be a member of the free list headed by `*head`.
/// - `requested <= block_size(bp)`.
pub(crate) unsafe fn place(head: &mut *mut u8, bp: *mut u8, requested: usize) -> *mut u8 {
    unsafe {
        let total = block_size(bp);
        unlink(head, bp);

        if total - requested >= MIN_BLOCK {
            write_tags(bp, requested, true);
            let residue = next_block(bp);
            write_tags(residue, total - requested, false);
            coalesce(head, residue);
        } else {
            write_tags(bp, total, true);
        }

        bp
    }
}
