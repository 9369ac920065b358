//! First-fit search through the free list.

use crate::block::{block_size, get_next_free, read_header, tag_allocated};

/// Return the first free block whose size is at least `requested`, or `None`
/// if the list (headed at `head`) is exhausted — indicated by reaching a
/// block whose header's allocated bit is set (the prologue/epilogue
/// sentinel).
///
/// # Safety
/// `head` must be a valid block pointer into the managed heap.
pub(crate) unsafe fn find_fit(head: *mut u8, requested: usize) -> Option<*mut u8> {
    unsafe {
        let mut bp = head;
        while !tag_allocated(read_header(bp)) {
            if block_size(bp) >= requested {
                return Some(bp);
            }
            bp = get_next_free(bp);
        }
        None
    }
}
