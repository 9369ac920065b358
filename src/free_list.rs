//! The explicit, doubly-linked free list threaded through free blocks.
//!
//! The list has no node of its own: its head is just a block pointer, and its
//! anchor is the prologue block, whose link slots exist (they're sized like any
//! other block, `MIN_BLOCK` bytes) purely to give `insert_at_front` and
//! `unlink` somewhere to write when the list is empty or when a block is
//! unlinked from the front. Traversal always terminates naturally: the
//! prologue and epilogue are permanently allocated, so a loop that walks
//! `next` links until it finds an allocated header stops there without any
//! extra sentinel check.

use crate::block::{get_next_free, get_prev_free, set_next_free, set_prev_free};

/// Insert `bp` at the front of the free list whose current head is `*head`.
///
/// # Safety
/// - `bp` must be a free block not currently on the list.
/// - `*head` must be a valid block pointer (the prologue, on an empty list).
pub(crate) unsafe fn insert_at_front(head: &mut *mut u8, bp: *mut u8) {
    let old_head = *head;
    unsafe {
        set_next_free(bp, old_head);
        set_prev_free(old_head, bp);
        set_prev_free(bp, core::ptr::null_mut());
    }
    *head = bp;
}

/// Remove `bp` from the free list whose current head is `*head`.
///
/// # Safety
/// - `bp` must currently be on the list.
/// - Relies on `bp`'s `next` link being a valid, dereferenceable block pointer,
///   which holds because the list always terminates at the allocated epilogue
///   or prologue sentinel rather than a null link.
pub(crate) unsafe fn unlink(head: &mut *mut u8, bp: *mut u8) {
    unsafe {
        let prev = get_prev_free(bp);
        let next = get_next_free(bp);
        if prev.is_null() {
            *head = next;
        } else {
            set_next_free(prev, next);
        }
        set_prev_free(next, prev);
    }
}
