//! Error types shared across the allocator surface and the diagnostic checker.

/// The heap substrate refused to grow.
///
/// Returned by [`crate::substrate::HeapSubstrate::grow`] implementations when the
/// underlying provider (a "sbrk-like" primitive) has no more address space to hand
/// out. The allocator never inspects the reason; any failure is treated uniformly
/// as out-of-memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("heap substrate refused to grow")]
pub struct SubstrateOom;

/// Failure mode for [`crate::heap::Heap::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// The substrate could not supply the initial `2 * MIN_BLOCK` bytes, or the
    /// first chunk extension afterward.
    #[error("out of memory while initializing the heap")]
    OutOfMemory,
}

impl From<SubstrateOom> for InitError {
    fn from(_: SubstrateOom) -> Self {
        Self::OutOfMemory
    }
}

/// A violation found by [`crate::heap::Heap::check`].
///
/// Diagnostic only: callers never need this to drive allocator behavior, but it
/// gives a human-readable description of the first inconsistency encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// The prologue's header size or allocated bit does not match the fixed shape
    /// `spec.md` §4.8 requires.
    #[error("bad prologue header")]
    BadPrologue,
    /// A block pointer was not 8-byte aligned.
    #[error("misaligned block pointer")]
    Misaligned,
    /// A block's header word and footer word disagree.
    #[error("header/footer mismatch")]
    TagMismatch,
    /// A free-list link pointer fell outside `[lo, hi)`.
    #[error("free-list link pointer out of bounds")]
    LinkOutOfBounds,
    /// A free block has a free physical neighbor, violating the no-adjacent-free
    /// invariant the coalescer is supposed to maintain.
    #[error("adjacent free blocks were not coalesced")]
    AdjacentFreeBlocks,
}
