//! Mock [`HeapSubstrate`] backing the integration tests.
//!
//! The crate's core is `no_std`; the substrate it runs against is always an
//! external collaborator (`spec.md` §1 Out Of Scope). Tests stand one up over
//! a pre-reserved `Vec<u8>` so pointers handed to the allocator stay valid for
//! the lifetime of the test — the vector's capacity is fixed at construction
//! and never grows, so its backing allocation never moves.

use explicit_free_list_alloc::error::SubstrateOom;
use explicit_free_list_alloc::substrate::HeapSubstrate;

/// Install the `env_logger` backend so `log::trace!`/`warn!`/`error!` calls
/// inside the allocator are visible when a test is run with `RUST_LOG` set.
/// Safe to call once per test process; later calls are ignored rather than
/// panicking, since multiple integration test binaries each call this.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

pub struct VecSubstrate {
    buf: Vec<u8>,
    used: usize,
}

impl VecSubstrate {
    /// Reserve `capacity` bytes of scratch heap space up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            used: 0,
        }
    }
}

impl HeapSubstrate for VecSubstrate {
    fn lo(&self) -> *mut u8 {
        self.buf.as_ptr().cast_mut()
    }

    fn hi(&self) -> *mut u8 {
        // SAFETY: `used` never exceeds `buf.capacity()`.
        unsafe { self.lo().add(self.used) }
    }

    fn grow(&mut self, bytes: usize) -> Result<*mut u8, SubstrateOom> {
        if self.used.saturating_add(bytes) > self.buf.capacity() {
            return Err(SubstrateOom);
        }
        let old_hi = self.hi();
        self.used += bytes;
        Ok(old_hi)
    }
}
