//! Identity allocation for new incidents.

use std::sync::atomic::{AtomicU64, Ordering};

// == Id Allocator ==
/// Hands out strictly increasing identifiers, starting at 1.
///
/// Lock-free; safe to call from any number of tasks at once.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Returns a fresh identifier. No two calls return the same value.
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
