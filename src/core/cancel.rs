//! Cooperative cancellation token
//!
//! Long-running operations capture a snapshot of the token when they start
//! and poll it between steps. Any context holding a reference can bump the
//! token; every operation that started before the bump stops at its next
//! check. Nothing is interrupted mid-step.

use core::sync::atomic::{AtomicU32, Ordering};

/// Generation counter shared by reference with cancellable operations
#[derive(Debug, Default)]
pub struct CancelToken {
    generation: AtomicU32,
}

impl CancelToken {
    /// Fresh token at generation 0
    pub const fn new() -> Self {
        Self {
            generation: AtomicU32::new(0),
        }
    }

    /// Value to compare against later with [`CancelToken::is_current`]
    pub fn snapshot(&self) -> u32 {
        self.generation.load(Ordering::Acquire)
    }

    /// Cancel every operation holding an older snapshot
    pub fn cancel(&self) {
        // fetch_add wraps on overflow
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether no cancellation happened since `snapshot` was taken
    pub fn is_current(&self, snapshot: u32) -> bool {
        self.snapshot() == snapshot
    }
}
