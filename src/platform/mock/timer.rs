//! Mock Timer implementation for testing

use core::sync::atomic::{AtomicU64, Ordering};

use crate::platform::{Result, traits::TimerInterface};

/// Mock Timer implementation
///
/// Simulated monotonic clock. Delays advance time instantly; tests move the
/// clock through a shared reference with [`MockTimer::advance`] so an edge
/// handler can read the same clock.
#[derive(Debug, Default)]
pub struct MockTimer {
    now_us: AtomicU64,
}

impl MockTimer {
    /// Create a new mock timer at t = 0
    pub fn new() -> Self {
        Self {
            now_us: AtomicU64::new(0),
        }
    }

    /// Advance simulated time by `us` microseconds
    pub fn advance(&self, us: u64) {
        self.now_us.fetch_add(us, Ordering::AcqRel);
    }

    /// Set simulated time to an absolute value
    pub fn set(&self, us: u64) {
        self.now_us.store(us, Ordering::Release);
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.advance(us as u64);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.now_us.load(Ordering::Acquire)
    }
}
