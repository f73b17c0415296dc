//! Timer interface traits
//!
//! This module defines the monotonic clock, blocking delay, and repeating
//! alarm interfaces that platform implementations must provide.

use crate::platform::Result;

/// Timer interface trait
///
/// Platform implementations must provide this interface for timing and delays.
///
/// # Safety Invariants
///
/// - Timer peripheral must be initialized before use
/// - Microsecond-level precision required
/// - Monotonic time source (never goes backwards)
/// - `now_us` may be called from interrupt context
pub trait TimerInterface {
    /// Delay for specified number of microseconds
    ///
    /// Blocks execution for at least `us` microseconds.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay operation fails.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Delay for specified number of milliseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer` if the delay operation fails.
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Get current time in microseconds
    ///
    /// Returns a monotonic timestamp in microseconds since platform initialization.
    fn now_us(&self) -> u64;

    /// Get current time in milliseconds
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}

/// Callback invoked once per alarm period
///
/// Runs preemptively relative to normal code (timer interrupt), never nested
/// with another alarm callback. Must not block.
pub trait PeriodicHandler: Sync {
    /// Called once per period
    fn on_period(&self);
}

/// Repeating alarm interface
///
/// Schedules one fixed-period callback. The period is measured start-to-start
/// so callback execution time does not stretch it.
pub trait AlarmInterface<'a> {
    /// Start calling `handler` every `period_us` microseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer(TimerError::InvalidDuration)` for a zero
    /// period and `PlatformError::Timer(TimerError::AlarmInUse)` if a callback
    /// is already scheduled.
    fn start_periodic(&mut self, period_us: u32, handler: &'a dyn PeriodicHandler) -> Result<()>;

    /// Stop the repeating callback; idempotent
    fn cancel(&mut self);

    /// Whether a callback is currently scheduled
    fn is_running(&self) -> bool;
}
