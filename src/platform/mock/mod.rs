//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be used
//! for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "mock")] {
//! use pico_rover::platform::mock::{MockGpio, MockTimer};
//! use pico_rover::platform::traits::{GpioInterface, TimerInterface};
//!
//! let echo = MockGpio::new_input(8);
//! echo.drive(true);
//! assert!(echo.read());
//!
//! let timer = MockTimer::new();
//! timer.advance(5_800);
//! assert_eq!(timer.now_us(), 5_800);
//! # }
//! ```

#![cfg(any(test, feature = "mock"))]

mod alarm;
mod gpio;
mod irq;
mod pwm;
mod timer;

pub use alarm::MockAlarm;
pub use gpio::MockGpio;
pub use irq::MockIrq;
pub use pwm::MockPwm;
pub use timer::MockTimer;
