//! Platform abstraction layer
//!
//! This module provides the narrow hardware capability interface the core
//! consumes: digital lines, PWM slices, GPIO interrupt enables, a monotonic
//! microsecond clock, and a repeating alarm. All platform-specific code is
//! isolated to this module.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    AlarmInterface, EdgeMask, GpioInterface, IrqController, PeriodicHandler, PwmInterface,
    TimerInterface,
};
