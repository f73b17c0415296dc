//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod gpio;
pub mod irq;
pub mod pwm;
pub mod timer;

// Re-export trait interfaces
pub use gpio::{GpioInterface, GpioMode, Pull};
pub use irq::{EdgeMask, IrqController};
pub use pwm::{PwmConfig, PwmInterface};
pub use timer::{AlarmInterface, PeriodicHandler, TimerInterface};
