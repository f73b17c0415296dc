//! Platform error types
//!
//! This module defines error types for platform operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their HAL-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum PlatformError {
    /// PWM operation failed
    Pwm(PwmError),
    /// GPIO operation failed
    Gpio(GpioError),
    /// Timer operation failed
    Timer(TimerError),
    /// Interrupt registration failed
    Irq(IrqError),
    /// Platform initialization failed
    InitializationFailed,
    /// Invalid configuration provided
    InvalidConfig,
}

/// PWM-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum PwmError {
    /// Duty cycle outside [0.0, 1.0] or not a number
    InvalidDutyCycle,
    /// Frequency/resolution pair not reachable with the clock divider
    InvalidFrequency,
    /// Resolution of zero steps
    InvalidResolution,
}

/// GPIO-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum GpioError {
    /// Invalid pin number
    InvalidPin(u8),
    /// Invalid mode for operation
    InvalidMode,
    /// Hardware error during GPIO operation
    HardwareError,
}

/// Timer-specific errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum TimerError {
    /// Invalid duration
    InvalidDuration,
    /// Alarm already scheduled with a callback
    AlarmInUse,
}

/// Interrupt dispatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum IrqError {
    /// A handler is already registered for this pin
    AlreadyRegistered(u8),
    /// Pin number outside the GPIO bank
    InvalidPin(u8),
    /// Dispatch table has no free slot
    TableFull,
    /// Empty event mask
    EmptyMask,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Pwm(e) => write!(f, "PWM error: {:?}", e),
            PlatformError::Gpio(e) => write!(f, "GPIO error: {:?}", e),
            PlatformError::Timer(e) => write!(f, "Timer error: {:?}", e),
            PlatformError::Irq(e) => write!(f, "IRQ error: {:?}", e),
            PlatformError::InitializationFailed => write!(f, "Platform initialization failed"),
            PlatformError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

impl From<PwmError> for PlatformError {
    fn from(error: PwmError) -> Self {
        PlatformError::Pwm(error)
    }
}

impl From<GpioError> for PlatformError {
    fn from(error: GpioError) -> Self {
        PlatformError::Gpio(error)
    }
}

impl From<TimerError> for PlatformError {
    fn from(error: TimerError) -> Self {
        PlatformError::Timer(error)
    }
}

impl From<IrqError> for PlatformError {
    fn from(error: IrqError) -> Self {
        PlatformError::Irq(error)
    }
}
