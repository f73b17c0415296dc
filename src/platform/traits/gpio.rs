//! GPIO interface trait
//!
//! This module defines the GPIO (General Purpose Input/Output) interface that platform implementations must provide.

use crate::platform::Result;

/// GPIO pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum GpioMode {
    /// Input mode (high impedance unless a pull is enabled)
    Input,
    /// Output mode (push-pull)
    Output,
}

/// Pull resistor configuration
///
/// RP-series pads allow both resistors at once, which acts as a bus keeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum Pull {
    /// No pull resistors
    None,
    /// Internal pull-up
    Up,
    /// Internal pull-down
    Down,
    /// Both resistors (bus keeper)
    Both,
}

impl Pull {
    /// Build from independent pull-up/pull-down flags
    pub const fn from_flags(pull_up: bool, pull_down: bool) -> Self {
        match (pull_up, pull_down) {
            (false, false) => Pull::None,
            (true, false) => Pull::Up,
            (false, true) => Pull::Down,
            (true, true) => Pull::Both,
        }
    }

    /// Whether the pull-up resistor is enabled
    pub const fn is_pull_up(self) -> bool {
        matches!(self, Pull::Up | Pull::Both)
    }
}

/// GPIO interface trait
///
/// Platform implementations must provide this interface for GPIO control.
///
/// # Safety Invariants
///
/// - GPIO pin must be initialized before use
/// - Only one owner per GPIO pin instance
/// - `read` may be called from interrupt context, so it takes `&self`
/// - Pin number must be valid for the platform
pub trait GpioInterface {
    /// GPIO number of this line
    fn pin(&self) -> u8;

    /// Set GPIO pin high (logic level 1)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_high(&mut self) -> Result<()>;

    /// Set GPIO pin low (logic level 0)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_low(&mut self) -> Result<()>;

    /// Toggle GPIO pin state
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn toggle(&mut self) -> Result<()>;

    /// Read GPIO pin state
    ///
    /// Returns `true` if the pin is high, `false` if low.
    /// Valid in both input and output modes.
    fn read(&self) -> bool;

    /// Set GPIO pin direction
    fn set_mode(&mut self, mode: GpioMode) -> Result<()>;

    /// Get current GPIO pin direction
    fn mode(&self) -> GpioMode;

    /// Configure the pad pull resistors
    fn set_pull(&mut self, pull: Pull) -> Result<()>;

    /// Get current pull configuration
    fn pull(&self) -> Pull;

    /// Drive the pin to the given level
    fn set_level(&mut self, high: bool) -> Result<()> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }
}
