//! Motor driver abstraction
//!
//! This module provides the interface for DC motors driven through a
//! direction-plus-speed H-bridge, and the TB6612-style implementation used on
//! the rover.
//!
//! ## Features
//!
//! - Platform-independent `Motor` trait: unsigned speed plus explicit direction
//! - `DirectionalMotor`: one PWM speed input and two direction lines
//! - Speed outside [0.0, 1.0] is rejected, never clamped
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "mock")] {
//! use pico_rover::devices::actuator::PwmActuator;
//! use pico_rover::libraries::motor_driver::{Direction, DirectionalMotor, Motor};
//! use pico_rover::platform::mock::{MockGpio, MockPwm};
//!
//! let pwm = PwmActuator::motor(MockPwm::new()).unwrap();
//! let mut motor =
//!     DirectionalMotor::new(pwm, MockGpio::new_output(17), MockGpio::new_output(18)).unwrap();
//!
//! motor.forward(0.75).unwrap();
//! assert_eq!(motor.direction(), Some(Direction::Forward));
//! assert_eq!(motor.duty(), 0.75);
//!
//! motor.stop().unwrap();
//! assert_eq!(motor.duty(), 0.0);
//! # }
//! ```

pub mod tb6612;

// Re-export main types
pub use tb6612::DirectionalMotor;

use crate::platform::PlatformError;

/// Motor control error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum MotorError {
    /// Speed value outside [0.0, 1.0] range
    InvalidSpeed,
    /// PWM channel or direction line failed
    HardwareFault,
}

impl core::fmt::Display for MotorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MotorError::InvalidSpeed => write!(f, "Speed outside [0, 1]"),
            MotorError::HardwareFault => write!(f, "Motor hardware fault"),
        }
    }
}

impl From<PlatformError> for MotorError {
    fn from(_: PlatformError) -> Self {
        MotorError::HardwareFault
    }
}

/// Direction the direction lines currently select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Backward,
}

/// Motor control trait (platform-independent)
///
/// Speed is an unsigned duty in [0.0, 1.0]; direction is chosen by the
/// method called.
pub trait Motor {
    /// Spin forward at `speed`
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidSpeed` if speed is outside [0.0, 1.0],
    /// leaving the motor unchanged.
    /// Returns `MotorError::HardwareFault` if the hardware fails.
    fn forward(&mut self, speed: f32) -> Result<(), MotorError>;

    /// Spin backward at `speed`
    ///
    /// # Errors
    ///
    /// Same as [`Motor::forward`].
    fn backward(&mut self, speed: f32) -> Result<(), MotorError>;

    /// Drive duty to 0, leaving the direction lines as they are
    ///
    /// # Errors
    ///
    /// Returns `MotorError::HardwareFault` if the PWM hardware fails.
    fn stop(&mut self) -> Result<(), MotorError>;

    /// Last commanded duty
    fn duty(&self) -> f32;

    /// Direction currently selected, `None` before the first command
    fn direction(&self) -> Option<Direction>;
}

/// Reject speeds outside [0.0, 1.0] (including NaN)
pub(crate) fn check_speed(speed: f32) -> Result<(), MotorError> {
    if (0.0..=1.0).contains(&speed) {
        Ok(())
    } else {
        Err(MotorError::InvalidSpeed)
    }
}
