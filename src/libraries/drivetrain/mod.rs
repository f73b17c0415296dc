//! Dual-motor differential drivetrain
//!
//! Two motors plus the driver's shared standby line.
//!
//! | Command         | Left     | Right    |
//! |-----------------|----------|----------|
//! | `forward(s)`    | forward  | forward  |
//! | `backward(s)`   | backward | backward |
//! | `spin_left(s)`  | backward | forward  |
//! | `spin_right(s)` | forward  | backward |
//!
//! The standby line gates the driver outputs only; commanded duties are kept
//! while in standby and apply again once enabled. The line starts low
//! (standby engaged).

use crate::devices::pin::DigitalPin;
use crate::libraries::motor_driver::{Motor, MotorError, check_speed};
use crate::platform::traits::GpioInterface;

/// Last drive command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum DriveMode {
    Stopped,
    Forward,
    Backward,
    SpinLeft,
    SpinRight,
}

/// Two motors and a standby line
pub struct DualMotor<M: Motor, S: GpioInterface> {
    left: M,
    right: M,
    standby: DigitalPin<S>,
    mode: DriveMode,
}

impl<M: Motor, S: GpioInterface> DualMotor<M, S> {
    /// Create a drivetrain in standby with both motors stopped
    ///
    /// # Errors
    ///
    /// Returns `MotorError::HardwareFault` if the standby line cannot be
    /// configured or a motor fails to stop.
    pub fn new(mut left: M, mut right: M, standby: S) -> Result<Self, MotorError> {
        left.stop()?;
        right.stop()?;
        Ok(Self {
            left,
            right,
            standby: DigitalPin::output(standby)?,
            mode: DriveMode::Stopped,
        })
    }

    /// Both motors forward at `speed`
    pub fn forward(&mut self, speed: f32) -> Result<(), MotorError> {
        check_speed(speed)?;
        self.left.forward(speed)?;
        self.right.forward(speed)?;
        self.set_mode(DriveMode::Forward);
        Ok(())
    }

    /// Both motors backward at `speed`
    pub fn backward(&mut self, speed: f32) -> Result<(), MotorError> {
        check_speed(speed)?;
        self.left.backward(speed)?;
        self.right.backward(speed)?;
        self.set_mode(DriveMode::Backward);
        Ok(())
    }

    /// Turn in place to the left: left backward, right forward
    pub fn spin_left(&mut self, speed: f32) -> Result<(), MotorError> {
        check_speed(speed)?;
        self.left.backward(speed)?;
        self.right.forward(speed)?;
        self.set_mode(DriveMode::SpinLeft);
        Ok(())
    }

    /// Turn in place to the right: left forward, right backward
    pub fn spin_right(&mut self, speed: f32) -> Result<(), MotorError> {
        check_speed(speed)?;
        self.left.forward(speed)?;
        self.right.backward(speed)?;
        self.set_mode(DriveMode::SpinRight);
        Ok(())
    }

    /// Duty 0 on both motors; standby untouched
    pub fn stop(&mut self) -> Result<(), MotorError> {
        self.left.stop()?;
        self.right.stop()?;
        self.set_mode(DriveMode::Stopped);
        Ok(())
    }

    /// Drive the standby line: `true` enables the driver outputs
    pub fn set_state(&mut self, enabled: bool) -> Result<(), MotorError> {
        self.standby.set(enabled)?;
        crate::log_info!("Drivetrain {}", if enabled { "enabled" } else { "standby" });
        Ok(())
    }

    /// Whether the driver outputs are enabled
    pub fn is_enabled(&self) -> bool {
        self.standby.get()
    }

    /// Left motor duty in [0, 1]
    pub fn left_duty(&self) -> f32 {
        self.left.duty()
    }

    /// Right motor duty in [0, 1]
    pub fn right_duty(&self) -> f32 {
        self.right.duty()
    }

    /// Last drive command
    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    /// Left motor
    pub fn left(&self) -> &M {
        &self.left
    }

    /// Right motor
    pub fn right(&self) -> &M {
        &self.right
    }

    fn set_mode(&mut self, mode: DriveMode) {
        if self.mode != mode {
            crate::log_debug!("Drive mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}
