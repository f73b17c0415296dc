//! TB6612-style motor driver implementation
//!
//! Each motor channel has one PWM speed input and two direction inputs.
//!
//! ## Truth Table (as wired on the rover)
//!
//! | IN1 | IN2 | PWM  | Motor State                 |
//! |-----|-----|------|-----------------------------|
//! | 0   | 1   | duty | Forward                     |
//! | 1   | 0   | duty | Backward                    |
//! | x   | x   | 0    | Stopped (direction kept)    |
//! | 0   | 0   | x    | Idle (no direction selected)|
//!
//! The driver's standby line is shared by both channels and belongs to the
//! drivetrain.

use core::sync::atomic::{AtomicU32, Ordering};

use super::{Direction, Motor, MotorError, check_speed};
use crate::devices::actuator::PwmActuator;
use crate::devices::pin::DigitalPin;
use crate::platform::traits::{GpioInterface, PwmInterface};

/// Counter for sampling motor command logs (every 100th call)
static COMMAND_LOG_COUNTER: AtomicU32 = AtomicU32::new(0);

/// One H-bridge channel: PWM speed plus IN1/IN2 direction
pub struct DirectionalMotor<P, G>
where
    P: PwmInterface,
    G: GpioInterface,
{
    pwm: PwmActuator<P>,
    in1: DigitalPin<G>,
    in2: DigitalPin<G>,
    direction: Option<Direction>,
}

impl<P, G> DirectionalMotor<P, G>
where
    P: PwmInterface,
    G: GpioInterface,
{
    /// Create a motor channel; both direction lines start low
    ///
    /// # Errors
    ///
    /// Returns `MotorError::HardwareFault` if a direction line cannot be
    /// configured as an output.
    pub fn new(pwm: PwmActuator<P>, in1: G, in2: G) -> Result<Self, MotorError> {
        Ok(Self {
            pwm,
            in1: DigitalPin::output(in1)?,
            in2: DigitalPin::output(in2)?,
            direction: None,
        })
    }

    /// Speed actuator
    pub fn pwm(&self) -> &PwmActuator<P> {
        &self.pwm
    }

    /// Direction line levels `(IN1, IN2)`
    pub fn lines(&self) -> (bool, bool) {
        (self.in1.get(), self.in2.get())
    }

    fn drive(&mut self, direction: Direction, speed: f32) -> Result<(), MotorError> {
        check_speed(speed)?;

        let count = COMMAND_LOG_COUNTER.fetch_add(1, Ordering::Relaxed);
        if count.is_multiple_of(100) {
            crate::log_debug!("Motor {} speed {}", self.in1.id(), speed);
        }

        let (in1, in2) = match direction {
            Direction::Forward => (false, true),
            Direction::Backward => (true, false),
        };
        self.in1.set(in1)?;
        self.in2.set(in2)?;
        self.pwm.set_duty(speed)?;
        self.direction = Some(direction);
        Ok(())
    }
}

impl<P, G> Motor for DirectionalMotor<P, G>
where
    P: PwmInterface,
    G: GpioInterface,
{
    #[inline]
    fn forward(&mut self, speed: f32) -> Result<(), MotorError> {
        self.drive(Direction::Forward, speed)
    }

    #[inline]
    fn backward(&mut self, speed: f32) -> Result<(), MotorError> {
        self.drive(Direction::Backward, speed)
    }

    #[inline]
    fn stop(&mut self) -> Result<(), MotorError> {
        self.pwm.stop()?;
        Ok(())
    }

    fn duty(&self) -> f32 {
        self.pwm.duty()
    }

    fn direction(&self) -> Option<Direction> {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockPwm};

    fn motor() -> DirectionalMotor<MockPwm, MockGpio> {
        let pwm = PwmActuator::motor(MockPwm::new()).unwrap();
        DirectionalMotor::new(pwm, MockGpio::new_output(17), MockGpio::new_output(18)).unwrap()
    }

    #[test]
    fn test_new_is_idle() {
        let motor = motor();
        assert_eq!(motor.lines(), (false, false));
        assert_eq!(motor.direction(), None);
        assert_eq!(motor.duty(), 0.0);
    }

    #[test]
    fn test_forward_truth_table() {
        let mut motor = motor();
        motor.forward(0.5).unwrap();
        assert_eq!(motor.lines(), (false, true));
        assert_eq!(motor.direction(), Some(Direction::Forward));
        assert_eq!(motor.duty(), 0.5);
        assert_eq!(motor.pwm().level(), 32767);
    }

    #[test]
    fn test_backward_truth_table() {
        let mut motor = motor();
        motor.backward(1.0).unwrap();
        assert_eq!(motor.lines(), (true, false));
        assert_eq!(motor.direction(), Some(Direction::Backward));
        assert_eq!(motor.pwm().level(), 65535);
    }

    #[test]
    fn test_invalid_speed_leaves_motor_unchanged() {
        let mut motor = motor();
        motor.forward(0.25).unwrap();

        assert_eq!(motor.backward(1.5), Err(MotorError::InvalidSpeed));
        assert_eq!(motor.forward(-0.5), Err(MotorError::InvalidSpeed));
        assert_eq!(motor.lines(), (false, true));
        assert_eq!(motor.duty(), 0.25);
    }

    #[test]
    fn test_stop_keeps_direction() {
        let mut motor = motor();
        motor.backward(0.8).unwrap();
        motor.stop().unwrap();
        assert_eq!(motor.duty(), 0.0);
        assert_eq!(motor.pwm().level(), 0);
        assert_eq!(motor.lines(), (true, false));
        assert_eq!(motor.direction(), Some(Direction::Backward));
    }
}
