//! Board pin map and validation
//!
//! Defaults match the two-motor rover board: a TB6612-style dual H-bridge,
//! an HC-SR04 ultrasonic sensor, one button and an RGB status LED.
//!
//! | Function        | GPIO |
//! |-----------------|------|
//! | Motor standby   | 12   |
//! | Left PWM/IN1/IN2  | 16 / 17 / 18 |
//! | Right PWM/IN1/IN2 | 15 / 14 / 13 |
//! | Sonar trigger   | 9    |
//! | Sonar echo      | 8    |
//! | Button          | 22   |
//! | LED red/blue/green | 28 / 26 / 27 |

use heapless::FnvIndexSet;

/// Highest GPIO number in RP2350 bank 0
pub const RP2350_MAX_GPIO: u8 = 29;

/// One side of the motor driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorPins {
    /// Speed (PWM) input
    pub pwm: u8,
    /// Direction input 1
    pub in1: u8,
    /// Direction input 2
    pub in2: u8,
}

/// Quadrature encoder phase lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderPins {
    /// Phase A
    pub a: u8,
    /// Phase B
    pub b: u8,
}

/// Status LED lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPins {
    pub red: u8,
    pub blue: u8,
    pub green: u8,
}

/// Board-level pin assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPins {
    /// Motor driver standby (enable) line
    pub standby: u8,
    pub left_motor: MotorPins,
    pub right_motor: MotorPins,
    /// Ultrasonic trigger (PWM)
    pub sonar_trigger: u8,
    /// Ultrasonic echo (edge interrupts)
    pub sonar_echo: u8,
    pub button: u8,
    pub leds: LedPins,
    /// Wheel encoders are not fitted on the stock board
    pub left_encoder: Option<EncoderPins>,
    pub right_encoder: Option<EncoderPins>,
}

impl Default for BoardPins {
    fn default() -> Self {
        Self {
            standby: 12,
            left_motor: MotorPins {
                pwm: 16,
                in1: 17,
                in2: 18,
            },
            right_motor: MotorPins {
                pwm: 15,
                in1: 14,
                in2: 13,
            },
            sonar_trigger: 9,
            sonar_echo: 8,
            button: 22,
            leds: LedPins {
                red: 28,
                blue: 26,
                green: 27,
            },
            left_encoder: None,
            right_encoder: None,
        }
    }
}

/// Pin configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum PinError {
    /// Pin is assigned to multiple functions
    DuplicatePin(u8),
    /// GPIO number is outside bank 0
    InvalidGpio(u8),
}

impl core::fmt::Display for PinError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PinError::DuplicatePin(pin) => write!(f, "GPIO {} assigned twice", pin),
            PinError::InvalidGpio(pin) => write!(f, "GPIO {} outside bank 0", pin),
        }
    }
}

impl BoardPins {
    /// Validate pin configuration
    ///
    /// Every line is owned by exactly one component, so each GPIO may appear
    /// once.
    ///
    /// # Errors
    ///
    /// Returns `PinError::InvalidGpio` for a GPIO above 29 and
    /// `PinError::DuplicatePin` for a GPIO used more than once.
    pub fn validate(&self) -> Result<(), PinError> {
        let mut used_pins = FnvIndexSet::<u8, 32>::new();

        let mut check_pin = |pin: u8| -> Result<(), PinError> {
            if pin > RP2350_MAX_GPIO {
                return Err(PinError::InvalidGpio(pin));
            }
            if !used_pins.insert(pin).unwrap_or(false) {
                return Err(PinError::DuplicatePin(pin));
            }
            Ok(())
        };

        check_pin(self.standby)?;
        for motor in [&self.left_motor, &self.right_motor] {
            check_pin(motor.pwm)?;
            check_pin(motor.in1)?;
            check_pin(motor.in2)?;
        }
        check_pin(self.sonar_trigger)?;
        check_pin(self.sonar_echo)?;
        check_pin(self.button)?;
        check_pin(self.leds.red)?;
        check_pin(self.leds.blue)?;
        check_pin(self.leds.green)?;

        for encoder in [self.left_encoder, self.right_encoder].into_iter().flatten() {
            check_pin(encoder.a)?;
            check_pin(encoder.b)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board_is_valid() {
        assert_eq!(BoardPins::default().validate(), Ok(()));
    }

    #[test]
    fn test_duplicate_pin() {
        let mut pins = BoardPins::default();
        pins.sonar_echo = pins.left_motor.in2;
        assert_eq!(pins.validate(), Err(PinError::DuplicatePin(18)));
    }

    #[test]
    fn test_invalid_gpio() {
        let mut pins = BoardPins::default();
        pins.button = 30;
        assert_eq!(pins.validate(), Err(PinError::InvalidGpio(30)));
    }

    #[test]
    fn test_encoder_pins_checked() {
        let mut pins = BoardPins::default();
        pins.left_encoder = Some(EncoderPins { a: 2, b: 3 });
        pins.right_encoder = Some(EncoderPins { a: 4, b: 5 });
        assert_eq!(pins.validate(), Ok(()));

        pins.right_encoder = Some(EncoderPins { a: 4, b: 2 });
        assert_eq!(pins.validate(), Err(PinError::DuplicatePin(2)));
    }
}
