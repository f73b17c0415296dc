//! Board and component configuration
//!
//! Plain `Copy` structs whose `Default` values describe the stock rover:
//!
//! - [`BoardPins`]: GPIO assignment with single-ownership validation
//! - [`EncoderConfig`]: encoder resolution, gearing, wheel size, sample rate
//! - [`PwmProfile`]: frequency/resolution pairs for LEDs, motors, trigger

pub mod board;
pub mod encoder;
pub mod pwm;

pub use board::{BoardPins, EncoderPins, LedPins, MotorPins, PinError};
pub use encoder::{EncoderConfig, EncoderPolarity};
pub use pwm::PwmProfile;
