//! Device drivers
//!
//! This module contains device drivers that use platform abstraction traits,
//! so every driver runs unchanged on the RP2350 and against the mocks.
//!
//! ## Modules
//!
//! - `pin`: digital GPIO line and push button
//! - `actuator`: PWM duty-cycle actuator with cancellable fades
//! - `distance`: ultrasonic distance sensor driven by echo edges
//! - `encoder`: quadrature encoder with periodic velocity sampling

pub mod actuator;
pub mod distance;
pub mod encoder;
pub mod pin;

pub use actuator::{FadeOutcome, PwmActuator};
pub use distance::{DistanceSensor, EchoChannel};
pub use encoder::QuadratureEncoder;
pub use pin::{Button, DigitalPin};
