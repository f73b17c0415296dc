//! Common libraries
//!
//! Vehicle-level building blocks composed from the device drivers.
//!
//! ## Libraries
//!
//! - `motor_driver`: Motor driver abstraction (TB6612-style direction + PWM)
//! - `drivetrain`: Two-motor differential drive with standby control

pub mod drivetrain;
pub mod motor_driver;

// Re-export commonly used types
pub use drivetrain::{DriveMode, DualMotor};
pub use motor_driver::{Direction, DirectionalMotor, Motor, MotorError};
