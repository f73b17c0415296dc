#![cfg_attr(not(test), no_std)]

//! pico_rover - Interrupt-driven sensing and actuation core for a two-motor rover
//!
//! This library turns GPIO edge interrupts into physical measurements
//! (obstacle distance, wheel velocity) and drives the motors at controlled
//! duty cycles. A behavior loop running elsewhere polls the measurements and
//! issues drive commands.

// Platform abstraction layer (HAL capabilities consumed by the core)
pub mod platform;

// Interrupt dispatch, shared atomic cells, cancellation, logging
pub mod core;

// Pin-level devices: digital lines, PWM actuators, distance sensor, encoder
pub mod devices;

// Motor driver and drivetrain composition
pub mod libraries;

// Board pin map and component configuration
pub mod parameters;

// Note: Logging macros (log_info!, log_warn!, log_error!, log_debug!, log_trace!)
// are exported at crate root via #[macro_export] in core::logging
