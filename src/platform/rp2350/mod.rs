//! RP2350 platform implementation for Raspberry Pi Pico 2
//!
//! This module provides concrete implementations of the platform abstraction
//! traits for the RP2350 microcontroller using the `rp235x-hal` crate.
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! pico_rover = { version = "0.1", features = ["pico2"] }
//! ```
//!
//! # Interrupt wiring
//!
//! The application owns the vectors. `IO_IRQ_BANK0` calls
//! [`dispatch_bank0`] with the shared registry, and the encoder alarm vector
//! calls [`Rp2350Alarm::on_interrupt`].

mod gpio;
mod irq;
mod pwm;
mod timer;

pub use gpio::Rp2350Gpio;
pub use irq::{Rp2350Irq, dispatch_bank0, unmask_bank0};
pub use pwm::{PwmOutput, Rp2350Pwm};
pub use timer::{Rp2350Alarm, Rp2350Timer};
