//! RP2350 PWM implementation
//!
//! This module provides PWM support for RP2350 using the `rp235x-hal` crate.
//! One `Rp2350Pwm` drives one output channel (A or B) of a slice; divider
//! and wrap settings are per slice.

use crate::platform::{
    Result,
    error::{PlatformError, PwmError},
    traits::{PwmConfig, PwmInterface},
};
use rp235x_hal::pwm::{FreeRunning, Slice, SliceId};

/// Output channel of a slice (even GPIO = A, odd GPIO = B)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum PwmOutput {
    A,
    B,
}

impl PwmOutput {
    /// Channel a GPIO number is routed to
    pub const fn for_gpio(gpio: u8) -> Self {
        if gpio % 2 == 0 { PwmOutput::A } else { PwmOutput::B }
    }
}

/// RP2350 PWM implementation
///
/// Wraps the `rp235x-hal` PWM slice to implement the `PwmInterface` trait.
pub struct Rp2350Pwm<S: SliceId> {
    slice: Slice<S, FreeRunning>,
    output: PwmOutput,
    clock_hz: u32,
    level: u16,
    enabled: bool,
}

impl<S: SliceId> Rp2350Pwm<S> {
    /// Create a new RP2350 PWM channel
    ///
    /// # Arguments
    ///
    /// * `slice` - The HAL PWM slice (the GPIO must already be in `FunctionPwm`)
    /// * `output` - Channel of the slice wired to the GPIO
    /// * `clock_hz` - System clock feeding the slice
    pub fn new(slice: Slice<S, FreeRunning>, output: PwmOutput, clock_hz: u32) -> Self {
        Self {
            slice,
            output,
            clock_hz,
            level: 0,
            enabled: false,
        }
    }

    fn write_level(&mut self, level: u16) -> Result<()> {
        use embedded_hal_1::pwm::SetDutyCycle;
        match self.output {
            PwmOutput::A => self.slice.channel_a.set_duty_cycle(level),
            PwmOutput::B => self.slice.channel_b.set_duty_cycle(level),
        }
        .map_err(|_| PlatformError::Pwm(PwmError::InvalidDutyCycle))
    }
}

impl<S: SliceId> PwmInterface for Rp2350Pwm<S> {
    fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    fn configure(&mut self, config: PwmConfig) -> Result<()> {
        self.slice.set_div_int(config.div_int);
        self.slice.set_div_frac(config.div_frac);
        self.slice.set_top(config.top);
        Ok(())
    }

    fn set_level(&mut self, level: u16) -> Result<()> {
        self.write_level(level)?;
        self.level = level;
        Ok(())
    }

    fn level(&self) -> u16 {
        self.level
    }

    fn enable(&mut self) {
        self.slice.enable();
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.slice.disable();
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
