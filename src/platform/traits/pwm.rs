//! PWM interface trait
//!
//! This module defines the PWM output interface that platform implementations must provide.

use crate::platform::{
    Result,
    error::{PlatformError, PwmError},
};

/// Smallest clock divider the slice accepts (1.0 in 8.4 fixed point)
const DIV_MIN_FIXED: u64 = 16;

/// Largest clock divider the slice accepts (255 + 15/16 in 8.4 fixed point)
const DIV_MAX_FIXED: u64 = 0xFFF;

/// PWM slice configuration
///
/// The counter runs at `clock / (div_int + div_frac / 16)` and wraps after
/// `top + 1` ticks, so the output frequency is
/// `clock / (divider * (top + 1))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub struct PwmConfig {
    /// Integer part of the clock divider
    pub div_int: u8,
    /// Fractional part of the clock divider (sixteenths)
    pub div_frac: u8,
    /// Counter wrap value (resolution - 1)
    pub top: u16,
}

impl PwmConfig {
    /// Compute the divider for `frequency_hz` with `resolution` steps per period
    ///
    /// The divider is rounded to the nearest sixteenth so that
    /// `resolution * frequency` matches the source clock as closely as the
    /// 8.4 fixed-point divider allows.
    ///
    /// # Errors
    ///
    /// Returns `PwmError::InvalidResolution` for a zero resolution and
    /// `PwmError::InvalidFrequency` when the divider falls outside
    /// [1.0, 256.0).
    pub fn for_frequency(clock_hz: u32, frequency_hz: u32, resolution: u16) -> Result<Self> {
        if resolution == 0 {
            return Err(PlatformError::Pwm(PwmError::InvalidResolution));
        }
        if frequency_hz == 0 {
            return Err(PlatformError::Pwm(PwmError::InvalidFrequency));
        }

        let ticks_per_second = frequency_hz as u64 * resolution as u64;
        let div_fixed = (clock_hz as u64 * 16 + ticks_per_second / 2) / ticks_per_second;

        if !(DIV_MIN_FIXED..=DIV_MAX_FIXED).contains(&div_fixed) {
            return Err(PlatformError::Pwm(PwmError::InvalidFrequency));
        }

        Ok(Self {
            div_int: (div_fixed >> 4) as u8,
            div_frac: (div_fixed & 0xF) as u8,
            top: resolution - 1,
        })
    }

    /// Clock divider as a float
    pub fn divider(&self) -> f32 {
        self.div_int as f32 + self.div_frac as f32 / 16.0
    }

    /// Steps per period
    pub fn resolution(&self) -> u16 {
        self.top.saturating_add(1)
    }

    /// Output frequency this configuration produces from `clock_hz`
    pub fn output_frequency(&self, clock_hz: u32) -> f32 {
        clock_hz as f32 / (self.divider() * (self.top as f32 + 1.0))
    }
}

/// PWM interface trait
///
/// One channel of a PWM slice. Platform implementations must provide this
/// interface for PWM output control.
///
/// # Safety Invariants
///
/// - PWM peripheral must be initialized before use
/// - Only one owner per PWM channel
/// - Configuration applies to the whole slice; the most recent `configure`
///   on either channel of a slice wins
pub trait PwmInterface {
    /// Source clock feeding the slice divider, in Hz
    fn clock_hz(&self) -> u32;

    /// Apply divider and wrap configuration to the slice
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm` if the hardware rejects the configuration.
    fn configure(&mut self, config: PwmConfig) -> Result<()>;

    /// Set the compare level (counter ticks driven high per period)
    ///
    /// A level above `top` keeps the output high for the whole period.
    fn set_level(&mut self, level: u16) -> Result<()>;

    /// Get the current compare level
    fn level(&self) -> u16;

    /// Enable the slice counter
    fn enable(&mut self);

    /// Disable the slice counter
    fn disable(&mut self);

    /// Check if the slice counter is running
    fn is_enabled(&self) -> bool;
}
