//! Wheel encoder configuration

use crate::platform::{PlatformError, Result};

/// Microseconds per second; also the fastest sample rate the µs alarm can hold
const US_PER_SECOND: u32 = 1_000_000;

/// Direction convention of the phase wiring
///
/// Whether forward rotation produces A-leads-B or B-leads-A depends on how the
/// motor is mounted and wired, so it is calibrated per wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub enum EncoderPolarity {
    /// A leading B counts up
    #[default]
    Normal,
    /// A leading B counts down
    Inverted,
}

impl EncoderPolarity {
    /// Sign applied to every count step
    pub const fn sign(self) -> i32 {
        match self {
            EncoderPolarity::Normal => 1,
            EncoderPolarity::Inverted => -1,
        }
    }
}

/// Encoder and wheel geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderConfig {
    /// Counts per motor-shaft revolution
    pub counts_per_rev: u32,
    /// Motor revolutions per wheel revolution
    pub gear_ratio: f32,
    /// Wheel radius (m)
    pub wheel_radius_m: f32,
    /// Velocity sampling rate (Hz)
    pub sample_hz: u32,
    pub polarity: EncoderPolarity,
}

impl Default for EncoderConfig {
    /// N20-class gearmotor with a 7-pole magnetic encoder
    fn default() -> Self {
        Self {
            counts_per_rev: 28,
            gear_ratio: 98.5,
            wheel_radius_m: 0.025,
            sample_hz: 100,
            polarity: EncoderPolarity::Normal,
        }
    }
}

impl EncoderConfig {
    /// Validate encoder geometry and sample rate
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` for a zero CPR, a gear ratio or
    /// wheel radius that is not finite and positive, or a sample rate outside
    /// 1 Hz..=1 MHz.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if self.counts_per_rev == 0
            || !positive(self.gear_ratio)
            || !positive(self.wheel_radius_m)
            || !(1..=US_PER_SECOND).contains(&self.sample_hz)
        {
            return Err(PlatformError::InvalidConfig);
        }
        Ok(())
    }

    /// Alarm period for `sample_hz`, or `None` when the rate is zero
    ///
    /// Truncated to whole microseconds.
    pub fn sample_period_us(&self) -> Option<u32> {
        US_PER_SECOND.checked_div(self.sample_hz)
    }

    /// Rate the alarm actually runs at, after period truncation
    ///
    /// Equal to `sample_hz` when it divides 1 MHz; 0.0 when the period is 0.
    pub fn effective_sample_hz(&self) -> f32 {
        match self.sample_period_us() {
            Some(period_us) if period_us > 0 => US_PER_SECOND as f32 / period_us as f32,
            _ => 0.0,
        }
    }
}
