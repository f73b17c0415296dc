//! Mock PWM implementation for testing

use crate::platform::{
    Result,
    traits::{PwmConfig, PwmInterface},
};

/// Default system clock of the RP2350 (Hz)
const DEFAULT_CLOCK_HZ: u32 = 125_000_000;

/// Mock PWM implementation
///
/// Tracks slice configuration, compare level and enable state for test
/// verification.
#[derive(Debug)]
pub struct MockPwm {
    clock_hz: u32,
    config: Option<PwmConfig>,
    level: u16,
    enabled: bool,
}

impl MockPwm {
    /// Create a new mock PWM channel fed by a 125 MHz clock
    pub fn new() -> Self {
        Self::with_clock(DEFAULT_CLOCK_HZ)
    }

    /// Create a new mock PWM channel with a custom source clock
    pub fn with_clock(clock_hz: u32) -> Self {
        Self {
            clock_hz,
            config: None,
            level: 0,
            enabled: false,
        }
    }

    /// Last applied slice configuration
    pub fn config(&self) -> Option<PwmConfig> {
        self.config
    }
}

impl Default for MockPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl PwmInterface for MockPwm {
    fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    fn configure(&mut self, config: PwmConfig) -> Result<()> {
        self.config = Some(config);
        Ok(())
    }

    fn set_level(&mut self, level: u16) -> Result<()> {
        self.level = level;
        Ok(())
    }

    fn level(&self) -> u16 {
        self.level
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
