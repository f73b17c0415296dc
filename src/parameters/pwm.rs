//! PWM frequency/resolution profiles

/// Waveform profile for a [`PwmActuator`](crate::devices::actuator::PwmActuator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmProfile {
    /// Output frequency (Hz)
    pub frequency_hz: u32,
    /// Steps per period
    pub resolution: u16,
}

impl PwmProfile {
    /// Status LEDs
    pub const LED: Self = Self {
        frequency_hz: 1000,
        resolution: 65535,
    };

    /// Motor driver speed inputs
    pub const MOTOR: Self = Self {
        frequency_hz: 1000,
        resolution: 65535,
    };

    /// Ultrasonic trigger: one ~10 µs pulse every 83 ms
    pub const TRIGGER: Self = Self {
        frequency_hz: 12,
        resolution: 49999,
    };
}
