//! Duty-cycle actuator
//!
//! [`PwmActuator`] wraps one PWM channel running at a fixed frequency and
//! resolution and exposes fractional duty control, LED-style on/off, and
//! timed fade ramps that a [`CancelToken`] can cut short.
//!
//! # Duty Mapping
//!
//! | Call              | Hardware level                  | Recorded duty     |
//! |-------------------|---------------------------------|-------------------|
//! | `set_duty(f)`     | `floor(f * resolution)`         | `f`               |
//! | `set_level(n)`    | `min(n, resolution)`            | `level / resolution` |
//! | `stop()`          | `0`                             | `0.0`             |
//! | `set_state(true)` | `resolution` (always high)      | `1.0`             |
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "mock")] {
//! use pico_rover::devices::actuator::PwmActuator;
//! use pico_rover::platform::mock::MockPwm;
//!
//! let mut led = PwmActuator::led(MockPwm::new()).unwrap();
//! led.set_duty(0.5).unwrap();
//! assert_eq!(led.level(), 32767);
//! assert!(led.set_duty(1.5).is_err());
//! assert_eq!(led.duty(), 0.5);
//! # }
//! ```

use crate::core::cancel::CancelToken;
use crate::parameters::PwmProfile;
use crate::platform::{
    Result,
    error::{PlatformError, PwmError},
    traits::{PwmConfig, PwmInterface, TimerInterface},
};

/// Number of duty steps in one fade ramp
pub const FADE_STEPS: u32 = 100;

/// Result of a fade ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub struct FadeOutcome {
    /// Steps applied before the ramp ended
    pub steps: u32,
    /// Whether the ramp stopped early because the token changed
    pub cancelled: bool,
}

#[derive(Clone, Copy)]
enum Ramp {
    Up,
    Down,
}

/// Periodic waveform on one PWM channel
pub struct PwmActuator<P: PwmInterface> {
    pwm: P,
    config: PwmConfig,
    resolution: u16,
    duty: f32,
}

impl<P: PwmInterface> PwmActuator<P> {
    /// Configure `pwm` for `frequency_hz` with `resolution` steps and enable it
    ///
    /// The output starts at duty 0.
    ///
    /// # Errors
    ///
    /// Returns `PwmError::InvalidFrequency` if the divider cannot reach
    /// `frequency_hz × resolution` from the source clock, and
    /// `PwmError::InvalidResolution` for a zero resolution.
    pub fn new(mut pwm: P, frequency_hz: u32, resolution: u16) -> Result<Self> {
        let config = PwmConfig::for_frequency(pwm.clock_hz(), frequency_hz, resolution)?;
        pwm.configure(config)?;
        pwm.set_level(0)?;
        pwm.enable();

        crate::log_debug!(
            "PWM actuator: {} Hz, resolution {}, divider {}.{}/16",
            frequency_hz,
            resolution,
            config.div_int,
            config.div_frac
        );

        Ok(Self {
            pwm,
            config,
            resolution,
            duty: 0.0,
        })
    }

    /// Build from a frequency/resolution profile
    pub fn with_profile(pwm: P, profile: PwmProfile) -> Result<Self> {
        Self::new(pwm, profile.frequency_hz, profile.resolution)
    }

    /// LED preset (1 kHz, 65 535 steps)
    pub fn led(pwm: P) -> Result<Self> {
        Self::with_profile(pwm, PwmProfile::LED)
    }

    /// Motor preset (1 kHz, 65 535 steps)
    pub fn motor(pwm: P) -> Result<Self> {
        Self::with_profile(pwm, PwmProfile::MOTOR)
    }

    /// Set fractional duty
    ///
    /// # Errors
    ///
    /// Returns `PwmError::InvalidDutyCycle` for `duty` outside [0, 1] or NaN;
    /// the output and recorded duty are left unchanged.
    pub fn set_duty(&mut self, duty: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&duty) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }
        let level = (duty * self.resolution as f32) as u16;
        self.pwm.set_level(level)?;
        self.duty = duty;
        Ok(())
    }

    /// Set the raw compare level, clamped to the resolution
    pub fn set_level(&mut self, level: u16) -> Result<()> {
        let level = level.min(self.resolution);
        self.pwm.set_level(level)?;
        self.duty = level as f32 / self.resolution as f32;
        Ok(())
    }

    /// Drive duty to 0 while leaving the slice running
    pub fn stop(&mut self) -> Result<()> {
        self.pwm.set_level(0)?;
        self.duty = 0.0;
        Ok(())
    }

    /// Full duty when `on`, otherwise 0
    pub fn set_state(&mut self, on: bool) -> Result<()> {
        if on {
            self.set_level(self.resolution)
        } else {
            self.stop()
        }
    }

    /// Flip between 0 and full duty
    pub fn toggle(&mut self) -> Result<()> {
        self.set_state(!self.is_on())
    }

    /// Whether any duty is applied
    pub fn is_on(&self) -> bool {
        self.pwm.level() > 0
    }

    /// Last commanded duty
    pub fn duty(&self) -> f32 {
        self.duty
    }

    /// Current hardware compare level
    pub fn level(&self) -> u16 {
        self.pwm.level()
    }

    /// Steps per period
    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Slice configuration in effect
    pub fn config(&self) -> PwmConfig {
        self.config
    }

    /// Achieved output frequency in Hz
    pub fn frequency(&self) -> f32 {
        self.config.output_frequency(self.pwm.clock_hz())
    }

    /// Ramp from 0 up to `peak` over `duration_ms`
    ///
    /// Applies [`FADE_STEPS`] evenly spaced duties, sleeping
    /// `duration_ms / FADE_STEPS` after each. Before every step the token is
    /// compared with its value at ramp start; on mismatch the ramp stops and
    /// the last applied duty stays in effect.
    ///
    /// # Errors
    ///
    /// Returns `PwmError::InvalidDutyCycle` for `peak` outside [0, 1], or the
    /// first error raised by the PWM channel or timer.
    pub fn fade_up<T: TimerInterface>(
        &mut self,
        duration_ms: u32,
        peak: f32,
        token: &CancelToken,
        timer: &mut T,
    ) -> Result<FadeOutcome> {
        self.fade(Ramp::Up, duration_ms, peak, token, timer)
    }

    /// Ramp from `peak` down to 0 over `duration_ms`
    ///
    /// The first step applies `peak` itself and the last applies 0. Same
    /// stepping and cancellation rules as [`PwmActuator::fade_up`].
    pub fn fade_down<T: TimerInterface>(
        &mut self,
        duration_ms: u32,
        peak: f32,
        token: &CancelToken,
        timer: &mut T,
    ) -> Result<FadeOutcome> {
        self.fade(Ramp::Down, duration_ms, peak, token, timer)
    }

    fn fade<T: TimerInterface>(
        &mut self,
        ramp: Ramp,
        duration_ms: u32,
        peak: f32,
        token: &CancelToken,
        timer: &mut T,
    ) -> Result<FadeOutcome> {
        if !(0.0..=1.0).contains(&peak) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }

        let snapshot = token.snapshot();
        let step_delay_us = duration_ms.saturating_mul(1000) / FADE_STEPS;

        for step in 0..FADE_STEPS {
            if !token.is_current(snapshot) {
                crate::log_debug!("Fade cancelled after {} steps", step);
                return Ok(FadeOutcome {
                    steps: step,
                    cancelled: true,
                });
            }

            let fraction = match ramp {
                Ramp::Up => (step + 1) as f32 / FADE_STEPS as f32,
                // First step applies `peak`, last step 0
                Ramp::Down => (FADE_STEPS - 1 - step) as f32 / (FADE_STEPS - 1) as f32,
            };
            self.set_duty((peak * fraction).clamp(0.0, 1.0))?;
            timer.delay_us(step_delay_us)?;
        }

        Ok(FadeOutcome {
            steps: FADE_STEPS,
            cancelled: false,
        })
    }

    /// Release the PWM channel
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockPwm, MockTimer};

    /// Timer that cancels the token on its n-th delay
    struct CancellingTimer<'a> {
        inner: MockTimer,
        token: &'a CancelToken,
        cancel_on: u32,
        delays: u32,
    }

    impl TimerInterface for CancellingTimer<'_> {
        fn delay_us(&mut self, us: u32) -> Result<()> {
            self.delays += 1;
            if self.delays == self.cancel_on {
                self.token.cancel();
            }
            self.inner.delay_us(us)
        }

        fn now_us(&self) -> u64 {
            self.inner.now_us()
        }
    }

    #[test]
    fn test_new_configures_and_enables() {
        let actuator = PwmActuator::motor(MockPwm::new()).unwrap();
        assert_eq!(actuator.resolution(), 65535);
        assert_eq!(actuator.level(), 0);
        assert_eq!(actuator.duty(), 0.0);
        assert_eq!(actuator.config().top, 65534);
        assert!((actuator.frequency() - 1000.0).abs() < 20.0);

        let pwm = actuator.into_inner();
        assert!(pwm.is_enabled());
        assert!(pwm.config().is_some());
    }

    #[test]
    fn test_new_rejects_unreachable_frequency() {
        assert!(matches!(
            PwmActuator::new(MockPwm::new(), 1, 1000),
            Err(PlatformError::Pwm(PwmError::InvalidFrequency))
        ));
    }

    #[test]
    fn test_set_duty_floors_level() {
        let mut actuator = PwmActuator::new(MockPwm::new(), 1000, 1000).unwrap();

        for duty in [0.0f32, 0.25, 0.333, 0.5, 0.999, 1.0] {
            actuator.set_duty(duty).unwrap();
            assert_eq!(actuator.duty(), duty);
            assert_eq!(actuator.level(), (duty * 1000.0) as u16);
        }
        actuator.set_duty(0.333).unwrap();
        assert_eq!(actuator.level(), 333);
    }

    #[test]
    fn test_set_duty_rejects_out_of_range() {
        let mut actuator = PwmActuator::led(MockPwm::new()).unwrap();
        actuator.set_duty(0.5).unwrap();

        for bad in [-0.01f32, 1.01, f32::NAN, f32::INFINITY] {
            assert_eq!(
                actuator.set_duty(bad),
                Err(PlatformError::Pwm(PwmError::InvalidDutyCycle))
            );
            assert_eq!(actuator.duty(), 0.5);
            assert_eq!(actuator.level(), 32767);
        }
    }

    #[test]
    fn test_set_level_clamps() {
        let mut actuator = PwmActuator::new(MockPwm::new(), 1000, 1000).unwrap();
        actuator.set_level(250).unwrap();
        assert_eq!(actuator.level(), 250);
        assert_eq!(actuator.duty(), 0.25);

        actuator.set_level(5000).unwrap();
        assert_eq!(actuator.level(), 1000);
        assert_eq!(actuator.duty(), 1.0);
    }

    #[test]
    fn test_stop_keeps_slice_enabled() {
        let mut actuator = PwmActuator::led(MockPwm::new()).unwrap();
        actuator.set_duty(0.8).unwrap();
        actuator.stop().unwrap();
        assert_eq!(actuator.level(), 0);
        assert_eq!(actuator.duty(), 0.0);
        assert!(actuator.into_inner().is_enabled());
    }

    #[test]
    fn test_toggle_and_state() {
        let mut actuator = PwmActuator::led(MockPwm::new()).unwrap();
        assert!(!actuator.is_on());

        actuator.toggle().unwrap();
        assert!(actuator.is_on());
        assert_eq!(actuator.level(), 65535);
        assert_eq!(actuator.duty(), 1.0);

        actuator.toggle().unwrap();
        assert!(!actuator.is_on());

        actuator.set_duty(0.1).unwrap();
        actuator.toggle().unwrap();
        assert!(!actuator.is_on());

        actuator.set_state(true).unwrap();
        assert!(actuator.is_on());
        actuator.set_state(false).unwrap();
        assert_eq!(actuator.level(), 0);
    }

    #[test]
    fn test_fade_up_completes() {
        let mut actuator = PwmActuator::new(MockPwm::new(), 1000, 1000).unwrap();
        let token = CancelToken::new();
        let mut timer = MockTimer::new();

        let outcome = actuator.fade_up(500, 1.0, &token, &mut timer).unwrap();
        assert_eq!(
            outcome,
            FadeOutcome {
                steps: 100,
                cancelled: false
            }
        );
        assert_eq!(actuator.duty(), 1.0);
        // 100 steps of 5 ms
        assert_eq!(timer.now_us(), 500_000);
    }

    #[test]
    fn test_fade_down_ends_at_zero() {
        let mut actuator = PwmActuator::new(MockPwm::new(), 1000, 1000).unwrap();
        actuator.set_duty(0.5).unwrap();
        let token = CancelToken::new();
        let mut timer = MockTimer::new();

        let outcome = actuator.fade_down(100, 0.5, &token, &mut timer).unwrap();
        assert!(!outcome.cancelled);
        assert_eq!(actuator.duty(), 0.0);
        assert_eq!(actuator.level(), 0);
    }

    #[test]
    fn test_fade_down_starts_at_peak() {
        let mut actuator = PwmActuator::new(MockPwm::new(), 1000, 1000).unwrap();
        let token = CancelToken::new();
        let mut timer = CancellingTimer {
            inner: MockTimer::new(),
            token: &token,
            cancel_on: 1,
            delays: 0,
        };

        let outcome = actuator.fade_down(500, 0.8, &token, &mut timer).unwrap();
        assert_eq!(
            outcome,
            FadeOutcome {
                steps: 1,
                cancelled: true
            }
        );
        assert_eq!(actuator.duty(), 0.8);
        assert_eq!(actuator.level(), 800);
    }

    #[test]
    fn test_fade_cancelled_during_first_delay() {
        let mut actuator = PwmActuator::new(MockPwm::new(), 1000, 1000).unwrap();
        let token = CancelToken::new();
        let mut timer = CancellingTimer {
            inner: MockTimer::new(),
            token: &token,
            cancel_on: 1,
            delays: 0,
        };

        let outcome = actuator.fade_up(500, 1.0, &token, &mut timer).unwrap();
        assert_eq!(
            outcome,
            FadeOutcome {
                steps: 1,
                cancelled: true
            }
        );
        // Duty of the one applied step stays in effect
        assert_eq!(actuator.duty(), 0.01);
        assert_eq!(actuator.level(), 10);
    }

    #[test]
    fn test_fade_already_cancelled_token_is_ignored() {
        // Cancellation before the ramp starts does not affect it
        let mut actuator = PwmActuator::led(MockPwm::new()).unwrap();
        let token = CancelToken::new();
        token.cancel();
        let mut timer = MockTimer::new();

        let outcome = actuator.fade_up(10, 0.2, &token, &mut timer).unwrap();
        assert_eq!(outcome.steps, 100);
    }

    #[test]
    fn test_fade_rejects_bad_peak() {
        let mut actuator = PwmActuator::led(MockPwm::new()).unwrap();
        let token = CancelToken::new();
        let mut timer = MockTimer::new();
        assert_eq!(
            actuator.fade_up(10, 1.5, &token, &mut timer),
            Err(PlatformError::Pwm(PwmError::InvalidDutyCycle))
        );
        assert_eq!(timer.now_us(), 0);
    }
}
