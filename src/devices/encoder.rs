//! Quadrature wheel encoder and velocity estimator
//!
//! Both phase lines interrupt on every edge. Each edge moves a signed counter
//! by exactly one count:
//!
//! | Edge on | Condition (after the edge) | Step |
//! |---------|----------------------------|------|
//! | A       | `A != B`                   | +1   |
//! | A       | `A == B`                   | -1   |
//! | B       | `A == B`                   | +1   |
//! | B       | `A != B`                   | -1   |
//!
//! The step is multiplied by the configured [`EncoderPolarity`] sign.
//!
//! A repeating alarm samples the counter at `sample_hz` and converts the
//! delta since the previous sample into velocity. The rate used is the one
//! the whole-microsecond alarm period actually produces:
//!
//! ```text
//! counts/s   = delta * 1e6 / period_us
//! motor rad/s = counts/s / CPR * 2π
//! wheel rad/s = motor rad/s / gear ratio
//! m/s         = wheel rad/s * wheel radius
//! ```
//!
//! # Writers
//!
//! - counter: phase handlers (interrupt context); `reset_count` (normal)
//! - phase A / phase B level: that phase's handler only
//! - previous count: the sampler; `reset_count` zeroes it together with the
//!   counter inside one critical section
//! - velocities: the sampler only

use core::f32::consts::PI;
use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::core::atomic::AtomicF32;
use crate::core::irq::{EdgeHandler, IrqRegistry};
use crate::devices::pin::DigitalPin;
use crate::platform::{
    Result,
    error::{PlatformError, TimerError},
    traits::{AlarmInterface, EdgeMask, GpioInterface, IrqController, PeriodicHandler, Pull},
};

pub use crate::parameters::{EncoderConfig, EncoderPolarity};

/// Two-phase incremental encoder with periodic velocity sampling
pub struct QuadratureEncoder<A: GpioInterface, B: GpioInterface> {
    phase_a: DigitalPin<A>,
    phase_b: DigitalPin<B>,
    config: EncoderConfig,
    count: AtomicI32,
    previous: AtomicI32,
    level_a: AtomicBool,
    level_b: AtomicBool,
    angular: AtomicF32,
    linear: AtomicF32,
}

impl<A: GpioInterface, B: GpioInterface> QuadratureEncoder<A, B> {
    /// Configure both phase lines as floating inputs and seed their levels
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if `config` fails
    /// [`EncoderConfig::validate`], or the GPIO error of either line.
    pub fn new(phase_a: A, phase_b: B, config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        let phase_a = DigitalPin::input(phase_a, Pull::None)?;
        let phase_b = DigitalPin::input(phase_b, Pull::None)?;
        let level_a = AtomicBool::new(phase_a.get());
        let level_b = AtomicBool::new(phase_b.get());

        Ok(Self {
            phase_a,
            phase_b,
            config,
            count: AtomicI32::new(0),
            previous: AtomicI32::new(0),
            level_a,
            level_b,
            angular: AtomicF32::zero(),
            linear: AtomicF32::zero(),
        })
    }

    /// Current signed count
    pub fn count(&self) -> i32 {
        self.count.load(Ordering::Acquire)
    }

    /// Zero the counter
    ///
    /// The sampler never sees the new count against the old previous value,
    /// so a reset does not show up as motion. Edges racing the reset may be
    /// lost.
    pub fn reset_count(&self) {
        critical_section::with(|_| {
            self.count.store(0, Ordering::Release);
            self.previous.store(0, Ordering::Release);
        });
    }

    /// Wheel angular velocity from the last sample (rad/s)
    pub fn angular_velocity(&self) -> f32 {
        self.angular.load()
    }

    /// Wheel linear velocity from the last sample (m/s)
    pub fn linear_velocity(&self) -> f32 {
        self.linear.load()
    }

    /// Encoder configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Phase A line
    pub fn phase_a(&self) -> &DigitalPin<A> {
        &self.phase_a
    }

    /// Phase B line
    pub fn phase_b(&self) -> &DigitalPin<B> {
        &self.phase_b
    }

    /// Convert the count delta since the previous sample into velocity
    ///
    /// Called by the alarm once per period; callable directly when the
    /// caller drives sampling itself.
    pub fn sample_velocity(&self) {
        let delta = critical_section::with(|_| {
            let current = self.count.load(Ordering::Acquire);
            let previous = self.previous.swap(current, Ordering::AcqRel);
            current.wrapping_sub(previous)
        });

        let counts_per_sec = delta as f32 * self.config.effective_sample_hz();
        let motor_rev_per_sec = counts_per_sec / self.config.counts_per_rev as f32;
        let motor_rad_per_sec = motor_rev_per_sec * 2.0 * PI;
        let wheel_rad_per_sec = motor_rad_per_sec / self.config.gear_ratio;

        self.angular.store(wheel_rad_per_sec);
        self.linear
            .store(wheel_rad_per_sec * self.config.wheel_radius_m);
    }

    fn step(&self, forward: bool) {
        let step = if forward { 1 } else { -1 };
        self.count
            .fetch_add(step * self.config.polarity.sign(), Ordering::AcqRel);
    }

    fn on_phase_a(&self) {
        let a = self.phase_a.get();
        self.level_a.store(a, Ordering::Release);
        let b = self.level_b.load(Ordering::Acquire);
        self.step(a != b);
    }

    fn on_phase_b(&self) {
        let b = self.phase_b.get();
        self.level_b.store(b, Ordering::Release);
        let a = self.level_a.load(Ordering::Acquire);
        self.step(a == b);
    }
}

impl<A, B> QuadratureEncoder<A, B>
where
    A: GpioInterface + Sync,
    B: GpioInterface + Sync,
{
    /// Route both phase lines through `registry` and start sampling on `alarm`
    ///
    /// Nothing stays registered if any step fails.
    ///
    /// # Errors
    ///
    /// Returns registry errors for either phase pin, or the alarm's error
    /// (`TimerError::AlarmInUse` when it already runs a callback).
    pub fn start<'a, C, M>(&'a self, registry: &IrqRegistry<'a, C>, alarm: &mut M) -> Result<()>
    where
        C: IrqController,
        M: AlarmInterface<'a>,
    {
        let period_us = self
            .config
            .sample_period_us()
            .ok_or(PlatformError::Timer(TimerError::InvalidDuration))?;

        self.phase_a
            .request_irq(registry, EdgeMask::BOTH_EDGES, self)?;
        if let Err(e) = self
            .phase_b
            .request_irq(registry, EdgeMask::BOTH_EDGES, self)
        {
            self.phase_a.disable_irq(registry);
            return Err(e);
        }
        if let Err(e) = alarm.start_periodic(period_us, self) {
            self.phase_a.disable_irq(registry);
            self.phase_b.disable_irq(registry);
            return Err(e);
        }

        crate::log_info!(
            "Encoder started on pins {}/{} at {} Hz",
            self.phase_a.id(),
            self.phase_b.id(),
            self.config.sample_hz
        );
        Ok(())
    }

    /// Stop sampling and release both phase interrupts
    pub fn stop<'a, C, M>(&self, registry: &IrqRegistry<'a, C>, alarm: &mut M)
    where
        C: IrqController,
        M: AlarmInterface<'a>,
    {
        alarm.cancel();
        self.phase_a.disable_irq(registry);
        self.phase_b.disable_irq(registry);
        crate::log_info!("Encoder stopped");
    }
}

impl<A, B> EdgeHandler for QuadratureEncoder<A, B>
where
    A: GpioInterface + Sync,
    B: GpioInterface + Sync,
{
    fn on_edge(&self, pin: u8, _events: EdgeMask) {
        if pin == self.phase_a.id() {
            self.on_phase_a();
        } else if pin == self.phase_b.id() {
            self.on_phase_b();
        }
    }
}

impl<A, B> PeriodicHandler for QuadratureEncoder<A, B>
where
    A: GpioInterface + Sync,
    B: GpioInterface + Sync,
{
    fn on_period(&self) {
        self.sample_velocity();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::error::IrqError;
    use crate::platform::mock::{MockAlarm, MockGpio, MockIrq};

    const PIN_A: u8 = 2;
    const PIN_B: u8 = 3;

    type Encoder = QuadratureEncoder<MockGpio, MockGpio>;

    fn encoder(config: EncoderConfig) -> Encoder {
        QuadratureEncoder::new(
            MockGpio::new_input(PIN_A),
            MockGpio::new_input(PIN_B),
            config,
        )
        .unwrap()
    }

    /// Drive a phase line and deliver its edge
    fn edge<C: IrqController>(registry: &IrqRegistry<'_, C>, enc: &Encoder, pin: u8, high: bool) {
        let line = if pin == PIN_A {
            enc.phase_a().inner()
        } else {
            enc.phase_b().inner()
        };
        line.drive(high);
        let event = if high {
            EdgeMask::EDGE_RISE
        } else {
            EdgeMask::EDGE_FALL
        };
        registry.dispatch(pin, event);
    }

    /// One full quadrature cycle with A leading B
    fn cycle_forward<C: IrqController>(registry: &IrqRegistry<'_, C>, enc: &Encoder) {
        edge(registry, enc, PIN_A, true);
        edge(registry, enc, PIN_B, true);
        edge(registry, enc, PIN_A, false);
        edge(registry, enc, PIN_B, false);
    }

    fn cycle_reverse<C: IrqController>(registry: &IrqRegistry<'_, C>, enc: &Encoder) {
        edge(registry, enc, PIN_B, true);
        edge(registry, enc, PIN_A, true);
        edge(registry, enc, PIN_B, false);
        edge(registry, enc, PIN_A, false);
    }

    #[test]
    fn test_forward_cycle_counts_four() {
        let enc = encoder(EncoderConfig::default());
        let registry = IrqRegistry::new(MockIrq::new());
        let mut alarm = MockAlarm::new();
        enc.start(&registry, &mut alarm).unwrap();

        cycle_forward(&registry, &enc);
        assert_eq!(enc.count(), 4);
    }

    #[test]
    fn test_reverse_cycle_counts_minus_four() {
        let enc = encoder(EncoderConfig::default());
        let registry = IrqRegistry::new(MockIrq::new());
        let mut alarm = MockAlarm::new();
        enc.start(&registry, &mut alarm).unwrap();

        cycle_reverse(&registry, &enc);
        assert_eq!(enc.count(), -4);
    }

    #[test]
    fn test_inverted_polarity() {
        let enc = encoder(EncoderConfig {
            polarity: EncoderPolarity::Inverted,
            ..Default::default()
        });
        let registry = IrqRegistry::new(MockIrq::new());
        let mut alarm = MockAlarm::new();
        enc.start(&registry, &mut alarm).unwrap();

        cycle_forward(&registry, &enc);
        assert_eq!(enc.count(), -4);
    }

    #[test]
    fn test_velocity_one_rev_per_second() {
        // 28 counts over a 1 s period: one motor revolution per second
        let enc = encoder(EncoderConfig {
            sample_hz: 1,
            ..Default::default()
        });
        let registry = IrqRegistry::new(MockIrq::new());
        let mut alarm = MockAlarm::new();
        enc.start(&registry, &mut alarm).unwrap();

        for _ in 0..7 {
            cycle_forward(&registry, &enc);
        }
        assert_eq!(enc.count(), 28);
        assert!(alarm.fire());

        let omega = 2.0 * PI / 98.5;
        assert!((enc.angular_velocity() - omega).abs() < 1e-5);
        assert!((enc.linear_velocity() - omega * 0.025).abs() < 1e-6);

        // No movement in the next period
        alarm.fire();
        assert_eq!(enc.angular_velocity(), 0.0);
        assert_eq!(enc.linear_velocity(), 0.0);
    }

    #[test]
    fn test_velocity_at_default_rate() {
        // 28 counts within one 10 ms period: 100 motor rev/s
        let enc = encoder(EncoderConfig::default());
        for _ in 0..28 {
            enc.step(true);
        }
        enc.sample_velocity();

        let omega = 200.0 * PI / 98.5;
        assert!((enc.angular_velocity() - omega).abs() < 1e-3);
        assert!((enc.linear_velocity() - omega * 0.025).abs() < 1e-4);
    }

    #[test]
    fn test_negative_velocity() {
        let enc = encoder(EncoderConfig {
            sample_hz: 1,
            ..Default::default()
        });
        for _ in 0..28 {
            enc.step(false);
        }
        enc.sample_velocity();
        assert!((enc.angular_velocity() + 2.0 * PI / 98.5).abs() < 1e-5);
    }

    #[test]
    fn test_reset_count() {
        let enc = encoder(EncoderConfig {
            sample_hz: 1,
            ..Default::default()
        });
        for _ in 0..100 {
            enc.step(true);
        }
        enc.sample_velocity();

        enc.reset_count();
        assert_eq!(enc.count(), 0);

        // Next sample measures from zero, not from the stale previous count
        for _ in 0..28 {
            enc.step(true);
        }
        enc.sample_velocity();
        assert!((enc.angular_velocity() - 2.0 * PI / 98.5).abs() < 1e-5);
    }

    #[test]
    fn test_reset_never_reads_as_motion() {
        let enc = encoder(EncoderConfig::default());
        for _ in 0..1000 {
            enc.step(true);
        }
        enc.sample_velocity();
        assert!(enc.angular_velocity() > 0.0);

        // Counter and previous sample are zeroed together, so a sample
        // landing right after the reset sees a stationary wheel
        enc.reset_count();
        assert_eq!(enc.previous.load(Ordering::Acquire), 0);
        enc.sample_velocity();
        assert_eq!(enc.angular_velocity(), 0.0);
        assert_eq!(enc.linear_velocity(), 0.0);
    }

    #[test]
    fn test_velocity_uses_alarm_period_rate() {
        // 300 Hz runs on a 3333 us period
        let enc = encoder(EncoderConfig {
            sample_hz: 300,
            ..Default::default()
        });
        for _ in 0..28 {
            enc.step(true);
        }
        enc.sample_velocity();

        let rev_per_sec = 1_000_000.0 / 3333.0;
        let omega = rev_per_sec * 2.0 * PI / 98.5;
        assert!((enc.angular_velocity() - omega).abs() < 1e-3);
    }

    #[test]
    fn test_start_registers_and_stop_releases() {
        let enc = encoder(EncoderConfig::default());
        let registry = IrqRegistry::new(MockIrq::new());
        let mut alarm = MockAlarm::new();

        enc.start(&registry, &mut alarm).unwrap();
        assert!(registry.is_registered(PIN_A));
        assert!(registry.is_registered(PIN_B));
        assert_eq!(alarm.period_us(), Some(10_000));

        enc.stop(&registry, &mut alarm);
        assert!(registry.is_empty());
        assert!(!alarm.is_running());

        // Edges after stop are dropped
        edge(&registry, &enc, PIN_A, true);
        assert_eq!(enc.count(), 0);
    }

    #[test]
    fn test_start_rolls_back_on_conflict() {
        struct Noop;
        impl EdgeHandler for Noop {
            fn on_edge(&self, _pin: u8, _events: EdgeMask) {}
        }

        let noop = Noop;
        let enc = encoder(EncoderConfig::default());
        let registry = IrqRegistry::new(MockIrq::new());
        let mut alarm = MockAlarm::new();
        registry
            .register(PIN_B, EdgeMask::EDGE_RISE, &noop)
            .unwrap();

        assert_eq!(
            enc.start(&registry, &mut alarm),
            Err(PlatformError::Irq(IrqError::AlreadyRegistered(PIN_B)))
        );
        assert!(!registry.is_registered(PIN_A));
        assert!(!alarm.is_running());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        for config in [
            EncoderConfig {
                sample_hz: 0,
                ..Default::default()
            },
            EncoderConfig {
                counts_per_rev: 0,
                ..Default::default()
            },
            EncoderConfig {
                gear_ratio: 0.0,
                ..Default::default()
            },
            EncoderConfig {
                gear_ratio: f32::NAN,
                ..Default::default()
            },
        ] {
            let result = QuadratureEncoder::new(
                MockGpio::new_input(PIN_A),
                MockGpio::new_input(PIN_B),
                config,
            );
            assert!(matches!(result, Err(PlatformError::InvalidConfig)));
        }
    }
}
