//! Ultrasonic distance sensor (HC-SR04 style)
//!
//! A 12 Hz PWM waveform with a ~10 µs high pulse continuously triggers the
//! sensor. The sensor answers with an echo pulse whose width is the sound
//! round-trip time. Both echo edges are routed through the interrupt
//! registry to an [`EchoChannel`]:
//!
//! - rising edge: record the start timestamp
//! - falling edge: `dT = now - start`, classified by [`classify_echo`]
//!
//! | Pulse width           | Reading                    |
//! |-----------------------|----------------------------|
//! | `dT < 100 µs`         | `Some(0.0)` (too close)    |
//! | `100 ≤ dT < 38000 µs` | `Some(dT / 58 / 100)` m    |
//! | `dT ≥ 38000 µs`       | `None` (timeout / no echo) |
//!
//! The reading lives in one atomic word written only by the echo handler;
//! [`DistanceSensor::distance`] takes a single snapshot and never blocks.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::core::atomic::AtomicReading;
use crate::core::irq::{EdgeHandler, IrqRegistry};
use crate::devices::actuator::PwmActuator;
use crate::devices::pin::DigitalPin;
use crate::parameters::PwmProfile;
use crate::platform::{
    Result,
    traits::{EdgeMask, GpioInterface, IrqController, Pull, PwmInterface, TimerInterface},
};

/// Pulses shorter than this read as 0 m
pub const ECHO_MIN_US: u32 = 100;

/// Pulses this long or longer mean no echo
pub const ECHO_TIMEOUT_US: u32 = 38_000;

/// Trigger compare level: 6 / 49 999 of an 83.3 ms period ≈ 10 µs
pub const TRIGGER_PULSE_LEVEL: u16 = 6;

/// Returned by [`DistanceSensor::distance`] when there is no valid reading
pub const NO_READING: f32 = -1.0;

/// Round-trip microseconds per centimetre at ~343 m/s
const US_PER_CM: f32 = 58.0;

const CM_PER_M: f32 = 100.0;

/// Convert an echo pulse width to metres
pub fn classify_echo(dt_us: u32) -> Option<f32> {
    if dt_us < ECHO_MIN_US {
        Some(0.0)
    } else if dt_us < ECHO_TIMEOUT_US {
        Some(dt_us as f32 / US_PER_CM / CM_PER_M)
    } else {
        None
    }
}

/// Echo line edge handler
///
/// Writer of `start_us` and the reading: this handler only.
pub struct EchoChannel<E: GpioInterface, T: TimerInterface> {
    echo: DigitalPin<E>,
    clock: T,
    /// Rising-edge timestamp, truncated to 32 bits
    start_us: AtomicU32,
    /// A rising edge has been seen and not yet consumed
    armed: AtomicBool,
    reading: AtomicReading,
}

impl<E: GpioInterface, T: TimerInterface> EchoChannel<E, T> {
    /// Configure `echo` as a pulled-down input timed by `clock`
    pub fn new(echo: E, clock: T) -> Result<Self> {
        Ok(Self {
            echo: DigitalPin::input(echo, Pull::Down)?,
            clock,
            start_us: AtomicU32::new(0),
            armed: AtomicBool::new(false),
            reading: AtomicReading::none(),
        })
    }

    /// Echo line
    pub fn pin(&self) -> &DigitalPin<E> {
        &self.echo
    }

    /// Clock used to time edges
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Latest classified reading
    pub fn reading(&self) -> Option<f32> {
        self.reading.load()
    }

    fn on_rise(&self) {
        self.start_us
            .store(self.clock.now_us() as u32, Ordering::Relaxed);
        self.armed.store(true, Ordering::Release);
    }

    fn on_fall(&self) {
        // A falling edge without a recorded start is a partial pulse
        if !self.armed.swap(false, Ordering::Acquire) {
            return;
        }
        let now = self.clock.now_us() as u32;
        let dt = now.wrapping_sub(self.start_us.load(Ordering::Relaxed));
        self.reading.store(classify_echo(dt));
    }
}

impl<E, T> EdgeHandler for EchoChannel<E, T>
where
    E: GpioInterface + Sync,
    T: TimerInterface + Sync,
{
    fn on_edge(&self, _pin: u8, events: EdgeMask) {
        let rise = events.contains(EdgeMask::EDGE_RISE);
        let fall = events.contains(EdgeMask::EDGE_FALL);

        match (rise, fall) {
            (true, false) => self.on_rise(),
            (false, true) => self.on_fall(),
            // Both latched before the vector ran: the current level tells
            // which one came last
            (true, true) => {
                if self.echo.get() {
                    self.on_rise();
                } else {
                    self.on_fall();
                }
            }
            (false, false) => {}
        }
    }
}

/// Trigger actuator plus echo channel
pub struct DistanceSensor<'a, P, E, T>
where
    P: PwmInterface,
    E: GpioInterface,
    T: TimerInterface,
{
    trigger: PwmActuator<P>,
    echo: &'a EchoChannel<E, T>,
}

impl<'a, P, E, T> DistanceSensor<'a, P, E, T>
where
    P: PwmInterface,
    E: GpioInterface + Sync,
    T: TimerInterface + Sync,
{
    /// Start the trigger waveform and route both echo edges to `echo`
    ///
    /// # Errors
    ///
    /// Propagates PWM configuration errors and registry errors (the echo
    /// pin must not already have a handler).
    pub fn new<C: IrqController>(
        trigger: P,
        echo: &'a EchoChannel<E, T>,
        registry: &IrqRegistry<'a, C>,
    ) -> Result<Self> {
        let mut trigger = PwmActuator::with_profile(trigger, PwmProfile::TRIGGER)?;
        trigger.set_level(TRIGGER_PULSE_LEVEL)?;

        echo.pin().request_irq(registry, EdgeMask::BOTH_EDGES, echo)?;

        crate::log_info!("Distance sensor ready on echo pin {}", echo.pin().id());
        Ok(Self { trigger, echo })
    }

    /// Last valid distance in metres, or [`NO_READING`]
    pub fn distance(&self) -> f32 {
        self.echo.reading().unwrap_or(NO_READING)
    }

    /// Last valid distance in metres
    pub fn reading(&self) -> Option<f32> {
        self.echo.reading()
    }

    /// Trigger actuator
    pub fn trigger(&self) -> &PwmActuator<P> {
        &self.trigger
    }

    /// Stop triggering and release the echo interrupt
    pub fn shutdown<C: IrqController>(mut self, registry: &IrqRegistry<'a, C>) -> Result<P> {
        self.echo.pin().disable_irq(registry);
        self.trigger.stop()?;
        crate::log_info!("Distance sensor stopped");
        Ok(self.trigger.into_inner())
    }
}
