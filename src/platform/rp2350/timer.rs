//! RP2350 Timer implementation
//!
//! This module provides timer, delay and repeating alarm support for RP2350
//! using the `rp235x-hal` crate.

use crate::platform::{
    Result,
    error::{PlatformError, TimerError},
    traits::{AlarmInterface, PeriodicHandler, TimerInterface},
};
use rp235x_hal::fugit::MicrosDurationU64;
use rp235x_hal::timer::{Alarm, Instant, Timer, TimerDevice};

/// RP2350 Timer implementation
///
/// Wraps the `rp235x-hal` timer to implement the `TimerInterface` trait.
///
/// # Note
///
/// The RP2350 timer is a 64-bit microsecond counter, so `now_us` never wraps
/// in practice.
pub struct Rp2350Timer<D: TimerDevice> {
    timer: Timer<D>,
}

impl<D: TimerDevice> Rp2350Timer<D> {
    /// Create a new RP2350 Timer instance
    ///
    /// # Arguments
    ///
    /// * `timer` - The HAL timer peripheral
    pub fn new(timer: Timer<D>) -> Self {
        Self { timer }
    }
}

impl<D: TimerDevice> TimerInterface for Rp2350Timer<D> {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        use embedded_hal::blocking::delay::DelayUs;
        self.timer.delay_us(us);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.timer.get_counter().ticks()
    }
}

/// Repeating callback on one hardware alarm
///
/// The owner must call [`Rp2350Alarm::on_interrupt`] from the alarm's
/// `TIMERx_IRQ_n` vector. Each firing reschedules relative to the previous
/// deadline so the period stays start-to-start.
pub struct Rp2350Alarm<'a, D: TimerDevice, A: Alarm> {
    timer: Timer<D>,
    alarm: A,
    period: MicrosDurationU64,
    deadline: Option<Instant>,
    handler: Option<&'a dyn PeriodicHandler>,
}

impl<'a, D: TimerDevice, A: Alarm> Rp2350Alarm<'a, D, A> {
    /// Wrap a HAL alarm; `timer` must be the timer the alarm belongs to
    pub fn new(timer: Timer<D>, alarm: A) -> Self {
        Self {
            timer,
            alarm,
            period: MicrosDurationU64::from_ticks(0),
            deadline: None,
            handler: None,
        }
    }

    fn schedule(&mut self, at: Instant) -> Result<()> {
        self.alarm
            .schedule_at(at)
            .map_err(|_| PlatformError::Timer(TimerError::InvalidDuration))?;
        self.deadline = Some(at);
        Ok(())
    }

    /// Acknowledge the alarm, run the handler, and arm the next period
    pub fn on_interrupt(&mut self) {
        self.alarm.clear_interrupt();

        let (Some(handler), Some(deadline)) = (self.handler, self.deadline) else {
            return;
        };

        handler.on_period();

        let mut next = deadline + self.period;
        let now = self.timer.get_counter();
        if next <= now {
            // Overran one or more periods; resync instead of firing a burst
            next = now + self.period;
        }
        if self.schedule(next).is_err() {
            crate::log_error!("Alarm reschedule failed, stopping periodic callback");
            self.cancel();
        }
    }
}

impl<'a, D: TimerDevice, A: Alarm> AlarmInterface<'a> for Rp2350Alarm<'a, D, A> {
    fn start_periodic(&mut self, period_us: u32, handler: &'a dyn PeriodicHandler) -> Result<()> {
        if period_us == 0 {
            return Err(PlatformError::Timer(TimerError::InvalidDuration));
        }
        if self.handler.is_some() {
            return Err(PlatformError::Timer(TimerError::AlarmInUse));
        }

        self.period = MicrosDurationU64::from_ticks(period_us as u64);
        self.handler = Some(handler);
        let first = self.timer.get_counter() + self.period;
        if let Err(e) = self.schedule(first) {
            self.handler = None;
            return Err(e);
        }
        self.alarm.enable_interrupt();
        Ok(())
    }

    fn cancel(&mut self) {
        self.alarm.disable_interrupt();
        self.alarm.clear_interrupt();
        self.handler = None;
        self.deadline = None;
    }

    fn is_running(&self) -> bool {
        self.handler.is_some()
    }
}
