//! Mock repeating alarm for testing

use crate::platform::{
    Result,
    error::{PlatformError, TimerError},
    traits::{AlarmInterface, PeriodicHandler},
};

/// Mock repeating alarm
///
/// Stores the scheduled handler; tests call [`MockAlarm::fire`] to simulate
/// one period elapsing.
#[derive(Default)]
pub struct MockAlarm<'a> {
    period_us: Option<u32>,
    handler: Option<&'a dyn PeriodicHandler>,
}

impl<'a> MockAlarm<'a> {
    /// Create an idle alarm
    pub fn new() -> Self {
        Self {
            period_us: None,
            handler: None,
        }
    }

    /// Configured period, if running
    pub fn period_us(&self) -> Option<u32> {
        self.period_us
    }

    /// Invoke the scheduled handler once; returns `false` when idle
    pub fn fire(&self) -> bool {
        match self.handler {
            Some(handler) => {
                handler.on_period();
                true
            }
            None => false,
        }
    }
}

impl<'a> AlarmInterface<'a> for MockAlarm<'a> {
    fn start_periodic(&mut self, period_us: u32, handler: &'a dyn PeriodicHandler) -> Result<()> {
        if period_us == 0 {
            return Err(PlatformError::Timer(TimerError::InvalidDuration));
        }
        if self.handler.is_some() {
            return Err(PlatformError::Timer(TimerError::AlarmInUse));
        }
        self.period_us = Some(period_us);
        self.handler = Some(handler);
        Ok(())
    }

    fn cancel(&mut self) {
        self.period_us = None;
        self.handler = None;
    }

    fn is_running(&self) -> bool {
        self.handler.is_some()
    }
}
