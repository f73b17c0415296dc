//! Mock GPIO implementation for testing

use core::sync::atomic::{AtomicBool, Ordering};

use crate::platform::{
    Result,
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode, Pull},
};

/// Mock GPIO implementation
///
/// Tracks pin level, direction and pulls for test verification. The level is
/// atomic so a test can drive an input through a shared reference while an
/// edge handler holds the same pin.
#[derive(Debug)]
pub struct MockGpio {
    pin: u8,
    level: AtomicBool,
    mode: GpioMode,
    pull: Pull,
}

impl MockGpio {
    /// Create a new mock GPIO in output mode, driven low
    pub fn new_output(pin: u8) -> Self {
        Self {
            pin,
            level: AtomicBool::new(false),
            mode: GpioMode::Output,
            pull: Pull::None,
        }
    }

    /// Create a new mock GPIO in input mode, reading low
    pub fn new_input(pin: u8) -> Self {
        Self {
            pin,
            level: AtomicBool::new(false),
            mode: GpioMode::Input,
            pull: Pull::None,
        }
    }

    /// Simulate an external signal on the line
    pub fn drive(&self, high: bool) {
        self.level.store(high, Ordering::Release);
    }

    fn require_output(&self) -> Result<()> {
        match self.mode {
            GpioMode::Output => Ok(()),
            GpioMode::Input => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }
}

impl GpioInterface for MockGpio {
    fn pin(&self) -> u8 {
        self.pin
    }

    fn set_high(&mut self) -> Result<()> {
        self.require_output()?;
        self.level.store(true, Ordering::Release);
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.require_output()?;
        self.level.store(false, Ordering::Release);
        Ok(())
    }

    fn toggle(&mut self) -> Result<()> {
        self.require_output()?;
        self.level.fetch_xor(true, Ordering::AcqRel);
        Ok(())
    }

    fn read(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }

    fn set_pull(&mut self, pull: Pull) -> Result<()> {
        self.pull = pull;
        // An undriven input settles to its pull level
        if self.mode == GpioMode::Input {
            match pull {
                Pull::Up => self.drive(true),
                Pull::Down => self.drive(false),
                Pull::None | Pull::Both => {}
            }
        }
        Ok(())
    }

    fn pull(&self) -> Pull {
        self.pull
    }
}
