//! RP2350 GPIO implementation
//!
//! This module provides GPIO support for RP2350 using the `rp235x-hal` crate.
//! Pins are type-erased (`DynPinId`, `DynPullType`) so every line of the
//! board shares one Rust type and direction/pulls can change at runtime.

use crate::platform::{
    Result,
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode, Pull},
};
use rp235x_hal::gpio::{
    DynPinId, DynPullType, Function, FunctionSioInput, FunctionSioOutput, Pin, PinId, PullType,
    ValidFunction,
};

type OutputLine = Pin<DynPinId, FunctionSioOutput, DynPullType>;
type InputLine = Pin<DynPinId, FunctionSioInput, DynPullType>;

enum Line {
    Output(OutputLine),
    Input(InputLine),
}

/// RP2350 GPIO implementation
///
/// Wraps a type-erased `rp235x-hal` SIO pin to implement `GpioInterface`.
pub struct Rp2350Gpio {
    /// `None` only while switching direction
    line: Option<Line>,
    num: u8,
    pull: Pull,
}

impl Rp2350Gpio {
    /// Take ownership of a HAL pin as a floating input
    ///
    /// # Arguments
    ///
    /// * `pin` - Any bank-0 pin in any function
    pub fn new<I, F, P>(pin: Pin<I, F, P>) -> Self
    where
        I: PinId + ValidFunction<FunctionSioInput>,
        F: Function,
        P: PullType,
    {
        let num = pin.id().num;
        let mut line = pin
            .reconfigure::<FunctionSioInput, DynPullType>()
            .into_dyn_pin();
        line.set_pull_type(DynPullType::None);
        Self {
            line: Some(Line::Input(line)),
            num,
            pull: Pull::None,
        }
    }

    fn unavailable() -> PlatformError {
        PlatformError::Gpio(GpioError::HardwareError)
    }

    fn output(&mut self) -> Result<&mut OutputLine> {
        match self.line.as_mut() {
            Some(Line::Output(pin)) => Ok(pin),
            Some(Line::Input(_)) => Err(PlatformError::Gpio(GpioError::InvalidMode)),
            None => Err(Self::unavailable()),
        }
    }
}

impl GpioInterface for Rp2350Gpio {
    fn pin(&self) -> u8 {
        self.num
    }

    fn set_high(&mut self) -> Result<()> {
        use embedded_hal::digital::v2::OutputPin;
        self.output()?
            .set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))
    }

    fn set_low(&mut self) -> Result<()> {
        use embedded_hal::digital::v2::OutputPin;
        self.output()?
            .set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))
    }

    fn toggle(&mut self) -> Result<()> {
        use embedded_hal::digital::v2::ToggleableOutputPin;
        self.output()?
            .toggle()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))
    }

    fn read(&self) -> bool {
        use embedded_hal::digital::v2::{InputPin, StatefulOutputPin};
        match &self.line {
            Some(Line::Input(pin)) => pin.is_high().unwrap_or(false),
            Some(Line::Output(pin)) => pin.is_set_high().unwrap_or(false),
            None => false,
        }
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        let line = self.line.take().ok_or_else(Self::unavailable)?;
        let line = match (line, mode) {
            (Line::Input(pin), GpioMode::Output) => {
                Line::Output(pin.reconfigure::<FunctionSioOutput, DynPullType>())
            }
            (Line::Output(pin), GpioMode::Input) => {
                Line::Input(pin.reconfigure::<FunctionSioInput, DynPullType>())
            }
            (unchanged, _) => unchanged,
        };
        self.line = Some(line);
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        match self.line {
            Some(Line::Output(_)) => GpioMode::Output,
            _ => GpioMode::Input,
        }
    }

    fn set_pull(&mut self, pull: Pull) -> Result<()> {
        let pull_type = match pull {
            Pull::None => DynPullType::None,
            Pull::Up => DynPullType::Up,
            Pull::Down => DynPullType::Down,
            Pull::Both => DynPullType::BusKeep,
        };
        match self.line.as_mut() {
            Some(Line::Input(pin)) => pin.set_pull_type(pull_type),
            Some(Line::Output(pin)) => pin.set_pull_type(pull_type),
            None => return Err(Self::unavailable()),
        }
        self.pull = pull;
        Ok(())
    }

    fn pull(&self) -> Pull {
        self.pull
    }
}
