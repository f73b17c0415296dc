//! Digital GPIO line
//!
//! [`DigitalPin`] is the single concrete line type every device builds on:
//! LEDs and direction lines use it as an output, the echo and encoder phase
//! lines as inputs whose edges are routed through the
//! [`IrqRegistry`](crate::core::irq::IrqRegistry).
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "mock")] {
//! use pico_rover::devices::pin::DigitalPin;
//! use pico_rover::platform::mock::MockGpio;
//!
//! let mut led = DigitalPin::output(MockGpio::new_output(25)).unwrap();
//! led.set(true).unwrap();
//! assert!(led.get());
//! led.toggle().unwrap();
//! assert!(!led.get());
//! # }
//! ```

use crate::core::irq::{EdgeHandler, IrqRegistry};
use crate::platform::{
    Result,
    traits::{EdgeMask, GpioInterface, GpioMode, IrqController, Pull},
};

/// Microseconds per second
const US_PER_SECOND: f32 = 1_000_000.0;

/// One GPIO line owned by exactly one component
pub struct DigitalPin<G: GpioInterface> {
    gpio: G,
    /// Anchor for `toggle_every`
    last_toggle_us: Option<u64>,
}

impl<G: GpioInterface> DigitalPin<G> {
    /// Configure `gpio` as a push-pull output driven low
    pub fn output(mut gpio: G) -> Result<Self> {
        gpio.set_mode(GpioMode::Output)?;
        gpio.set_low()?;
        Ok(Self {
            gpio,
            last_toggle_us: None,
        })
    }

    /// Configure `gpio` as an input with the given pulls
    pub fn input(mut gpio: G, pull: Pull) -> Result<Self> {
        gpio.set_mode(GpioMode::Input)?;
        gpio.set_pull(pull)?;
        Ok(Self {
            gpio,
            last_toggle_us: None,
        })
    }

    /// GPIO number
    pub fn id(&self) -> u8 {
        self.gpio.pin()
    }

    /// Current line level; safe from interrupt context
    pub fn get(&self) -> bool {
        self.gpio.read()
    }

    /// Drive the line
    pub fn set(&mut self, high: bool) -> Result<()> {
        self.gpio.set_level(high)
    }

    /// Invert the line
    pub fn toggle(&mut self) -> Result<()> {
        self.gpio.toggle()
    }

    /// Configure pull-up and pull-down resistors independently
    pub fn set_pulls(&mut self, pull_up: bool, pull_down: bool) -> Result<()> {
        self.gpio.set_pull(Pull::from_flags(pull_up, pull_down))
    }

    /// Current pull configuration
    pub fn pulls(&self) -> Pull {
        self.gpio.pull()
    }

    /// Toggle at most once every `seconds`
    ///
    /// Call from a polling loop with the current clock. The first call only
    /// anchors the interval. Returns `true` when the line was toggled.
    pub fn toggle_every(&mut self, seconds: f32, now_us: u64) -> Result<bool> {
        let Some(anchor) = self.last_toggle_us else {
            self.last_toggle_us = Some(now_us);
            return Ok(false);
        };

        let elapsed = now_us.saturating_sub(anchor) as f32 / US_PER_SECOND;
        if elapsed < seconds {
            return Ok(false);
        }

        self.toggle()?;
        self.last_toggle_us = Some(now_us);
        Ok(true)
    }

    /// Route `mask` events on this line to `handler`
    ///
    /// # Errors
    ///
    /// Propagates the registry error, e.g. `IrqError::AlreadyRegistered`.
    pub fn request_irq<'a, C: IrqController>(
        &self,
        registry: &IrqRegistry<'a, C>,
        mask: EdgeMask,
        handler: &'a dyn EdgeHandler,
    ) -> Result<()> {
        registry.register(self.id(), mask, handler)
    }

    /// Stop interrupt delivery for this line; idempotent
    pub fn disable_irq<C: IrqController>(&self, registry: &IrqRegistry<'_, C>) {
        registry.unregister(self.id());
    }

    /// Underlying GPIO
    pub fn inner(&self) -> &G {
        &self.gpio
    }

    /// Release the underlying GPIO
    pub fn into_inner(self) -> G {
        self.gpio
    }
}

/// Push button on an input line
///
/// With a pull-up the button shorts the line to ground, so a low level means
/// pressed; with a pull-down a high level means pressed.
pub struct Button<G: GpioInterface> {
    pin: DigitalPin<G>,
    pull_up: bool,
}

impl<G: GpioInterface> Button<G> {
    /// Configure `gpio` as a button input
    pub fn new(gpio: G, pull_up: bool) -> Result<Self> {
        let pull = if pull_up { Pull::Up } else { Pull::Down };
        Ok(Self {
            pin: DigitalPin::input(gpio, pull)?,
            pull_up,
        })
    }

    /// Whether the button is currently held
    pub fn is_pressed(&self) -> bool {
        self.pin.get() != self.pull_up
    }

    /// Underlying line
    pub fn pin(&self) -> &DigitalPin<G> {
        &self.pin
    }
}
