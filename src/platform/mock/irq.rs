//! Mock GPIO interrupt controller for testing

use core::sync::atomic::{AtomicU32, Ordering};

use crate::platform::traits::{EdgeMask, IrqController};

/// GPIO lines in RP2350 bank 0
const BANK0_PINS: usize = 30;

/// Mock interrupt controller
///
/// Records the enabled event mask per pin. Tests deliver events by calling
/// [`crate::core::irq::IrqRegistry::dispatch`] directly, standing in for the
/// bank vector.
#[derive(Debug)]
pub struct MockIrq {
    enabled: [AtomicU32; BANK0_PINS],
}

impl MockIrq {
    /// Create a controller with every event disabled
    pub fn new() -> Self {
        Self {
            enabled: core::array::from_fn(|_| AtomicU32::new(0)),
        }
    }
}

impl Default for MockIrq {
    fn default() -> Self {
        Self::new()
    }
}

impl IrqController for MockIrq {
    fn num_pins(&self) -> u8 {
        BANK0_PINS as u8
    }

    fn set_enabled(&self, pin: u8, mask: EdgeMask, enabled: bool) {
        let Some(slot) = self.enabled.get(pin as usize) else {
            return;
        };
        if enabled {
            slot.fetch_or(mask.bits(), Ordering::AcqRel);
        } else {
            slot.fetch_and(!mask.bits(), Ordering::AcqRel);
        }
    }

    fn enabled(&self, pin: u8) -> EdgeMask {
        self.enabled
            .get(pin as usize)
            .map(|slot| EdgeMask::from_bits_truncate(slot.load(Ordering::Acquire)))
            .unwrap_or(EdgeMask::empty())
    }
}
