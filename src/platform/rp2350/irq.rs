//! RP2350 GPIO bank-0 interrupt controller
//!
//! Drives the `PROC0_INTE` enable registers and provides the single
//! `IO_IRQ_BANK0` dispatch routine that feeds [`IrqRegistry`].
//!
//! # Example
//!
//! ```ignore
//! static REGISTRY: IrqRegistry<'static, Rp2350Irq> = IrqRegistry::new(Rp2350Irq::new());
//!
//! #[interrupt]
//! fn IO_IRQ_BANK0() {
//!     dispatch_bank0(&REGISTRY);
//! }
//! ```

use crate::core::irq::IrqRegistry;
use crate::platform::traits::{EdgeMask, IrqController};
use rp235x_hal::pac;

/// GPIOs in bank 0 on the RP2350A package
const BANK0_PINS: u8 = 30;

/// Pins per 32-bit `INTR`/`INTE`/`INTS` register
const PINS_PER_REG: u8 = 8;

/// Edge bits of every nibble in a register; level bits are not latched
const EDGE_BITS: u32 = 0xCCCC_CCCC;

#[inline]
fn reg_and_shift(pin: u8) -> (usize, u32) {
    ((pin / PINS_PER_REG) as usize, 4 * (pin % PINS_PER_REG) as u32)
}

/// Core 0 interrupt enables for GPIO bank 0
#[derive(Debug, Default, Clone, Copy)]
pub struct Rp2350Irq {
    _private: (),
}

impl Rp2350Irq {
    /// Handle to the bank-0 enable registers
    ///
    /// Constructing more than one is harmless; all writes happen inside a
    /// critical section.
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl IrqController for Rp2350Irq {
    fn num_pins(&self) -> u8 {
        BANK0_PINS
    }

    fn set_enabled(&self, pin: u8, mask: EdgeMask, enabled: bool) {
        if pin >= BANK0_PINS {
            return;
        }
        let (reg, shift) = reg_and_shift(pin);
        let bits = (mask.bits() & 0xF) << shift;

        critical_section::with(|_| {
            // SAFETY: IO_BANK0 is only touched here and in `dispatch_bank0`,
            // and every read-modify-write runs with interrupts masked.
            let bank = unsafe { &*pac::IO_BANK0::ptr() };
            if enabled {
                // Drop stale latched edges before the line goes live
                bank.intr(reg).write(|w| unsafe { w.bits(bits & EDGE_BITS) });
            }
            bank.proc0_inte(reg).modify(|r, w| {
                let value = if enabled {
                    r.bits() | bits
                } else {
                    r.bits() & !bits
                };
                unsafe { w.bits(value) }
            });
        });
    }

    fn enabled(&self, pin: u8) -> EdgeMask {
        if pin >= BANK0_PINS {
            return EdgeMask::empty();
        }
        let (reg, shift) = reg_and_shift(pin);
        // SAFETY: read-only access to a status register
        let bank = unsafe { &*pac::IO_BANK0::ptr() };
        EdgeMask::from_bits_truncate((bank.proc0_inte(reg).read().bits() >> shift) & 0xF)
    }
}

/// Body of the `IO_IRQ_BANK0` vector
///
/// Acknowledges latched edges and hands each pending pin to `registry`.
/// Edges that arrive after the acknowledge re-pend the vector.
pub fn dispatch_bank0(registry: &IrqRegistry<'_, Rp2350Irq>) {
    // SAFETY: edge acknowledge is write-1-to-clear and only touches the
    // bits read from the status register just before.
    let bank = unsafe { &*pac::IO_BANK0::ptr() };

    let regs = BANK0_PINS.div_ceil(PINS_PER_REG) as usize;
    for reg in 0..regs {
        let status = bank.proc0_ints(reg).read().bits();
        if status == 0 {
            continue;
        }
        bank.intr(reg).write(|w| unsafe { w.bits(status & EDGE_BITS) });

        for slot in 0..PINS_PER_REG {
            let pin = reg as u8 * PINS_PER_REG + slot;
            let events = EdgeMask::from_bits_truncate((status >> (4 * slot as u32)) & 0xF);
            if pin < BANK0_PINS && !events.is_empty() {
                registry.dispatch(pin, events);
            }
        }
    }
}

/// Unmask `IO_IRQ_BANK0` in the NVIC
///
/// # Safety
///
/// The `IO_IRQ_BANK0` vector must be installed and call [`dispatch_bank0`];
/// unmasking can break critical sections based on interrupt masking.
pub unsafe fn unmask_bank0() {
    unsafe { cortex_m::peripheral::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0) };
}
