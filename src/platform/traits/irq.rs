//! GPIO interrupt controller trait
//!
//! This module defines the edge/level interrupt enable interface. The
//! platform installs exactly one hardware vector for the GPIO bank; that
//! vector hands `(pin, events)` to [`crate::core::irq::IrqRegistry::dispatch`].

use bitflags::bitflags;

bitflags! {
    /// GPIO interrupt event mask
    ///
    /// Bit layout matches the RP-series `INTR`/`INTE` nibble per pin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EdgeMask: u32 {
        /// Pin is low
        const LEVEL_LOW = 0x1;
        /// Pin is high
        const LEVEL_HIGH = 0x2;
        /// High to low transition
        const EDGE_FALL = 0x4;
        /// Low to high transition
        const EDGE_RISE = 0x8;
        /// Both edge transitions
        const BOTH_EDGES = Self::EDGE_FALL.bits() | Self::EDGE_RISE.bits();
    }
}

#[cfg(feature = "pico2")]
impl defmt::Format for EdgeMask {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EdgeMask({=u32:#x})", self.bits());
    }
}

/// GPIO interrupt controller
///
/// Methods take `&self`: the enable registers are shared by every pin in the
/// bank, so implementations serialize their read-modify-write internally.
pub trait IrqController {
    /// Number of GPIO lines in the bank
    fn num_pins(&self) -> u8;

    /// Enable or disable delivery of `mask` events on `pin`
    fn set_enabled(&self, pin: u8, mask: EdgeMask, enabled: bool);

    /// Currently enabled events on `pin`
    fn enabled(&self, pin: u8) -> EdgeMask;
}
