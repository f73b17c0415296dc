//! Single-writer atomic cells for cross-context measurements
//!
//! Values shared between interrupt handlers and normal code fit in one
//! 32-bit word and are replaced whole, so a reader never sees a torn value.
//! Each cell has exactly one writer; readers in any context take a single
//! snapshot.

use core::sync::atomic::{AtomicU32, Ordering};

/// Bit pattern used as the "no value" marker (quiet NaN)
const NONE_BITS: u32 = 0x7FC0_0000;

/// `f32` stored as its IEEE-754 bits in an `AtomicU32`
#[derive(Debug)]
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    /// Cell holding `value`
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    /// Cell holding `0.0`
    pub const fn zero() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Current value
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Replace the value
    pub fn store(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::zero()
    }
}

/// Optional measurement in one atomic word
///
/// `None` is encoded as a NaN bit pattern; storing `Some(NaN)` therefore
/// reads back as `None`.
#[derive(Debug)]
pub struct AtomicReading {
    bits: AtomicU32,
}

impl AtomicReading {
    /// Empty reading
    pub const fn none() -> Self {
        Self {
            bits: AtomicU32::new(NONE_BITS),
        }
    }

    /// Latest value, if any
    pub fn load(&self) -> Option<f32> {
        let value = f32::from_bits(self.bits.load(Ordering::Acquire));
        if value.is_nan() { None } else { Some(value) }
    }

    /// Publish a new value or clear it
    pub fn store(&self, value: Option<f32>) {
        let bits = match value {
            Some(v) if !v.is_nan() => v.to_bits(),
            _ => NONE_BITS,
        };
        self.bits.store(bits, Ordering::Release);
    }

    /// Clear the reading
    pub fn clear(&self) {
        self.store(None);
    }
}

impl Default for AtomicReading {
    fn default() -> Self {
        Self::none()
    }
}
