//! Interrupt dispatch registry
//!
//! The GPIO bank raises a single hardware interrupt for every line. The
//! platform's vector reads which pins fired and hands each `(pin, events)`
//! pair to [`IrqRegistry::dispatch`], which looks up the handler registered
//! for that pin and invokes it synchronously.
//!
//! # Concurrency
//!
//! The table is guarded by a `critical_section::Mutex`. The lock is held only
//! for the lookup or the insert/remove; the handler itself runs after the
//! lock is released, so a handler may take as long as an interrupt handler is
//! allowed to without masking other interrupts.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "mock")] {
//! use core::sync::atomic::{AtomicU32, Ordering};
//! use pico_rover::core::irq::{EdgeHandler, IrqRegistry};
//! use pico_rover::platform::mock::MockIrq;
//! use pico_rover::platform::traits::EdgeMask;
//!
//! struct Counter(AtomicU32);
//!
//! impl EdgeHandler for Counter {
//!     fn on_edge(&self, _pin: u8, _events: EdgeMask) {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!     }
//! }
//!
//! let counter = Counter(AtomicU32::new(0));
//! let registry = IrqRegistry::new(MockIrq::new());
//! registry.register(8, EdgeMask::BOTH_EDGES, &counter).unwrap();
//!
//! registry.dispatch(8, EdgeMask::EDGE_RISE);
//! registry.dispatch(9, EdgeMask::EDGE_RISE); // nothing registered, dropped
//! assert_eq!(counter.0.load(Ordering::Relaxed), 1);
//! # }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::FnvIndexMap;

use crate::platform::{
    Result,
    error::{IrqError, PlatformError},
    traits::{EdgeMask, IrqController},
};

/// Registry capacity (power of two, covers every line of RP2350 bank 0)
pub const MAX_HANDLERS: usize = 32;

/// Every event bit a pin can deliver
const ALL_EVENTS: EdgeMask = EdgeMask::all();

/// Per-pin interrupt callback
///
/// Runs in interrupt context: must not block, allocate, or log.
pub trait EdgeHandler: Sync {
    /// Handle `events` that fired on `pin`
    fn on_edge(&self, pin: u8, events: EdgeMask);
}

#[derive(Clone, Copy)]
struct Registration<'a> {
    handler: &'a dyn EdgeHandler,
    mask: EdgeMask,
}

/// Pin id → handler table backed by one interrupt controller
///
/// At most one handler per pin. The registry borrows its handlers for `'a`,
/// so every handler outlives its registration.
pub struct IrqRegistry<'a, C: IrqController> {
    controller: C,
    table: Mutex<RefCell<FnvIndexMap<u8, Registration<'a>, MAX_HANDLERS>>>,
}

impl<'a, C: IrqController> IrqRegistry<'a, C> {
    /// Create an empty registry; usable in `static` initializers
    pub const fn new(controller: C) -> Self {
        Self {
            controller,
            table: Mutex::new(RefCell::new(FnvIndexMap::new())),
        }
    }

    /// Install `handler` for `pin` and enable `mask` events
    ///
    /// The handler is in the table before the controller enables delivery,
    /// so the first event always finds it.
    ///
    /// # Errors
    ///
    /// - `IrqError::InvalidPin` if `pin` is outside the GPIO bank
    /// - `IrqError::EmptyMask` if `mask` selects no events
    /// - `IrqError::AlreadyRegistered` if `pin` already has a handler
    /// - `IrqError::TableFull` if no slot is left
    pub fn register(&self, pin: u8, mask: EdgeMask, handler: &'a dyn EdgeHandler) -> Result<()> {
        if pin >= self.controller.num_pins() {
            return Err(PlatformError::Irq(IrqError::InvalidPin(pin)));
        }
        if mask.is_empty() {
            return Err(PlatformError::Irq(IrqError::EmptyMask));
        }

        critical_section::with(|cs| {
            let mut table = self.table.borrow_ref_mut(cs);
            if table.contains_key(&pin) {
                return Err(PlatformError::Irq(IrqError::AlreadyRegistered(pin)));
            }
            table
                .insert(pin, Registration { handler, mask })
                .map_err(|_| PlatformError::Irq(IrqError::TableFull))?;
            self.controller.set_enabled(pin, mask, true);
            Ok(())
        })
        .inspect_err(|e| crate::log_warn!("IRQ register on pin {} failed: {}", pin, e))?;

        crate::log_debug!("IRQ handler registered on pin {}", pin);
        Ok(())
    }

    /// Remove the handler for `pin` and disable all four event types
    ///
    /// Idempotent: unregistering a free pin only clears its enables.
    pub fn unregister(&self, pin: u8) {
        if pin >= self.controller.num_pins() {
            return;
        }
        let removed = critical_section::with(|cs| {
            self.controller.set_enabled(pin, ALL_EVENTS, false);
            self.table.borrow_ref_mut(cs).remove(&pin).is_some()
        });
        if removed {
            crate::log_debug!("IRQ handler removed from pin {}", pin);
        }
    }

    /// Vector entry point: run the handler for `pin`, if any
    ///
    /// Events outside the registered mask and events on pins without a
    /// handler are dropped silently.
    pub fn dispatch(&self, pin: u8, events: EdgeMask) {
        let registration =
            critical_section::with(|cs| self.table.borrow_ref(cs).get(&pin).copied());

        if let Some(Registration { handler, mask }) = registration {
            let events = events & mask;
            if !events.is_empty() {
                handler.on_edge(pin, events);
            }
        }
    }

    /// Whether `pin` currently has a handler
    pub fn is_registered(&self, pin: u8) -> bool {
        critical_section::with(|cs| self.table.borrow_ref(cs).contains_key(&pin))
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.table.borrow_ref(cs).len())
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every handler and disable their events
    pub fn clear(&self) {
        critical_section::with(|cs| {
            let mut table = self.table.borrow_ref_mut(cs);
            for pin in table.keys() {
                self.controller.set_enabled(*pin, ALL_EVENTS, false);
            }
            table.clear();
        });
        crate::log_debug!("IRQ registry cleared");
    }

    /// Underlying interrupt controller
    pub fn controller(&self) -> &C {
        &self.controller
    }
}
