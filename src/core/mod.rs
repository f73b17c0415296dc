//! Core rover infrastructure
//!
//! This module contains the pieces shared by every device: the logging
//! macros, the interrupt dispatch registry, atomic measurement cells, and
//! cooperative cancellation.

pub mod atomic;
pub mod cancel;
pub mod irq;
pub mod logging;

pub use atomic::{AtomicF32, AtomicReading};
pub use cancel::CancelToken;
pub use irq::{EdgeHandler, IrqRegistry};
