//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (pico2): Uses defmt over RTT
//! - Host tests: Uses println!
//! - Host non-test: No-op (arguments are still type-checked and count as used)
//!
//! Interrupt handlers (edge dispatch, alarm callbacks) never log. Everything
//! else may call these macros freely.
//!
//! Arguments must implement `defmt::Format` on the embedded target and
//! `core::fmt::Display` on the host, and the format string must stay within
//! the common `{}` / `{:?}` subset of both.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log error message
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        eprintln!("[ERROR] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

/// Log trace message
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::trace!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        println!("[TRACE] {}", format!($($arg)*));

        #[cfg(all(not(feature = "pico2"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
