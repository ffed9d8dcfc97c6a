//! Logging abstraction
//!
//! Provides unified logging macros that work across different targets:
//! - Embedded (`defmt` feature): Uses defmt
//! - Host (`log` feature): Uses the `log` facade (SITL installs env_logger)
//! - Neither: Arguments are type-checked and discarded
//!
//! Format strings must stay within the subset both backends accept
//! (plain `{}` placeholders).

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::info!($($arg)*);

        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::warn!($($arg)*);

        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = format_args!($($arg)*);
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(feature = "log", not(feature = "defmt")))]
        ::log::debug!($($arg)*);

        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = format_args!($($arg)*);
    }};
}
