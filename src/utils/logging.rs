//! Logging setup plus conditional logging macros gated on a
//! module-level `ENABLE_LOGS` flag.
//!
//! Modules that want to silence their own chatter without touching the
//! global filter define:
//! ```rust
//! const ENABLE_LOGS: bool = true; // or false
//! ```
//! and use the crate-root macros instead of `log::*` directly.

/// Initialize the global logger. Reads `RUST_LOG`, defaults to `info`.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}

/// Conditional info logging; checks the `ENABLE_LOGS` const in the
/// calling module.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Conditional warn logging; checks the `ENABLE_LOGS` const in the
/// calling module.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Conditional error logging; checks the `ENABLE_LOGS` const in the
/// calling module.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
