//! Logging macros gated on a per-module `ENABLE_LOGS` switch.
//!
//! The analytics code runs on every render of the history view, so noisy
//! modules can be muted without touching the global `log` level:
//! ```ignore
//! const ENABLE_LOGS: bool = false;
//!
//! use crate::{log_debug, log_warn};
//!
//! log_warn!("skipping session {}: bad start time", id);
//! ```

/// `log::info!` when the calling module has `ENABLE_LOGS` set.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// `log::warn!` when the calling module has `ENABLE_LOGS` set.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// `log::debug!` when the calling module has `ENABLE_LOGS` set.
/// Used for per-call traces (period resolution, streak anchors).
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!($($arg)*);
        }
    };
}
