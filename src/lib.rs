#![warn(missing_docs, unsafe_code)]
//! Capture log output in memory and query it back from tests.
//!
//! A [`LogMonitor`] rewires a [`Logger`] so that every record lands in a
//! [`CaptureSink`]. Queries re-parse the captured text into
//! [`CapturedStatement`]s and filter them by exact severity, exact text or a
//! full-match [`Pattern`].
//!
//! ```
//! use logmonitor::{LogMonitor, Pattern, Severity};
//!
//! let monitor = LogMonitor::capture_all();
//! logmonitor::info!("listening on port {}", 8080);
//! logmonitor::warn!("slow request:\n  GET /health took 2s");
//!
//! assert!(monitor.is_info_statement("listening on port 8080"));
//! let slow = Pattern::new(r"(?s)slow request:.*2s").unwrap();
//! assert!(monitor.is_warn_statement(&slow));
//! assert_eq!(monitor.count(), 2);
//! ```
//!
//! The root logger behind the crate-level macros is per thread, so tests
//! running in parallel each see only their own output.

pub mod color;
mod error;
mod level;
pub mod logger;
mod monitor;
mod parser;
mod pattern;
mod sink;
mod statement;

pub use color::ColorMode;
pub use error::{MonitorError, Result};
pub use level::{ParseSeverityError, Severity};
pub use logger::{Logger, LoggerBuilder};
pub use monitor::{Expect, LogMonitor};
pub use parser::{StatementParser, Statements};
pub use pattern::Pattern;
pub use sink::CaptureSink;
pub use statement::CapturedStatement;

/// Line separator of the host platform.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Line separator of the host platform.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Emit a log message
#[macro_export]
macro_rules! __logmonitor_log {
    ($lg:expr, $lvl:expr, $($t:tt)+) => {{
        let __lg = &$lg; // evaluate once
        if __lg.enabled($lvl) { __lg.log($lvl, format_args!($($t)+)); }
    }}
}
/// debug; `debug!(logger: &lg, ...)` targets a specific logger
#[macro_export]
macro_rules! debug {
    (logger: $lg:expr, $($t:tt)+) => { $crate::__logmonitor_log!($lg, $crate::Severity::Debug, $($t)+) };
    ($($t:tt)+) => { $crate::__logmonitor_log!($crate::logger::root(), $crate::Severity::Debug, $($t)+) };
}
/// info
#[macro_export]
macro_rules! info {
    (logger: $lg:expr, $($t:tt)+) => { $crate::__logmonitor_log!($lg, $crate::Severity::Info, $($t)+) };
    ($($t:tt)+) => { $crate::__logmonitor_log!($crate::logger::root(), $crate::Severity::Info, $($t)+) };
}
/// warning
#[macro_export]
macro_rules! warn {
    (logger: $lg:expr, $($t:tt)+) => { $crate::__logmonitor_log!($lg, $crate::Severity::Warn, $($t)+) };
    ($($t:tt)+) => { $crate::__logmonitor_log!($crate::logger::root(), $crate::Severity::Warn, $($t)+) };
}
/// error
#[macro_export]
macro_rules! error {
    (logger: $lg:expr, $($t:tt)+) => { $crate::__logmonitor_log!($lg, $crate::Severity::Error, $($t)+) };
    ($($t:tt)+) => { $crate::__logmonitor_log!($crate::logger::root(), $crate::Severity::Error, $($t)+) };
}
/// fatal
#[macro_export]
macro_rules! fatal {
    (logger: $lg:expr, $($t:tt)+) => { $crate::__logmonitor_log!($lg, $crate::Severity::Fatal, $($t)+) };
    ($($t:tt)+) => { $crate::__logmonitor_log!($crate::logger::root(), $crate::Severity::Fatal, $($t)+) };
}
