use std::io;

use thiserror::Error;

/// Errors raised by [`LogMonitor`](crate::LogMonitor).
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A required argument was missing or unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Raw pattern text failed to compile.
    #[error("invalid pattern: {0}")]
    PatternSyntax(#[from] regex::Error),

    /// Writing a dump to a caller-supplied sink failed.
    #[error("dump failed: {0}")]
    Io(#[from] io::Error),
}

/// Shorthand result type.
pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
