use core::fmt;

use crate::{Pattern, Severity};

/// One parsed log record.
///
/// Statements are rebuilt from the capture buffer on every query, so two
/// queries over the same output yield equal but distinct values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CapturedStatement {
    severity: Severity,
    text: String,
}

impl CapturedStatement {
    pub(crate) fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Severity the statement was logged at.
    #[inline]
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Message body, embedded newlines included.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the statement, returning its message body.
    #[inline]
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// True when `pattern` matches the whole message body.
    #[inline]
    #[must_use]
    pub fn matches(&self, pattern: &Pattern) -> bool {
        pattern.matches(&self.text)
    }
}

impl fmt::Display for CapturedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.severity, self.text)
    }
}
