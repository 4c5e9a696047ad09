use core::fmt;
use core::str::FromStr;

/// Log severity, ordered by importance.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[repr(u8)]
pub enum Severity {
    /// Debug
    #[default]
    Debug = 0,
    /// Info
    Info,
    /// Warn
    Warn,
    /// Error
    Error,
    /// Fatal
    Fatal,
}

impl Severity {
    /// Every severity, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// The single token written in front of every formatted record.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the severity whose token is exactly `token` (case-sensitive).
    #[inline]
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == token)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError(String);

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown severity `{}`", self.0)
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if t.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if t.eq_ignore_ascii_case("warn") || t.eq_ignore_ascii_case("warning") {
            Ok(Self::Warn)
        } else if t.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if t.eq_ignore_ascii_case("fatal") {
            Ok(Self::Fatal)
        } else {
            Err(ParseSeverityError(s.to_owned()))
        }
    }
}

impl TryFrom<&str> for Severity {
    type Error = ParseSeverityError;
    // `Self::Error` would also name the `Error` variant
    fn try_from(s: &str) -> Result<Self, ParseSeverityError> {
        s.parse()
    }
}
