//! Level coloring for stderr dumps.

use std::cell::Cell;
#[cfg(feature = "color")]
use std::io::{self, IsTerminal};

use crate::Severity;

/// Color mode
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ColorMode {
    /// Color only when stderr is a terminal
    #[default]
    Auto,
    /// Always
    Always,
    /// Never
    Never,
}

/// Returned when text does not name a color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseColorModeError;

impl core::fmt::Display for ParseColorModeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("expected `auto`, `always` or `never`")
    }
}

impl std::error::Error for ParseColorModeError {}

impl core::str::FromStr for ColorMode {
    type Err = ParseColorModeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("always") {
            Ok(Self::Always)
        } else if s.eq_ignore_ascii_case("never") {
            Ok(Self::Never)
        } else if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            Err(ParseColorModeError)
        }
    }
}

thread_local! {
    static MODE: Cell<ColorMode> = Cell::new(ColorMode::Auto);
}

/// Sets the color mode for dumps made on this thread
pub fn set_color_mode(mode: ColorMode) {
    MODE.with(|m| m.set(mode));
}

/// Color mode in effect on this thread
#[must_use]
pub fn color_mode() -> ColorMode {
    MODE.with(Cell::get)
}

/// Read `LOGMONITOR_COLOR`; unparseable values fall back to `Auto`.
pub fn init_from_env() {
    if let Ok(s) = std::env::var("LOGMONITOR_COLOR") {
        set_color_mode(s.parse().unwrap_or_default());
    }
}

pub(crate) const RST: &str = "\x1b[0m";

/// Returns the color code for the given level
#[inline]
pub(crate) const fn level_color(l: Severity) -> &'static str {
    match l {
        Severity::Debug => "\x1b[36m", // cyan
        Severity::Info => "\x1b[32m",  // green
        Severity::Warn => "\x1b[33m",  // yellow
        Severity::Error => "\x1b[31m", // red
        Severity::Fatal => "\x1b[35m", // magenta
    }
}

pub(crate) fn use_color() -> bool {
    #[cfg(not(feature = "color"))]
    {
        false
    }
    #[cfg(feature = "color")]
    {
        match color_mode() {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stderr().is_terminal(),
        }
    }
}
