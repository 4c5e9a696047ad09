//! Minimal logging layer the monitor rewires.
//!
//! A [`Logger`] is a cheap, cloneable handle: every clone sees the same
//! threshold and the same writers. Each thread has its own [`root`] logger,
//! which the crate-level macros write to.

use core::fmt::Arguments;
use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use crate::{Severity, LINE_SEPARATOR};

/// Logging configuration handle
#[derive(Clone)]
pub struct Logger {
    inner: Rc<Inner>,
}

struct Inner {
    level: Cell<Severity>,
    writers: RefCell<Vec<Box<dyn Write>>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            inner: Rc::new(Inner {
                level: Cell::new(Severity::Info),
                writers: RefCell::new(Vec::new()),
            }),
        }
    }
}

thread_local! {
    static ROOT: Logger = Logger::builder().stderr().build();
}

/// The calling thread's root logger.
///
/// Writes to stderr at INFO until something rewires it.
#[must_use]
pub fn root() -> Logger {
    ROOT.with(Logger::clone)
}

impl Logger {
    /// A logger with no writers at INFO
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    /// Create a new `LoggerBuilder`
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Current threshold
    #[inline]
    #[must_use]
    pub fn level(&self) -> Severity {
        self.inner.level.get()
    }

    /// Set the threshold; records below it are dropped before formatting.
    #[inline]
    pub fn set_level(&self, l: Severity) {
        self.inner.level.set(l);
    }

    /// Returns `true` if records at `l` would be written
    #[inline]
    #[must_use]
    pub fn enabled(&self, l: Severity) -> bool {
        l >= self.level()
    }

    /// Register an additional destination.
    pub fn add_writer(&self, w: Box<dyn Write>) {
        self.inner.writers.borrow_mut().push(w);
    }

    /// Drop every registered destination.
    pub fn remove_all_writers(&self) {
        self.inner.writers.borrow_mut().clear();
    }

    /// Number of registered destinations
    #[inline]
    #[must_use]
    pub fn writer_count(&self) -> usize {
        self.inner.writers.borrow().len()
    }

    /// Replace every destination with `w` and set the threshold.
    ///
    /// Whoever installs last owns the output.
    pub fn install(&self, w: Box<dyn Write>, level: Severity) {
        {
            let mut writers = self.inner.writers.borrow_mut();
            writers.clear();
            writers.push(w);
        }
        self.set_level(level);
    }

    /// Returns `true` if both handles point at the same logger
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Format and write one record to every destination.
    ///
    /// Destination write errors are ignored.
    pub fn log(&self, l: Severity, args: Arguments) {
        if !self.enabled(l) {
            return;
        }
        let buf = format_record(l, args);
        for w in self.inner.writers.borrow_mut().iter_mut() {
            let _ = w.write_all(&buf);
        }
    }
}

impl core::fmt::Debug for Logger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("writers", &self.writer_count())
            .finish()
    }
}

/// The fixed record layout: `LEVEL - message` followed by [`LINE_SEPARATOR`].
///
/// The parser depends on this exact shape.
#[must_use]
pub fn format_record(l: Severity, args: Arguments) -> Vec<u8> {
    let mut buf = Vec::<u8>::new();
    let _ = buf.write_all(l.as_str().as_bytes());
    let _ = buf.write_all(b" - ");
    let _ = buf.write_fmt(args);
    let _ = buf.write_all(LINE_SEPARATOR.as_bytes());
    buf
}

/// Builder for `Logger`
#[derive(Default)]
pub struct LoggerBuilder {
    level: Option<Severity>,
    writers: Vec<Box<dyn Write>>,
}

impl LoggerBuilder {
    #[inline]
    #[must_use]
    /// Set the threshold
    pub const fn level(mut self, l: Severity) -> Self {
        self.level = Some(l);
        self
    }
    #[inline]
    #[must_use]
    /// Add a destination
    pub fn writer(mut self, w: Box<dyn Write>) -> Self {
        self.writers.push(w);
        self
    }
    #[inline]
    #[must_use]
    /// Add stderr as a destination
    pub fn stderr(self) -> Self {
        self.writer(Box::new(io::stderr()))
    }

    /// Build the logger
    #[must_use]
    pub fn build(self) -> Logger {
        let lg = Logger::default();
        if let Some(l) = self.level {
            lg.set_level(l);
        }
        *lg.inner.writers.borrow_mut() = self.writers;
        lg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CaptureSink;

    #[test]
    fn layout_is_level_dash_message_separator() {
        let out = format_record(Severity::Warn, format_args!("disk {}%", 92));
        assert_eq!(out, format!("WARN - disk 92%{LINE_SEPARATOR}").into_bytes());
    }

    #[test]
    fn threshold_suppresses_lower_levels() {
        let sink = CaptureSink::new();
        let lg = Logger::builder()
            .level(Severity::Warn)
            .writer(Box::new(sink.clone()))
            .build();
        lg.log(Severity::Info, format_args!("dropped"));
        lg.log(Severity::Warn, format_args!("kept"));
        lg.log(Severity::Fatal, format_args!("kept too"));
        assert_eq!(
            sink.snapshot(),
            format!("WARN - kept{LINE_SEPARATOR}FATAL - kept too{LINE_SEPARATOR}")
        );
    }

    #[test]
    fn install_replaces_previous_writers() {
        let first = CaptureSink::new();
        let second = CaptureSink::new();
        let lg = Logger::builder().writer(Box::new(first.clone())).build();
        lg.install(Box::new(second.clone()), Severity::Debug);
        assert_eq!(lg.writer_count(), 1);
        assert_eq!(lg.level(), Severity::Debug);
        lg.log(Severity::Debug, format_args!("x"));
        assert!(first.is_empty());
        assert!(!second.is_empty());
    }

    #[test]
    fn clones_share_configuration() {
        let lg = Logger::new();
        let other = lg.clone();
        other.set_level(Severity::Error);
        assert_eq!(lg.level(), Severity::Error);
        assert!(lg.ptr_eq(&other));
        assert!(!lg.ptr_eq(&Logger::new()));
    }

    #[test]
    fn root_is_per_thread() {
        root().set_level(Severity::Fatal);
        assert_eq!(root().level(), Severity::Fatal);
        let other = std::thread::spawn(|| root().level()).join().unwrap();
        assert_eq!(other, Severity::Info);
    }

    #[test]
    fn no_writers_does_not_panic() {
        let lg = Logger::new();
        lg.remove_all_writers();
        lg.log(Severity::Fatal, format_args!("nowhere"));
        assert_eq!(lg.writer_count(), 0);
    }
}
