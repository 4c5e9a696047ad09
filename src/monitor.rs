//! Query facade over captured output.
//!
//! Not thread-safe: a monitor and the logger it rewires are meant to be
//! driven from one test thread at a time.

use std::io::Write;

use crate::color::{level_color, use_color, RST};
use crate::error::{MonitorError, Result};
use crate::logger::{self, Logger};
use crate::{CaptureSink, CapturedStatement, Pattern, Severity, StatementParser, LINE_SEPARATOR};

/// What a statement's text is compared against: exact text or a
/// full-match [`Pattern`].
#[derive(Clone, Copy, Debug)]
pub enum Expect<'a> {
    /// Text must equal this string
    Exact(&'a str),
    /// Text must fully match this pattern
    Pattern(&'a Pattern),
}

impl Expect<'_> {
    /// Returns `true` if `text` satisfies the expectation
    #[inline]
    #[must_use]
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Self::Exact(s) => *s == text,
            Self::Pattern(p) => p.matches(text),
        }
    }
}

impl<'a> From<&'a str> for Expect<'a> {
    fn from(s: &'a str) -> Self {
        Self::Exact(s)
    }
}

impl<'a> From<&'a String> for Expect<'a> {
    fn from(s: &'a String) -> Self {
        Self::Exact(s)
    }
}

impl<'a> From<&'a Pattern> for Expect<'a> {
    fn from(p: &'a Pattern) -> Self {
        Self::Pattern(p)
    }
}

/// Captures everything a [`Logger`] emits and answers questions about it.
///
/// Creating a monitor rewires its logger: existing writers are removed, a
/// fresh [`CaptureSink`] becomes the only destination and the logger's
/// threshold is set to the monitor's. A later monitor on the same logger
/// takes the output over; the earlier one keeps what it already captured.
///
/// Every query re-parses the whole buffer, so results always include
/// everything logged before the call.
///
/// ```
/// use logmonitor::{LogMonitor, Severity};
///
/// let monitor = LogMonitor::info_instance();
/// logmonitor::info!("started");
/// logmonitor::debug!("ignored");
/// logmonitor::error!("boom");
///
/// assert_eq!(monitor.count(), 2);
/// assert!(monitor.statements_at(Severity::Debug).is_empty());
/// assert!(monitor.is_statement(Severity::Error, "boom"));
/// ```
#[derive(Debug)]
pub struct LogMonitor {
    logger: Logger,
    sink: CaptureSink,
    threshold: Severity,
    parser: StatementParser,
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::capture_all()
    }
}

impl LogMonitor {
    /// Capture the calling thread's root logger at `level` and above.
    #[must_use]
    pub fn new(level: Severity) -> Self {
        Self::install(&logger::root(), level)
    }

    /// Like [`LogMonitor::new`], for callers holding an optional level.
    ///
    /// # Errors
    /// [`MonitorError::InvalidArgument`] when `level` is `None`.
    pub fn try_new(level: Option<Severity>) -> Result<Self> {
        level.map(Self::new).ok_or_else(|| {
            MonitorError::InvalidArgument("level parameter cannot be absent".to_owned())
        })
    }

    /// Capture `logger` at `level` and above.
    #[must_use]
    pub fn install(logger: &Logger, level: Severity) -> Self {
        let sink = CaptureSink::new();
        logger.install(Box::new(sink.clone()), level);
        Self {
            logger: logger.clone(),
            sink,
            threshold: level,
            parser: StatementParser::new(),
        }
    }

    /// Capture everything on the root logger
    #[must_use]
    pub fn capture_all() -> Self {
        Self::new(Severity::Debug)
    }

    /// Build from the environment.
    ///
    /// `LOGMONITOR_LEVEL` names the threshold (DEBUG when unset) and
    /// `LOGMONITOR_COLOR` the stderr dump color mode.
    ///
    /// # Errors
    /// [`MonitorError::InvalidArgument`] when `LOGMONITOR_LEVEL` is not a
    /// severity name.
    pub fn from_env() -> Result<Self> {
        crate::color::init_from_env();
        match std::env::var("LOGMONITOR_LEVEL") {
            Ok(s) => s
                .parse::<Severity>()
                .map(Self::new)
                .map_err(|e| MonitorError::InvalidArgument(e.to_string())),
            Err(_) => Ok(Self::capture_all()),
        }
    }

    /// DEBUG and above
    #[must_use]
    pub fn debug_instance() -> Self {
        Self::new(Severity::Debug)
    }
    /// INFO and above
    #[must_use]
    pub fn info_instance() -> Self {
        Self::new(Severity::Info)
    }
    /// WARN and above
    #[must_use]
    pub fn warn_instance() -> Self {
        Self::new(Severity::Warn)
    }
    /// ERROR and above
    #[must_use]
    pub fn error_instance() -> Self {
        Self::new(Severity::Error)
    }
    /// FATAL only
    #[must_use]
    pub fn fatal_instance() -> Self {
        Self::new(Severity::Fatal)
    }

    /// Threshold currently set on the logger, which a later monitor or a
    /// direct `set_level` may have changed.
    #[inline]
    #[must_use]
    pub fn level(&self) -> Severity {
        self.logger.level()
    }

    /// Threshold this monitor was created with
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> Severity {
        self.threshold
    }

    /// The logger this monitor rewired
    #[inline]
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The sink output is captured into
    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &CaptureSink {
        &self.sink
    }

    /// Captured output as text, unparsed
    #[must_use]
    pub fn raw(&self) -> String {
        self.sink.snapshot()
    }

    // ===== Queries =====

    /// Every statement, in emission order.
    #[must_use]
    pub fn statements(&self) -> Vec<CapturedStatement> {
        self.parser.parse(&self.sink.snapshot())
    }

    /// Texts of statements logged at exactly `level`.
    #[must_use]
    pub fn statements_at(&self, level: Severity) -> Vec<String> {
        self.statements()
            .into_iter()
            .filter(|st| st.severity() == level)
            .map(CapturedStatement::into_text)
            .collect()
    }

    /// Texts at exactly `level` that `pattern` matches in full.
    ///
    /// Returns nothing when either argument is `None`.
    #[must_use]
    pub fn statements_matching<'p>(
        &self,
        level: impl Into<Option<Severity>>,
        pattern: impl Into<Option<&'p Pattern>>,
    ) -> Vec<String> {
        let (Some(level), Some(pattern)) = (level.into(), pattern.into()) else {
            return Vec::new();
        };
        self.statements_at(level)
            .into_iter()
            .filter(|text| pattern.matches(text))
            .collect()
    }

    /// Compiles `raw` and delegates to [`LogMonitor::statements_matching`].
    ///
    /// Returns nothing when `raw` is `None`.
    ///
    /// # Errors
    /// [`MonitorError::PatternSyntax`] when `raw` is not a valid expression.
    pub fn statements_matching_str<'p>(
        &self,
        level: impl Into<Option<Severity>>,
        raw: impl Into<Option<&'p str>>,
    ) -> Result<Vec<String>> {
        let Some(raw) = raw.into() else {
            return Ok(Vec::new());
        };
        let pattern = Pattern::new(raw)?;
        Ok(self.statements_matching(level, &pattern))
    }

    /// DEBUG statements
    #[must_use]
    pub fn debug_statements(&self) -> Vec<String> {
        self.statements_at(Severity::Debug)
    }
    /// INFO statements
    #[must_use]
    pub fn info_statements(&self) -> Vec<String> {
        self.statements_at(Severity::Info)
    }
    /// WARN statements
    #[must_use]
    pub fn warn_statements(&self) -> Vec<String> {
        self.statements_at(Severity::Warn)
    }
    /// ERROR statements
    #[must_use]
    pub fn error_statements(&self) -> Vec<String> {
        self.statements_at(Severity::Error)
    }
    /// FATAL statements
    #[must_use]
    pub fn fatal_statements(&self) -> Vec<String> {
        self.statements_at(Severity::Fatal)
    }

    /// Number of statements
    #[must_use]
    pub fn count(&self) -> usize {
        self.statements().len()
    }

    /// Number of statements at exactly `level`
    #[must_use]
    pub fn count_at(&self, level: Severity) -> usize {
        self.statements_at(level).len()
    }

    /// Returns `true` if anything was logged at exactly `level`
    #[must_use]
    pub fn has_statements(&self, level: Severity) -> bool {
        self.count_at(level) > 0
    }

    /// Was a statement logged at `level` whose text equals (for `&str`) or
    /// fully matches (for `&Pattern`) `expect`?
    ///
    /// ```
    /// # use logmonitor::{LogMonitor, Pattern, Severity};
    /// let monitor = LogMonitor::capture_all();
    /// logmonitor::warn!("retry 3 of 5");
    ///
    /// assert!(monitor.is_statement(Severity::Warn, "retry 3 of 5"));
    /// let p = Pattern::new(r"retry \d of \d").unwrap();
    /// assert!(monitor.is_statement(Severity::Warn, &p));
    /// assert!(!monitor.is_statement(Severity::Error, &p));
    /// ```
    #[must_use]
    pub fn is_statement<'e>(&self, level: Severity, expect: impl Into<Expect<'e>>) -> bool {
        match expect.into() {
            Expect::Exact(text) => self.statements_at(level).iter().any(|t| t == text),
            Expect::Pattern(p) => !self.statements_matching(level, p).is_empty(),
        }
    }

    /// [`LogMonitor::is_statement`] at DEBUG
    #[must_use]
    pub fn is_debug_statement<'e>(&self, expect: impl Into<Expect<'e>>) -> bool {
        self.is_statement(Severity::Debug, expect)
    }
    /// [`LogMonitor::is_statement`] at INFO
    #[must_use]
    pub fn is_info_statement<'e>(&self, expect: impl Into<Expect<'e>>) -> bool {
        self.is_statement(Severity::Info, expect)
    }
    /// [`LogMonitor::is_statement`] at WARN
    #[must_use]
    pub fn is_warn_statement<'e>(&self, expect: impl Into<Expect<'e>>) -> bool {
        self.is_statement(Severity::Warn, expect)
    }
    /// [`LogMonitor::is_statement`] at ERROR
    #[must_use]
    pub fn is_error_statement<'e>(&self, expect: impl Into<Expect<'e>>) -> bool {
        self.is_statement(Severity::Error, expect)
    }
    /// [`LogMonitor::is_statement`] at FATAL
    #[must_use]
    pub fn is_fatal_statement<'e>(&self, expect: impl Into<Expect<'e>>) -> bool {
        self.is_statement(Severity::Fatal, expect)
    }

    /// Level-agnostic [`LogMonitor::is_statement`].
    #[must_use]
    pub fn is_any_statement<'e>(&self, expect: impl Into<Expect<'e>>) -> bool {
        let expect = expect.into();
        self.statements().iter().any(|st| expect.accepts(st.text()))
    }

    // ===== Dumps =====

    /// Write every statement as `SEVERITY - text` lines to `out`.
    ///
    /// # Errors
    /// [`MonitorError::Io`] when writing to `out` fails.
    pub fn dump_to<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.write_lines(out, None, false)?;
        Ok(())
    }

    /// Write statements at exactly `level` to `out`.
    ///
    /// # Errors
    /// [`MonitorError::Io`] when writing to `out` fails.
    pub fn dump_level_to<W: Write + ?Sized>(&self, level: Severity, out: &mut W) -> Result<()> {
        self.write_lines(out, Some(level), false)?;
        Ok(())
    }

    /// Print every statement to stderr.
    pub fn dump_to_stderr(&self) {
        self.dump_stderr(None);
    }

    /// Print statements at exactly `level` to stderr.
    pub fn dump_level_to_stderr(&self, level: Severity) {
        self.dump_stderr(Some(level));
    }

    fn dump_stderr(&self, level: Option<Severity>) {
        let mut buf = Vec::<u8>::new();
        // writing into a Vec cannot fail
        let _ = self.write_lines(&mut buf, level, use_color());
        // eprint! rather than io::stderr() so libtest captures the dump
        eprint!("{}", String::from_utf8_lossy(&buf));
    }

    fn write_lines<W: Write + ?Sized>(
        &self,
        out: &mut W,
        level: Option<Severity>,
        color: bool,
    ) -> std::io::Result<()> {
        for st in self.statements() {
            if level.is_some_and(|l| l != st.severity()) {
                continue;
            }
            if color {
                let l = st.severity();
                write!(out, "{}{l}{RST} - {}", level_color(l), st.text())?;
            } else {
                write!(out, "{st}")?;
            }
            out.write_all(LINE_SEPARATOR.as_bytes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor(level: Severity) -> (Logger, LogMonitor) {
        let lg = Logger::new();
        let mon = LogMonitor::install(&lg, level);
        (lg, mon)
    }

    #[test]
    fn install_rewires_the_given_logger() {
        let lg = Logger::builder().stderr().level(Severity::Fatal).build();
        let mon = LogMonitor::install(&lg, Severity::Warn);
        assert_eq!(lg.writer_count(), 1);
        assert_eq!(mon.level(), Severity::Warn);
        assert_eq!(mon.threshold(), Severity::Warn);
        assert!(mon.logger().ptr_eq(&lg));
    }

    #[test]
    fn try_new_rejects_absent_level() {
        let err = LogMonitor::try_new(None).unwrap_err();
        assert!(matches!(err, MonitorError::InvalidArgument(_)));
        let mon = LogMonitor::try_new(Some(Severity::Error)).unwrap();
        assert_eq!(mon.threshold(), Severity::Error);
    }

    #[test]
    fn expect_conversions() {
        let owned = String::from("x");
        let p = Pattern::new("x+").unwrap();
        assert!(Expect::from("x").accepts("x"));
        assert!(!Expect::from("x").accepts("xx"));
        assert!(Expect::from(&owned).accepts("x"));
        assert!(Expect::from(&p).accepts("xxx"));
    }

    #[test]
    fn absent_filters_give_empty_results() {
        let (lg, mon) = monitor(Severity::Debug);
        lg.log(Severity::Info, format_args!("hello"));
        let p = Pattern::new(".*").unwrap();
        assert!(mon.statements_matching(None, &p).is_empty());
        assert!(mon.statements_matching(Severity::Info, None).is_empty());
        assert!(mon.statements_matching_str(Severity::Info, None).unwrap().is_empty());
        assert!(mon.statements_matching_str(None, ".*").unwrap().is_empty());
        assert_eq!(mon.statements_matching(Severity::Info, &p), vec!["hello"]);
    }

    #[test]
    fn bad_raw_pattern_is_an_error() {
        let (_lg, mon) = monitor(Severity::Debug);
        let err = mon.statements_matching_str(Severity::Info, "(").unwrap_err();
        assert!(matches!(err, MonitorError::PatternSyntax(_)));
    }

    #[test]
    fn colored_lines_wrap_only_the_token() {
        let (lg, mon) = monitor(Severity::Debug);
        lg.log(Severity::Error, format_args!("boom"));
        let mut out = Vec::new();
        mon.write_lines(&mut out, None, true).unwrap();
        let expected = format!("\x1b[31mERROR\x1b[0m - boom{LINE_SEPARATOR}");
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
