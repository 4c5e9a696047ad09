//! Splits captured text back into statements.
//!
//! The layout writes each record as `LEVEL - message<sep>`, and a message may
//! itself contain `<sep>`. A record therefore ends at the first separator
//! that is followed by another `LEVEL - ` head or by the end of the text.
//!
//! A message line that happens to start with `LEVEL - ` is read as the start
//! of a new record. Callers get two statements for such a message; the split
//! is kept so results stay stable across versions.

use crate::{CapturedStatement, Severity, LINE_SEPARATOR};

const HEAD_DELIM: &str = " - ";

/// Converts buffered log text into statements, in emission order.
#[derive(Clone, Debug)]
pub struct StatementParser {
    separator: String,
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::with_separator(LINE_SEPARATOR)
    }
}

impl StatementParser {
    /// Parser expecting the host line separator.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser for text written with a specific record separator.
    ///
    /// An empty separator falls back to [`LINE_SEPARATOR`].
    #[must_use]
    pub fn with_separator(separator: impl Into<String>) -> Self {
        let mut separator = separator.into();
        if separator.is_empty() {
            separator = LINE_SEPARATOR.to_owned();
        }
        Self { separator }
    }

    /// The record separator this parser splits on
    #[inline]
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Parse all statements in `text`.
    #[must_use]
    pub fn parse(&self, text: &str) -> Vec<CapturedStatement> {
        self.iter(text).collect()
    }

    /// Lazily parse statements in `text`.
    #[inline]
    #[must_use]
    pub fn iter<'a>(&'a self, text: &'a str) -> Statements<'a> {
        Statements {
            text,
            sep: &self.separator,
            pos: 0,
        }
    }
}

/// Iterator over the statements of one text snapshot.
#[derive(Clone, Debug)]
pub struct Statements<'a> {
    text: &'a str,
    sep: &'a str,
    pos: usize,
}

impl Iterator for Statements<'_> {
    type Item = CapturedStatement;

    fn next(&mut self) -> Option<Self::Item> {
        let (severity, body_start) = find_head(self.text, self.pos)?;
        // No closing boundary after this head means none after any later
        // head either, so the scan is over.
        let Some(body_end) = find_boundary(self.text, self.sep, body_start) else {
            self.pos = self.text.len();
            return None;
        };
        self.pos = body_end + self.sep.len();
        Some(CapturedStatement::new(
            severity,
            &self.text[body_start..body_end],
        ))
    }
}

/// If `rest` opens with `LEVEL - `, the severity and the head's length.
fn head_at(rest: &str) -> Option<(Severity, usize)> {
    let tok_len = rest
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(rest.len());
    let severity = Severity::from_token(&rest[..tok_len])?;
    rest[tok_len..]
        .starts_with(HEAD_DELIM)
        .then_some((severity, tok_len + HEAD_DELIM.len()))
}

/// First head at or after `from`; returns its severity and where its body
/// begins. Heads need not sit at a line start.
fn find_head(text: &str, from: usize) -> Option<(Severity, usize)> {
    text[from..]
        .char_indices()
        .find_map(|(i, _)| {
            head_at(&text[from + i..]).map(|(s, len)| (s, from + i + len))
        })
}

/// Smallest `j >= from` where `sep` starts and is followed by a head or by
/// the end of `text`.
fn find_boundary(text: &str, sep: &str, from: usize) -> Option<usize> {
    text[from..].match_indices(sep).find_map(|(i, _)| {
        let j = from + i;
        let after = &text[j + sep.len()..];
        (after.is_empty() || head_at(after).is_some()).then_some(j)
    })
}
