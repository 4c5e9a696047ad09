use core::fmt;
use core::str::FromStr;

use regex::Regex;
use regex_syntax::hir::{Hir, Look};

/// A regular expression that selects a statement only when it matches the
/// statement's entire text.
///
/// `Pattern::new("boo")` does not select `"boom"`; `"boo.*"` does.
#[derive(Clone)]
pub struct Pattern {
    /// Original pattern string
    source: String,

    /// Parsed `source` between start and end of text
    anchored: Regex,
}

impl Pattern {
    /// Compile `source` for full-string matching.
    ///
    /// # Errors
    /// Returns the compile error when `source` is not a valid expression.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        // compile the bare text first so errors point at what the caller wrote
        Regex::new(source)?;
        // anchor the parsed tree, not the text: a trailing `(?x)` comment
        // would swallow anything appended to the source
        let hir = regex_syntax::Parser::new()
            .parse(source)
            .map_err(|e| regex::Error::Syntax(e.to_string()))?;
        let whole = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);
        let anchored = Regex::new(&whole.to_string())?;
        Ok(Self {
            source: source.to_owned(),
            anchored,
        })
    }

    /// True when the whole of `text` matches.
    #[inline]
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }

    /// The pattern text as written by the caller.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Pattern {
    type Err = regex::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&Regex> for Pattern {
    type Error = regex::Error;
    fn try_from(re: &Regex) -> Result<Self, Self::Error> {
        Self::new(re.as_str())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
