//! Structured parse-error diagnostics (spec §4.2.4): every error carries the
//! source string, the offending position, and an optional underlined span so
//! a caller can render a caret-and-tilde pointer without re-parsing.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnbalancedParenExpectedClose,
    UnbalancedParenExpectedOpen,
    MissingBoundsSubscript,
    IllegalBoundsSubscript,
    UnexpectedToken,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ParseErrorKind::UnbalancedParenExpectedClose => "unbalanced parenthesis, expected ')'",
            ParseErrorKind::UnbalancedParenExpectedOpen => "unbalanced parenthesis, expected '('",
            ParseErrorKind::MissingBoundsSubscript => "missing temporal operator bounds subscript",
            ParseErrorKind::IllegalBoundsSubscript => "illegal temporal operator bounds subscript",
            ParseErrorKind::UnexpectedToken => "unexpected token",
        };
        write!(f, "{msg}")
    }
}

/// A recoverable parse failure (spec §7): never causes a panic or process
/// abort, always carries enough context to render a one-line diagnostic.
///
/// Implements `Display`/`Error` by hand rather than via `#[derive(thiserror::Error)]`
/// because the rendering needs the caret/tilde layout in `render`, not a
/// single format string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    /// Primary caret position (char index into `source`).
    pub pos: usize,
    /// Optional `[begin, end)` span underlined with tildes, in addition to
    /// the caret.
    pub underline: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: &str, pos: usize) -> ParseError {
        ParseError {
            kind,
            source: source.to_string(),
            pos,
            underline: None,
        }
    }

    pub fn with_underline(mut self, begin: usize, end: usize) -> ParseError {
        self.underline = Some((begin, end));
        self
    }

    /// Render a two-line `error: ...` diagnostic with a caret at `pos` and
    /// tildes spanning `underline`, matching the original tool's style.
    pub fn render(&self) -> String {
        let end = match self.underline {
            Some((_, ul_end)) => self.pos.max(ul_end),
            None => self.pos,
        };
        let mut marker = String::new();
        for i in 0..end {
            if i == self.pos {
                marker.push('^');
            } else if self.underline.map_or(false, |(b, e)| i >= b && i < e) {
                marker.push('~');
            } else {
                marker.push(' ');
            }
        }
        format!("error: {}\n  {}\n  {}", self.kind, self.source, marker)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for ParseError {}
