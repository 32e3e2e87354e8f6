//! Where a declaration was found in the parser's input.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Location of a declaration in its source file.
///
/// Front ends that do not report locations leave the span at its default,
/// which [`Span::known`] filters out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Byte offset of the declaration's first character.
    pub start: usize,
    /// Byte offset one past its last character.
    pub end: usize,
    /// 1-based line; 0 when unknown.
    pub line: u32,
    /// 1-based column; 0 when unknown.
    pub column: u32,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// The span, if the front end actually reported one.
    #[must_use]
    pub const fn known(self) -> Option<Self> {
        if self.line == 0 { None } else { Some(self) }
    }

    /// Byte length of the declaration.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span covers no text.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The declaration's source text, or `None` if the span is out of range.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            f.write_str("unknown location")
        } else {
            write!(f, "line {}, column {}", self.line, self.column)
        }
    }
}
