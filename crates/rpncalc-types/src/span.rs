use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a token inside an expression.
///
/// Columns are 1-based character positions and `end` is inclusive, so a
/// single-character token has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "column")]
    pub start: u32,
    #[serde(rename = "end_column")]
    pub end: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span covering a single column.
    pub fn point(column: u32) -> Self {
        Self::new(column, column)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.start)
    }
}
