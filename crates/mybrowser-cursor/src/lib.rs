//! mybrowser Cursor
//!
//! A position-tracking scanner over an immutable input buffer, shared by the
//! HTML and CSS grammars. Parsers drive it through lookahead (`peek`,
//! `match_literal`), consumption (`read`, the `scan_*` family) and
//! single-offset backtracking (`save` / `restore`).
//!
//! # Example
//!
//! ```
//! use mybrowser_cursor::Cursor;
//!
//! let mut cursor = Cursor::new("div { color: red; }");
//! assert_eq!(cursor.scan_identifier().unwrap(), "div");
//! cursor.skip_whitespace();
//! assert!(cursor.match_literal("{"));
//! ```

pub mod byte;
pub mod cursor;

use std::fmt;

pub use byte::{is_alphanumeric, is_digit, is_letter, is_space};
pub use cursor::Cursor;

/// A position in source text, tracking line and column for error reporting.
///
/// Lines and columns are 1-based; columns count bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Failure of a cursor primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The current byte cannot start an identifier.
    #[error("Expected identifier at {at}")]
    NotAnIdentifier { at: Location },

    /// A required terminator never appeared before end of input.
    #[error("Unterminated input at {at}: expected '{stop}' before end of input")]
    UnterminatedScan { stop: char, at: Location },

    /// A byte was requested at end of input.
    #[error("Unexpected end of input at {at}")]
    UnexpectedEnd { at: Location },
}

impl CursorError {
    /// Where the failing primitive was positioned.
    pub fn location(&self) -> Location {
        match self {
            CursorError::NotAnIdentifier { at }
            | CursorError::UnterminatedScan { at, .. }
            | CursorError::UnexpectedEnd { at } => *at,
        }
    }
}
