//! mybrowser Parser
//!
//! Recursive-descent parsers for the two input languages of the engine:
//! an HTML tree builder producing a [`Node`] tree, and a CSS rule-set parser
//! producing an ordered list of [`StyleRule`]s. Both drive a shared
//! [`mybrowser_cursor::Cursor`].
//!
//! # Example
//!
//! ```
//! use mybrowser_parser::{parse_css, parse_html, Selector};
//!
//! let dom = parse_html("<div id=\"main\">hello</div>").unwrap();
//! assert_eq!(dom.as_element().unwrap().tag_name, "div");
//!
//! let rules = parse_css("#main { color: red; }").unwrap();
//! assert_eq!(rules[0].selectors, vec![Selector::Id("main".into())]);
//! ```

pub mod ast;
pub mod css;
pub mod html;

pub use ast::{Element, Node, Rule, Selector, StyleRule};
pub use css::CssParser;
pub use html::{HtmlParser, MAX_NESTING_DEPTH};
pub use mybrowser_cursor::{CursorError, Location};

/// Parse an HTML document into its root element.
///
/// Nesting is limited to [`MAX_NESTING_DEPTH`] open elements.
pub fn parse_html(source: &str) -> Result<Node, HtmlParseError> {
    HtmlParser::parse(source)
}

/// Parse a stylesheet into its rule sets, in source order.
pub fn parse_css(source: &str) -> Result<Vec<StyleRule>, CssParseError> {
    CssParser::parse(source)
}

/// HTML parse error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HtmlParseError {
    #[error("Parse error at {at}: expected '<'")]
    ExpectedOpenAngle { at: Location },

    #[error("Parse error at {at}: expected '>'")]
    ExpectedCloseAngle { at: Location },

    #[error("Parse error at {at}: attribute value must be quoted with '\"'")]
    ExpectedAttributeQuote { at: Location },

    #[error("Parse error at {at}: expected closing tag '</{tag}>'")]
    ExpectedEndTag { tag: String, at: Location },

    #[error("Parse error at {at}: closing tag '</{found}>' does not match '<{expected}>'")]
    TagMismatch {
        expected: String,
        found: String,
        at: Location,
    },

    #[error("Parse error at {at}: unexpected content after the root element")]
    TrailingContent { at: Location },

    /// An element opened more than `limit` levels deep.
    #[error("Parse error at {at}: elements nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize, at: Location },

    #[error("Parse error: {0}")]
    Cursor(#[from] CursorError),
}

impl HtmlParseError {
    pub fn location(&self) -> Location {
        match self {
            HtmlParseError::ExpectedOpenAngle { at }
            | HtmlParseError::ExpectedCloseAngle { at }
            | HtmlParseError::ExpectedAttributeQuote { at }
            | HtmlParseError::ExpectedEndTag { at, .. }
            | HtmlParseError::TagMismatch { at, .. }
            | HtmlParseError::TrailingContent { at }
            | HtmlParseError::NestingTooDeep { at, .. } => *at,
            HtmlParseError::Cursor(e) => e.location(),
        }
    }
}

/// CSS parse error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssParseError {
    #[error("Parse error at {at}: expected a type, class or id selector")]
    NoSelector { at: Location },

    #[error("Parse error at {at}: expected ':' after property name")]
    ExpectedColon { at: Location },

    /// Unreachable: values are scanned up to a `;`, so a missing one is
    /// reported as [`CursorError::UnterminatedScan`].
    #[error("Parse error at {at}: expected ';' after property value")]
    ExpectedSemicolon { at: Location },

    #[error("Parse error at {at}: unexpected '{found}' in selector list")]
    UnexpectedToken { found: char, at: Location },

    #[error("Parse error at {at}: stylesheet ended inside a selector list")]
    UnexpectedEnd { at: Location },

    #[error("Parse error: {0}")]
    Cursor(#[from] CursorError),
}

impl CssParseError {
    pub fn location(&self) -> Location {
        match self {
            CssParseError::NoSelector { at }
            | CssParseError::ExpectedColon { at }
            | CssParseError::ExpectedSemicolon { at }
            | CssParseError::UnexpectedToken { at, .. }
            | CssParseError::UnexpectedEnd { at } => *at,
            CssParseError::Cursor(e) => e.location(),
        }
    }
}
