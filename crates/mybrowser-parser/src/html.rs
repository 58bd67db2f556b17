//! HTML tree parser.
//!
//! Builds a [`Node`] tree from well-formed nested tags using recursive
//! descent over a [`Cursor`]. The grammar is deliberately small:
//!
//! ```text
//! document  := ws* element ws*
//! node_seq  := (text | element)*
//! text      := bytes up to '<' or '>' (non-empty)
//! element   := '<' name attr* '>' node_seq '</' name '>'
//! attr      := ws* name ['=' '"' value '"']
//! ```
//!
//! A child sequence has no explicit terminator: it ends at the first position
//! where neither a text run nor an element can be parsed.
//!
//! Elements nest through recursion, so the number of open elements is capped
//! at [`MAX_NESTING_DEPTH`] (or a limit set with [`HtmlParser::with_max_depth`]).
//! Deeper input fails with [`HtmlParseError::NestingTooDeep`] instead of
//! exhausting the stack.

use std::collections::BTreeMap;

use mybrowser_cursor::Cursor;
use tracing::{debug, trace};

use crate::ast::{Element, Node};
use crate::HtmlParseError;

/// Default limit on the number of simultaneously open elements.
pub const MAX_NESTING_DEPTH: usize = 256;

/// HTML tree parser.
pub struct HtmlParser<'a> {
    cursor: Cursor<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> HtmlParser<'a> {
    /// Create a new parser positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            depth: 0,
            max_depth: MAX_NESTING_DEPTH,
        }
    }

    /// Replace the nesting limit. The root element counts as depth 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a complete document: one root element, optionally surrounded by
    /// whitespace.
    ///
    /// This is stricter than a bare `document := element`: anything other
    /// than whitespace after the root element is rejected with
    /// [`HtmlParseError::TrailingContent`] rather than ignored.
    pub fn parse(source: &str) -> Result<Node, HtmlParseError> {
        HtmlParser::new(source).parse_document()
    }

    /// Parse a complete document with this parser's settings.
    pub fn parse_document(&mut self) -> Result<Node, HtmlParseError> {
        self.cursor.skip_whitespace();
        let root = self.parse_element()?;
        self.cursor.skip_whitespace();

        if !self.cursor.is_eof() {
            return Err(HtmlParseError::TrailingContent {
                at: self.cursor.here(),
            });
        }

        debug!(bytes = self.cursor.source().len(), "parsed html document");
        Ok(root)
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// Parse one element, including its children and closing tag.
    pub fn parse_element(&mut self) -> Result<Node, HtmlParseError> {
        let open_at = self.cursor.here();
        if !self.cursor.match_literal("<") {
            return Err(HtmlParseError::ExpectedOpenAngle { at: open_at });
        }

        let tag_name = self.cursor.scan_identifier()?;
        if self.depth >= self.max_depth {
            return Err(HtmlParseError::NestingTooDeep {
                limit: self.max_depth,
                at: open_at,
            });
        }

        let attributes = self.parse_attributes()?;
        self.expect_close_angle()?;

        self.depth += 1;
        let children = self.parse_nodes();
        self.depth -= 1;
        let children = children?;

        let end_tag_at = self.cursor.here();
        if !self.cursor.match_literal("</") {
            return Err(HtmlParseError::ExpectedEndTag {
                tag: tag_name.to_string(),
                at: end_tag_at,
            });
        }

        let closing_at = self.cursor.here();
        let closing = self.cursor.scan_identifier()?;
        if closing != tag_name {
            return Err(HtmlParseError::TagMismatch {
                expected: tag_name.to_string(),
                found: closing.to_string(),
                at: closing_at,
            });
        }
        self.expect_close_angle()?;

        Ok(Node::Element(Element {
            tag_name: tag_name.to_string(),
            attributes,
            children,
        }))
    }

    /// Parse a sequence of text runs and elements.
    ///
    /// Stops at the first position where neither production applies; that
    /// attempt is rolled back and its error discarded. Hitting the nesting
    /// limit is the one error that is not discarded.
    pub fn parse_nodes(&mut self) -> Result<Vec<Node>, HtmlParseError> {
        let mut nodes = Vec::new();

        loop {
            let before = self.cursor.save();
            match self.parse_node() {
                Ok(Some(node)) => nodes.push(node),
                Ok(None) => {
                    self.cursor.restore(before);
                    break;
                }
                Err(e @ HtmlParseError::NestingTooDeep { .. }) => return Err(e),
                Err(e) => {
                    trace!(error = %e, "node sequence ended");
                    self.cursor.restore(before);
                    break;
                }
            }
        }

        Ok(nodes)
    }

    /// Parse a text run, or an element if no text is available.
    fn parse_node(&mut self) -> Result<Option<Node>, HtmlParseError> {
        if let Some(text) = self.parse_text() {
            return Ok(Some(text));
        }
        if self.cursor.peek() != b'<' {
            return Ok(None);
        }
        self.parse_element().map(Some)
    }

    fn parse_text(&mut self) -> Option<Node> {
        let text = self.cursor.scan_until_any(b"<>");
        if text.is_empty() {
            None
        } else {
            Some(Node::Text(text.to_string()))
        }
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Parse attributes until no further attribute name can be read.
    ///
    /// `name="value"` stores the quoted text verbatim; a bare `name` stores an
    /// empty value. A repeated name keeps its last value.
    pub fn parse_attributes(&mut self) -> Result<BTreeMap<String, String>, HtmlParseError> {
        let mut attributes = BTreeMap::new();

        loop {
            self.cursor.skip_whitespace();
            let Ok(name) = self.cursor.scan_identifier() else {
                return Ok(attributes);
            };

            if !self.cursor.match_literal("=") {
                attributes.insert(name.to_string(), String::new());
                continue;
            }

            if !self.cursor.match_literal("\"") {
                return Err(HtmlParseError::ExpectedAttributeQuote {
                    at: self.cursor.here(),
                });
            }
            let value = self.cursor.scan_until_byte(b'"')?;
            self.cursor.read()?; // closing quote

            attributes.insert(name.to_string(), value.to_string());
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn expect_close_angle(&mut self) -> Result<(), HtmlParseError> {
        if self.cursor.match_literal(">") {
            Ok(())
        } else {
            Err(HtmlParseError::ExpectedCloseAngle {
                at: self.cursor.here(),
            })
        }
    }
}
