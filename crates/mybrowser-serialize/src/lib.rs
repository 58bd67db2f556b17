//! mybrowser Serializer
//!
//! Renders parsed trees back to source text that the parsers accept, so that
//! `parse(serialize(parse(src))) == parse(src)` for both languages.
//!
//! ```text
//! Node tree     → html::serialize() → HTML text
//! [StyleRule]   → css::serialize()  → CSS text
//! ```
//!
//! The grammars have no escapes, so some hand-built trees cannot be written
//! out faithfully (text containing `<`, attribute values containing `"`,
//! ...). Those are reported as [`SerializeError`] rather than emitted lossily.

pub mod css;
pub mod html;

use mybrowser_cursor::Cursor;
use mybrowser_parser::{Node, StyleRule};

/// Serialized source for a document and its stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub html: String,
    pub css: String,
}

/// Serialization error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("Serialize error: '{0}' is not a valid name")]
    InvalidName(String),

    #[error("Serialize error: text {0:?} cannot be written as HTML")]
    UnrepresentableText(String),

    #[error("Serialize error: adjacent text nodes would merge when re-parsed")]
    AdjacentText,

    #[error("Serialize error: value of attribute '{0}' contains '\"'")]
    UnrepresentableAttribute(String),

    #[error("Serialize error: stylesheet has no rule sets")]
    EmptyStylesheet,

    #[error("Serialize error: rule set has no selectors")]
    EmptySelectorList,

    #[error("Serialize error: value of property '{0}' cannot be written as CSS")]
    UnrepresentableValue(String),
}

/// Serialize a document and its stylesheet together.
pub fn normalize(dom: &Node, rules: &[StyleRule]) -> Result<Normalized, SerializeError> {
    Ok(Normalized {
        html: html::serialize(dom)?,
        css: css::serialize(rules)?,
    })
}

/// Names must scan as exactly one identifier to survive a re-parse.
pub(crate) fn check_name(name: &str) -> Result<(), SerializeError> {
    let mut cursor = Cursor::new(name);
    match cursor.scan_identifier() {
        Ok(_) if cursor.is_eof() => Ok(()),
        _ => Err(SerializeError::InvalidName(name.to_string())),
    }
}
