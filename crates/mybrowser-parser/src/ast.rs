//! Syntax trees produced by the parsers.
//!
//! The HTML side is a plain owned tree: every [`Element`] owns its children,
//! and the root is owned by whoever called the parser. The CSS side is a flat
//! list of [`StyleRule`]s, immutable once parsed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

/// A node in the HTML tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// A run of character data between tags.
    Text(String),

    /// A tag with attributes and children.
    Element(Element),
}

/// An HTML element.
///
/// Attribute keys are unique; insertion order is not preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag_name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    pub fn element(
        tag_name: impl Into<String>,
        attributes: BTreeMap<String, String>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element(Element {
            tag_name: tag_name.into(),
            attributes,
            children,
        })
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Child nodes; always empty for text.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(el) => &el.children,
            Node::Text(_) => &[],
        }
    }
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Value of the `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .into_iter()
            .flat_map(str::split_whitespace)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

// ---------------------------------------------------------------------------
// CSS
// ---------------------------------------------------------------------------

/// A single-token selector. The name is stored without its `.`/`#` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum Selector {
    /// `div`
    Type(String),
    /// `.note`
    Class(String),
    /// `#main`
    Id(String),
}

impl Selector {
    pub fn name(&self) -> &str {
        match self {
            Selector::Type(name) | Selector::Class(name) | Selector::Id(name) => name,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => write!(f, "{name}"),
            Selector::Class(name) => write!(f, ".{name}"),
            Selector::Id(name) => write!(f, "#{name}"),
        }
    }
}

/// A `key: value ...;` declaration. Values are the raw space-separated
/// tokens of the declaration, untyped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub key: String,
    pub values: Vec<String>,
}

impl Rule {
    pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }
}

/// A rule set: the declarations apply to any element matching at least one
/// of the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Rule>,
}
