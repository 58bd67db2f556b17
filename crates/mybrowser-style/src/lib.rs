//! mybrowser Style
//!
//! Resolves per-element properties by matching parsed [`StyleRule`]s against
//! a parsed [`Node`] tree. The result is a [`StyledNode`] tree that mirrors
//! the input one to one and borrows it.
//!
//! The cascade is intentionally naive: rules are visited in source order and
//! every matching rule writes its declarations, so the last matching rule
//! wins for each property. There is no specificity, `!important` or
//! inheritance.
//!
//! ```text
//! Node tree + [StyleRule] → resolve_style() → StyledNode tree
//! ```

pub mod matching;

use std::collections::BTreeMap;

use mybrowser_parser::{Node, StyleRule};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::debug;

pub use matching::{matches, matches_element, matches_selector};

/// Resolved properties, keyed by declaration name.
pub type PropertyMap = BTreeMap<String, Vec<String>>;

/// A node paired with the properties that apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledNode<'a> {
    #[serde(serialize_with = "serialize_head")]
    pub node: &'a Node,
    pub properties: PropertyMap,
    pub children: Vec<StyledNode<'a>>,
}

impl StyledNode<'_> {
    /// Values of a resolved property.
    pub fn value(&self, key: &str) -> Option<&[String]> {
        self.properties.get(key).map(Vec::as_slice)
    }

    /// Number of styled nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(StyledNode::node_count).sum::<usize>()
    }
}

/// Resolve styles for `root` and all of its descendants.
///
/// Recurses once per tree level; trees from `parse_html` are at most
/// [`mybrowser_parser::MAX_NESTING_DEPTH`] deep.
pub fn resolve_style<'a>(root: &'a Node, rules: &[StyleRule]) -> StyledNode<'a> {
    let styled = resolve_node(root, rules);
    debug!(nodes = styled.node_count(), rules = rules.len(), "resolved styles");
    styled
}

fn resolve_node<'a>(node: &'a Node, rules: &[StyleRule]) -> StyledNode<'a> {
    StyledNode {
        node,
        properties: cascade(node, rules),
        children: node
            .children()
            .iter()
            .map(|child| resolve_node(child, rules))
            .collect(),
    }
}

/// Collect the declarations of every rule matching `node`; later rules
/// overwrite earlier ones key by key.
pub fn cascade(node: &Node, rules: &[StyleRule]) -> PropertyMap {
    let mut properties = PropertyMap::new();

    for rule in rules.iter().filter(|rule| matches(node, rule)) {
        for declaration in &rule.declarations {
            properties.insert(declaration.key.clone(), declaration.values.clone());
        }
    }

    properties
}

/// Serialize only the node's own data; children are carried by the
/// styled tree itself.
fn serialize_head<S: Serializer>(node: &&Node, serializer: S) -> Result<S::Ok, S::Error> {
    match node {
        Node::Text(text) => {
            let mut state = serializer.serialize_struct("Text", 1)?;
            state.serialize_field("text", text)?;
            state.end()
        }
        Node::Element(el) => {
            let mut state = serializer.serialize_struct("Element", 2)?;
            state.serialize_field("tag_name", &el.tag_name)?;
            state.serialize_field("attributes", &el.attributes)?;
            state.end()
        }
    }
}
