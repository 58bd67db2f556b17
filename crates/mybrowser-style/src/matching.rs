//! Selector matching.
//!
//! Only elements take part in matching. A rule set matches when any one of
//! its selectors does.

use mybrowser_parser::{Element, Node, Selector, StyleRule};

/// Test whether `node` matches any selector of `rule`. Text never matches.
pub fn matches(node: &Node, rule: &StyleRule) -> bool {
    match node {
        Node::Element(el) => matches_element(el, rule),
        Node::Text(_) => false,
    }
}

/// Test whether `el` matches any selector of `rule`.
pub fn matches_element(el: &Element, rule: &StyleRule) -> bool {
    rule.selectors.iter().any(|s| matches_selector(el, s))
}

/// Test whether `el` matches a single selector.
///
/// Class selectors test membership in the whitespace-separated token list of
/// the `class` attribute.
pub fn matches_selector(el: &Element, selector: &Selector) -> bool {
    match selector {
        Selector::Type(name) => el.tag_name == *name,
        Selector::Id(name) => el.id() == Some(name.as_str()),
        Selector::Class(name) => el.has_class(name),
    }
}
