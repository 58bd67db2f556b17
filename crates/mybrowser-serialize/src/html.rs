//! HTML serializer.
//!
//! Output is compact: no whitespace is added between tags, since any added
//! whitespace would come back as text nodes. Attributes are written in key
//! order and empty values are written as bare names.

use mybrowser_parser::{Element, Node};

use crate::{check_name, SerializeError};

/// Serialize a node and its descendants as HTML.
pub fn serialize(node: &Node) -> Result<String, SerializeError> {
    let mut out = String::new();
    write_node(node, &mut out)?;
    Ok(out)
}

fn write_node(node: &Node, out: &mut String) -> Result<(), SerializeError> {
    match node {
        Node::Element(el) => write_element(el, out),
        Node::Text(text) => {
            if text.is_empty() || text.contains(['<', '>']) {
                return Err(SerializeError::UnrepresentableText(text.clone()));
            }
            out.push_str(text);
            Ok(())
        }
    }
}

fn write_element(el: &Element, out: &mut String) -> Result<(), SerializeError> {
    check_name(&el.tag_name)?;

    out.push('<');
    out.push_str(&el.tag_name);

    for (name, value) in &el.attributes {
        check_name(name)?;
        out.push(' ');
        out.push_str(name);
        if value.is_empty() {
            continue;
        }
        if value.contains('"') {
            return Err(SerializeError::UnrepresentableAttribute(name.clone()));
        }
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }

    out.push('>');

    let mut previous_was_text = false;
    for child in &el.children {
        let is_text = matches!(child, Node::Text(_));
        if is_text && previous_was_text {
            return Err(SerializeError::AdjacentText);
        }
        previous_was_text = is_text;
        write_node(child, out)?;
    }

    out.push_str("</");
    out.push_str(&el.tag_name);
    out.push('>');

    Ok(())
}
