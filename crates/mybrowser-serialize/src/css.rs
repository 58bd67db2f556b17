//! CSS serializer.
//!
//! One rule set per block, one declaration per line:
//!
//! ```text
//! div, .note {
//!   margin: 0 10px;
//! }
//! ```

use mybrowser_parser::{Rule, StyleRule};

use crate::{check_name, SerializeError};

/// Serialize rule sets as CSS, in order.
///
/// A stylesheet needs at least one rule set to parse, so an empty slice is
/// rejected.
pub fn serialize(rules: &[StyleRule]) -> Result<String, SerializeError> {
    if rules.is_empty() {
        return Err(SerializeError::EmptyStylesheet);
    }

    let mut out = String::new();
    for rule in rules {
        write_rule_set(rule, &mut out)?;
    }
    Ok(out)
}

fn write_rule_set(rule: &StyleRule, out: &mut String) -> Result<(), SerializeError> {
    if rule.selectors.is_empty() {
        return Err(SerializeError::EmptySelectorList);
    }

    let mut selectors = Vec::with_capacity(rule.selectors.len());
    for selector in &rule.selectors {
        check_name(selector.name())?;
        selectors.push(selector.to_string());
    }
    out.push_str(&selectors.join(", "));

    if rule.declarations.is_empty() {
        out.push_str(" {}\n");
        return Ok(());
    }

    out.push_str(" {\n");
    for declaration in &rule.declarations {
        write_declaration(declaration, out)?;
    }
    out.push_str("}\n");

    Ok(())
}

fn write_declaration(declaration: &Rule, out: &mut String) -> Result<(), SerializeError> {
    check_name(&declaration.key)?;
    if !value_is_representable(&declaration.values) {
        return Err(SerializeError::UnrepresentableValue(declaration.key.clone()));
    }

    out.push_str("  ");
    out.push_str(&declaration.key);
    out.push_str(": ");
    out.push_str(&declaration.values.join(" "));
    out.push_str(";\n");

    Ok(())
}

/// The parser skips whitespace after `:`, splits on spaces and stops at `;`,
/// so the joined value must not start with whitespace and no token may
/// contain a space or `;`.
fn value_is_representable(values: &[String]) -> bool {
    let Some(first) = values.first() else {
        return false;
    };
    if first.starts_with([' ', '\t', '\n', '\r']) || (first.is_empty() && values.len() > 1) {
        return false;
    }
    values.iter().all(|v| !v.contains([' ', ';']))
}
