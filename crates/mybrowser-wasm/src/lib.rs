//! WASM bindings for the mybrowser front-end.
//!
//! Exposes parsing, style resolution and normalization to JavaScript via
//! wasm-bindgen. Trees are returned as plain JSON-compatible objects; any
//! parse error is thrown as a JS error.

use mybrowser_parser::{Node, StyleRule};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Parse an HTML document into a tree of `{ element: {...} }` / `{ text }`.
#[wasm_bindgen(js_name = parseHtml)]
pub fn parse_html(source: &str) -> Result<JsValue, JsError> {
    let dom = mybrowser_parser::parse_html(source).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&dom)
}

/// Parse a stylesheet into an array of `{ selectors, declarations }`.
#[wasm_bindgen(js_name = parseCss)]
pub fn parse_css(source: &str) -> Result<JsValue, JsError> {
    let rules = mybrowser_parser::parse_css(source).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&rules)
}

/// Parse both inputs and return the styled tree
/// `{ node, properties, children }`.
#[wasm_bindgen]
pub fn style(html: &str, css: &str) -> Result<JsValue, JsError> {
    let (dom, rules) = load(html, css).map_err(|e| JsError::new(&e))?;
    to_js(&mybrowser_style::resolve_style(&dom, &rules))
}

/// Parse both inputs and return their serialized forms as `{ html, css }`.
#[wasm_bindgen]
pub fn normalize(html: &str, css: &str) -> Result<JsValue, JsError> {
    let (dom, rules) = load(html, css).map_err(|e| JsError::new(&e))?;
    let output =
        mybrowser_serialize::normalize(&dom, &rules).map_err(|e| JsError::new(&e.to_string()))?;

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"html".into(), &output.html.into())
        .map_err(|_| JsError::new("Failed to set html property"))?;
    js_sys::Reflect::set(&js_obj, &"css".into(), &output.css.into())
        .map_err(|_| JsError::new("Failed to set css property"))?;

    Ok(js_obj.into())
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn load(html: &str, css: &str) -> Result<(Node, Vec<StyleRule>), String> {
    let dom = mybrowser_parser::parse_html(html).map_err(|e| format!("HTML: {e}"))?;
    let rules = mybrowser_parser::parse_css(css).map_err(|e| format!("CSS: {e}"))?;
    Ok((dom, rules))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}
