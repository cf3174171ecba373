//! WASM bindings for browser-side editing.
//!
//! This module exposes the string-level formatting functions to JavaScript
//! via wasm-bindgen. Offsets count chars of the visible text of `<body>`.

use wasm_bindgen::prelude::*;

use crate::html::{
    SelectionOffsets, clear_formatting_in_html, simplify_html, toggle_format_in_html,
    wrap_selection_in_html,
};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Wrap the text between `start` and `end` in `tag`, merging with existing
/// `tag` elements. Returns the new markup.
#[wasm_bindgen(js_name = wrapSelectionInHTML)]
pub fn wrap_selection(html: &str, start: usize, end: usize, tag: &str) -> Result<String, JsValue> {
    wrap_selection_in_html(html, SelectionOffsets::new(start, end), tag)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Add `tag` around the text between `start` and `end`, or remove it when
/// the text is already inside one.
#[wasm_bindgen(js_name = toggleFormat)]
pub fn toggle_format(html: &str, start: usize, end: usize, tag: &str) -> Result<String, JsValue> {
    toggle_format_in_html(html, SelectionOffsets::new(start, end), tag)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Strip formatting from the text between `start` and `end`.
#[wasm_bindgen(js_name = clearFormatting)]
pub fn clear_formatting(html: &str, start: usize, end: usize) -> String {
    clear_formatting_in_html(html, SelectionOffsets::new(start, end))
}

/// Merge nested and adjacent bare elements. `tags` is a comma-separated
/// list such as `"strong,em,u"`.
#[wasm_bindgen(js_name = simplifyNestedTags)]
pub fn simplify_nested_tags(html: &str, tags: &str) -> String {
    let tags: Vec<&str> = tags
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect();
    simplify_html(html, &tags)
}
