//! String-level entry points: parse markup, edit it at character offsets,
//! serialize the `<body>` back.
//!
//! These are what the CLI and the wasm bindings call. Offsets count chars of
//! the visible text of `<body>` (tags and comments take no room).

use serde::{Deserialize, Serialize};

use crate::dom::predicates::is_valid_tag_name;
use crate::dom::{ArenaDom, ArenaNodeId, parse_document_str, parse_fragment_str};
use crate::error::{Error, Result};
use crate::format::{self, FormatOutcome, SkipReason};
use crate::normalize::{merge_duplicates, simplify_nested_tags};
use crate::range::{Range, resolve, split_range};
use crate::selection::{RangeSelection, Selection};

/// Parse markup the way `innerHTML` on `<body>` would. Returns the tree and
/// its `<body>`.
pub fn parse_fragment(html: &str) -> (ArenaDom, ArenaNodeId) {
    parse_fragment_str(html)
}

/// Parse a complete document. Returns the tree and its `<body>` (the
/// document node when there is none).
pub fn parse_document(html: &str) -> (ArenaDom, ArenaNodeId) {
    let dom = parse_document_str(html);
    let body = dom.body().unwrap_or(dom.document());
    (dom, body)
}

/// A text selection as character offsets into `<body>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionOffsets {
    pub start_offset: usize,
    pub end_offset: usize,
}

impl SelectionOffsets {
    pub fn new(start_offset: usize, end_offset: usize) -> Self {
        Self {
            start_offset,
            end_offset,
        }
    }

    /// Offsets in ascending order.
    fn ordered(&self) -> (usize, usize) {
        (
            self.start_offset.min(self.end_offset),
            self.start_offset.max(self.end_offset),
        )
    }
}

fn check_tag(tag: &str) -> Result<()> {
    if is_valid_tag_name(tag) {
        Ok(())
    } else {
        Err(Error::InvalidWrapperSpec(format!("bad tag name {tag:?}")))
    }
}

/// Wrap the selected text in `tag`.
///
/// The selection is split at every element boundary, each non-blank piece
/// is wrapped on its own, then the pieces are merged back together with
/// any `tag` element around or before them:
///
/// ```
/// use inlay::html::{SelectionOffsets, wrap_selection_in_html};
///
/// let html = wrap_selection_in_html("a<b>bc</b>d", SelectionOffsets::new(2, 4), "b").unwrap();
/// assert_eq!(html, "a<b>bcd</b>");
/// ```
///
/// Offsets that fall outside the text leave the markup untouched.
pub fn wrap_selection_in_html(html: &str, offsets: SelectionOffsets, tag: &str) -> Result<String> {
    check_tag(tag)?;
    let (mut dom, body) = parse_document(html);
    let (start, end) = offsets.ordered();

    let (Some(start), Some(end)) = (resolve(&dom, body, start), resolve(&dom, body, end)) else {
        format::skipped("wrap_selection_in_html", SkipReason::PositionNotFound);
        return Ok(html.to_string());
    };

    let ranges = split_range(&dom, body, start, end);
    let mut wrapped = 0;
    for range in &ranges {
        if format::wrap_range(&mut dom, range, tag) {
            wrapped += 1;
        }
    }
    log::trace!("wrapped {wrapped} of {} ranges in <{tag}>", ranges.len());

    dom.normalize(body);
    merge_duplicates(&mut dom, body, tag);
    Ok(dom.inner_html(body))
}

/// Toggle `tag` on the selected text.
pub fn toggle_format_in_html(html: &str, offsets: SelectionOffsets, tag: &str) -> Result<String> {
    check_tag(tag)?;
    Ok(edit_selection(html, offsets, "toggle_format_in_html", |dom, body, selection| {
        format::toggle_format(dom, body, tag, selection)
    }))
}

/// Strip formatting from the selected text.
pub fn clear_formatting_in_html(html: &str, offsets: SelectionOffsets) -> String {
    edit_selection(html, offsets, "clear_formatting_in_html", format::clear_formatting)
}

/// Set inline styles on the nodes at the selection.
pub fn apply_style_in_html(html: &str, offsets: SelectionOffsets, styles: &[(&str, &str)]) -> String {
    edit_selection(html, offsets, "apply_style_in_html", |dom, _, selection| {
        format::apply_style(dom, styles, selection)
    })
}

/// Remove inline style properties from the elements at the selection.
pub fn remove_style_in_html(html: &str, offsets: SelectionOffsets, properties: &[&str]) -> String {
    edit_selection(html, offsets, "remove_style_in_html", |dom, _, selection| {
        format::remove_style(dom, properties, selection)
    })
}

/// Merge nested and adjacent bare elements of each tag.
pub fn simplify_html(html: &str, tags: &[&str]) -> String {
    let (mut dom, body) = parse_document(html);
    simplify_nested_tags(&mut dom, tags, body);
    dom.inner_html(body)
}

fn edit_selection<F>(html: &str, offsets: SelectionOffsets, operation: &str, edit: F) -> String
where
    F: FnOnce(&mut ArenaDom, ArenaNodeId, &mut dyn Selection) -> FormatOutcome,
{
    let (mut dom, body) = parse_document(html);
    let (start, end) = offsets.ordered();
    let Some(range) = Range::from_offsets(&dom, body, start, end) else {
        format::skipped(operation, SkipReason::PositionNotFound);
        return html.to_string();
    };

    let mut selection = RangeSelection::from_range(range);
    let outcome = edit(&mut dom, body, &mut selection);
    log::trace!("{operation}: {outcome:?}");
    dom.inner_html(body)
}
