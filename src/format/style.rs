//! Inline `style` declarations on the selected nodes.
//!
//! The nodes touched are found by a shallow walk: the start container, its
//! following siblings up to the end container, then the end container.
//! Descendants of selected elements and nodes at other depths are left
//! alone, and boundary offsets are ignored (whole text nodes are styled).

use super::{FormatOutcome, active_range};
use crate::dom::{ArenaDom, ArenaNodeId, InlineStyle};
use crate::range::Range;
use crate::selection::Selection;

/// Set `styles` (`(property, value)` pairs) on the selected nodes. Text
/// nodes are wrapped in a new `<span>`; elements have the declarations
/// merged into their `style` attribute. An empty value removes the
/// property.
pub fn apply_style(
    dom: &mut ArenaDom,
    styles: &[(&str, &str)],
    selection: &dyn Selection,
) -> FormatOutcome {
    let range = match active_range("apply_style", selection) {
        Ok(range) => range,
        Err(outcome) => return outcome,
    };

    for node in selected_nodes(dom, &range) {
        if dom.is_text(node) {
            let Some(parent) = dom.parent(node) else {
                continue;
            };
            let span = dom.create_html_element("span");
            edit_style(dom, span, |style| {
                for (property, value) in styles {
                    style.set(property, value);
                }
            });
            dom.insert_or_append(parent, Some(node), span);
            dom.append(span, node);
        } else if dom.is_element(node) {
            edit_style(dom, node, |style| {
                for (property, value) in styles {
                    style.set(property, value);
                }
            });
        }
    }
    FormatOutcome::Applied
}

/// Remove `properties` from the `style` attribute of the selected elements.
/// A `style` attribute left empty is removed.
pub fn remove_style(
    dom: &mut ArenaDom,
    properties: &[&str],
    selection: &dyn Selection,
) -> FormatOutcome {
    let range = match active_range("remove_style", selection) {
        Ok(range) => range,
        Err(outcome) => return outcome,
    };

    for node in selected_nodes(dom, &range) {
        if dom.is_element(node) {
            edit_style(dom, node, |style| {
                for property in properties {
                    style.remove(property);
                }
            });
        }
    }
    FormatOutcome::Applied
}

fn selected_nodes(dom: &ArenaDom, range: &Range) -> Vec<ArenaNodeId> {
    let (start, end) = (range.start.node, range.end.node);
    if start == end {
        return vec![start];
    }
    let mut nodes = Vec::new();
    let mut cursor = Some(start);
    while let Some(node) = cursor
        && node != end
    {
        nodes.push(node);
        cursor = dom.next_sibling(node);
    }
    nodes.push(end);
    nodes
}

fn edit_style<F>(dom: &mut ArenaDom, element: ArenaNodeId, edit: F)
where
    F: FnOnce(&mut InlineStyle),
{
    let mut style = dom
        .get_attr(element, "style")
        .map(InlineStyle::parse)
        .unwrap_or_default();
    edit(&mut style);
    if style.is_empty() {
        dom.remove_attr(element, "style");
    } else {
        dom.set_attr(element, "style", &style.to_string());
    }
}
