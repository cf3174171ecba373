//! Removing a format element from part of its content.
//!
//! The enclosing element is split in three around the selection:
//!
//! ```html
//! <strong>This is some text.</strong>        (select "some")
//! <strong>This is </strong>some<strong> text.</strong>
//! ```
//!
//! Formatting nested inside the removed element is kept on the selected
//! part by re-wrapping it in shallow copies of the elements in between.

use super::{FormatOutcome, SkipReason, active_range, skipped, tag_ancestor};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::normalize::{remove_empty_formatting_elements, tidy_fragment};
use crate::range::{Position, Range, extract_contents};
use crate::selection::Selection;

/// Take the selection out of its nearest enclosing `tag` element, then clear
/// the selection.
///
/// `root` bounds the search for the enclosing element and is never split.
///
/// The selected part is not simply dropped between the two halves: the
/// elements between it and the removed `tag` element are re-applied as
/// shallow copies, so only `tag` is taken off.
///
/// ```html
/// <strong>ab<em>cde</em>f</strong>           (select "d", unwrap strong)
/// <strong>ab<em>c</em></strong><em>d</em><strong><em>e</em>f</strong>
/// ```
pub fn unwrap_selection(
    dom: &mut ArenaDom,
    root: ArenaNodeId,
    tag: &str,
    selection: &mut dyn Selection,
) -> FormatOutcome {
    let range = match active_range("unwrap_selection", selection) {
        Ok(range) => range,
        Err(outcome) => return outcome,
    };
    let common = range.common_ancestor(dom);
    let Some(outer) = tag_ancestor(dom, common, root, tag) else {
        return skipped("unwrap_selection", SkipReason::NoEnclosingFormat);
    };

    // Elements between the selection and `outer`, innermost first.
    let path: Vec<ArenaNodeId> = std::iter::once(common)
        .chain(dom.ancestors(common))
        .take_while(|&node| node != outer)
        .filter(|&node| dom.is_element(node))
        .collect();

    let (selected, at) = extract_contents(dom, &range);
    tidy_fragment(dom, selected);
    let selected = rewrap(dom, selected, &path);

    let Some(parent) = split_around(dom, outer, at, selected) else {
        return skipped("unwrap_selection", SkipReason::NoEnclosingFormat);
    };
    dom.normalize(parent);
    remove_empty_formatting_elements(dom, tag, parent);

    selection.remove_all_ranges();
    FormatOutcome::Applied
}

/// Nest `content` in shallow copies of `path`, innermost first.
fn rewrap(dom: &mut ArenaDom, content: ArenaNodeId, path: &[ArenaNodeId]) -> ArenaNodeId {
    if dom.first_child(content).is_none() {
        return content;
    }
    path.iter().fold(content, |inner, &element| {
        let shell = dom.clone_node(element, false);
        dom.append(shell, inner);
        shell
    })
}

/// Replace `outer` by `[before] content [after]`, where `before` and `after`
/// are the parts of `outer` on either side of `at`, each kept in a shallow
/// copy of `outer`. Empty parts are dropped.
///
/// Returns the parent the pieces were inserted into.
pub(crate) fn split_around(
    dom: &mut ArenaDom,
    outer: ArenaNodeId,
    at: Position,
    content: ArenaNodeId,
) -> Option<ArenaNodeId> {
    let parent = dom.parent(outer)?;

    let (before, _) = extract_contents(dom, &Range::new(Position::new(outer, 0), at));
    let after = dom.create_fragment();
    dom.move_children(outer, after);

    let anchor = dom.next_sibling(outer);
    dom.detach(outer);

    for (piece, shell) in [(before, true), (content, false), (after, true)] {
        if shell {
            tidy_fragment(dom, piece);
        }
        if dom.first_child(piece).is_none() {
            continue;
        }
        let piece = if shell {
            let copy = dom.clone_node(outer, false);
            dom.append(copy, piece);
            copy
        } else {
            piece
        };
        dom.insert_or_append(parent, anchor, piece);
    }
    Some(parent)
}
