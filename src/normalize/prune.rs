//! Empty element removal.

use super::pass::walk_bottom_up;
use crate::dom::predicates::{is_formatting_tag, is_void_element};
use crate::dom::{ArenaDom, ArenaNodeId};

/// Remove `tag` elements without any child node below `context`, in
/// post-order (cascading).
///
/// - `<strong><strong></strong></strong>`
/// - Step 1: the inner strong is empty, delete
/// - Step 2: the outer strong is now empty, delete
pub fn remove_empty_formatting_elements(dom: &mut ArenaDom, tag: &str, context: ArenaNodeId) {
    prune_where(dom, context, |dom, node| dom.tag_is(node, tag));
}

/// Like [`remove_empty_formatting_elements`], but only for bare elements:
/// an empty `<span class="x">` may be deliberate and is kept.
pub fn prune_empty_bare(dom: &mut ArenaDom, tag: &str, context: ArenaNodeId) {
    prune_where(dom, context, |dom, node| dom.is_bare_element(node, tag));
}

/// Remove empty formatting elements of any tag (leftovers of an extraction),
/// except `keep`.
pub fn prune_empty_formatting(dom: &mut ArenaDom, context: ArenaNodeId, keep: ArenaNodeId) {
    prune_where(dom, context, |dom, node| {
        node != keep && dom.element_name(node).is_some_and(|name| is_formatting_tag(name))
    });
}

/// Clean up extracted content: coalesce text, drop empty text nodes and
/// every element left without children (void elements excepted).
pub fn tidy_fragment(dom: &mut ArenaDom, fragment: ArenaNodeId) {
    dom.normalize(fragment);
    prune_where(dom, fragment, |dom, node| {
        dom.element_name(node).is_some_and(|name| !is_void_element(name))
    });
}

fn prune_where<F>(dom: &mut ArenaDom, root: ArenaNodeId, should_prune: F)
where
    F: Fn(&ArenaDom, ArenaNodeId) -> bool,
{
    walk_bottom_up(dom, root, |dom, parent| {
        for child in dom.child_ids(parent) {
            if dom.first_child(child).is_none() && should_prune(dom, child) {
                dom.detach(child);
            }
        }
    });
}
