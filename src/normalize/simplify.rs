//! Attribute-aware simplification of formatting tags.
//!
//! Only *bare* elements (no attributes, no classes) are interchangeable: a
//! `<strong class="warn">` carries meaning of its own and is never merged
//! into a neighbour or dissolved into an ancestor.

use super::pass::walk_bottom_up;
use super::prune::prune_empty_bare;
use crate::config::FormatConfig;
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::util::is_whitespace_only;

/// Simplify each tag in turn under `context`.
///
/// Per tag:
/// 1. prune empty bare elements (cascading)
/// 2. dissolve bare elements directly inside a same-tag element
/// 3. merge runs of bare sibling elements, absorbing whitespace-only text
///    between them
/// 4. coalesce the text inside merged elements
pub fn simplify_nested_tags(dom: &mut ArenaDom, tags: &[&str], context: ArenaNodeId) {
    for tag in tags {
        prune_empty_bare(dom, tag, context);
        dissolve_nested(dom, tag, context);
        combine_siblings(dom, tag, context);
    }
}

/// [`simplify_nested_tags`] over the configured formatting tags.
pub fn simplify_all_formatting_tags(dom: &mut ArenaDom, context: ArenaNodeId, config: &FormatConfig) {
    simplify_nested_tags(dom, &config.tags(), context);
}

fn dissolve_nested(dom: &mut ArenaDom, tag: &str, context: ArenaNodeId) {
    // Post-order: by the time an element is visited, its bare same-tag
    // children have already absorbed their own, so one pass suffices.
    walk_bottom_up(dom, context, |dom, node| {
        if !dom.tag_is(node, tag) {
            return;
        }
        for child in dom.child_ids(node) {
            if dom.is_bare_element(child, tag) {
                dom.replace_with_children(child);
            }
        }
    });
}

fn combine_siblings(dom: &mut ArenaDom, tag: &str, context: ArenaNodeId) {
    for element in dom.elements_by_tag(context, tag) {
        if !dom.is_bare_element(element, tag) || !dom.ancestors(element).any(|a| a == context) {
            continue;
        }

        let mut merged = false;
        while let Some((whitespace, next)) = next_mergeable(dom, element, tag) {
            for text in whitespace {
                dom.append(element, text);
            }
            dom.move_children(next, element);
            dom.detach(next);
            merged = true;
        }
        if merged {
            dom.normalize(element);
        }
    }
}

/// The whitespace-only text run after `element` and the bare same-tag
/// element that follows it, if there is one.
fn next_mergeable(
    dom: &ArenaDom,
    element: ArenaNodeId,
    tag: &str,
) -> Option<(Vec<ArenaNodeId>, ArenaNodeId)> {
    let mut whitespace = Vec::new();
    let mut cursor = dom.next_sibling(element);
    while let Some(node) = cursor {
        match dom.text(node) {
            Some(text) if is_whitespace_only(text) => whitespace.push(node),
            _ => return dom.is_bare_element(node, tag).then_some((whitespace, node)),
        }
        cursor = dom.next_sibling(node);
    }
    None
}
