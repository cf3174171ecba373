//! Stripping all formatting from a range.

use super::unwrap::split_around;
use super::{FormatOutcome, SkipReason, active_range, skipped};
use crate::dom::predicates::{is_formatting_tag, is_void_element};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::range::{extract_contents, insert_node};
use crate::selection::Selection;

/// Remove every element from the selected content, keeping its text, void
/// elements and comments, then clear the selection.
///
/// When the selection sits inside formatting elements, the outermost of
/// them (below `root`) is split around it so the cleared text ends up
/// outside all of them.
pub fn clear_formatting(
    dom: &mut ArenaDom,
    root: ArenaNodeId,
    selection: &mut dyn Selection,
) -> FormatOutcome {
    let range = match active_range("clear_formatting", selection) {
        Ok(range) => range,
        Err(outcome) => return outcome,
    };
    if range.is_collapsed() {
        return skipped("clear_formatting", SkipReason::EmptyRange);
    }

    let common = range.common_ancestor(dom);
    let outer = std::iter::once(common)
        .chain(dom.ancestors(common))
        .skip_while(|&node| !dom.is_element(node))
        .take_while(|&node| {
            node != root && dom.element_name(node).is_some_and(|name| is_formatting_tag(name))
        })
        .last();

    let (content, at) = extract_contents(dom, &range);
    flatten(dom, content);
    dom.normalize(content);

    let parent = match outer {
        Some(outer) => split_around(dom, outer, at, content),
        None => {
            let host = if dom.is_character_data(at.node) {
                dom.parent(at.node)
            } else {
                Some(at.node)
            };
            insert_node(dom, at, content);
            host
        }
    };
    if let Some(parent) = parent {
        dom.normalize(parent);
    }

    selection.remove_all_ranges();
    FormatOutcome::Applied
}

/// Replace every non-void element below `node` by its children.
fn flatten(dom: &mut ArenaDom, node: ArenaNodeId) {
    for child in dom.child_ids(node) {
        let Some(name) = dom.element_name(child) else {
            continue;
        };
        if !is_void_element(name) {
            flatten(dom, child);
            dom.replace_with_children(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment_str;
    use crate::selection::RangeSelection;

    fn cleared(html: &str, start: usize, end: usize) -> String {
        let (mut dom, body) = parse_fragment_str(html);
        let mut selection = RangeSelection::from_offsets(&dom, body, start, end);
        clear_formatting(&mut dom, body, &mut selection);
        dom.inner_html(body)
    }

    #[test]
    fn test_clear_whole_format() {
        assert_eq!(
            cleared("This is <strong>some <em>formatted</em></strong> text.", 8, 22),
            "This is some formatted text."
        );
    }

    #[test]
    fn test_clear_splits_outermost_format() {
        assert_eq!(
            cleared("<u><strong>ab<em>cd</em></strong></u>", 2, 3),
            "<u><strong>ab</strong></u>c<u><strong><em>d</em></strong></u>"
        );
    }

    #[test]
    fn test_clear_across_siblings() {
        assert_eq!(
            cleared("a<b>bc</b>d<i>e<br>f</i>g", 2, 5),
            "a<b>b</b>cde<i><br>f</i>g"
        );
    }

    #[test]
    fn test_clear_keeps_non_formatting_ancestor() {
        assert_eq!(
            cleared("<p>x<a href=\"#\"><b>yz</b></a></p>", 1, 2),
            "<p>x<a href=\"#\">y<b>z</b></a></p>"
        );
    }

    #[test]
    fn test_collapsed_is_skipped() {
        let (mut dom, body) = parse_fragment_str("<b>ab</b>");
        let mut selection = RangeSelection::from_offsets(&dom, body, 1, 1);

        let outcome = clear_formatting(&mut dom, body, &mut selection);

        assert_eq!(outcome, FormatOutcome::Skipped(SkipReason::EmptyRange));
        assert_eq!(dom.inner_html(body), "<b>ab</b>");
    }
}
