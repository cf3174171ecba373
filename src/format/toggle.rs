//! Toggling a format tag on the selection.

use super::unwrap::unwrap_selection;
use super::wrap::wrap_with_tag;
use super::{FormatOutcome, active_range, tag_ancestor};
use crate::dom::{ArenaDom, ArenaNodeId};
use crate::normalize::simplify_nested_tags;
use crate::range::Range;
use crate::selection::Selection;

/// Whether both ends of `range` lie inside a `tag` element below `root`.
///
/// Each boundary is checked on its own, so a range running from one
/// `<strong>` into another counts as wrapped.
pub fn is_wrapped(dom: &ArenaDom, root: ArenaNodeId, range: &Range, tag: &str) -> bool {
    [range.start.node, range.end.node]
        .into_iter()
        .all(|node| tag_ancestor(dom, node, root, tag).is_some())
}

/// Unwrap the selection from `tag` when it is already formatted, otherwise
/// wrap it in a new `<tag>`.
///
/// A fresh wrapper is merged with bare `tag` neighbours and nested
/// duplicates, so toggling twice gives back the original nesting.
pub fn toggle_format(
    dom: &mut ArenaDom,
    root: ArenaNodeId,
    tag: &str,
    selection: &mut dyn Selection,
) -> FormatOutcome {
    let range = match active_range("toggle_format", selection) {
        Ok(range) => range,
        Err(outcome) => return outcome,
    };

    if is_wrapped(dom, root, &range, tag) {
        log::trace!("toggle_format: {tag} present, unwrapping");
        return unwrap_selection(dom, root, tag, selection);
    }

    let wrapper = match wrap_with_tag(dom, &range, tag, "toggle_format") {
        Ok(wrapper) => wrapper,
        Err(outcome) => return outcome,
    };
    if let Some(parent) = dom.parent(wrapper) {
        dom.normalize(parent);
        simplify_nested_tags(dom, &[tag], parent);
    }
    selection.remove_all_ranges();
    FormatOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment_str;
    use crate::format::SkipReason;
    use crate::selection::RangeSelection;

    fn toggled(html: &str, tag: &str, start: usize, end: usize) -> String {
        let (mut dom, body) = parse_fragment_str(html);
        let mut selection = RangeSelection::from_offsets(&dom, body, start, end);
        toggle_format(&mut dom, body, tag, &mut selection);
        dom.inner_html(body)
    }

    #[test]
    fn test_toggle_on_and_off() {
        let on = toggled("This is some text.", "strong", 8, 17);
        assert_eq!(on, "This is <strong>some text</strong>.");

        let off = toggled(&on, "strong", 8, 17);
        assert_eq!(off, "This is some text.");
    }

    #[test]
    fn test_toggle_merges_with_neighbour() {
        assert_eq!(toggled("<em>ab</em>cd", "em", 2, 4), "<em>abcd</em>");
    }

    #[test]
    fn test_toggle_partial_overlap_wraps() {
        // Only the end lies inside <b>, so the range is wrapped again and
        // the fresh element absorbs the nested one.
        assert_eq!(toggled("ab<b>cd</b>", "b", 1, 3), "a<b>bcd</b>");
    }

    #[test]
    fn test_toggle_blank_selection_is_skipped() {
        let (mut dom, body) = parse_fragment_str("a   b");
        let mut selection = RangeSelection::from_offsets(&dom, body, 1, 4);

        let outcome = toggle_format(&mut dom, body, "u", &mut selection);

        assert_eq!(outcome, FormatOutcome::Skipped(SkipReason::EmptyRange));
        assert_eq!(dom.inner_html(body), "a   b");
    }

    #[test]
    fn test_is_wrapped_checks_both_ends() {
        let (dom, body) = parse_fragment_str("<b>ab</b>c<b>de</b>");
        let across = Range::from_offsets(&dom, body, 1, 4).unwrap();
        let half = Range::from_offsets(&dom, body, 1, 3).unwrap();

        assert!(is_wrapped(&dom, body, &across, "b"));
        assert!(!is_wrapped(&dom, body, &half, "b"));
        assert!(!is_wrapped(&dom, body, &across, "i"));
    }
}
