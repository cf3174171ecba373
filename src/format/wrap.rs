//! Surrounding a range with a wrapper element.

use super::{FormatOutcome, SkipReason, active_range, skipped};
use crate::dom::{ArenaDom, ArenaNodeId, parse_fragment_str};
use crate::error::{Error, Result};
use crate::normalize::prune_empty_formatting;
use crate::range::{Range, extract_contents, insert_node, surround_contents};
use crate::selection::Selection;
use crate::util::is_whitespace_only;

/// What to wrap a selection in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper<'a> {
    /// HTML markup; the first node after trimming is used.
    Markup(&'a str),
    /// A node in the same tree, deep-cloned.
    Node(ArenaNodeId),
    /// The first element of a collection, deep-cloned.
    Collection(&'a [ArenaNodeId]),
}

impl Wrapper<'_> {
    /// Create the detached wrapper element in `dom`.
    pub fn build(&self, dom: &mut ArenaDom) -> Result<ArenaNodeId> {
        match *self {
            Wrapper::Markup(markup) => {
                let markup = markup.trim();
                let (parsed, body) = parse_fragment_str(markup);
                let first = parsed.first_child(body).ok_or_else(|| {
                    Error::InvalidWrapperSpec(format!("no element in {markup:?}"))
                })?;
                if !parsed.is_element(first) {
                    return Err(Error::InvalidWrapperSpec(format!(
                        "{markup:?} does not start with an element"
                    )));
                }
                Ok(dom.import_node(&parsed, first))
            }
            Wrapper::Node(id) => clone_element(dom, id),
            Wrapper::Collection(ids) => {
                let first = ids
                    .iter()
                    .copied()
                    .find(|&id| dom.is_element(id))
                    .ok_or_else(|| Error::InvalidWrapperSpec("empty collection".to_string()))?;
                clone_element(dom, first)
            }
        }
    }
}

fn clone_element(dom: &mut ArenaDom, id: ArenaNodeId) -> Result<ArenaNodeId> {
    if !dom.is_element(id) {
        return Err(Error::InvalidWrapperSpec(format!("{id:?} is not an element")));
    }
    Ok(dom.clone_node(id, true))
}

/// Wrap the selection's first range in a copy of `wrapper`, then clear the
/// selection.
///
/// Only an unusable wrapper is an error; without a range the call is
/// skipped.
pub fn wrap_selection(
    dom: &mut ArenaDom,
    wrapper: &Wrapper<'_>,
    selection: &mut dyn Selection,
) -> Result<FormatOutcome> {
    let range = match active_range("wrap_selection", selection) {
        Ok(range) => range,
        Err(outcome) => return Ok(outcome),
    };
    let element = wrapper.build(dom)?;

    surround_or_reinsert(dom, &range, element);
    if let Some(parent) = dom.parent(element) {
        dom.normalize(parent);
    }
    selection.remove_all_ranges();
    Ok(FormatOutcome::Applied)
}

/// Wrap one range in a new `<tag>` element. Returns `false` without
/// touching the tree when the range text is blank.
pub fn wrap_range(dom: &mut ArenaDom, range: &Range, tag: &str) -> bool {
    if is_whitespace_only(&range.text(dom)) {
        log::trace!("not wrapping blank range {range:?}");
        return false;
    }
    let wrapper = dom.create_html_element(tag);
    surround_or_reinsert(dom, range, wrapper);
    true
}

/// Wrap a bare `<tag>` around the selection. Blank selections are skipped.
pub(crate) fn wrap_with_tag(
    dom: &mut ArenaDom,
    range: &Range,
    tag: &str,
    operation: &str,
) -> std::result::Result<ArenaNodeId, FormatOutcome> {
    if is_whitespace_only(&range.text(dom)) {
        return Err(skipped(operation, SkipReason::EmptyRange));
    }
    let wrapper = dom.create_html_element(tag);
    surround_or_reinsert(dom, range, wrapper);
    Ok(wrapper)
}

/// Surround the range with `wrapper`. When the range cuts through an
/// element, the contents are extracted instead (partial elements are
/// cloned on both sides), appended to the wrapper and the wrapper inserted
/// where they were.
///
/// Boundary text nodes emptied by the move are removed, so the wrapper's
/// siblings are the nodes a reader of the markup would see.
pub(crate) fn surround_or_reinsert(dom: &mut ArenaDom, range: &Range, wrapper: ArenaNodeId) {
    let Err(err) = surround_contents(dom, range, wrapper) else {
        drop_emptied_text(dom, range);
        return;
    };
    log::debug!("surround failed ({err}), re-inserting extracted contents");

    let (fragment, position) = extract_contents(dom, range);
    dom.append(wrapper, fragment);
    insert_node(dom, position, wrapper);
    if let Some(parent) = dom.parent(wrapper) {
        dom.normalize(parent);
        prune_empty_formatting(dom, parent, wrapper);
    }
}

fn drop_emptied_text(dom: &mut ArenaDom, range: &Range) {
    for node in [range.start.node, range.end.node] {
        if dom.is_text(node) && dom.node_length(node) == 0 && dom.parent(node).is_some() {
            dom.detach(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::RangeSelection;

    #[test]
    fn test_wrap_plain_text() {
        let (mut dom, body) = parse_fragment_str("This is some text.");
        let mut selection = RangeSelection::from_offsets(&dom, body, 8, 17);

        let outcome = wrap_selection(&mut dom, &Wrapper::Markup("<strong></strong>"), &mut selection)
            .unwrap();

        assert_eq!(outcome, FormatOutcome::Applied);
        assert_eq!(dom.inner_html(body), "This is <strong>some text</strong>.");
        assert_eq!(selection.range_count(), 0);
    }

    #[test]
    fn test_wrap_markup_keeps_attributes() {
        let (mut dom, body) = parse_fragment_str("abc");
        let mut selection = RangeSelection::from_offsets(&dom, body, 1, 2);

        wrap_selection(
            &mut dom,
            &Wrapper::Markup("  <span class=\"hl\" data-x=\"1\"></span>\n"),
            &mut selection,
        )
        .unwrap();

        assert_eq!(
            dom.inner_html(body),
            r#"a<span class="hl" data-x="1">b</span>c"#
        );
    }

    #[test]
    fn test_wrap_partial_element_falls_back() {
        let (mut dom, body) = parse_fragment_str("ab<em>cd</em>ef");
        let mut selection = RangeSelection::from_offsets(&dom, body, 1, 3);

        wrap_selection(&mut dom, &Wrapper::Markup("<b></b>"), &mut selection).unwrap();

        assert_eq!(dom.inner_html(body), "a<b>b<em>c</em></b><em>d</em>ef");
        assert_eq!(dom.text_content(body), "abcdef");
    }

    #[test]
    fn test_wrap_with_node_and_collection() {
        let (mut dom, body) = parse_fragment_str(r#"<i class="t"></i>xyz"#);
        let template = dom.find_by_tag("i").unwrap();
        let mut selection = RangeSelection::from_offsets(&dom, body, 0, 1);

        wrap_selection(&mut dom, &Wrapper::Node(template), &mut selection).unwrap();
        assert_eq!(dom.inner_html(body), r#"<i class="t"></i><i class="t">x</i>yz"#);

        let text = dom.last_child(body).unwrap();
        let mut selection = RangeSelection::from_range(Range::within(text, 0, 1));
        wrap_selection(&mut dom, &Wrapper::Collection(&[text, template]), &mut selection).unwrap();
        assert_eq!(
            dom.inner_html(body),
            r#"<i class="t"></i><i class="t">x</i><i class="t">y</i>z"#
        );
    }

    #[test]
    fn test_invalid_wrappers() {
        let (mut dom, body) = parse_fragment_str("abc");
        let text = dom.first_child(body).unwrap();

        for wrapper in [
            Wrapper::Markup(""),
            Wrapper::Markup("plain text"),
            Wrapper::Node(text),
            Wrapper::Node(ArenaNodeId(9999)),
            Wrapper::Collection(&[]),
        ] {
            let mut selection = RangeSelection::from_offsets(&dom, body, 0, 1);
            assert!(matches!(
                wrap_selection(&mut dom, &wrapper, &mut selection),
                Err(Error::InvalidWrapperSpec(_))
            ));
        }
        assert_eq!(dom.inner_html(body), "abc");
    }

    #[test]
    fn test_wrap_without_selection_is_skipped() {
        let (mut dom, body) = parse_fragment_str("abc");
        let mut selection = RangeSelection::new();

        let outcome = wrap_selection(&mut dom, &Wrapper::Markup("<b></b>"), &mut selection).unwrap();

        assert_eq!(outcome, FormatOutcome::Skipped(SkipReason::NoActiveSelection));
        assert_eq!(dom.inner_html(body), "abc");
    }

    #[test]
    fn test_wrap_range_skips_blank() {
        let (mut dom, body) = parse_fragment_str("a  b");
        let text = dom.first_child(body).unwrap();

        assert!(!wrap_range(&mut dom, &Range::within(text, 1, 3), "u"));
        assert!(wrap_range(&mut dom, &Range::within(text, 0, 1), "u"));
        assert_eq!(dom.inner_html(body), "<u>a</u>  b");
    }

    #[test]
    fn test_wrap_whole_text_leaves_no_empty_sibling() {
        let (mut dom, body) = parse_fragment_str("ab<b>cd</b>");
        let text = dom.first_child(body).unwrap();
        let existing = dom.find_by_tag("b").unwrap();

        assert!(wrap_range(&mut dom, &Range::within(text, 0, 2), "b"));

        let wrapper = dom.first_child(body).unwrap();
        assert_ne!(wrapper, existing);
        assert_eq!(dom.next_sibling(wrapper), Some(existing));
        assert_eq!(dom.child_count(body), 2);
    }

    #[test]
    fn test_wrap_selection_normalizes_parent() {
        let (mut dom, body) = parse_fragment_str("abc");
        let text = dom.first_child(body).unwrap();
        let mut selection = RangeSelection::from_range(Range::within(text, 0, 3));

        wrap_selection(&mut dom, &Wrapper::Markup("<em></em>"), &mut selection).unwrap();

        assert_eq!(dom.child_count(body), 1);
        assert_eq!(dom.inner_html(body), "<em>abc</em>");
    }
}
