//! Property tests for offset mapping and the formatting operations.

use inlay::dom::parse_fragment_str;
use inlay::format::{clear_formatting, toggle_format};
use inlay::html::{SelectionOffsets, parse_document, wrap_selection_in_html};
use inlay::normalize::{simplify_all_formatting_tags, simplify_nested_tags};
use inlay::range::{offset_of, resolve};
use inlay::{ArenaDom, ArenaNodeId, FormatConfig, RangeSelection};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// One piece of generated markup around a short word.
fn segment() -> impl Strategy<Value = String> {
    ("[a-z]{1,5}", 0u8..7).prop_map(|(word, kind)| match kind {
        0 => word,
        1 => format!("<b>{word}</b>"),
        2 => format!("<b><b>{word}</b></b>"),
        3 => format!("<i><b>{word}</b></i>"),
        4 => format!("<b>{word}</b> "),
        5 => format!(r#"<b class="k">{word}</b>"#),
        _ => format!("<em>{word}<u>{word}</u></em>"),
    })
}

fn markup() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..6).prop_map(|parts| parts.concat())
}

/// Markup plus a pair of offsets inside its text.
fn markup_with_offsets() -> impl Strategy<Value = (String, usize, usize)> {
    markup().prop_flat_map(|html| {
        let (dom, body) = parse_fragment_str(&html);
        let len = dom.text_len(body);
        (Just(html), 0..=len, 0..=len)
    })
}

fn is_blank_text(dom: &ArenaDom, node: ArenaNodeId) -> bool {
    dom.text(node).is_some_and(|text| text.trim().is_empty())
}

fn next_non_blank(dom: &ArenaDom, node: ArenaNodeId) -> Option<ArenaNodeId> {
    let mut sibling = dom.next_sibling(node);
    while let Some(next) = sibling {
        if !is_blank_text(dom, next) {
            return Some(next);
        }
        sibling = dom.next_sibling(next);
    }
    None
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_resolve_inverts_offset_of(html in markup()) {
        let (dom, body) = parse_fragment_str(&html);
        let len = dom.text_len(body);

        for k in 0..=len {
            let position = resolve(&dom, body, k);
            prop_assert!(position.is_some(), "offset {} of {} did not resolve", k, len);
            if let Some(position) = position {
                prop_assert_eq!(offset_of(&dom, body, position), k);
            }
        }
        prop_assert_eq!(resolve(&dom, body, len + 1), None);
    }

    #[test]
    fn prop_toggle_twice_in_one_run_restores_markup(
        (text, start, end) in "[a-z]{2,24}".prop_flat_map(|text| {
            let len = text.chars().count();
            (Just(text), 0..len).prop_flat_map(move |(text, start)| {
                (Just(text), Just(start), (start + 1)..=len)
            })
        })
    ) {
        let (mut dom, body) = parse_fragment_str(&text);

        let mut selection = RangeSelection::from_offsets(&dom, body, start, end);
        toggle_format(&mut dom, body, "strong", &mut selection);
        prop_assert_eq!(dom.elements_by_tag(body, "strong").len(), 1);

        let mut selection = RangeSelection::from_offsets(&dom, body, start, end);
        toggle_format(&mut dom, body, "strong", &mut selection);
        simplify_all_formatting_tags(&mut dom, body, &FormatConfig::default());

        prop_assert_eq!(dom.inner_html(body), text);
    }

    #[test]
    fn prop_simplify_leaves_no_mergeable_tags(html in markup()) {
        let (mut dom, body) = parse_fragment_str(&html);
        let before = dom.text_content(body);

        simplify_nested_tags(&mut dom, &["b"], body);

        prop_assert_eq!(dom.text_content(body), before);
        for element in dom.elements_by_tag(body, "b") {
            if !dom.is_bare_element(element, "b") {
                continue;
            }
            let parent = dom.parent(element).unwrap();
            prop_assert!(!dom.tag_is(parent, "b"), "nested <b> in {}", dom.inner_html(body));
            if let Some(next) = next_non_blank(&dom, element) {
                prop_assert!(
                    !dom.is_bare_element(next, "b"),
                    "adjacent <b> in {}",
                    dom.inner_html(body)
                );
            }
        }
    }

    #[test]
    fn prop_toggle_preserves_text((html, start, end) in markup_with_offsets()) {
        let (mut dom, body) = parse_fragment_str(&html);
        let before = dom.text_content(body);

        let mut selection = RangeSelection::from_offsets(&dom, body, start, end);
        toggle_format(&mut dom, body, "b", &mut selection);

        prop_assert_eq!(dom.text_content(body), before);
    }

    #[test]
    fn prop_clear_preserves_text((html, start, end) in markup_with_offsets()) {
        let (mut dom, body) = parse_fragment_str(&html);
        let before = dom.text_content(body);

        let mut selection = RangeSelection::from_offsets(&dom, body, start, end);
        clear_formatting(&mut dom, body, &mut selection);

        prop_assert_eq!(dom.text_content(body), before);
    }

    #[test]
    fn prop_wrap_preserves_text((html, start, end) in markup_with_offsets()) {
        let (dom, body) = parse_document(&html);
        let before = dom.text_content(body);

        let wrapped = wrap_selection_in_html(&html, SelectionOffsets::new(start, end), "u").unwrap();

        let (dom, body) = parse_document(&wrapped);
        prop_assert_eq!(dom.text_content(body), before);
    }

    #[test]
    fn prop_wrap_leaves_no_duplicate_tags((html, start, end) in markup_with_offsets()) {
        let wrapped = wrap_selection_in_html(&html, SelectionOffsets::new(start, end), "b").unwrap();

        let (dom, body) = parse_document(&wrapped);
        for element in dom.elements_by_tag(body, "b") {
            let parent = dom.parent(element).unwrap();
            prop_assert!(!dom.tag_is(parent, "b"), "nested <b> in {}", wrapped);
            if let Some(next) = dom.next_sibling(element) {
                prop_assert!(!dom.tag_is(next, "b"), "adjacent <b> in {}", wrapped);
            }
        }
    }
}
