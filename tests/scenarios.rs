//! End-to-end formatting scenarios on small documents.

use inlay::dom::parse_fragment_str;
use inlay::format::{clear_formatting, toggle_format};
use inlay::normalize::{simplify_all_formatting_tags, simplify_nested_tags};
use inlay::{FormatConfig, FormatOutcome, Range, RangeSelection, Selection};

// ============================================================================
// Toggling
// ============================================================================

#[test]
fn test_toggle_wraps_selected_words() {
    let (mut dom, body) = parse_fragment_str("This is some text.");
    let mut selection = RangeSelection::from_offsets(&dom, body, 8, 17);
    assert_eq!(selection.first_range().unwrap().text(&dom), "some text");

    let outcome = toggle_format(&mut dom, body, "strong", &mut selection);

    assert_eq!(outcome, FormatOutcome::Applied);
    assert_eq!(dom.inner_html(body), "This is <strong>some text</strong>.");
}

#[test]
fn test_toggle_back_restores_text() {
    let (mut dom, body) = parse_fragment_str("This is some text.");
    let mut selection = RangeSelection::from_offsets(&dom, body, 8, 17);
    toggle_format(&mut dom, body, "strong", &mut selection);

    let strong = dom.find_by_tag("strong").expect("wrapped");
    let inner = dom.first_child(strong).expect("text");
    let mut selection = RangeSelection::from_range(Range::contents_of(&dom, inner));
    toggle_format(&mut dom, body, "strong", &mut selection);
    simplify_all_formatting_tags(&mut dom, body, &FormatConfig::default());

    assert_eq!(dom.inner_html(body), "This is some text.");
    assert_eq!(selection.range_count(), 0);
}

// ============================================================================
// Simplification
// ============================================================================

#[test]
fn test_adjacent_tags_merge_across_whitespace() {
    let (mut dom, body) =
        parse_fragment_str("<strong>Bold</strong><strong> </strong><strong>Text</strong>");

    simplify_nested_tags(&mut dom, &["strong"], body);

    assert_eq!(dom.inner_html(body), "<strong>Bold Text</strong>");
}

#[test]
fn test_nested_tags_collapse() {
    let (mut dom, body) = parse_fragment_str("<strong><strong>More Bold</strong></strong>");

    simplify_nested_tags(&mut dom, &["strong"], body);

    assert_eq!(dom.inner_html(body), "<strong>More Bold</strong>");
}

// ============================================================================
// Clearing
// ============================================================================

#[test]
fn test_clear_formatting_across_nested_tags() {
    let (mut dom, body) =
        parse_fragment_str("This is <strong>some <em>formatted</em></strong> text.");
    let mut selection = RangeSelection::from_offsets(&dom, body, 8, 22);
    assert_eq!(selection.first_range().unwrap().text(&dom), "some formatted");

    clear_formatting(&mut dom, body, &mut selection);
    simplify_all_formatting_tags(&mut dom, body, &FormatConfig::default());

    assert_eq!(dom.inner_html(body), "This is some formatted text.");
}

#[test]
fn test_clear_part_of_a_word() {
    let (mut dom, body) = parse_fragment_str("<em>emphasis</em>");
    let mut selection = RangeSelection::from_offsets(&dom, body, 2, 5);

    clear_formatting(&mut dom, body, &mut selection);

    assert_eq!(dom.inner_html(body), "<em>em</em>pha<em>sis</em>");
    assert_eq!(dom.text_content(body), "emphasis");
}

// ============================================================================
// Mixed sequences
// ============================================================================

#[test]
fn test_toggle_two_tags_then_remove_one() {
    let (mut dom, body) = parse_fragment_str("one two three");

    let mut selection = RangeSelection::from_offsets(&dom, body, 4, 7);
    toggle_format(&mut dom, body, "em", &mut selection);
    let mut selection = RangeSelection::from_offsets(&dom, body, 0, 13);
    toggle_format(&mut dom, body, "strong", &mut selection);
    assert_eq!(
        dom.inner_html(body),
        "<strong>one <em>two</em> three</strong>"
    );

    let mut selection = RangeSelection::from_offsets(&dom, body, 4, 7);
    toggle_format(&mut dom, body, "strong", &mut selection);
    assert_eq!(
        dom.inner_html(body),
        "<strong>one </strong><em>two</em><strong> three</strong>"
    );
}
