//! Attribute-agnostic merging of duplicate wrappers.

use crate::dom::{ArenaDom, ArenaNodeId};

/// Collapse `tag` elements into same-tag ancestors and into an immediately
/// preceding same-tag sibling.
///
/// Used after wrapping a split selection piece by piece:
/// ```html
/// <strong>some</strong><strong> text</strong>
/// ```
/// becomes
/// ```html
/// <strong>some text</strong>
/// ```
///
/// Attributes are ignored here; the attribute-aware variant is
/// [`simplify_nested_tags`](super::simplify_nested_tags).
pub fn merge_duplicates(dom: &mut ArenaDom, root: ArenaNodeId, tag: &str) {
    for element in dom.elements_by_tag(root, tag) {
        // Merged away by an earlier element.
        if !dom.ancestors(element).any(|a| a == root) {
            continue;
        }

        let mut current = element;
        while let Some(parent) = dom.parent(current)
            && parent != root
            && dom.tag_is(parent, tag)
        {
            dom.replace_with_children(current);
            current = parent;
        }

        if let Some(prev) = dom.prev_sibling(current)
            && dom.tag_is(prev, tag)
        {
            dom.move_children(current, prev);
            dom.detach(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment_str;

    fn merged(html: &str, tag: &str) -> String {
        let (mut dom, body) = parse_fragment_str(html);
        merge_duplicates(&mut dom, body, tag);
        dom.inner_html(body)
    }

    #[test]
    fn test_merges_adjacent() {
        assert_eq!(
            merged("<strong>some</strong><strong> text</strong>!", "strong"),
            "<strong>some text</strong>!"
        );
    }

    #[test]
    fn test_merges_nested() {
        assert_eq!(
            merged("<b>a<b>b<b>c</b></b></b>", "b"),
            "<b>abc</b>"
        );
    }

    #[test]
    fn test_ignores_attributes() {
        assert_eq!(
            merged(r#"<b class="x">a</b><b>b</b>"#, "b"),
            r#"<b class="x">ab</b>"#
        );
    }

    #[test]
    fn test_text_between_blocks_merge() {
        assert_eq!(merged("<b>a</b> <b>b</b>", "b"), "<b>a</b> <b>b</b>");
    }
}
