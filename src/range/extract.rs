//! Moving range contents around: the DOM `Range` operations the formatting
//! engine is built on (`extractContents`, `insertNode`,
//! `surroundContents`), implemented over the arena.

use thiserror::Error;

use super::{Position, Range};
use crate::dom::{ArenaDom, ArenaNodeId};

/// Why a range cannot be surrounded in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurroundError {
    #[error("range partially selects element {0:?}")]
    PartialElement(ArenaNodeId),
    #[error("wrapper {0:?} is not an element")]
    InvalidWrapper(ArenaNodeId),
}

/// Remove the range's contents from the tree and return them in a new
/// fragment, together with the collapsed position where they used to be.
///
/// Fully contained nodes are moved. Partially contained elements are cloned
/// shallowly (the original keeps the unselected part) and filled
/// recursively. Character data at either boundary is split.
pub fn extract_contents(dom: &mut ArenaDom, range: &Range) -> (ArenaNodeId, Position) {
    let fragment = dom.create_fragment();
    if range.is_collapsed() {
        return (fragment, range.start);
    }
    let Range { start, end } = *range;

    if start.node == end.node && dom.is_character_data(start.node) {
        let piece = dom.clone_node(start.node, false);
        let data = dom.substring_data(start.node, start.offset, end.offset);
        dom.set_text(piece, data);
        dom.append(fragment, piece);
        dom.delete_data(start.node, start.offset, end.offset);
        return (fragment, start);
    }

    let common = range.common_ancestor(dom);
    let first_partial = partially_contained_child(dom, common, start.node, end.node);
    let last_partial = partially_contained_child(dom, common, end.node, start.node);

    let children = dom.child_ids(common);
    let from = first_partial.map_or(start.offset, |child| dom.index_of(child) + 1);
    let to = last_partial
        .map_or(end.offset, |child| dom.index_of(child))
        .min(children.len());
    let contained: Vec<ArenaNodeId> = children.get(from..to).map(<[_]>::to_vec).unwrap_or_default();

    let collapsed_at = match first_partial {
        None => start,
        Some(child) => Position::new(common, dom.index_of(child) + 1),
    };

    if let Some(child) = first_partial {
        if dom.is_character_data(child) {
            let piece = dom.clone_node(child, false);
            let len = dom.node_length(child);
            let data = dom.substring_data(child, start.offset, len);
            dom.set_text(piece, data);
            dom.append(fragment, piece);
            dom.delete_data(child, start.offset, len);
        } else {
            let shell = dom.clone_node(child, false);
            dom.append(fragment, shell);
            let inner = Range::new(start, Position::new(child, dom.node_length(child)));
            let (inner_fragment, _) = extract_contents(dom, &inner);
            dom.append(shell, inner_fragment);
        }
    }

    for child in contained {
        dom.append(fragment, child);
    }

    if let Some(child) = last_partial {
        if dom.is_character_data(child) {
            let piece = dom.clone_node(child, false);
            let data = dom.substring_data(child, 0, end.offset);
            dom.set_text(piece, data);
            dom.append(fragment, piece);
            dom.delete_data(child, 0, end.offset);
        } else {
            let shell = dom.clone_node(child, false);
            dom.append(fragment, shell);
            let inner = Range::new(Position::new(child, 0), end);
            let (inner_fragment, _) = extract_contents(dom, &inner);
            dom.append(shell, inner_fragment);
        }
    }

    (fragment, collapsed_at)
}

/// The child of `common` on the path to `boundary`, unless `boundary` is an
/// inclusive ancestor of `other` (then nothing on that side is partial).
fn partially_contained_child(
    dom: &ArenaDom,
    common: ArenaNodeId,
    boundary: ArenaNodeId,
    other: ArenaNodeId,
) -> Option<ArenaNodeId> {
    if dom.is_inclusive_ancestor(boundary, other) {
        return None;
    }
    std::iter::once(boundary)
        .chain(dom.ancestors(boundary))
        .find(|&node| dom.parent(node) == Some(common))
}

/// Insert a node at a position. Inside a text node the text is split, except
/// at its very edges, so no empty text nodes appear.
pub fn insert_node(dom: &mut ArenaDom, position: Position, node: ArenaNodeId) {
    let Position { node: container, offset } = position;
    if !dom.is_character_data(container) {
        dom.insert_at(container, offset, node);
        return;
    }
    let Some(parent) = dom.parent(container) else {
        log::debug!("cannot insert next to detached text {container:?}");
        return;
    };
    let reference = if offset == 0 {
        Some(container)
    } else if offset >= dom.node_length(container) || !dom.is_text(container) {
        dom.next_sibling(container)
    } else {
        dom.split_text(container, offset)
    };
    dom.insert_or_append(parent, reference, node);
}

/// Move the range's contents into `wrapper` and put the wrapper where the
/// contents were.
///
/// Fails without touching the tree when the range starts or ends inside an
/// element it does not fully contain.
pub fn surround_contents(
    dom: &mut ArenaDom,
    range: &Range,
    wrapper: ArenaNodeId,
) -> Result<(), SurroundError> {
    if !dom.is_element(wrapper) {
        return Err(SurroundError::InvalidWrapper(wrapper));
    }
    let common = range.common_ancestor(dom);
    for boundary in [range.start.node, range.end.node] {
        let partial = std::iter::once(boundary)
            .chain(dom.ancestors(boundary))
            .take_while(|&node| node != common)
            .find(|&node| !dom.is_text(node));
        if let Some(element) = partial {
            return Err(SurroundError::PartialElement(element));
        }
    }

    let (fragment, position) = extract_contents(dom, range);
    dom.clear_children(wrapper);
    insert_node(dom, position, wrapper);
    dom.append(wrapper, fragment);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_fragment_str;

    fn range(dom: &ArenaDom, body: ArenaNodeId, start: usize, end: usize) -> Range {
        Range::from_offsets(dom, body, start, end).unwrap()
    }

    #[test]
    fn test_extract_within_text() {
        let (mut dom, body) = parse_fragment_str("This is some text.");
        let r = range(&dom, body, 8, 12);

        let (fragment, at) = extract_contents(&mut dom, &r);
        assert_eq!(dom.inner_html(fragment), "some");
        assert_eq!(dom.inner_html(body), "This is  text.");
        assert_eq!(at, r.start);
    }

    #[test]
    fn test_extract_across_elements() {
        let (mut dom, body) =
            parse_fragment_str("This is <strong>some <em>formatted</em></strong> text.");
        let strong = dom.find_by_tag("strong").unwrap();
        let r = range(&dom, body, 8, 22);

        let (fragment, at) = extract_contents(&mut dom, &r);
        assert_eq!(dom.inner_html(fragment), "some <em>formatted</em>");
        assert_eq!(dom.text_content(body), "This is  text.");
        assert_eq!(at, Position::new(strong, 1));
    }

    #[test]
    fn test_extract_partial_elements_both_sides() {
        let (mut dom, body) = parse_fragment_str("<b>ab</b>cd<i>ef</i>");
        let r = range(&dom, body, 1, 5);

        let (fragment, at) = extract_contents(&mut dom, &r);
        assert_eq!(dom.inner_html(fragment), "<b>b</b>cd<i>e</i>");
        assert_eq!(dom.inner_html(body), "<b>a</b><i>f</i>");
        assert_eq!(at, Position::new(body, 1));
    }

    #[test]
    fn test_insert_node_splits_text() {
        let (mut dom, body) = parse_fragment_str("abcd");
        let text = dom.first_child(body).unwrap();
        let br = dom.create_html_element("br");

        insert_node(&mut dom, Position::new(text, 2), br);
        assert_eq!(dom.inner_html(body), "ab<br>cd");
        assert_eq!(dom.child_count(body), 3);

        let hr = dom.create_html_element("hr");
        insert_node(&mut dom, Position::new(text, 0), hr);
        assert_eq!(dom.inner_html(body), "<hr>ab<br>cd");
        assert_eq!(dom.child_count(body), 4);
    }

    #[test]
    fn test_surround_contents() {
        let (mut dom, body) = parse_fragment_str("This is some text.");
        let r = range(&dom, body, 8, 17);
        let strong = dom.create_html_element("strong");

        surround_contents(&mut dom, &r, strong).unwrap();
        assert_eq!(dom.inner_html(body), "This is <strong>some text</strong>.");
    }

    #[test]
    fn test_surround_rejects_partial_element() {
        let (mut dom, body) = parse_fragment_str("<b>ab</b>cd");
        let r = range(&dom, body, 1, 3);
        let u = dom.create_html_element("u");

        let err = surround_contents(&mut dom, &r, u).unwrap_err();
        assert_eq!(err, SurroundError::PartialElement(dom.find_by_tag("b").unwrap()));
        assert_eq!(dom.inner_html(body), "<b>ab</b>cd");
    }
}
