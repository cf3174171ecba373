//! Splitting a selection into ranges that never cross an element boundary.

use super::resolve::next_node;
use super::{Position, Range};
use crate::dom::ArenaDom;
use crate::dom::ArenaNodeId;

/// Walk from `start` to `end` in document order and emit one range per text
/// node touched: the rest of every text node before `end`'s container, then
/// a final range ending exactly at `end`.
///
/// Each range can be surrounded by a wrapper without splitting any element.
/// Ranges whose text is blank are still emitted; callers drop them.
pub fn split_range(
    dom: &ArenaDom,
    root: ArenaNodeId,
    start: Position,
    end: Position,
) -> Vec<Range> {
    let mut ranges = Vec::new();
    let mut cursor = Some(start);

    while let Some(position) = cursor {
        let node = position.node;
        if node == end.node {
            ranges.push(Range::new(position, end));
            break;
        }
        cursor = if dom.is_text(node) {
            ranges.push(Range::new(position, Position::new(node, dom.node_length(node))));
            next_node(dom, node, root)
        } else if dom.is_element(node) {
            dom.first_child(node).or_else(|| next_node(dom, node, root))
        } else {
            next_node(dom, node, root)
        }
        .map(|next| Position::new(next, 0));
    }

    log::trace!("split selection into {} ranges", ranges.len());
    ranges
}
