//! Mapping between visible-text char offsets and DOM positions.
//!
//! Offsets count the chars of descendant text nodes in document order.
//! Comments and elements without text contribute nothing.

use super::Position;
use crate::dom::{ArenaDom, ArenaNodeId};

/// Find the position of the `offset`-th char of `root`'s visible text.
///
/// An offset that falls on the boundary between two text runs resolves to
/// the end of the earlier one. Returns `None` when the offset lies past the
/// end of the text.
pub fn resolve(dom: &ArenaDom, root: ArenaNodeId, offset: usize) -> Option<Position> {
    if dom.is_text(root) {
        return (offset <= dom.node_length(root)).then(|| Position::new(root, offset));
    }

    let mut remaining = offset;
    for child in dom.children(root) {
        if dom.is_text(child) {
            let len = dom.node_length(child);
            if remaining <= len {
                return Some(Position::new(child, remaining));
            }
            remaining -= len;
        } else if dom.is_element(child) {
            let len = dom.text_len(child);
            if len == 0 {
                continue;
            }
            if remaining <= len {
                return resolve(dom, child, remaining);
            }
            remaining -= len;
        }
    }

    // A subtree without any text still has one addressable spot.
    (offset == 0 && dom.text_len(root) == 0).then(|| Position::new(root, 0))
}

/// Like [`resolve`], but a position at the very end of a text node moves to
/// the start of the next non-empty text node under `root`.
pub fn resolve_start(dom: &ArenaDom, root: ArenaNodeId, offset: usize) -> Option<Position> {
    let position = resolve(dom, root, offset)?;
    if dom.is_text(position.node)
        && position.offset == dom.node_length(position.node)
        && let Some(next) = following_text(dom, position.node, root)
    {
        return Some(Position::new(next, 0));
    }
    Some(position)
}

/// The next node in document order that is not a descendant of `node`:
/// its next sibling, else the next sibling of its nearest ancestor below
/// `root`.
pub fn next_node(dom: &ArenaDom, node: ArenaNodeId, root: ArenaNodeId) -> Option<ArenaNodeId> {
    let mut current = node;
    loop {
        if current == root {
            return None;
        }
        if let Some(next) = dom.next_sibling(current) {
            return Some(next);
        }
        current = dom.parent(current)?;
    }
}

/// Number of visible chars under `root` that precede `position`. The
/// inverse of [`resolve`].
pub fn offset_of(dom: &ArenaDom, root: ArenaNodeId, position: Position) -> usize {
    let mut total = if dom.is_text(position.node) {
        position.offset.min(dom.node_length(position.node))
    } else if dom.is_character_data(position.node) {
        0
    } else {
        dom.children(position.node)
            .take(position.offset)
            .map(|child| dom.text_len(child))
            .sum()
    };

    let mut current = position.node;
    while current != root {
        let mut sibling = dom.prev_sibling(current);
        while let Some(prev) = sibling {
            total += dom.text_len(prev);
            sibling = dom.prev_sibling(prev);
        }
        match dom.parent(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }
    total
}

fn following_text(dom: &ArenaDom, node: ArenaNodeId, root: ArenaNodeId) -> Option<ArenaNodeId> {
    let mut cursor = next_node(dom, node, root);
    while let Some(current) = cursor {
        if dom.is_text(current) && dom.node_length(current) > 0 {
            return Some(current);
        }
        cursor = dom
            .first_child(current)
            .or_else(|| next_node(dom, current, root));
    }
    None
}
