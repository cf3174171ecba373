//! Boundary points and ranges over the arena DOM.
//!
//! A [`Position`] is a DOM boundary point: inside character data its offset
//! counts chars, inside any other node it counts children. A [`Range`] is a
//! pair of positions in document order.
//!
//! - [`resolve`](mod@resolve): map character offsets of visible text to positions
//! - [`split`](mod@split): break a range into per-text-node sub-ranges
//! - [`extract`](mod@extract): move, insert and surround range contents

pub mod extract;
pub mod resolve;
pub mod split;

pub use extract::{SurroundError, extract_contents, insert_node, surround_contents};
pub use resolve::{next_node, offset_of, resolve, resolve_start};
pub use split::split_range;

use crate::dom::{ArenaDom, ArenaNodeId};

/// A boundary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub node: ArenaNodeId,
    pub offset: usize,
}

impl Position {
    pub fn new(node: ArenaNodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A contiguous span of the document between two boundary points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty range at one position.
    pub fn collapsed(position: Position) -> Self {
        Self::new(position, position)
    }

    /// A range inside a single node.
    pub fn within(node: ArenaNodeId, start: usize, end: usize) -> Self {
        Self::new(Position::new(node, start), Position::new(node, end))
    }

    /// A range covering all of a node's contents.
    pub fn contents_of(dom: &ArenaDom, node: ArenaNodeId) -> Self {
        Self::within(node, 0, dom.node_length(node))
    }

    /// Resolve visible-text char offsets `[start, end)` under `root`.
    ///
    /// The start is resolved with forward affinity so a selection that
    /// begins exactly at a tag boundary starts in the following text run.
    pub fn from_offsets(dom: &ArenaDom, root: ArenaNodeId, start: usize, end: usize) -> Option<Self> {
        let (start, end) = (start.min(end), start.max(end));
        let end_position = resolve(dom, root, end)?;
        let start_position = if start == end {
            end_position
        } else {
            resolve_start(dom, root, start)?
        };
        Some(Self::new(start_position, end_position))
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Deepest node containing both boundary points.
    pub fn common_ancestor(&self, dom: &ArenaDom) -> ArenaNodeId {
        let start_chain: Vec<ArenaNodeId> = std::iter::once(self.start.node)
            .chain(dom.ancestors(self.start.node))
            .collect();
        std::iter::once(self.end.node)
            .chain(dom.ancestors(self.end.node))
            .find(|node| start_chain.contains(node))
            .unwrap_or_else(|| dom.document())
    }

    /// Visible text inside the range.
    pub fn text(&self, dom: &ArenaDom) -> String {
        if self.start.node == self.end.node && dom.is_character_data(self.start.node) {
            if !dom.is_text(self.start.node) {
                return String::new();
            }
            return dom.substring_data(self.start.node, self.start.offset, self.end.offset);
        }
        let root = self.common_ancestor(dom);
        let from = offset_of(dom, root, self.start);
        let to = offset_of(dom, root, self.end);
        dom.text_content(root)
            .chars()
            .skip(from)
            .take(to.saturating_sub(from))
            .collect()
    }
}
