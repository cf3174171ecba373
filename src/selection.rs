//! The user's selection, as seen by the formatting engine.
//!
//! Hosts with their own notion of a selection implement [`Selection`];
//! [`RangeSelection`] is a plain in-memory implementation.

use crate::dom::{ArenaDom, ArenaNodeId};
use crate::range::Range;

/// An ordered set of ranges the user has selected.
pub trait Selection {
    fn range_count(&self) -> usize;

    fn range_at(&self, index: usize) -> Option<Range>;

    fn add_range(&mut self, range: Range);

    fn remove_all_ranges(&mut self);

    /// The range formatting operations act on.
    fn first_range(&self) -> Option<Range> {
        if self.range_count() == 0 {
            None
        } else {
            self.range_at(0)
        }
    }
}

/// In-memory selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSelection {
    ranges: Vec<Range>,
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_range(range: Range) -> Self {
        Self {
            ranges: vec![range],
        }
    }

    /// Select visible-text chars `[start, end)` under `root`. Offsets that
    /// resolve nowhere give an empty selection.
    pub fn from_offsets(dom: &ArenaDom, root: ArenaNodeId, start: usize, end: usize) -> Self {
        match Range::from_offsets(dom, root, start, end) {
            Some(range) => Self::from_range(range),
            None => {
                log::debug!("selection {start}..{end} does not resolve under {root:?}");
                Self::new()
            }
        }
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }
}

impl Selection for RangeSelection {
    fn range_count(&self) -> usize {
        self.ranges.len()
    }

    fn range_at(&self, index: usize) -> Option<Range> {
        self.ranges.get(index).copied()
    }

    fn add_range(&mut self, range: Range) {
        self.ranges.push(range);
    }

    fn remove_all_ranges(&mut self) {
        self.ranges.clear();
    }
}
