//! Selection-aware formatting.
//!
//! Every entry point reads the first range of a [`Selection`], rewrites the
//! tree around it and reports what happened as a [`FormatOutcome`]. A
//! missing selection or a selection with nothing to act on is not an error:
//! the operation is skipped and the reason logged at `debug`.
//!
//! - [`wrap`](mod@wrap): surround a range with a wrapper element
//! - [`unwrap`](mod@unwrap): split an enclosing format element around a range
//! - [`toggle`](mod@toggle): wrap or unwrap depending on the current state
//! - [`style`](mod@style): inline `style` declarations on selected nodes
//! - [`clear`](mod@clear): strip all formatting from a range

pub mod clear;
pub mod style;
pub mod toggle;
pub mod unwrap;
pub mod wrap;

use std::fmt;

pub use crate::normalize::remove_empty_formatting_elements;
pub use clear::clear_formatting;
pub use style::{apply_style, remove_style};
pub use toggle::{is_wrapped, toggle_format};
pub use unwrap::unwrap_selection;
pub use wrap::{Wrapper, wrap_range, wrap_selection};

use crate::dom::{ArenaDom, ArenaNodeId};
use crate::range::Range;
use crate::selection::Selection;

/// Result of a formatting operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// The tree was rewritten.
    Applied,
    /// Nothing was done.
    Skipped(SkipReason),
}

impl FormatOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FormatOutcome::Applied)
    }
}

/// Why an operation left the tree alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The selection holds no range.
    NoActiveSelection,
    /// Unwrapping found no enclosing element of the requested tag.
    NoEnclosingFormat,
    /// The range is collapsed or covers only whitespace.
    EmptyRange,
    /// A character offset lies outside the document text.
    PositionNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NoActiveSelection => "no active selection",
            SkipReason::NoEnclosingFormat => "no enclosing format element",
            SkipReason::EmptyRange => "empty range",
            SkipReason::PositionNotFound => "position not found",
        };
        f.write_str(reason)
    }
}

/// Log and build a skipped outcome.
pub(crate) fn skipped(operation: &str, reason: SkipReason) -> FormatOutcome {
    log::debug!("{operation}: skipped, {reason}");
    FormatOutcome::Skipped(reason)
}

/// The range an operation acts on, or the skip it reports without one.
pub(crate) fn active_range(
    operation: &str,
    selection: &dyn Selection,
) -> Result<Range, FormatOutcome> {
    selection
        .first_range()
        .ok_or_else(|| skipped(operation, SkipReason::NoActiveSelection))
}

/// Nearest inclusive ancestor of `node` that is a `tag` element. The walk
/// stops before `root`.
pub(crate) fn tag_ancestor(
    dom: &ArenaDom,
    node: ArenaNodeId,
    root: ArenaNodeId,
    tag: &str,
) -> Option<ArenaNodeId> {
    std::iter::once(node)
        .chain(dom.ancestors(node))
        .take_while(|&ancestor| ancestor != root)
        .find(|&ancestor| dom.tag_is(ancestor, tag))
}
