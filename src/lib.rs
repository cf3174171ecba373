//! # inlay
//!
//! A selection-aware inline formatting engine for HTML trees.
//!
//! ## Features
//!
//! - Map character offsets of visible text to positions in the tree
//! - Wrap, unwrap and toggle formatting tags on a selection, across element
//!   boundaries
//! - Inline `style` editing and "clear formatting"
//! - Normalization passes that keep repeated toggling free of redundant markup
//! - A small chainable query API for class, attribute and insertion helpers
//!
//! ## Quick Start
//!
//! ```
//! use inlay::html::{SelectionOffsets, toggle_format_in_html};
//!
//! let bold = toggle_format_in_html("This is some text.", SelectionOffsets::new(8, 17), "strong")
//!     .unwrap();
//! assert_eq!(bold, "This is <strong>some text</strong>.");
//!
//! let plain = toggle_format_in_html(&bold, SelectionOffsets::new(8, 17), "strong").unwrap();
//! assert_eq!(plain, "This is some text.");
//! ```
//!
//! ## Working with a Tree
//!
//! The engine edits an [`ArenaDom`] in place. A [`Selection`] supplies the
//! range to act on:
//!
//! ```
//! use inlay::dom::parse_fragment_str;
//! use inlay::format::{FormatOutcome, toggle_format};
//! use inlay::RangeSelection;
//!
//! let (mut dom, body) = parse_fragment_str("<em>one</em> two");
//! let mut selection = RangeSelection::from_offsets(&dom, body, 0, 3);
//!
//! let outcome = toggle_format(&mut dom, body, "em", &mut selection);
//! assert_eq!(outcome, FormatOutcome::Applied);
//! assert_eq!(dom.inner_html(body), "one two");
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod format;
pub mod html;
pub mod normalize;
pub mod query;
pub mod range;
pub mod selection;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::FormatConfig;
pub use dom::{ArenaDom, ArenaNodeId};
pub use error::{Error, Result};
pub use format::{FormatOutcome, SkipReason, Wrapper};
pub use html::{SelectionOffsets, wrap_selection_in_html};
pub use query::{Content, HtmlQuery, Source};
pub use range::{Position, Range};
pub use selection::{RangeSelection, Selection};
pub use util::{decode_text, extract_meta_charset};
