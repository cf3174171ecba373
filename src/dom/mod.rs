//! Editable HTML document model.
//!
//! - [`arena`]: the arena-allocated node tree and its mutation primitives
//! - [`tree_sink`]: html5ever parsing into the arena
//! - [`serialize`]: html5ever serialization out of the arena
//! - [`element_ref`]: CSS selector matching
//! - [`style`]: inline `style` attribute editing
//! - [`predicates`]: element classification

pub mod arena;
pub mod element_ref;
pub mod predicates;
pub mod serialize;
pub mod style;
pub mod tree_sink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute};
pub use element_ref::{Selectors, compile_selector, matches, select_all};
pub use style::InlineStyle;
pub use tree_sink::{ArenaSink, parse_document_str, parse_fragment_str};
