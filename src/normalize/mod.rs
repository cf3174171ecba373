//! Normalization passes that keep formatting markup minimal.
//!
//! Wrapping and unwrapping leave debris behind: empty wrappers, wrappers
//! nested in identical wrappers, runs of identical siblings. These passes
//! clean it up so that toggling a format twice gives back the original
//! markup.
//!
//! ## Passes
//!
//! 1. **Prune** ([`remove_empty_formatting_elements`]): remove empty
//!    elements (post-order, cascading)
//! 2. **Merge** ([`merge_duplicates`]): attribute-agnostic collapse of
//!    duplicates, for freshly wrapped split selections
//! 3. **Simplify** ([`simplify_nested_tags`]): attribute-aware
//!    nested/sibling cleanup
//!
//! All passes work in place on one subtree and take snapshots of child lists
//! before mutating them.

mod merge;
mod pass;
mod prune;
mod simplify;

pub use merge::merge_duplicates;
pub use pass::walk_bottom_up;
pub use prune::{
    prune_empty_bare, prune_empty_formatting, remove_empty_formatting_elements, tidy_fragment,
};
pub use simplify::{simplify_all_formatting_tags, simplify_nested_tags};
