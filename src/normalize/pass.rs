//! Tree traversal utilities for normalization passes.

use crate::dom::{ArenaDom, ArenaNodeId};

/// Walk the subtree under `root` bottom-up and call `visitor` at each node,
/// `root` included.
///
/// Children are visited before their parent, which lets a pass cascade
/// (an element emptied by pruning its children is itself pruned). Each
/// child list is snapshotted before descending, so visitors may detach or
/// reparent nodes freely.
pub fn walk_bottom_up<F>(dom: &mut ArenaDom, root: ArenaNodeId, mut visitor: F)
where
    F: FnMut(&mut ArenaDom, ArenaNodeId),
{
    walk_children(dom, root, &mut visitor);
}

fn walk_children<F>(dom: &mut ArenaDom, parent: ArenaNodeId, visitor: &mut F)
where
    F: FnMut(&mut ArenaDom, ArenaNodeId),
{
    for child in dom.child_ids(parent) {
        walk_children(dom, child, visitor);
    }
    visitor(dom, parent);
}
