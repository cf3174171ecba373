//! Arena-based DOM for editable HTML.
//!
//! Every node lives in one contiguous vector and is addressed by an
//! [`ArenaNodeId`]. Parent/child/sibling links are indices into that vector,
//! so the formatting engine can rewire the tree freely while callers keep
//! stable handles to the nodes they care about. Detached nodes simply stay in
//! the arena until the document is dropped.

use html5ever::{LocalName, Namespace, QualName, ns};

use crate::util::{byte_offset, char_len};

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Sentinel value for no node.
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }

    fn to_option(self) -> Option<ArenaNodeId> {
        self.is_some().then_some(self)
    }
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    /// Document root.
    Document,
    /// Detached container for extracted or parsed content. Inserting a
    /// fragment inserts its children instead.
    Fragment,
    /// Element with name and attributes.
    Element { name: QualName, attrs: Vec<Attribute> },
    /// Text content.
    Text(String),
    /// Comment. Zero width for offset purposes.
    Comment(String),
    /// Document type declaration.
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

/// HTML attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

impl Attribute {
    /// Attribute in the null namespace, as written in HTML source.
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.into(),
        }
    }
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn new(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Arena-based DOM tree.
#[derive(Debug)]
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    document: ArenaNodeId,
}

impl ArenaDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            document: ArenaNodeId::NONE,
        };
        dom.document = dom.alloc(ArenaNode::new(ArenaNodeData::Document));
        dom
    }

    fn alloc(&mut self, node: ArenaNode) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> ArenaNodeId {
        self.document
    }

    /// The `<body>` element, if the document has one.
    pub fn body(&self) -> Option<ArenaNodeId> {
        self.find_by_tag("body")
    }

    /// Get a node by ID.
    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get the number of nodes ever allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Element { name, attrs }))
    }

    /// Create an attribute-less HTML element. The tag is lowercased.
    pub fn create_html_element(&mut self, tag: &str) -> ArenaNodeId {
        let name = QualName::new(None, ns!(html), LocalName::from(tag.to_ascii_lowercase()));
        self.create_element(name, Vec::new())
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Text(text.into())))
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Comment(text.into())))
    }

    /// Create a doctype node.
    pub fn create_doctype(
        &mut self,
        name: String,
        public_id: String,
        system_id: String,
    ) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Doctype {
            name,
            public_id,
            system_id,
        }))
    }

    /// Create an empty, detached fragment.
    pub fn create_fragment(&mut self) -> ArenaNodeId {
        self.alloc(ArenaNode::new(ArenaNodeData::Fragment))
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Tree mutation.
impl ArenaDom {
    /// Unlink a node from its parent and siblings. Its own subtree stays
    /// intact.
    pub fn detach(&mut self, id: ArenaNodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if let Some(prev_node) = self.get_mut(prev) {
            prev_node.next_sibling = next;
        } else if let Some(parent_node) = self.get_mut(parent) {
            parent_node.first_child = next;
        }

        if let Some(next_node) = self.get_mut(next) {
            next_node.prev_sibling = prev;
        } else if let Some(parent_node) = self.get_mut(parent) {
            parent_node.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Append a child to a parent node, moving it from wherever it was.
    ///
    /// Appending a fragment moves the fragment's children instead. Appending
    /// an ancestor of `parent` is refused.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        if !self.can_insert(parent, child) {
            return;
        }
        if self.is_fragment(child) {
            for grandchild in self.child_ids(child) {
                self.append(parent, grandchild);
            }
            return;
        }
        self.detach(child);

        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = parent;
            child_node.prev_sibling = last_child;
        }

        if let Some(last_node) = self.get_mut(last_child) {
            last_node.next_sibling = child;
        }

        if let Some(parent_node) = self.get_mut(parent) {
            if parent_node.first_child.is_none() {
                parent_node.first_child = child;
            }
            parent_node.last_child = child;
        }
    }

    /// Insert a node before a sibling, moving it from wherever it was.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        if sibling == new_node {
            return;
        }
        let Some(parent) = self.parent(sibling) else {
            return;
        };
        if !self.can_insert(parent, new_node) {
            return;
        }
        if self.is_fragment(new_node) {
            for child in self.child_ids(new_node) {
                self.insert_before(sibling, child);
            }
            return;
        }
        self.detach(new_node);

        let prev = self
            .get(sibling)
            .map(|n| n.prev_sibling)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(new) = self.get_mut(new_node) {
            new.parent = parent;
            new.prev_sibling = prev;
            new.next_sibling = sibling;
        }

        if let Some(sib) = self.get_mut(sibling) {
            sib.prev_sibling = new_node;
        }

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = new_node;
        } else if let Some(par) = self.get_mut(parent) {
            par.first_child = new_node;
        }
    }

    /// Insert a node right after a sibling.
    pub fn insert_after(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        match self.next_sibling(sibling) {
            Some(next) => self.insert_before(next, new_node),
            None => {
                if let Some(parent) = self.parent(sibling) {
                    self.append(parent, new_node);
                }
            }
        }
    }

    /// Insert a node as `parent`'s child at `index`, or last when `index` is
    /// past the end.
    pub fn insert_at(&mut self, parent: ArenaNodeId, index: usize, new_node: ArenaNodeId) {
        match self.child_at(parent, index) {
            Some(reference) => self.insert_before(reference, new_node),
            None => self.append(parent, new_node),
        }
    }

    /// Insert before `reference` when given, else append to `parent`.
    pub fn insert_or_append(
        &mut self,
        parent: ArenaNodeId,
        reference: Option<ArenaNodeId>,
        new_node: ArenaNodeId,
    ) {
        match reference {
            Some(reference) => self.insert_before(reference, new_node),
            None => self.append(parent, new_node),
        }
    }

    /// Append text to an existing trailing text node, or create a new one.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last_child = self
            .get(parent)
            .map(|n| n.last_child)
            .unwrap_or(ArenaNodeId::NONE);

        if let Some(last) = self.get_mut(last_child)
            && let ArenaNodeData::Text(existing) = &mut last.data
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text);
        self.append(parent, text_node);
    }

    /// Replace an element by its children, in place.
    pub fn replace_with_children(&mut self, id: ArenaNodeId) {
        if self.parent(id).is_none() {
            return;
        }
        for child in self.child_ids(id) {
            self.insert_before(id, child);
        }
        self.detach(id);
    }

    /// Move every child of `from` to the end of `to`.
    pub fn move_children(&mut self, from: ArenaNodeId, to: ArenaNodeId) {
        for child in self.child_ids(from) {
            self.append(to, child);
        }
    }

    /// Detach every child of a node.
    pub fn clear_children(&mut self, id: ArenaNodeId) {
        for child in self.child_ids(id) {
            self.detach(child);
        }
    }

    /// Copy a node. A deep copy includes the whole subtree. The copy is
    /// detached.
    pub fn clone_node(&mut self, id: ArenaNodeId, deep: bool) -> ArenaNodeId {
        let Some(data) = self.get(id).map(|n| n.data.clone()) else {
            return ArenaNodeId::NONE;
        };
        let copy = self.alloc(ArenaNode::new(data));
        if deep {
            for child in self.child_ids(id) {
                let child_copy = self.clone_node(child, true);
                self.append(copy, child_copy);
            }
        }
        copy
    }

    /// Deep-copy a subtree of another DOM into this one. The copy is
    /// detached.
    pub fn import_node(&mut self, other: &ArenaDom, id: ArenaNodeId) -> ArenaNodeId {
        let Some(data) = other.get(id).map(|n| n.data.clone()) else {
            return ArenaNodeId::NONE;
        };
        let copy = self.alloc(ArenaNode::new(data));
        for child in other.children(id) {
            let child_copy = self.import_node(other, child);
            self.append(copy, child_copy);
        }
        copy
    }

    /// Merge adjacent text nodes and drop empty ones, recursively.
    pub fn normalize(&mut self, id: ArenaNodeId) {
        let mut cursor = self.first_child(id);
        while let Some(child) = cursor {
            let mut next = self.next_sibling(child);
            match self.text(child).map(str::is_empty) {
                Some(true) => self.detach(child),
                Some(false) => {
                    while let Some(sibling) = next
                        && let Some(extra) = self.text(sibling).map(str::to_string)
                    {
                        next = self.next_sibling(sibling);
                        self.push_text(child, &extra);
                        self.detach(sibling);
                    }
                }
                None => self.normalize(child),
            }
            cursor = next;
        }
    }

    fn can_insert(&self, parent: ArenaNodeId, child: ArenaNodeId) -> bool {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return false;
        }
        if self.is_inclusive_ancestor(child, parent) {
            log::warn!("refusing to insert {child:?} under its own descendant {parent:?}");
            return false;
        }
        true
    }
}

/// Navigation.
impl ArenaDom {
    pub fn parent(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).and_then(|n| n.parent.to_option())
    }

    pub fn first_child(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).and_then(|n| n.first_child.to_option())
    }

    pub fn last_child(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).and_then(|n| n.last_child.to_option())
    }

    pub fn next_sibling(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).and_then(|n| n.next_sibling.to_option())
    }

    pub fn prev_sibling(&self, id: ArenaNodeId) -> Option<ArenaNodeId> {
        self.get(id).and_then(|n| n.prev_sibling.to_option())
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        let first = self
            .get(parent)
            .map(|n| n.first_child)
            .unwrap_or(ArenaNodeId::NONE);
        ChildrenIter {
            dom: self,
            current: first,
        }
    }

    /// Snapshot of a node's children, safe to hold across mutation.
    pub fn child_ids(&self, parent: ArenaNodeId) -> Vec<ArenaNodeId> {
        self.children(parent).collect()
    }

    /// Element children only.
    pub fn element_children(&self, parent: ArenaNodeId) -> Vec<ArenaNodeId> {
        self.children(parent).filter(|&c| self.is_element(c)).collect()
    }

    pub fn child_count(&self, parent: ArenaNodeId) -> usize {
        self.children(parent).count()
    }

    pub fn child_at(&self, parent: ArenaNodeId, index: usize) -> Option<ArenaNodeId> {
        self.children(parent).nth(index)
    }

    /// Position of a node among its siblings (0 for detached nodes).
    pub fn index_of(&self, id: ArenaNodeId) -> usize {
        let mut index = 0;
        let mut cursor = self.prev_sibling(id);
        while let Some(prev) = cursor {
            index += 1;
            cursor = self.prev_sibling(prev);
        }
        index
    }

    /// Ancestors from the parent up to the document (or the detached root).
    pub fn ancestors(&self, id: ArenaNodeId) -> AncestorsIter<'_> {
        AncestorsIter {
            dom: self,
            current: self.parent(id),
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: ArenaNodeId, node: ArenaNodeId) -> bool {
        ancestor == node || self.ancestors(node).any(|a| a == ancestor)
    }

    /// All descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: ArenaNodeId) -> Vec<ArenaNodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<ArenaNodeId> = self.child_ids(root);
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children = self.child_ids(id);
            children.reverse();
            stack.extend(children);
        }
        out
    }

    /// Find the first node matching a predicate (document order).
    pub fn find<F>(&self, predicate: F) -> Option<ArenaNodeId>
    where
        F: Fn(&ArenaNode) -> bool,
    {
        let mut stack = vec![self.document];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                if predicate(node) {
                    return Some(id);
                }
                let mut children: Vec<_> = self.children(id).collect();
                children.reverse();
                stack.extend(children);
            }
        }
        None
    }

    /// Find element by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.find(|node| {
            matches!(&node.data, ArenaNodeData::Element { name, .. }
                if name.local.as_ref().eq_ignore_ascii_case(tag))
        })
    }

    /// Descendant elements of `root` with the given tag, in document order.
    pub fn elements_by_tag(&self, root: ArenaNodeId, tag: &str) -> Vec<ArenaNodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.tag_is(id, tag))
            .collect()
    }
}

/// Iterator over children of a node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    current: ArenaNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }
        let id = self.current;
        self.current = self
            .dom
            .get(id)
            .map(|n| n.next_sibling)
            .unwrap_or(ArenaNodeId::NONE);
        Some(id)
    }
}

/// Iterator over the ancestors of a node, nearest first.
pub struct AncestorsIter<'a> {
    dom: &'a ArenaDom,
    current: Option<ArenaNodeId>,
}

impl Iterator for AncestorsIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.dom.parent(id);
        Some(id)
    }
}

/// Character data.
impl ArenaDom {
    /// Data of a text node.
    pub fn text(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Data of a text or comment node.
    pub fn char_data(&self, id: ArenaNodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Text(s) | ArenaNodeData::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Replace the data of a text or comment node.
    pub fn set_text(&mut self, id: ArenaNodeId, value: impl Into<String>) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Text(data) | ArenaNodeData::Comment(data) = &mut node.data
        {
            *data = value.into();
        }
    }

    fn push_text(&mut self, id: ArenaNodeId, extra: &str) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Text(data) = &mut node.data
        {
            data.push_str(extra);
        }
    }

    /// Chars `[start, end)` of a text or comment node.
    pub fn substring_data(&self, id: ArenaNodeId, start: usize, end: usize) -> String {
        self.char_data(id)
            .map(|s| s[byte_offset(s, start)..byte_offset(s, end.max(start))].to_string())
            .unwrap_or_default()
    }

    /// Delete chars `[start, end)` of a text or comment node.
    pub fn delete_data(&mut self, id: ArenaNodeId, start: usize, end: usize) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Text(data) | ArenaNodeData::Comment(data) = &mut node.data
        {
            let from = byte_offset(data, start);
            let to = byte_offset(data, end.max(start));
            data.replace_range(from..to, "");
        }
    }

    /// Split a text node at a char offset. The original keeps the head; the
    /// tail becomes a new text node inserted right after it, which is
    /// returned.
    pub fn split_text(&mut self, id: ArenaNodeId, offset: usize) -> Option<ArenaNodeId> {
        let tail = {
            let data = self.text(id)?;
            data[byte_offset(data, offset)..].to_string()
        };
        let head_len = offset.min(self.node_length(id));
        self.delete_data(id, head_len, usize::MAX);
        let tail_node = self.create_text(tail);
        if self.parent(id).is_some() {
            self.insert_after(id, tail_node);
        }
        Some(tail_node)
    }

    /// Concatenated data of every descendant text node.
    pub fn text_content(&self, id: ArenaNodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ArenaNodeId, out: &mut String) {
        match self.get(id).map(|n| &n.data) {
            Some(ArenaNodeData::Text(s)) => out.push_str(s),
            Some(ArenaNodeData::Comment(_)) | None => {}
            Some(_) => {
                for child in self.children(id) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Number of chars of visible text in a subtree.
    pub fn text_len(&self, id: ArenaNodeId) -> usize {
        match self.get(id).map(|n| &n.data) {
            Some(ArenaNodeData::Text(s)) => char_len(s),
            Some(ArenaNodeData::Comment(_)) | None => 0,
            Some(_) => self.children(id).map(|c| self.text_len(c)).sum(),
        }
    }

    /// Boundary-point length: chars for character data, child count
    /// otherwise.
    pub fn node_length(&self, id: ArenaNodeId) -> usize {
        match self.char_data(id) {
            Some(data) => char_len(data),
            None => self.child_count(id),
        }
    }
}

/// Node kinds and element data.
impl ArenaDom {
    /// Check if node is an element.
    pub fn is_element(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Element { .. }))
    }

    /// Check if node is a text node.
    pub fn is_text(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Text(_)))
    }

    /// Text or comment.
    pub fn is_character_data(&self, id: ArenaNodeId) -> bool {
        self.char_data(id).is_some()
    }

    pub fn is_fragment(&self, id: ArenaNodeId) -> bool {
        self.get(id)
            .is_some_and(|n| matches!(n.data, ArenaNodeData::Fragment))
    }

    /// Get element's local name (tag).
    pub fn element_name(&self, id: ArenaNodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Get element's namespace.
    pub fn element_namespace(&self, id: ArenaNodeId) -> Option<&Namespace> {
        self.get(id).and_then(|n| match &n.data {
            ArenaNodeData::Element { name, .. } => Some(&name.ns),
            _ => None,
        })
    }

    /// Whether the node is an element with this tag (ASCII case-insensitive).
    pub fn tag_is(&self, id: ArenaNodeId, tag: &str) -> bool {
        self.element_name(id)
            .is_some_and(|name| name.as_ref().eq_ignore_ascii_case(tag))
    }

    /// Element attributes (empty for other nodes).
    pub fn attrs(&self, id: ArenaNodeId) -> &[Attribute] {
        self.get(id)
            .and_then(|n| match &n.data {
                ArenaNodeData::Element { attrs, .. } => Some(attrs.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: ArenaNodeId, attr_name: &str) -> Option<&str> {
        self.attrs(id)
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, id: ArenaNodeId, attr_name: &str, value: &str) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Element { attrs, .. } = &mut node.data
        {
            match attrs.iter_mut().find(|a| a.name.local.as_ref() == attr_name) {
                Some(attr) => attr.value = value.to_string(),
                None => attrs.push(Attribute::new(attr_name, value)),
            }
        }
    }

    pub fn remove_attr(&mut self, id: ArenaNodeId, attr_name: &str) {
        if let Some(node) = self.get_mut(id)
            && let ArenaNodeData::Element { attrs, .. } = &mut node.data
        {
            attrs.retain(|a| a.name.local.as_ref() != attr_name);
        }
    }

    /// Get element's id attribute.
    pub fn element_id(&self, id: ArenaNodeId) -> Option<&str> {
        self.get_attr(id, "id")
    }

    /// Get element's classes.
    pub fn element_classes(&self, id: ArenaNodeId) -> Vec<&str> {
        self.get_attr(id, "class")
            .map(|value| value.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: ArenaNodeId, class: &str) -> bool {
        self.element_classes(id).contains(&class)
    }

    pub fn add_class(&mut self, id: ArenaNodeId, class: &str) {
        if !self.is_element(id) || class.is_empty() || self.has_class(id, class) {
            return;
        }
        let mut classes = self.element_classes(id).join(" ");
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self.set_attr(id, "class", &classes);
    }

    /// Remove a class. The `class` attribute itself stays, possibly empty.
    pub fn remove_class(&mut self, id: ArenaNodeId, class: &str) {
        if !self.has_class(id, class) {
            return;
        }
        let remaining: Vec<&str> = self
            .element_classes(id)
            .into_iter()
            .filter(|c| *c != class)
            .collect();
        let remaining = remaining.join(" ");
        self.set_attr(id, "class", &remaining);
    }

    /// An element of this tag carrying no attributes at all (and so no
    /// classes). Only bare elements are interchangeable when merging.
    pub fn is_bare_element(&self, id: ArenaNodeId, tag: &str) -> bool {
        self.tag_is(id, tag) && self.attrs(id).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_qname(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    /// `<p>` holding the given children, attached to the document.
    fn paragraph(dom: &mut ArenaDom) -> ArenaNodeId {
        let p = dom.create_element(make_qname("p"), vec![]);
        dom.append(dom.document(), p);
        p
    }

    #[test]
    fn test_create_elements() {
        let mut dom = ArenaDom::new();

        let div = dom.create_element(make_qname("div"), vec![Attribute::new("id", "main")]);
        dom.append(dom.document(), div);

        assert_eq!(dom.element_name(div).unwrap().as_ref(), "div");
        assert_eq!(dom.element_id(div), Some("main"));
        assert_eq!(dom.find_by_tag("div"), Some(div));
    }

    #[test]
    fn test_append_children() {
        let mut dom = ArenaDom::new();

        let parent = dom.create_element(make_qname("div"), vec![]);
        let child1 = dom.create_element(make_qname("p"), vec![]);
        let child2 = dom.create_element(make_qname("p"), vec![]);

        dom.append(dom.document(), parent);
        dom.append(parent, child1);
        dom.append(parent, child2);

        assert_eq!(dom.child_ids(parent), vec![child1, child2]);
        assert_eq!(dom.index_of(child2), 1);
        assert_eq!(dom.parent(child1), Some(parent));
    }

    #[test]
    fn test_append_moves_node() {
        let mut dom = ArenaDom::new();
        let a = paragraph(&mut dom);
        let b = paragraph(&mut dom);
        let text = dom.create_text("x");
        dom.append(a, text);
        dom.append(b, text);

        assert_eq!(dom.child_count(a), 0);
        assert_eq!(dom.child_ids(b), vec![text]);
    }

    #[test]
    fn test_refuses_cycle() {
        let mut dom = ArenaDom::new();
        let outer = paragraph(&mut dom);
        let inner = dom.create_html_element("span");
        dom.append(outer, inner);
        dom.append(inner, outer);

        assert_eq!(dom.parent(inner), Some(outer));
        assert_eq!(dom.parent(outer), Some(dom.document()));
    }

    #[test]
    fn test_fragment_insertion_moves_children() {
        let mut dom = ArenaDom::new();
        let p = paragraph(&mut dom);
        let tail = dom.create_text("c");
        dom.append(p, tail);

        let fragment = dom.create_fragment();
        let a = dom.create_text("a");
        let b = dom.create_html_element("br");
        dom.append(fragment, a);
        dom.append(fragment, b);
        dom.insert_before(tail, fragment);

        assert_eq!(dom.child_ids(p), vec![a, b, tail]);
        assert_eq!(dom.child_count(fragment), 0);
    }

    #[test]
    fn test_text_merging() {
        let mut dom = ArenaDom::new();
        let p = paragraph(&mut dom);

        dom.append_text(p, "Hello, ");
        dom.append_text(p, "World!");

        let children = dom.child_ids(p);
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text(children[0]), Some("Hello, World!"));
    }

    #[test]
    fn test_normalize() {
        let mut dom = ArenaDom::new();
        let p = paragraph(&mut dom);
        for piece in ["a", "", "b"] {
            let t = dom.create_text(piece);
            dom.append(p, t);
        }
        let em = dom.create_html_element("em");
        dom.append(p, em);
        let empty = dom.create_text("");
        dom.append(em, empty);

        dom.normalize(p);

        let children = dom.child_ids(p);
        assert_eq!(children.len(), 2);
        assert_eq!(dom.text(children[0]), Some("ab"));
        assert_eq!(dom.child_count(em), 0);
    }

    #[test]
    fn test_split_text_uses_char_offsets() {
        let mut dom = ArenaDom::new();
        let p = paragraph(&mut dom);
        let text = dom.create_text("héllo");
        dom.append(p, text);

        let tail = dom.split_text(text, 2).unwrap();
        assert_eq!(dom.text(text), Some("hé"));
        assert_eq!(dom.text(tail), Some("llo"));
        assert_eq!(dom.next_sibling(text), Some(tail));
        assert_eq!(dom.text_len(p), 5);
    }

    #[test]
    fn test_replace_with_children() {
        let mut dom = ArenaDom::new();
        let p = paragraph(&mut dom);
        let b = dom.create_html_element("b");
        dom.append(p, b);
        let x = dom.create_text("x");
        let y = dom.create_text("y");
        dom.append(b, x);
        dom.append(b, y);

        dom.replace_with_children(b);

        assert_eq!(dom.child_ids(p), vec![x, y]);
        assert_eq!(dom.parent(b), None);
    }

    #[test]
    fn test_clone_and_import() {
        let mut src = ArenaDom::new();
        let p = paragraph(&mut src);
        src.set_attr(p, "class", "lead");
        src.append_text(p, "hi");

        let shallow = src.clone_node(p, false);
        assert_eq!(src.child_count(shallow), 0);
        assert!(src.has_class(shallow, "lead"));

        let mut dst = ArenaDom::new();
        let copy = dst.import_node(&src, p);
        assert_eq!(dst.text_content(copy), "hi");
        assert_eq!(dst.parent(copy), None);
    }

    #[test]
    fn test_classes_and_bare_elements() {
        let mut dom = ArenaDom::new();
        let strong = dom.create_html_element("STRONG");
        assert!(dom.is_bare_element(strong, "strong"));

        dom.add_class(strong, "x");
        dom.add_class(strong, "y");
        assert_eq!(dom.get_attr(strong, "class"), Some("x y"));
        assert!(!dom.is_bare_element(strong, "strong"));

        dom.remove_class(strong, "x");
        assert_eq!(dom.element_classes(strong), vec!["y"]);
        dom.remove_attr(strong, "class");
        assert!(dom.is_bare_element(strong, "strong"));
    }
}
