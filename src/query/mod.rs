//! Chainable element collection over an [`ArenaDom`].
//!
//! [`HtmlQuery`] holds a set of nodes and a mutable borrow of the tree.
//! Every mutation consumes and returns the query, so edits chain:
//!
//! ```
//! use inlay::dom::parse_fragment_str;
//! use inlay::query::{Content, HtmlQuery, Source};
//!
//! let (mut dom, body) = parse_fragment_str("<p>one</p><p>two</p>");
//! let query = HtmlQuery::new(&mut dom, Source::Selector("p"))
//!     .unwrap()
//!     .add_class("para")
//!     .append(Content::Markup("<b>!</b>"))
//!     .unwrap();
//! assert_eq!(query.len(), 2);
//! assert_eq!(
//!     dom.inner_html(body),
//!     r#"<p class="para">one<b>!</b></p><p class="para">two<b>!</b></p>"#
//! );
//! ```
//!
//! The formatting entry points act on a selection: either one passed to the
//! call or the default set with [`HtmlQuery::with_selection`]. Without
//! either they are skipped, which [`HtmlQuery::last_outcome`] reports.

use crate::config::FormatConfig;
use crate::dom::{ArenaDom, ArenaNodeId, compile_selector, matches, parse_fragment_str, select_all};
use crate::error::Result;
use crate::format::{self, FormatOutcome, SkipReason, Wrapper};
use crate::normalize;
use crate::selection::Selection;

/// Where a collection's nodes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source<'a> {
    /// CSS selector, matched below the query's context.
    Selector(&'a str),
    Node(ArenaNodeId),
    Nodes(Vec<ArenaNodeId>),
    Empty,
}

/// Content inserted by [`HtmlQuery::append`], [`HtmlQuery::after`] and
/// [`HtmlQuery::before`]. It is deep-copied for every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    /// HTML markup, parsed as a fragment after trimming.
    Markup(&'a str),
    Node(ArenaNodeId),
    Nodes(Vec<ArenaNodeId>),
    /// CSS selector, matched below the query's context.
    Selector(&'a str),
}

/// A collection of nodes in a borrowed tree.
pub struct HtmlQuery<'d> {
    dom: &'d mut ArenaDom,
    context: ArenaNodeId,
    elements: Vec<ArenaNodeId>,
    prev_elements: Vec<ArenaNodeId>,
    selection: Option<&'d mut dyn Selection>,
    config: FormatConfig,
    last_outcome: Option<FormatOutcome>,
}

impl<'d> HtmlQuery<'d> {
    /// Build a collection. The context is `<body>` when the document has
    /// one, else the document itself.
    pub fn new(dom: &'d mut ArenaDom, source: Source<'_>) -> Result<Self> {
        let context = dom.body().unwrap_or(dom.document());
        let mut query = Self {
            dom,
            context,
            elements: Vec::new(),
            prev_elements: Vec::new(),
            selection: None,
            config: FormatConfig::default(),
            last_outcome: None,
        };
        query.elements = query.resolve(&source)?;
        Ok(query)
    }

    /// Root for selector matching, `unwrap` and the formatting passes.
    pub fn with_context(mut self, context: ArenaNodeId) -> Self {
        self.context = context;
        self
    }

    /// Default selection for the formatting entry points.
    pub fn with_selection(mut self, selection: &'d mut dyn Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn with_config(mut self, config: FormatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn elements(&self) -> &[ArenaNodeId] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn context(&self) -> ArenaNodeId {
        self.context
    }

    pub fn dom(&self) -> &ArenaDom {
        self.dom
    }

    /// Outcome of the most recent formatting call.
    pub fn last_outcome(&self) -> Option<FormatOutcome> {
        self.last_outcome
    }

    fn resolve(&self, source: &Source<'_>) -> Result<Vec<ArenaNodeId>> {
        Ok(match source {
            Source::Selector(selector) => {
                let list = compile_selector(selector)?;
                select_all(self.dom, self.context, &list)
            }
            Source::Node(id) => vec![*id],
            Source::Nodes(ids) => ids.clone(),
            Source::Empty => Vec::new(),
        })
    }

    /// Detached template nodes for `content`.
    fn content_nodes(&mut self, content: &Content<'_>) -> Result<Vec<ArenaNodeId>> {
        Ok(match content {
            Content::Markup(markup) => {
                let (parsed, body) = parse_fragment_str(markup.trim());
                parsed
                    .children(body)
                    .map(|child| self.dom.import_node(&parsed, child))
                    .collect()
            }
            Content::Node(id) => vec![*id],
            Content::Nodes(ids) => ids.clone(),
            Content::Selector(selector) => self.resolve(&Source::Selector(*selector))?,
        })
    }

    fn replace_elements(mut self, elements: Vec<ArenaNodeId>) -> Self {
        self.prev_elements = std::mem::replace(&mut self.elements, elements);
        self
    }
}

/// Collection and attribute operations.
impl HtmlQuery<'_> {
    /// Call `f(dom, index, node)` for every node.
    pub fn each<F>(self, mut f: F) -> Self
    where
        F: FnMut(&mut ArenaDom, usize, ArenaNodeId),
    {
        for (index, &node) in self.elements.iter().enumerate() {
            f(&mut *self.dom, index, node);
        }
        self
    }

    pub fn add_class(self, class: &str) -> Self {
        self.each(|dom, _, node| dom.add_class(node, class))
    }

    pub fn remove_class(self, class: &str) -> Self {
        self.each(|dom, _, node| dom.remove_class(node, class))
    }

    /// Whether any element has the class.
    pub fn has_class(&self, class: &str) -> bool {
        self.elements.iter().any(|&node| self.dom.has_class(node, class))
    }

    /// Attribute of the first element.
    pub fn attr(&self, name: &str) -> Option<&str> {
        let first = *self.elements.first()?;
        self.dom.get_attr(first, name)
    }

    pub fn set_attr(self, name: &str, value: &str) -> Self {
        self.each(|dom, _, node| dom.set_attr(node, name, value))
    }

    pub fn remove_attr(self, name: &str) -> Self {
        self.each(|dom, _, node| dom.remove_attr(node, name))
    }

    /// Inner HTML of the first element.
    pub fn html(&self) -> Option<String> {
        let first = *self.elements.first()?;
        Some(self.dom.inner_html(first))
    }

    /// Replace every element's content with parsed markup.
    pub fn set_html(self, html: &str) -> Self {
        let (parsed, body) = parse_fragment_str(html);
        self.each(|dom, _, node| {
            dom.clear_children(node);
            for child in parsed.children(body) {
                let copy = dom.import_node(&parsed, child);
                dom.append(node, copy);
            }
        })
    }

    /// Add nodes to the collection, keeping the first occurrence of each.
    pub fn add(mut self, source: Source<'_>) -> Result<Self> {
        let extra = self.resolve(&source)?;
        self.elements.extend(extra);
        self.elements = unique(std::mem::take(&mut self.elements));
        Ok(self)
    }

    /// Add back the collection this one was derived from.
    pub fn and_self(mut self) -> Self {
        let previous = std::mem::take(&mut self.prev_elements);
        self.elements.extend(previous);
        self.elements = unique(std::mem::take(&mut self.elements));
        self
    }

    /// Distinct parents.
    pub fn parent(self) -> Self {
        let parents = unique(
            self.elements
                .iter()
                .filter_map(|&node| self.dom.parent(node))
                .collect(),
        );
        self.replace_elements(parents)
    }

    /// Element children.
    pub fn children(self) -> Self {
        let children = self
            .elements
            .iter()
            .flat_map(|&node| self.dom.element_children(node))
            .collect();
        self.replace_elements(children)
    }

    /// All child nodes, text and comments included.
    pub fn contents(self) -> Self {
        let contents = self
            .elements
            .iter()
            .flat_map(|&node| self.dom.child_ids(node))
            .collect();
        self.replace_elements(contents)
    }

    /// Detached deep copies of the nodes.
    pub fn clone_nodes(mut self) -> Self {
        let copies = self
            .elements
            .iter()
            .map(|&node| self.dom.clone_node(node, true))
            .collect();
        self.elements = copies;
        self.prev_elements.clear();
        self
    }

    /// For each node, the nearest inclusive element ancestor matching
    /// `selector`.
    pub fn closest(mut self, selector: &str) -> Result<Self> {
        let list = compile_selector(selector)?;
        let found = unique(
            self.elements
                .iter()
                .filter_map(|&node| {
                    std::iter::once(node)
                        .chain(self.dom.ancestors(node))
                        .find(|&ancestor| matches(self.dom, ancestor, &list))
                })
                .collect(),
        );
        self.elements = found;
        self.prev_elements.clear();
        Ok(self)
    }
}

/// Insertion and wrapping.
impl HtmlQuery<'_> {
    /// Append a copy of `content` to every element.
    pub fn append(mut self, content: Content<'_>) -> Result<Self> {
        let nodes = self.content_nodes(&content)?;
        Ok(self.each(|dom, _, target| {
            for &node in &nodes {
                let copy = dom.clone_node(node, true);
                dom.append(target, copy);
            }
        }))
    }

    /// Append a copy of every node to each target.
    pub fn append_to(self, target: Source<'_>) -> Result<Self> {
        let targets = self.resolve(&target)?;
        Ok(self.each(|dom, _, node| {
            for &target in &targets {
                let copy = dom.clone_node(node, true);
                dom.append(target, copy);
            }
        }))
    }

    /// Insert a copy of `content` after every node.
    pub fn after(mut self, content: Content<'_>) -> Result<Self> {
        let nodes = self.content_nodes(&content)?;
        Ok(self.each(|dom, _, target| {
            let Some(parent) = dom.parent(target) else {
                return;
            };
            let next = dom.next_sibling(target);
            for &node in &nodes {
                let copy = dom.clone_node(node, true);
                dom.insert_or_append(parent, next, copy);
            }
        }))
    }

    /// Insert a copy of `content` before every node.
    pub fn before(mut self, content: Content<'_>) -> Result<Self> {
        let nodes = self.content_nodes(&content)?;
        Ok(self.each(|dom, _, target| {
            for &node in &nodes {
                let copy = dom.clone_node(node, true);
                dom.insert_before(target, copy);
            }
        }))
    }

    /// Wrap every node in its own copy of `wrapper`.
    pub fn wrap(self, wrapper: Wrapper<'_>) -> Result<Self> {
        let template = wrapper.build(self.dom)?;
        Ok(self.each(|dom, _, node| {
            if dom.parent(node).is_none() {
                return;
            }
            let copy = dom.clone_node(template, true);
            dom.insert_before(node, copy);
            dom.append(copy, node);
        }))
    }

    /// Move all nodes into one `wrapper`, placed where the first node was.
    pub fn wrap_all(self, wrapper: Wrapper<'_>) -> Result<Self> {
        let Some(&first) = self.elements.first() else {
            return Ok(self);
        };
        let element = wrapper.build(self.dom)?;
        self.dom.insert_before(first, element);
        Ok(self.each(|dom, _, node| dom.append(element, node)))
    }

    /// Wrap the content of every element in a copy of `wrapper`.
    pub fn wrap_inner(self, wrapper: Wrapper<'_>) -> Result<Self> {
        let template = wrapper.build(self.dom)?;
        Ok(self.each(|dom, _, node| {
            let contents = dom.child_ids(node);
            let copy = dom.clone_node(template, true);
            dom.append(node, copy);
            for child in contents {
                dom.append(copy, child);
            }
        }))
    }

    /// Move every node out of its parent, removing parents left empty. The
    /// context is never unwrapped.
    pub fn unwrap(self) -> Self {
        let context = self.context;
        self.each(|dom, _, node| {
            let Some(parent) = dom.parent(node) else {
                return;
            };
            if parent == context || dom.parent(parent).is_none() || !dom.is_element(parent) {
                return;
            }
            dom.insert_before(parent, node);
            if dom.first_child(parent).is_none() {
                dom.detach(parent);
            }
        })
    }
}

/// Selection-based formatting. A `selection` argument overrides the default
/// selection for that call.
impl HtmlQuery<'_> {
    fn run<F>(mut self, operation: &str, selection: Option<&mut dyn Selection>, op: F) -> Self
    where
        F: FnOnce(&mut ArenaDom, ArenaNodeId, &mut dyn Selection) -> FormatOutcome,
    {
        let context = self.context;
        let outcome = match selection {
            Some(selection) => op(&mut *self.dom, context, selection),
            None => match self.selection.as_deref_mut() {
                Some(selection) => op(&mut *self.dom, context, selection),
                None => format::skipped(operation, SkipReason::NoActiveSelection),
            },
        };
        self.last_outcome = Some(outcome);
        self
    }

    /// See [`format::wrap_selection`].
    pub fn wrap_selection(
        mut self,
        wrapper: Wrapper<'_>,
        selection: Option<&mut dyn Selection>,
    ) -> Result<Self> {
        let outcome = match selection {
            Some(selection) => format::wrap_selection(self.dom, &wrapper, selection)?,
            None => match self.selection.as_deref_mut() {
                Some(selection) => format::wrap_selection(self.dom, &wrapper, selection)?,
                None => format::skipped("wrap_selection", SkipReason::NoActiveSelection),
            },
        };
        self.last_outcome = Some(outcome);
        Ok(self)
    }

    /// See [`format::toggle_format`].
    pub fn toggle_format(self, tag: &str, selection: Option<&mut dyn Selection>) -> Self {
        self.run("toggle_format", selection, |dom, root, selection| {
            format::toggle_format(dom, root, tag, selection)
        })
    }

    /// See [`format::unwrap_selection`].
    pub fn unwrap_selection(self, tag: &str, selection: Option<&mut dyn Selection>) -> Self {
        self.run("unwrap_selection", selection, |dom, root, selection| {
            format::unwrap_selection(dom, root, tag, selection)
        })
    }

    /// See [`format::apply_style`].
    pub fn apply_style(
        self,
        styles: &[(&str, &str)],
        selection: Option<&mut dyn Selection>,
    ) -> Self {
        self.run("apply_style", selection, |dom, _, selection| {
            format::apply_style(dom, styles, selection)
        })
    }

    /// See [`format::remove_style`].
    pub fn remove_style(self, properties: &[&str], selection: Option<&mut dyn Selection>) -> Self {
        self.run("remove_style", selection, |dom, _, selection| {
            format::remove_style(dom, properties, selection)
        })
    }

    /// See [`format::clear_formatting`].
    pub fn clear_formatting(self, selection: Option<&mut dyn Selection>) -> Self {
        self.run("clear_formatting", selection, format::clear_formatting)
    }

    /// Remove empty `tag` elements below the context.
    pub fn remove_empty_formatting_elements(self, tag: &str) -> Self {
        normalize::remove_empty_formatting_elements(self.dom, tag, self.context);
        self
    }

    /// Merge nested and adjacent bare `tags` elements below the context.
    pub fn simplify_nested_tags(self, tags: &[&str]) -> Self {
        normalize::simplify_nested_tags(self.dom, tags, self.context);
        self
    }

    /// [`simplify_nested_tags`](Self::simplify_nested_tags) over the
    /// configured formatting tags.
    pub fn simplify_all_formatting_tags(self) -> Self {
        normalize::simplify_all_formatting_tags(self.dom, self.context, &self.config);
        self
    }
}

fn unique(nodes: Vec<ArenaNodeId>) -> Vec<ArenaNodeId> {
    let mut seen = std::collections::HashSet::new();
    nodes.into_iter().filter(|node| seen.insert(*node)).collect()
}
