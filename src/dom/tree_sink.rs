//! html5ever TreeSink implementation for ArenaDom, plus the parse entry
//! points built on it.

use std::cell::RefCell;

use html5ever::driver::ParseOpts;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, LocalName, Namespace, QualName, parse_document};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId, Attribute};

/// Handle used by TreeSink to reference nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub ArenaNodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(ArenaNodeId::NONE)
    }
}

/// Element name handed back to the tree builder. Owned, since the arena sits
/// behind a `RefCell` and cannot lend out references.
#[derive(Debug, Clone)]
pub struct OwnedElemName(QualName);

impl ElemName for OwnedElemName {
    fn ns(&self) -> &Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// TreeSink implementation that builds an ArenaDom.
///
/// Uses interior mutability (RefCell) because html5ever's TreeSink trait
/// requires methods to take `&self` but we need to mutate the DOM.
pub struct ArenaSink {
    dom: RefCell<ArenaDom>,
    quirks_mode: RefCell<QuirksMode>,
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
            quirks_mode: RefCell::new(QuirksMode::NoQuirks),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> ArenaDom {
        self.dom.into_inner()
    }

    fn append_child(dom: &mut ArenaDom, parent: ArenaNodeId, child: NodeOrText<NodeHandle>) {
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = OwnedElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        log::trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.data) {
            Some(ArenaNodeData::Element { name, .. }) => OwnedElemName(name.clone()),
            _ => OwnedElemName(QualName::new(None, html5ever::ns!(), LocalName::from(""))),
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let converted_attrs: Vec<Attribute> = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();

        NodeHandle(self.dom.borrow_mut().create_element(name, converted_attrs))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(data.to_string()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        Self::append_child(&mut self.dom.borrow_mut(), parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self.dom.borrow().parent(element.0);
        match parent {
            Some(parent) => Self::append_child(&mut self.dom.borrow_mut(), parent, child),
            None => self.append(prev_element, child),
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let mut dom = self.dom.borrow_mut();
        let doc = dom.document();
        let doctype = dom.create_doctype(
            name.to_string(),
            public_id.to_string(),
            system_id.to_string(),
        );
        dom.append(doc, doctype);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template content is kept inline under the template element.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        *self.quirks_mode.borrow_mut() = mode;
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => dom.insert_before(sibling.0, node.0),
            NodeOrText::AppendText(text) => {
                let text_node = dom.create_text(text.to_string());
                dom.insert_before(sibling.0, text_node);
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let mut dom = self.dom.borrow_mut();
        if let Some(node) = dom.get_mut(target.0)
            && let ArenaNodeData::Element {
                attrs: existing, ..
            } = &mut node.data
        {
            for attr in attrs {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(Attribute {
                        name: attr.name,
                        value: attr.value.to_string(),
                    });
                }
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.dom.borrow_mut().move_children(node.0, new_parent.0);
    }
}

/// Parse a complete HTML document.
pub fn parse_document_str(html: &str) -> ArenaDom {
    parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse an HTML fragment the way `innerHTML` on `<body>` would. Returns the
/// DOM and its `<body>` element, which holds the fragment's nodes.
pub fn parse_fragment_str(html: &str) -> (ArenaDom, ArenaNodeId) {
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    let dom = parse_document_str(&wrapped);
    let body = dom.body().unwrap_or(dom.document());
    (dom, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parse() {
        let dom = parse_document_str("<html><body><p>Hello</p></body></html>");

        // document + html + head + body + p + text
        assert!(dom.len() > 3);

        let p = dom.find_by_tag("p").expect("should find p");
        assert_eq!(dom.element_name(p).unwrap().as_ref(), "p");

        let text_id = dom.children(p).next().expect("p should have child");
        assert_eq!(dom.text(text_id), Some("Hello"));
    }

    #[test]
    fn test_attributes() {
        let (dom, _) =
            parse_fragment_str(r#"<span id="main" class="note strong">Content</span>"#);

        let span = dom.find_by_tag("span").expect("should find span");
        assert_eq!(dom.element_id(span), Some("main"));
        assert_eq!(dom.element_classes(span), vec!["note", "strong"]);
        assert!(!dom.is_bare_element(span, "span"));
    }

    #[test]
    fn test_fragment_lands_in_body() {
        let (dom, body) = parse_fragment_str("This is <strong>some text</strong>.");

        assert_eq!(dom.child_count(body), 3);
        assert_eq!(dom.text_content(body), "This is some text.");
    }

    #[test]
    fn test_misnested_formatting_is_repaired() {
        // The adoption agency algorithm reparents children.
        let (dom, body) = parse_fragment_str("<b>one<p>two</b>three</p>");

        assert_eq!(dom.text_content(body), "onetwothree");
        assert_eq!(dom.elements_by_tag(body, "b").len(), 2);
    }
}
