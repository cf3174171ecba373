//! HTML serialization of arena nodes through html5ever's serializer.
//!
//! Output matches what a browser gives for `innerHTML`/`outerHTML`: text is
//! escaped per the HTML fragment serialization algorithm and void elements
//! get no end tag.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, ArenaNodeData, ArenaNodeId};

/// A node paired with its arena so html5ever can walk it.
pub struct SerializableNode<'a> {
    dom: &'a ArenaDom,
    id: ArenaNodeId,
}

impl<'a> SerializableNode<'a> {
    pub fn new(dom: &'a ArenaDom, id: ArenaNodeId) -> Self {
        Self { dom, id }
    }

    fn serialize_children<S: Serializer>(&self, serializer: &mut S) -> io::Result<()> {
        for child in self.dom.children(self.id) {
            SerializableNode::new(self.dom, child).serialize(serializer, TraversalScope::IncludeNode)?;
        }
        Ok(())
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let Some(node) = self.dom.get(self.id) else {
            return Ok(());
        };
        if let TraversalScope::ChildrenOnly(_) = traversal_scope {
            return self.serialize_children(serializer);
        }
        match &node.data {
            ArenaNodeData::Element { name, attrs } => {
                serializer.start_elem(
                    name.clone(),
                    attrs.iter().map(|a| (&a.name, a.value.as_str())),
                )?;
                self.serialize_children(serializer)?;
                serializer.end_elem(name.clone())
            }
            ArenaNodeData::Text(text) => serializer.write_text(text),
            ArenaNodeData::Comment(text) => serializer.write_comment(text),
            ArenaNodeData::Doctype { name, .. } => serializer.write_doctype(name),
            ArenaNodeData::Document | ArenaNodeData::Fragment => self.serialize_children(serializer),
        }
    }
}

impl ArenaDom {
    /// Markup of a node's children.
    pub fn inner_html(&self, id: ArenaNodeId) -> String {
        self.serialize_with(id, TraversalScope::ChildrenOnly(None))
    }

    /// Markup of a node including itself.
    pub fn outer_html(&self, id: ArenaNodeId) -> String {
        self.serialize_with(id, TraversalScope::IncludeNode)
    }

    fn serialize_with(&self, id: ArenaNodeId, traversal_scope: TraversalScope) -> String {
        let mut bytes = Vec::new();
        let opts = SerializeOpts {
            traversal_scope,
            ..Default::default()
        };
        if let Err(err) = serialize(&mut bytes, &SerializableNode::new(self, id), opts) {
            log::warn!("failed to serialize node {id:?}: {err}");
        }
        String::from_utf8(bytes).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_fragment_str;

    #[test]
    fn test_inner_html_round_trip() {
        let source = r#"This is <strong class="x">some &amp; text</strong>.<br><!--c-->"#;
        let (dom, body) = parse_fragment_str(source);

        assert_eq!(dom.inner_html(body), source);
    }

    #[test]
    fn test_outer_html() {
        let (dom, _) = parse_fragment_str("<em>a &lt; b</em>");
        let em = dom.find_by_tag("em").unwrap();

        assert_eq!(dom.outer_html(em), "<em>a &lt; b</em>");
    }

    #[test]
    fn test_created_nodes_serialize() {
        let (mut dom, body) = parse_fragment_str("");
        let u = dom.create_html_element("u");
        dom.append(body, u);
        dom.append_text(u, "<x>");
        dom.set_attr(u, "title", "a\"b");

        assert_eq!(dom.inner_html(body), "<u title=\"a&quot;b\">&lt;x&gt;</u>");
    }
}
