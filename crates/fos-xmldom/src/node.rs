//! DOM Node - Arena representation
//!
//! Nodes link to each other through `NodeId` indices instead of pointers.
//! `NodeData` is a closed set of node kinds; attribute-only state lives in
//! the `Attribute` variant.

use crate::attribute::Attr;
use crate::attributes::AttributeSet;
use crate::error::{DomError, Result};
use crate::names::QualName;
use crate::NodeId;

/// DOM node type constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    EntityReference = 5,
    Document = 9,
}

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    pub(crate) parent: NodeId,
    pub(crate) first_child: NodeId,
    pub(crate) last_child: NodeId,
    pub(crate) prev_sibling: NodeId,
    pub(crate) next_sibling: NodeId,
    /// Document node this node belongs to (itself, for documents)
    pub(crate) owner_document: NodeId,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) fn new(owner_document: NodeId, data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            owner_document,
            data,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.is_valid().then_some(self.parent)
    }

    #[inline]
    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child.is_valid().then_some(self.first_child)
    }

    #[inline]
    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child.is_valid().then_some(self.last_child)
    }

    #[inline]
    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling.is_valid().then_some(self.prev_sibling)
    }

    #[inline]
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling.is_valid().then_some(self.next_sibling)
    }

    #[inline]
    pub fn owner_document(&self) -> NodeId {
        self.owner_document
    }

    #[inline]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn node_type(&self) -> NodeType {
        match &self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Attribute(_) => NodeType::Attribute,
            NodeData::Text(_) => NodeType::Text,
            NodeData::EntityReference(_) => NodeType::EntityReference,
        }
    }

    /// DOM `nodeName`
    pub fn node_name(&self) -> &str {
        match &self.data {
            NodeData::Document => "#document",
            NodeData::Element(e) => &e.qualified_name,
            NodeData::Attribute(a) => a.name(),
            NodeData::Text(_) => "#text",
            NodeData::EntityReference(r) => &r.name,
        }
    }

    pub fn is_readonly(&self) -> bool {
        match &self.data {
            NodeData::Document => false,
            NodeData::Element(e) => e.readonly,
            NodeData::Attribute(a) => a.is_readonly(),
            NodeData::Text(t) => t.readonly,
            NodeData::EntityReference(r) => r.readonly,
        }
    }

    pub(crate) fn set_readonly(&mut self, readonly: bool) {
        match &mut self.data {
            NodeData::Document => {}
            NodeData::Element(e) => e.readonly = readonly,
            NodeData::Attribute(a) => a.set_readonly(readonly),
            NodeData::Text(t) => t.readonly = readonly,
            NodeData::EntityReference(r) => r.readonly = readonly,
        }
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_attr(&self) -> Option<&Attr> {
        match &self.data {
            NodeData::Attribute(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_attr_mut(&mut self) -> Option<&mut Attr> {
        match &mut self.data {
            NodeData::Attribute(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Attribute(Attr),
    Text(TextData),
    EntityReference(EntityReferenceData),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    pub(crate) name: QualName,
    pub(crate) qualified_name: String,
    pub(crate) namespace_uri: Option<String>,
    pub(crate) attributes: AttributeSet,
    pub(crate) readonly: bool,
}

impl ElementData {
    pub(crate) fn new(namespace_uri: Option<&str>, name: QualName, attributes: AttributeSet) -> Self {
        Self {
            qualified_name: name.to_string(),
            name,
            namespace_uri: namespace_uri.map(str::to_owned),
            attributes,
            readonly: false,
        }
    }

    /// Qualified tag name
    #[inline]
    pub fn tag_name(&self) -> &str {
        &self.qualified_name
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.name.prefix.as_deref()
    }

    #[inline]
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    #[inline]
    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub(crate) content: String,
    pub(crate) readonly: bool,
}

impl TextData {
    pub(crate) fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            readonly: false,
        }
    }

    #[inline]
    pub fn data(&self) -> &str {
        &self.content
    }

    pub fn set_data(&mut self, content: impl Into<String>) -> Result<()> {
        if self.readonly {
            return Err(DomError::NoModificationAllowed);
        }
        self.content = content.into();
        Ok(())
    }
}

/// Entity reference data; its children are the entity's replacement text
#[derive(Debug)]
pub struct EntityReferenceData {
    pub(crate) name: String,
    pub(crate) readonly: bool,
}

impl EntityReferenceData {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_codes() {
        assert_eq!(NodeType::Element as u16, 1);
        assert_eq!(NodeType::Attribute as u16, 2);
        assert_eq!(NodeType::Text as u16, 3);
        assert_eq!(NodeType::EntityReference as u16, 5);
        assert_eq!(NodeType::Document as u16, 9);
    }

    #[test]
    fn test_text_node() {
        let mut node = Node::new(NodeId(0), NodeData::Text(TextData::new("hi")));
        assert_eq!(node.node_type(), NodeType::Text);
        assert_eq!(node.node_name(), "#text");
        assert_eq!(node.as_text(), Some("hi"));
        assert_eq!(node.parent(), None);

        node.set_readonly(true);
        assert!(node.is_readonly());
        if let NodeData::Text(t) = &mut node.data {
            assert_eq!(t.set_data("bye"), Err(DomError::NoModificationAllowed));
        }
    }

    #[test]
    fn test_attribute_node() {
        let attr = Attr::new(None, "id", "main", true, None).unwrap();
        let node = Node::new(NodeId(0), NodeData::Attribute(attr));
        assert_eq!(node.node_type(), NodeType::Attribute);
        assert_eq!(node.node_name(), "id");
        assert!(node.as_attr().is_some());
        assert!(node.as_element().is_none());
    }
}
