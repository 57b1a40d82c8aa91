//! DOM Tree (arena-based allocation)
//!
//! One arena holds the nodes of any number of documents. Every node records
//! its owner document, which is how cross-document operations are detected.

use crate::attribute::Attr;
use crate::attributes::AttributeSet;
use crate::config::Config;
use crate::error::{DomError, Result};
use crate::names;
use crate::node::{ElementData, EntityReferenceData, Node, NodeData, NodeType, TextData};
use crate::sax::Attributes;
use crate::NodeId;

/// Arena-based DOM tree
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
    config: Config,
}

impl DomTree {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: Vec::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of nodes in the arena
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a node by ID, failing for unknown IDs
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(DomError::UnknownNode(id))
    }

    /// Attribute payload of `id`, if it is an attribute node
    #[inline]
    pub fn attr(&self, id: NodeId) -> Option<&Attr> {
        self.get(id).and_then(Node::as_attr)
    }

    #[inline]
    pub fn attr_mut(&mut self, id: NodeId) -> Option<&mut Attr> {
        self.nodes.get_mut(id.index()).and_then(Node::as_attr_mut)
    }

    /// Element payload of `id`
    pub fn element(&self, id: NodeId) -> Result<&ElementData> {
        self.node(id)?.as_element().ok_or(DomError::NotAnElement(id))
    }

    pub(crate) fn alloc(&mut self, owner_document: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let owner_document = if matches!(data, NodeData::Document) { id } else { owner_document };
        self.nodes.push(Node::new(owner_document, data));
        id
    }

    pub(crate) fn check_document(&self, document: NodeId) -> Result<()> {
        match self.node(document)?.data() {
            NodeData::Document => Ok(()),
            _ => Err(DomError::WrongDocument),
        }
    }

    // ------------------------------------------------------------------
    // Factories
    // ------------------------------------------------------------------

    /// Create a new document node
    pub fn create_document(&mut self) -> NodeId {
        let id = self.alloc(NodeId::NONE, NodeData::Document);
        tracing::trace!("Created document {}", id);
        id
    }

    /// Create an element with no namespace
    pub fn create_element(&mut self, document: NodeId, name: &str) -> Result<NodeId> {
        self.create_element_ns(document, None, name)
    }

    /// Create an element in `namespace_uri`
    pub fn create_element_ns(
        &mut self,
        document: NodeId,
        namespace_uri: Option<&str>,
        qualified_name: &str,
    ) -> Result<NodeId> {
        self.check_document(document)?;
        let name = names::check_element_name(namespace_uri, qualified_name)?;
        let id = NodeId(self.nodes.len() as u32);
        let data = ElementData::new(namespace_uri, name, AttributeSet::for_element(id));
        Ok(self.alloc(document, NodeData::Element(data)))
    }

    /// Create an element for one parsed start tag, with its attributes.
    ///
    /// This is the parser path: the new element owns a collection built
    /// from `source`.
    pub fn create_element_with_attributes<A>(
        &mut self,
        document: NodeId,
        namespace_uri: Option<&str>,
        qualified_name: &str,
        source: &A,
    ) -> Result<NodeId>
    where
        A: Attributes + ?Sized,
    {
        self.check_document(document)?;
        let name = names::check_element_name(namespace_uri, qualified_name)?;
        let mut attributes = AttributeSet::from_attributes(self, document, source)?;

        let id = NodeId(self.nodes.len() as u32);
        attributes.set_owner_element(self, Some(id))?;
        let data = ElementData::new(namespace_uri, name, attributes);
        Ok(self.alloc(document, NodeData::Element(data)))
    }

    /// Create an attribute with no namespace
    pub fn create_attribute(&mut self, document: NodeId, name: &str, value: &str) -> Result<NodeId> {
        self.create_attribute_ns(document, None, name, value)
    }

    /// Create a specified attribute in `namespace_uri`
    pub fn create_attribute_ns(
        &mut self,
        document: NodeId,
        namespace_uri: Option<&str>,
        qualified_name: &str,
        value: &str,
    ) -> Result<NodeId> {
        self.check_document(document)?;
        let attr = Attr::new(namespace_uri, qualified_name, value, true, None)?;
        Ok(self.alloc(document, NodeData::Attribute(attr)))
    }

    pub fn create_text(&mut self, document: NodeId, content: &str) -> Result<NodeId> {
        self.check_document(document)?;
        Ok(self.alloc(document, NodeData::Text(TextData::new(content))))
    }

    pub fn create_entity_reference(&mut self, document: NodeId, name: &str) -> Result<NodeId> {
        self.check_document(document)?;
        if !names::is_name(name) {
            return Err(DomError::InvalidCharacter(name.to_owned()));
        }
        let data = EntityReferenceData {
            name: name.to_owned(),
            readonly: false,
        };
        Ok(self.alloc(document, NodeData::EntityReference(data)))
    }

    // ------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let first = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next: first }
    }

    /// Concatenated text of all text descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in self.children(id) {
            match self.get(child).and_then(Node::as_text) {
                Some(text) => out.push_str(text),
                None => self.collect_text(child, out),
            }
        }
    }

    /// Append `child` as the last child of `parent`, detaching it from
    /// its current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insertion(parent, child)?;
        if let Some(old_parent) = self.node(child)?.parent() {
            self.remove_child(old_parent, child)?;
        }
        self.link_child(parent, child);
        Ok(())
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<NodeId> {
        if self.node(child)?.parent != parent {
            return Err(DomError::NotFound);
        }
        if self.node(parent)?.is_readonly() {
            return Err(DomError::NoModificationAllowed);
        }

        let (prev, next) = {
            let node = &self.nodes[child.index()];
            (node.prev_sibling, node.next_sibling)
        };
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(child)
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        let child_node = self.node(child)?;

        if parent_node.owner_document() != child_node.owner_document() {
            return Err(DomError::WrongDocument);
        }
        if parent_node.is_readonly() {
            return Err(DomError::NoModificationAllowed);
        }

        let child_type = child_node.node_type();
        match parent_node.node_type() {
            NodeType::Attribute => {
                Attr::check_child_type(child_type)?;
                if child_type == NodeType::EntityReference {
                    self.check_attribute_content(child)?;
                }
            }
            NodeType::Document => {
                let has_element = self.children(parent).any(|id| self.nodes[id.index()].is_element());
                if child_type != NodeType::Element || has_element {
                    return Err(DomError::HierarchyRequest);
                }
            }
            NodeType::Element | NodeType::EntityReference => {
                if !matches!(child_type, NodeType::Element | NodeType::Text | NodeType::EntityReference) {
                    return Err(DomError::HierarchyRequest);
                }
            }
            NodeType::Text => return Err(DomError::HierarchyRequest),
        }

        // The child may not be the parent or one of its ancestors
        let mut current = parent;
        while current.is_valid() {
            if current == child {
                return Err(DomError::HierarchyRequest);
            }
            current = self.nodes[current.index()].parent;
        }
        Ok(())
    }

    /// Entity references inside attribute values may contain only text
    /// and further entity references
    fn check_attribute_content(&self, entity_ref: NodeId) -> Result<()> {
        for child in self.children(entity_ref) {
            Attr::check_child_type(self.nodes[child.index()].node_type())?;
            self.check_attribute_content(child)?;
        }
        Ok(())
    }

    fn link_child(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    // ------------------------------------------------------------------
    // Cloning and freezing
    // ------------------------------------------------------------------

    /// DOM `cloneNode`. The clone belongs to the same document and has no
    /// parent or owner; a cloned attribute is always specified. Elements
    /// always copy their attributes; `deep` controls children.
    ///
    /// Document nodes cannot be cloned.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId> {
        let node = self.node(id)?;
        let document = node.owner_document();

        let clone = match node.data() {
            NodeData::Document => return Err(DomError::HierarchyRequest),
            NodeData::Attribute(_) => {
                let clone = self.duplicate_attribute(id, deep)?;
                if let Some(attr) = self.attr_mut(clone) {
                    attr.set_specified(true);
                }
                return Ok(clone);
            }
            NodeData::Text(text) => {
                let data = TextData::new(text.data());
                self.alloc(document, NodeData::Text(data))
            }
            NodeData::EntityReference(entity_ref) => {
                let data = EntityReferenceData {
                    name: entity_ref.name.clone(),
                    readonly: false,
                };
                self.alloc(document, NodeData::EntityReference(data))
            }
            NodeData::Element(element) => {
                let namespace_uri = element.namespace_uri.clone();
                let name = element.name.clone();

                let mut attributes =
                    self.with_attributes(id, |source, tree| source.clone_detached(tree, true))?;
                let clone = NodeId(self.nodes.len() as u32);
                attributes.set_owner_element(self, Some(clone))?;
                let data = ElementData::new(namespace_uri.as_deref(), name, attributes);
                self.alloc(document, NodeData::Element(data))
            }
        };

        if deep {
            self.clone_children(id, clone)?;
        }
        Ok(clone)
    }

    /// Copy of an attribute with no owner, keeping its `specified` flag
    pub(crate) fn duplicate_attribute(&mut self, id: NodeId, deep: bool) -> Result<NodeId> {
        let node = self.node(id)?;
        let document = node.owner_document();
        let attr = node.as_attr().ok_or(DomError::UnknownNode(id))?.duplicate();

        let clone = self.alloc(document, NodeData::Attribute(attr));
        if deep {
            self.clone_children(id, clone)?;
        }
        Ok(clone)
    }

    fn clone_children(&mut self, source: NodeId, target: NodeId) -> Result<()> {
        let children = self.children(source).collect::<Vec<_>>();
        for child in children {
            let copy = self.clone_node(child, true)?;
            self.link_child(target, copy);
        }
        Ok(())
    }

    /// Make a node readonly; with `deep`, its whole subtree too. Element
    /// attribute collections are frozen along with their element.
    pub fn set_readonly(&mut self, id: NodeId, deep: bool) -> Result<()> {
        self.node_mut(id)?.set_readonly(true);
        if self.node(id)?.is_element() {
            self.with_attributes(id, |attributes, tree| {
                attributes.freeze(tree);
                Ok(())
            })?;
        }
        if deep {
            let children = self.children(id).collect::<Vec<_>>();
            for child in children {
                self.set_readonly(child, true)?;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Element attributes
    // ------------------------------------------------------------------

    /// Run `f` on an element's attribute collection with the rest of the
    /// arena available. The collection is moved out for the duration.
    fn with_attributes<R>(
        &mut self,
        element: NodeId,
        f: impl FnOnce(&mut AttributeSet, &mut DomTree) -> Result<R>,
    ) -> Result<R> {
        let data = self
            .node_mut(element)?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(element))?;
        let mut attributes = std::mem::take(&mut data.attributes);

        let result = f(&mut attributes, self);

        if let Some(data) = self.nodes[element.index()].as_element_mut() {
            data.attributes = attributes;
        }
        result
    }

    /// Attribute collection of an element
    pub fn attributes(&self, element: NodeId) -> Result<&AttributeSet> {
        Ok(self.element(element)?.attributes())
    }

    /// Value of the named attribute, `""` if absent
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Result<&str> {
        Ok(self.attributes(element)?.value_of(self, name))
    }

    pub fn get_attribute_node(&self, element: NodeId, name: &str) -> Result<Option<NodeId>> {
        Ok(self.attributes(element)?.get_named_item(self, name))
    }

    pub fn get_attribute_node_ns(
        &self,
        element: NodeId,
        namespace_uri: Option<&str>,
        local_name: &str,
    ) -> Result<Option<NodeId>> {
        Ok(self.attributes(element)?.get_named_item_ns(self, namespace_uri, local_name))
    }

    pub fn set_attribute_node(&mut self, element: NodeId, attr: NodeId) -> Result<Option<NodeId>> {
        self.with_attributes(element, |attributes, tree| attributes.set_named_item(tree, attr))
    }

    pub fn set_attribute_node_ns(&mut self, element: NodeId, attr: NodeId) -> Result<Option<NodeId>> {
        self.with_attributes(element, |attributes, tree| attributes.set_named_item_ns(tree, attr))
    }

    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Result<NodeId> {
        self.with_attributes(element, |attributes, tree| attributes.remove_named_item(tree, name))
    }

    pub fn remove_attribute_ns(
        &mut self,
        element: NodeId,
        namespace_uri: Option<&str>,
        local_name: &str,
    ) -> Result<NodeId> {
        self.with_attributes(element, |attributes, tree| {
            attributes.remove_named_item_ns(tree, namespace_uri, local_name)
        })
    }

    /// Assign an attribute node's value
    pub fn set_attribute_value(&mut self, attr: NodeId, value: &str) -> Result<()> {
        self.attr_mut(attr).ok_or(DomError::UnknownNode(attr))?.set_value(value)
    }

    /// Replace a text node's content
    pub fn set_text_data(&mut self, text: NodeId, content: &str) -> Result<()> {
        match &mut self.node_mut(text)?.data {
            NodeData::Text(data) => data.set_data(content),
            _ => Err(DomError::NotText(text)),
        }
    }

    /// Unbound copy of an element's attribute collection
    pub fn clone_attributes(&mut self, element: NodeId, deep: bool) -> Result<AttributeSet> {
        self.with_attributes(element, |source, tree| source.clone_detached(tree, deep))
    }

    /// Install an unbound collection on `element`, replacing (and
    /// releasing) the element's current attributes.
    ///
    /// Fails without changing anything if the element or its current
    /// collection is readonly, or if a member belongs to another document
    /// or element.
    pub fn bind_attributes(&mut self, element: NodeId, mut attributes: AttributeSet) -> Result<()> {
        let document = self.node(element)?.owner_document();
        if self.node(element)?.is_readonly() || self.attributes(element)?.is_readonly(self) {
            return Err(DomError::NoModificationAllowed);
        }
        for id in attributes.iter() {
            if self.node(id)?.owner_document() != document {
                return Err(DomError::WrongDocument);
            }
        }

        attributes.set_owner_element(self, Some(element))?;
        self.with_attributes(element, |current, tree| {
            current.set_owner_element(tree, None)?;
            *current = attributes;
            Ok(())
        })?;
        tracing::debug!("Bound new attribute set to element {}", element);
        Ok(())
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_tree_creation() {
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        let root = tree.create_element(doc, "root").unwrap();
        let text = tree.create_text(doc, "Hello").unwrap();

        tree.append_child(doc, root).unwrap();
        tree.append_child(root, text).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.node(root).unwrap().parent(), Some(doc));
        assert_eq!(tree.node(text).unwrap().owner_document(), doc);
        assert_eq!(tree.children(doc).collect::<Vec<_>>(), vec![root]);
        assert_eq!(tree.text_content(doc), "Hello");
    }

    #[test]
    fn test_document_accepts_one_element() {
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        let a = tree.create_element(doc, "a").unwrap();
        let b = tree.create_element(doc, "b").unwrap();
        let text = tree.create_text(doc, "x").unwrap();

        tree.append_child(doc, a).unwrap();
        assert_eq!(tree.append_child(doc, b), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(doc, text), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        let outer = tree.create_element(doc, "outer").unwrap();
        let inner = tree.create_element(doc, "inner").unwrap();
        tree.append_child(outer, inner).unwrap();

        assert_eq!(tree.append_child(inner, outer), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(inner, inner), Err(DomError::HierarchyRequest));
    }

    #[test]
    fn test_reparenting_detaches() {
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        let a = tree.create_element(doc, "a").unwrap();
        let b = tree.create_element(doc, "b").unwrap();
        let text = tree.create_text(doc, "t").unwrap();

        tree.append_child(a, text).unwrap();
        tree.append_child(b, text).unwrap();
        assert_eq!(tree.children(a).count(), 0);
        assert_eq!(tree.children(b).collect::<Vec<_>>(), vec![text]);
    }

    #[test]
    fn test_remove_child() {
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        let parent = tree.create_element(doc, "p").unwrap();
        let kids: Vec<_> = (0..3).map(|i| tree.create_text(doc, &i.to_string()).unwrap()).collect();
        for &kid in &kids {
            tree.append_child(parent, kid).unwrap();
        }

        assert_eq!(tree.remove_child(parent, kids[1]), Ok(kids[1]));
        assert_eq!(tree.text_content(parent), "02");
        assert_eq!(tree.remove_child(parent, kids[1]), Err(DomError::NotFound));
    }

    #[test]
    fn test_factories_require_document() {
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        let elem = tree.create_element(doc, "e").unwrap();
        assert_eq!(tree.create_text(elem, "x"), Err(DomError::WrongDocument));
        assert_eq!(
            tree.create_element(NodeId(99), "x"),
            Err(DomError::UnknownNode(NodeId(99)))
        );
    }

    #[test]
    fn test_entity_reference_name_checked() {
        let mut tree = DomTree::new();
        let doc = tree.create_document();
        assert!(tree.create_entity_reference(doc, "copy").is_ok());
        assert!(matches!(
            tree.create_entity_reference(doc, "no good"),
            Err(DomError::InvalidCharacter(_))
        ));
    }
}
