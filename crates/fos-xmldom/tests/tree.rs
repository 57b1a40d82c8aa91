//! Node arena tests for fos-xmldom
//!
//! Attribute children, cloning and subtree freezing.

use fos_xmldom::{DomError, DomImplementation, DomTree, NodeData, NodeId, NodeType, SaxAttribute};

fn document() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let doc = tree.create_document();
    (tree, doc)
}

// ============================================================================
// ATTRIBUTE CHILDREN
// ============================================================================

#[test]
fn test_attribute_accepts_text_and_entity_references() {
    let (mut tree, doc) = document();
    let attr = tree.create_attribute(doc, "title", "a&b;").unwrap();
    let text = tree.create_text(doc, "a").unwrap();
    let entity = tree.create_entity_reference(doc, "b").unwrap();
    let inner = tree.create_text(doc, "bee").unwrap();
    tree.append_child(entity, inner).unwrap();

    tree.append_child(attr, text).unwrap();
    tree.append_child(attr, entity).unwrap();
    assert_eq!(tree.children(attr).collect::<Vec<_>>(), vec![text, entity]);
    assert_eq!(tree.text_content(attr), "abee");
}

#[test]
fn test_attribute_rejects_other_children() {
    let (mut tree, doc) = document();
    let attr = tree.create_attribute(doc, "title", "").unwrap();
    let elem = tree.create_element(doc, "e").unwrap();
    let other_attr = tree.create_attribute(doc, "x", "").unwrap();

    assert_eq!(tree.append_child(attr, elem), Err(DomError::HierarchyRequest));
    assert_eq!(tree.append_child(attr, other_attr), Err(DomError::HierarchyRequest));
    assert_eq!(tree.append_child(elem, attr), Err(DomError::HierarchyRequest));
}

#[test]
fn test_attribute_rejects_entity_with_element_content() {
    let (mut tree, doc) = document();
    let attr = tree.create_attribute(doc, "title", "").unwrap();
    let entity = tree.create_entity_reference(doc, "markup").unwrap();
    let elem = tree.create_element(doc, "b").unwrap();
    tree.append_child(entity, elem).unwrap();

    assert_eq!(tree.append_child(attr, entity), Err(DomError::HierarchyRequest));
}

#[test]
fn test_cross_document_child() {
    let (mut tree, doc) = document();
    let other = tree.create_document();
    let elem = tree.create_element(doc, "e").unwrap();
    let text = tree.create_text(other, "t").unwrap();
    assert_eq!(tree.append_child(elem, text), Err(DomError::WrongDocument));
}

// ============================================================================
// CLONING
// ============================================================================

#[test]
fn test_clone_attribute_is_detached_and_specified() {
    let (mut tree, doc) = document();
    let source = vec![SaxAttribute::defaulted("dir", "", "ltr", false, "ltr")];
    let elem = tree.create_element_with_attributes(doc, None, "e", &source).unwrap();
    let dir = tree.get_attribute_node(elem, "dir").unwrap().unwrap();
    tree.set_readonly(dir, false).unwrap();

    let clone = tree.clone_node(dir, false).unwrap();
    let attr = tree.attr(clone).unwrap();
    assert_ne!(clone, dir);
    assert_eq!(attr.owner_element(), None);
    assert!(attr.specified());
    assert!(!attr.is_readonly());
    assert_eq!(attr.value(), "ltr");
    assert_eq!(attr.default_value(), Some("ltr"));
    assert_eq!(tree.node(clone).unwrap().owner_document(), doc);
}

#[test]
fn test_clone_attribute_deep_copies_children() {
    let (mut tree, doc) = document();
    let attr = tree.create_attribute(doc, "title", "hi").unwrap();
    let text = tree.create_text(doc, "hi").unwrap();
    tree.append_child(attr, text).unwrap();

    let shallow = tree.clone_node(attr, false).unwrap();
    assert_eq!(tree.children(shallow).count(), 0);

    let deep = tree.clone_node(attr, true).unwrap();
    let copied: Vec<_> = tree.children(deep).collect();
    assert_eq!(copied.len(), 1);
    assert_ne!(copied[0], text);
    assert_eq!(tree.node(copied[0]).unwrap().as_text(), Some("hi"));
    assert_eq!(tree.node(copied[0]).unwrap().parent(), Some(deep));
}

#[test]
fn test_clone_element_copies_attributes() {
    let (mut tree, doc) = document();
    let source = vec![
        SaxAttribute::new("a", "", "1"),
        SaxAttribute::defaulted("b", "", "2", false, "2"),
    ];
    let elem = tree.create_element_with_attributes(doc, None, "e", &source).unwrap();
    let child = tree.create_text(doc, "body").unwrap();
    tree.append_child(elem, child).unwrap();

    let shallow = tree.clone_node(elem, false).unwrap();
    assert_eq!(tree.children(shallow).count(), 0);
    assert_eq!(tree.attributes(shallow).unwrap().to_xml_string(&tree), "a=\"1\"");

    let a = tree.get_attribute_node(shallow, "a").unwrap().unwrap();
    assert_ne!(Some(a), tree.get_attribute_node(elem, "a").unwrap());
    assert_eq!(tree.attr(a).unwrap().owner_element(), Some(shallow));

    let deep = tree.clone_node(elem, true).unwrap();
    assert_eq!(tree.text_content(deep), "body");
}

#[test]
fn test_document_cannot_be_cloned() {
    let (mut tree, doc) = document();
    assert_eq!(tree.clone_node(doc, true), Err(DomError::HierarchyRequest));
}

#[test]
fn test_set_text_data() {
    let (mut tree, doc) = document();
    let elem = tree.create_element(doc, "e").unwrap();
    let text = tree.create_text(doc, "old").unwrap();
    tree.append_child(elem, text).unwrap();

    tree.set_text_data(text, "new").unwrap();
    assert_eq!(tree.text_content(elem), "new");
    assert_eq!(tree.set_text_data(elem, "x"), Err(DomError::NotText(elem)));
}

// ============================================================================
// FREEZING
// ============================================================================

#[test]
fn test_deep_freeze() {
    let (mut tree, doc) = document();
    let entity = tree.create_entity_reference(doc, "content").unwrap();
    let source = vec![SaxAttribute::new("a", "", "1")];
    let elem = tree.create_element_with_attributes(doc, None, "e", &source).unwrap();
    let text = tree.create_text(doc, "t").unwrap();
    tree.append_child(entity, elem).unwrap();
    tree.append_child(elem, text).unwrap();

    tree.set_readonly(entity, true).unwrap();

    assert!(tree.node(entity).unwrap().is_readonly());
    assert!(tree.node(text).unwrap().is_readonly());
    assert!(tree.attributes(elem).unwrap().is_readonly(&tree));

    let more = tree.create_text(doc, "more").unwrap();
    assert_eq!(tree.append_child(elem, more), Err(DomError::NoModificationAllowed));
    assert_eq!(tree.remove_child(elem, text), Err(DomError::NoModificationAllowed));
    assert_eq!(tree.set_text_data(text, "u"), Err(DomError::NoModificationAllowed));
    let a = tree.get_attribute_node(elem, "a").unwrap().unwrap();
    assert_eq!(tree.set_attribute_value(a, "2"), Err(DomError::NoModificationAllowed));
}

// ============================================================================
// DOCUMENTS
// ============================================================================

#[test]
fn test_implementation_document() {
    let mut tree = DomTree::new();
    let (doc, root) = DomImplementation::new()
        .create_document(&mut tree, None, "config")
        .unwrap();

    let node = tree.node(doc).unwrap();
    assert_eq!(node.node_type(), NodeType::Document);
    assert!(matches!(node.data(), NodeData::Document));
    assert_eq!(node.owner_document(), doc);
    assert_eq!(tree.node(root).unwrap().node_name(), "config");
}
