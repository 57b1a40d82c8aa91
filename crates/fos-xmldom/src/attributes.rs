//! Element Attributes
//!
//! `AttributeSet` is the DOM `NamedNodeMap` of one element. It keeps its
//! attribute nodes in insertion order and is the only ownership edge to
//! them; each member's `owner_element` points back at the owning element.
//!
//! Lookups are linear scans. Elements rarely carry more than a handful of
//! attributes, so no index is maintained.

use std::collections::HashSet;
use std::fmt;

use crate::attribute::Attr;
use crate::config::DuplicatePolicy;
use crate::error::{DomError, OwnershipError, Result};
use crate::names;
use crate::node::NodeData;
use crate::sax::Attributes;
use crate::tree::DomTree;
use crate::{NodeId, XMLNS_NS_URI};

/// Named node map (attribute collection)
///
/// Not `Clone`: a node belongs to at most one collection. `clone_detached`
/// copies with fresh members.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AttributeSet {
    members: Vec<NodeId>,
    owner: Option<NodeId>,
    readonly: bool,
}

impl AttributeSet {
    /// Create an empty, unbound collection
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn for_element(owner: NodeId) -> Self {
        Self {
            members: Vec::new(),
            owner: Some(owner),
            readonly: false,
        }
    }

    /// Build an unbound collection from one start tag's SAX attributes.
    ///
    /// `xmlns` and `xmlns:*` attributes always get the XMLNS namespace;
    /// other attributes take the reported URI, with `""` meaning none.
    /// Nothing is allocated unless every attribute is valid.
    pub fn from_attributes<A>(tree: &mut DomTree, document: NodeId, source: &A) -> Result<Self>
    where
        A: Attributes + ?Sized,
    {
        tree.check_document(document)?;

        let policy = tree.config().duplicate_attributes;
        let mut seen = HashSet::with_capacity(source.len());
        let mut attrs = Vec::with_capacity(source.len());

        for i in 0..source.len() {
            let qname = source.qname(i);
            let namespace_uri = if qname == "xmlns" || names::prefix(qname) == Some("xmlns") {
                Some(XMLNS_NS_URI)
            } else {
                Some(source.uri(i)).filter(|uri| !uri.is_empty())
            };

            if !seen.insert(qname) {
                match policy {
                    DuplicatePolicy::Retain => {
                        tracing::warn!("Duplicate attribute {:?} on one start tag", qname);
                    }
                    DuplicatePolicy::Reject => {
                        return Err(DomError::DuplicateAttribute(qname.to_owned()));
                    }
                }
            }

            attrs.push(Attr::new(
                namespace_uri,
                qname,
                source.value(i),
                source.is_specified(i),
                source.default_value(i).map(str::to_owned),
            )?);
        }

        let members = attrs
            .into_iter()
            .map(|attr| tree.alloc(document, NodeData::Attribute(attr)))
            .collect::<Vec<_>>();

        tracing::debug!("Built attribute set with {} attributes", members.len());

        Ok(Self {
            members,
            owner: None,
            readonly: false,
        })
    }

    /// Number of attributes
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Attribute at `index`, in insertion order
    #[inline]
    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.members.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().copied()
    }

    /// Element owning this collection
    #[inline]
    pub fn owner_element(&self) -> Option<NodeId> {
        self.owner
    }

    /// First attribute whose qualified name is `name`
    pub fn get_named_item(&self, tree: &DomTree, name: &str) -> Option<NodeId> {
        self.position(tree, |attr| attr.name() == name)
            .map(|index| self.members[index])
    }

    /// First attribute matching `local_name` in `namespace_uri`
    pub fn get_named_item_ns(
        &self,
        tree: &DomTree,
        namespace_uri: Option<&str>,
        local_name: &str,
    ) -> Option<NodeId> {
        self.position(tree, |attr| {
            attr.local_name() == local_name && attr.namespace_uri() == namespace_uri
        })
        .map(|index| self.members[index])
    }

    /// Value of the named attribute, or `""` if there is none
    pub fn value_of<'t>(&self, tree: &'t DomTree, name: &str) -> &'t str {
        self.get_named_item(tree, name)
            .and_then(|id| tree.attr(id))
            .map_or("", Attr::value)
    }

    /// Add `attr`, replacing the member with the same qualified name.
    ///
    /// Returns the replaced attribute, now detached.
    pub fn set_named_item(&mut self, tree: &mut DomTree, attr: NodeId) -> Result<Option<NodeId>> {
        let owner = self.check_insertable(tree, attr)?;
        let name = tree.attr(attr).map(|a| a.name().to_owned()).unwrap_or_default();
        let existing = self.position(tree, |member| member.name() == name);
        self.insert(tree, owner, attr, existing)
    }

    /// Add `attr`, replacing the member with the same namespace and local name.
    pub fn set_named_item_ns(&mut self, tree: &mut DomTree, attr: NodeId) -> Result<Option<NodeId>> {
        let owner = self.check_insertable(tree, attr)?;
        let (namespace_uri, local_name) = tree
            .attr(attr)
            .map(|a| (a.namespace_uri().map(str::to_owned), a.local_name().to_owned()))
            .unwrap_or_default();
        let existing = self.position(tree, |member| {
            member.local_name() == local_name && member.namespace_uri() == namespace_uri.as_deref()
        });
        self.insert(tree, owner, attr, existing)
    }

    /// Remove the attribute named `name`.
    ///
    /// An attribute with a declared default is not removed; it reverts to
    /// the default and becomes unspecified.
    pub fn remove_named_item(&mut self, tree: &mut DomTree, name: &str) -> Result<NodeId> {
        if self.readonly {
            return Err(DomError::NoModificationAllowed);
        }
        let index = self
            .position(tree, |attr| attr.name() == name)
            .ok_or(DomError::NotFound)?;
        self.remove_at(tree, index)
    }

    /// Remove the attribute matching `local_name` in `namespace_uri`
    pub fn remove_named_item_ns(
        &mut self,
        tree: &mut DomTree,
        namespace_uri: Option<&str>,
        local_name: &str,
    ) -> Result<NodeId> {
        if self.readonly {
            return Err(DomError::NoModificationAllowed);
        }
        let index = self
            .position(tree, |attr| {
                attr.local_name() == local_name && attr.namespace_uri() == namespace_uri
            })
            .ok_or(DomError::NotFound)?;
        self.remove_at(tree, index)
    }

    /// Make the collection and every current member readonly
    pub fn freeze(&mut self, tree: &mut DomTree) {
        self.readonly = true;
        for &id in &self.members {
            if let Some(attr) = tree.attr_mut(id) {
                attr.set_readonly(true);
            }
        }
        tracing::trace!("Froze attribute set of {} members", self.members.len());
    }

    /// True if the collection was frozen or any member is readonly
    pub fn is_readonly(&self, tree: &DomTree) -> bool {
        self.readonly
            || self
                .members
                .iter()
                .any(|&id| tree.attr(id).is_some_and(Attr::is_readonly))
    }

    /// Bind the collection (and every member) to `element`, or unbind it.
    ///
    /// A bound collection must be unbound before it is given a new owner,
    /// and no member may belong to another element. Every member is
    /// checked before any is changed.
    pub(crate) fn set_owner_element(&mut self, tree: &mut DomTree, element: Option<NodeId>) -> Result<()> {
        if let (Some(requested), Some(owner)) = (element, self.owner) {
            return Err(OwnershipError::AlreadyOwned { owner, requested }.into());
        }
        for &id in &self.members {
            let attr = tree.attr(id).ok_or(DomError::UnknownNode(id))?;
            if attr.owner_element().is_some() && attr.owner_element() != self.owner {
                return Err(DomError::InUseAttribute);
            }
        }

        for &id in &self.members {
            if let Some(attr) = tree.attr_mut(id) {
                attr.set_owner_element(None)?;
                attr.set_owner_element(element)?;
            }
        }
        self.owner = element;
        Ok(())
    }

    /// Unbound copy whose members are copies of this collection's members.
    ///
    /// Members keep their `specified` flag and default, so a copy of a
    /// defaulted attribute stays defaulted.
    pub fn clone_detached(&self, tree: &mut DomTree, deep: bool) -> Result<Self> {
        let members = self
            .members
            .iter()
            .map(|&id| tree.duplicate_attribute(id, deep))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            members,
            owner: None,
            readonly: false,
        })
    }

    /// Write specified attributes as `name="value"`, space separated.
    /// Attributes present only through a declared default are skipped.
    pub fn write_xml(&self, tree: &DomTree, f: &mut impl fmt::Write) -> fmt::Result {
        let mut first = true;
        for attr in self.members.iter().filter_map(|&id| tree.attr(id)) {
            if !attr.specified() {
                continue;
            }
            if !first {
                f.write_char(' ')?;
            }
            attr.write_xml(f)?;
            first = false;
        }
        Ok(())
    }

    pub fn to_xml_string(&self, tree: &DomTree) -> String {
        self.members
            .iter()
            .filter_map(|&id| tree.attr(id))
            .filter(|attr| attr.specified())
            .map(Attr::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn position(&self, tree: &DomTree, matches: impl Fn(&Attr) -> bool) -> Option<usize> {
        self.members
            .iter()
            .position(|&id| tree.attr(id).is_some_and(&matches))
    }

    /// Checks shared by both insertion forms; returns the owning element
    fn check_insertable(&self, tree: &DomTree, attr: NodeId) -> Result<NodeId> {
        if self.readonly {
            return Err(DomError::NoModificationAllowed);
        }
        let owner = self.owner.ok_or(OwnershipError::UnboundCollection)?;
        let owner_document = tree.node(owner)?.owner_document();

        let node = tree.node(attr)?;
        let Some(candidate) = node.as_attr() else {
            return Err(DomError::WrongDocument);
        };
        if node.owner_document() != owner_document {
            return Err(DomError::WrongDocument);
        }
        if candidate.owner_element().is_some() {
            return Err(DomError::InUseAttribute);
        }
        Ok(owner)
    }

    fn insert(
        &mut self,
        tree: &mut DomTree,
        owner: NodeId,
        attr: NodeId,
        existing: Option<usize>,
    ) -> Result<Option<NodeId>> {
        let previous = match existing {
            Some(index) => {
                let old = self.members[index];
                let old_attr = tree.attr_mut(old).ok_or(DomError::UnknownNode(old))?;
                if old_attr.is_readonly() {
                    return Err(DomError::NoModificationAllowed);
                }
                old_attr.set_owner_element(None)?;
                self.members[index] = attr;
                Some(old)
            }
            None => {
                self.members.push(attr);
                None
            }
        };

        let new_attr = tree.attr_mut(attr).ok_or(DomError::UnknownNode(attr))?;
        new_attr.set_owner_element(Some(owner))?;
        Ok(previous)
    }

    fn remove_at(&mut self, tree: &mut DomTree, index: usize) -> Result<NodeId> {
        let id = self.members[index];
        let attr = tree.attr_mut(id).ok_or(DomError::UnknownNode(id))?;

        if let Some(default) = attr.default_value().map(str::to_owned) {
            attr.set_value(default)?;
            attr.set_specified(false);
            tracing::trace!("Attribute {:?} reverted to its default", attr.name());
        } else {
            attr.set_owner_element(None)?;
            self.members.remove(index);
        }
        Ok(id)
    }
}
