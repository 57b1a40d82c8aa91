//! Attribute Node
//!
//! A single named value owned by at most one element. Tracks whether the
//! value came from the document (or a program) or from a DTD default.

use std::fmt;

use crate::error::{DomError, OwnershipError, Result};
use crate::names::{self, QualName};
use crate::node::NodeType;
use crate::serialize::write_attribute;
use crate::NodeId;

/// DOM `Attr` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    namespace_uri: Option<String>,
    qualified_name: String,
    name: QualName,
    value: String,
    specified: bool,
    default_value: Option<String>,
    /// Back-reference only; the element's `AttributeSet` holds the edge
    owner_element: Option<NodeId>,
    readonly: bool,
}

impl Attr {
    /// Create a detached attribute, validating the name against the
    /// namespace per DOM Level 2.
    pub fn new(
        namespace_uri: Option<&str>,
        qualified_name: &str,
        value: impl Into<String>,
        specified: bool,
        default_value: Option<String>,
    ) -> Result<Self> {
        let name = names::check_attribute_name(namespace_uri, qualified_name)?;
        Ok(Self {
            namespace_uri: namespace_uri.map(str::to_owned),
            qualified_name: qualified_name.to_owned(),
            name,
            value: value.into(),
            specified,
            default_value,
            owner_element: None,
            readonly: false,
        })
    }

    /// Qualified name as written
    #[inline]
    pub fn name(&self) -> &str {
        &self.qualified_name
    }

    #[inline]
    pub fn qual_name(&self) -> &QualName {
        &self.name
    }

    #[inline]
    pub fn prefix(&self) -> Option<&str> {
        self.name.prefix.as_deref()
    }

    #[inline]
    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    #[inline]
    pub fn namespace_uri(&self) -> Option<&str> {
        self.namespace_uri.as_deref()
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Assign a new value. Any assignment marks the attribute as specified.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        if self.readonly {
            return Err(DomError::NoModificationAllowed);
        }
        self.value = value.into();
        self.specified = true;
        Ok(())
    }

    /// True if the value was in the source text or assigned explicitly
    #[inline]
    pub fn specified(&self) -> bool {
        self.specified
    }

    pub(crate) fn set_specified(&mut self, specified: bool) {
        self.specified = specified;
    }

    /// Declared default, if the DTD supplied one
    #[inline]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    #[inline]
    pub fn owner_element(&self) -> Option<NodeId> {
        self.owner_element
    }

    /// Attach to or detach from an element.
    ///
    /// Attaching while another owner is set is an ownership violation;
    /// callers must detach with `None` first.
    pub(crate) fn set_owner_element(
        &mut self,
        element: Option<NodeId>,
    ) -> std::result::Result<(), OwnershipError> {
        if let (Some(requested), Some(owner)) = (element, self.owner_element) {
            return Err(OwnershipError::AlreadyOwned { owner, requested });
        }
        self.owner_element = element;
        Ok(())
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub(crate) fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    /// Copy of this attribute with no owner and cleared readonly flag.
    /// `specified` and the default are kept as they are.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            owner_element: None,
            readonly: false,
            ..self.clone()
        }
    }

    /// Attributes hold only text and entity references
    pub(crate) fn check_child_type(node_type: NodeType) -> Result<()> {
        match node_type {
            NodeType::Text | NodeType::EntityReference => Ok(()),
            _ => Err(DomError::HierarchyRequest),
        }
    }

    /// Write `name="value"` with the value escaped
    pub fn write_xml(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write_attribute(&self.qualified_name, &self.value, f)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_xml(f)
    }
}
