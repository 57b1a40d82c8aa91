//! fOS XML DOM - Attribute model
//!
//! DOM Level 1/2 attributes for XML documents fed by a SAX-style parser:
//! - Arena-allocated nodes addressed by `NodeId`
//! - Owner-exclusive attribute collections (`NamedNodeMap`)
//! - Namespace resolution and name validation per DOM Level 2
//! - Tracking of specified vs. DTD-defaulted attributes

mod attribute;
mod attributes;
mod config;
mod error;
mod implementation;
pub mod names;
mod node;
pub mod sax;
mod serialize;
mod tree;

pub use attribute::Attr;
pub use attributes::AttributeSet;
pub use config::{Config, DuplicatePolicy};
pub use error::{DomError, DomExceptionCode, OwnershipError, Result};
pub use implementation::DomImplementation;
pub use names::QualName;
pub use node::{ElementData, EntityReferenceData, Node, NodeData, NodeType, TextData};
pub use sax::{AttributeList, Attributes, SaxAttribute};
pub use serialize::escape_attribute_value;
pub use tree::{Children, DomTree};

/// Namespace URI bound to the reserved `xml` prefix
pub const XML_NS_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// Namespace URI bound to the reserved `xmlns` prefix and attribute
pub const XMLNS_NS_URI: &str = "http://www.w3.org/2000/xmlns/";

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
