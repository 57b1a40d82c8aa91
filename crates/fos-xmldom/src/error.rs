//! DOM Errors
//!
//! `DomError` mirrors the DOM Level 2 `DOMException` codes. Violations of
//! the arena's internal ownership invariant are reported separately as
//! `OwnershipError`, since they are programmer errors rather than
//! documented DOM conditions.

use crate::NodeId;

pub type Result<T> = std::result::Result<T, DomError>;

/// DOM Level 2 exception codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum DomExceptionCode {
    HierarchyRequest = 3,
    WrongDocument = 4,
    InvalidCharacter = 5,
    NoModificationAllowed = 7,
    NotFound = 8,
    InUseAttribute = 10,
    Namespace = 14,
}

/// Error raised by DOM operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node cannot be inserted here")]
    HierarchyRequest,

    #[error("Node belongs to a different document")]
    WrongDocument,

    #[error("Invalid character in name: {0:?}")]
    InvalidCharacter(String),

    #[error("Modification of readonly node is not allowed")]
    NoModificationAllowed,

    #[error("Node not found")]
    NotFound,

    #[error("Attribute is already owned by another element")]
    InUseAttribute,

    #[error("Namespace error: {0}")]
    Namespace(String),

    #[error("Duplicate attribute on one start tag: {0}")]
    DuplicateAttribute(String),

    #[error("No node with id {0}")]
    UnknownNode(NodeId),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Node {0} is not a text node")]
    NotText(NodeId),

    #[error(transparent)]
    Ownership(#[from] OwnershipError),
}

impl DomError {
    /// The `DOMException` code for this error, if it is a DOM condition
    pub fn code(&self) -> Option<DomExceptionCode> {
        match self {
            Self::HierarchyRequest => Some(DomExceptionCode::HierarchyRequest),
            Self::WrongDocument => Some(DomExceptionCode::WrongDocument),
            Self::InvalidCharacter(_) => Some(DomExceptionCode::InvalidCharacter),
            Self::NoModificationAllowed => Some(DomExceptionCode::NoModificationAllowed),
            Self::NotFound => Some(DomExceptionCode::NotFound),
            Self::InUseAttribute => Some(DomExceptionCode::InUseAttribute),
            Self::Namespace(_) => Some(DomExceptionCode::Namespace),
            Self::DuplicateAttribute(_)
            | Self::UnknownNode(_)
            | Self::NotAnElement(_)
            | Self::NotText(_)
            | Self::Ownership(_) => None,
        }
    }

    pub(crate) fn namespace(message: impl Into<String>) -> Self {
        Self::Namespace(message.into())
    }
}

/// Broken "one owner per attribute" invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
    #[error("Already owned by element {owner}; detach before attaching to {requested}")]
    AlreadyOwned { owner: NodeId, requested: NodeId },

    #[error("Attribute collection is not bound to an element")]
    UnboundCollection,
}
