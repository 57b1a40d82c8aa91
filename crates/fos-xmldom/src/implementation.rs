//! DOM Implementation - Feature queries and document creation

use crate::error::Result;
use crate::tree::DomTree;
use crate::NodeId;

/// DOM `DOMImplementation`
#[derive(Debug, Clone, Copy, Default)]
pub struct DomImplementation;

impl DomImplementation {
    pub fn new() -> Self {
        Self
    }

    /// Only the "XML" feature is supported, at levels 1.0 and 2.0
    pub fn has_feature(&self, feature: &str, version: Option<&str>) -> bool {
        feature.eq_ignore_ascii_case("XML") && matches!(version, None | Some("1.0") | Some("2.0"))
    }

    /// Create a document in `tree` together with its document element.
    ///
    /// Returns `(document, document_element)`.
    pub fn create_document(
        &self,
        tree: &mut DomTree,
        namespace_uri: Option<&str>,
        qualified_name: &str,
    ) -> Result<(NodeId, NodeId)> {
        // Validate before allocating the document node
        crate::names::check_element_name(namespace_uri, qualified_name)?;

        let document = tree.create_document();
        let element = tree.create_element_ns(document, namespace_uri, qualified_name)?;
        tree.append_child(document, element)?;

        tracing::debug!("Created document {} with root <{}>", document, qualified_name);
        Ok((document, element))
    }
}
