//! XML Names and Namespace Validation
//!
//! Character classes follow XML 1.0 (Fifth Edition) §2.3; qualified names
//! follow Namespaces in XML 1.0 and the DOM Level 2 error rules.

use std::fmt;

use crate::error::{DomError, Result};
use crate::{XML_NS_URI, XMLNS_NS_URI};

/// `NameStartChar` per XML 1.0 §2.3 `[4]`
pub fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}' | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

/// `NameChar` per XML 1.0 §2.3 `[4a]`
pub fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

/// Check if `s` matches the `Name` production
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

/// Check if `s` is an `NCName` (a `Name` without colons)
pub fn is_unqualified_name(s: &str) -> bool {
    !s.contains(':') && is_name(s)
}

/// Check if `s` is a well-formed `QName`
pub fn is_qualified_name(s: &str) -> bool {
    match s.split_once(':') {
        None => is_unqualified_name(s),
        Some((prefix, local)) => is_unqualified_name(prefix) && is_unqualified_name(local),
    }
}

/// Prefix of a qualified name, `None` when there is none
pub fn prefix(qname: &str) -> Option<&str> {
    match qname.split_once(':') {
        Some((prefix, _)) if !prefix.is_empty() => Some(prefix),
        _ => None,
    }
}

/// Local part of a qualified name
pub fn local_part(qname: &str) -> &str {
    match qname.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() => local,
        _ => qname,
    }
}

/// A validated `prefix:local` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QualName {
    pub fn new(prefix: Option<&str>, local: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_owned),
            local: local.to_owned(),
        }
    }
}

impl fmt::Display for QualName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKind {
    Element,
    Attribute,
}

/// Validate an attribute's qualified name against its namespace URI.
///
/// Errors:
/// - `Namespace` for more than one colon, an empty prefix or local part,
///   a prefix with no namespace, `xml` bound to anything but the XML
///   namespace, or `xmlns` (as name or prefix) bound to anything but the
///   XMLNS namespace
/// - `InvalidCharacter` when a segment is not an `NCName`
pub fn check_attribute_name(namespace_uri: Option<&str>, qualified_name: &str) -> Result<QualName> {
    check_qualified_name(namespace_uri, qualified_name, NameKind::Attribute)
}

/// Validate an element's qualified name; same as attributes minus the
/// `xmlns` rules.
pub fn check_element_name(namespace_uri: Option<&str>, qualified_name: &str) -> Result<QualName> {
    check_qualified_name(namespace_uri, qualified_name, NameKind::Element)
}

fn check_qualified_name(
    namespace_uri: Option<&str>,
    qualified_name: &str,
    kind: NameKind,
) -> Result<QualName> {
    let Some((prefix, local)) = qualified_name.split_once(':') else {
        if !is_unqualified_name(qualified_name) {
            return Err(DomError::InvalidCharacter(qualified_name.to_owned()));
        }
        if kind == NameKind::Attribute
            && qualified_name == "xmlns"
            && namespace_uri != Some(XMLNS_NS_URI)
        {
            return Err(DomError::namespace("xmlns must be bound to the XMLNS namespace"));
        }
        return Ok(QualName::new(None, qualified_name));
    };

    if local.contains(':') {
        return Err(DomError::namespace(format!("more than one colon in {qualified_name:?}")));
    }
    if prefix.is_empty() || local.is_empty() {
        return Err(DomError::namespace(format!("empty name segment in {qualified_name:?}")));
    }
    if !is_unqualified_name(prefix) || !is_unqualified_name(local) {
        return Err(DomError::InvalidCharacter(qualified_name.to_owned()));
    }

    let Some(namespace_uri) = namespace_uri else {
        return Err(DomError::namespace(format!("prefix {prefix:?} has no namespace")));
    };
    if prefix == "xml" && namespace_uri != XML_NS_URI {
        return Err(DomError::namespace("xml prefix must be bound to the XML namespace"));
    }
    if kind == NameKind::Attribute && prefix == "xmlns" && namespace_uri != XMLNS_NS_URI {
        return Err(DomError::namespace("xmlns prefix must be bound to the XMLNS namespace"));
    }

    Ok(QualName::new(Some(prefix), local))
}
