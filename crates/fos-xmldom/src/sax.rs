//! SAX Attribute Source
//!
//! What a streaming parser reports for one start tag: attributes in
//! document order, with SAX conventions (`""` for "no namespace").
//! Parsers that process a DTD may also report whether each attribute was
//! specified and its declared default.

/// Positional view of one start tag's attributes.
///
/// Indices passed to the accessors must be below `len()`.
pub trait Attributes {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Qualified name as written
    fn qname(&self, index: usize) -> &str;

    /// Namespace URI, `""` when there is none
    fn uri(&self, index: usize) -> &str;

    fn value(&self, index: usize) -> &str;

    /// False when the value was supplied by a DTD default
    fn is_specified(&self, index: usize) -> bool {
        let _ = index;
        true
    }

    /// Default declared in the DTD
    fn default_value(&self, index: usize) -> Option<&str> {
        let _ = index;
        None
    }
}

/// One reported attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaxAttribute {
    pub qname: String,
    pub uri: String,
    pub value: String,
    pub specified: bool,
    pub default_value: Option<String>,
}

impl SaxAttribute {
    /// An attribute written in the source, with no declared default
    pub fn new(qname: &str, uri: &str, value: &str) -> Self {
        Self {
            qname: qname.to_owned(),
            uri: uri.to_owned(),
            value: value.to_owned(),
            specified: true,
            default_value: None,
        }
    }

    /// An attribute declared in the DTD with a default
    pub fn defaulted(qname: &str, uri: &str, value: &str, specified: bool, default_value: &str) -> Self {
        Self {
            specified,
            default_value: Some(default_value.to_owned()),
            ..Self::new(qname, uri, value)
        }
    }
}

impl Attributes for [SaxAttribute] {
    fn len(&self) -> usize {
        <[SaxAttribute]>::len(self)
    }

    fn qname(&self, index: usize) -> &str {
        &self[index].qname
    }

    fn uri(&self, index: usize) -> &str {
        &self[index].uri
    }

    fn value(&self, index: usize) -> &str {
        &self[index].value
    }

    fn is_specified(&self, index: usize) -> bool {
        self[index].specified
    }

    fn default_value(&self, index: usize) -> Option<&str> {
        self[index].default_value.as_deref()
    }
}

impl Attributes for Vec<SaxAttribute> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn qname(&self, index: usize) -> &str {
        self.as_slice().qname(index)
    }

    fn uri(&self, index: usize) -> &str {
        self.as_slice().uri(index)
    }

    fn value(&self, index: usize) -> &str {
        self.as_slice().value(index)
    }

    fn is_specified(&self, index: usize) -> bool {
        self.as_slice().is_specified(index)
    }

    fn default_value(&self, index: usize) -> Option<&str> {
        self.as_slice().default_value(index)
    }
}

#[derive(Debug, Clone)]
struct ListEntry {
    name: String,
    kind: String,
    value: String,
    uri: String,
    default_value: Option<String>,
    specified: bool,
}

/// Reusable attribute buffer filled by a parser for each start tag
#[derive(Debug, Clone, Default)]
pub struct AttributeList {
    entries: Vec<ListEntry>,
    /// Name of the attribute declared with type `ID`, if any
    id_attribute_name: Option<String>,
}

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all attributes, keeping the allocation
    pub fn clear(&mut self) {
        self.entries.clear();
        self.id_attribute_name = None;
    }

    /// Add an attribute. `kind` is the declared type (`"CDATA"` when
    /// undeclared).
    pub fn add_attribute(
        &mut self,
        name: &str,
        kind: &str,
        value: &str,
        default_value: Option<&str>,
        specified: bool,
    ) {
        self.entries.push(ListEntry {
            name: name.to_owned(),
            kind: kind.to_owned(),
            value: value.to_owned(),
            uri: String::new(),
            default_value: default_value.map(str::to_owned),
            specified,
        });
    }

    /// Record the namespace URI resolved for the attribute at `index`
    pub fn set_uri(&mut self, index: usize, uri: &str) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.uri = uri.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name.as_str())
    }

    pub fn type_of(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.kind.as_str())
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.value.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn type_by_name(&self, name: &str) -> Option<&str> {
        self.index_of(name).and_then(|i| self.type_of(i))
    }

    pub fn value_by_name(&self, name: &str) -> Option<&str> {
        self.index_of(name).and_then(|i| self.value_at(i))
    }

    pub fn set_id_attribute_name(&mut self, name: Option<&str>) {
        self.id_attribute_name = name.map(str::to_owned);
    }

    pub fn id_attribute_name(&self) -> Option<&str> {
        self.id_attribute_name.as_deref()
    }
}

impl Attributes for AttributeList {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn qname(&self, index: usize) -> &str {
        &self.entries[index].name
    }

    fn uri(&self, index: usize) -> &str {
        &self.entries[index].uri
    }

    fn value(&self, index: usize) -> &str {
        &self.entries[index].value
    }

    fn is_specified(&self, index: usize) -> bool {
        self.entries[index].specified
    }

    fn default_value(&self, index: usize) -> Option<&str> {
        self.entries[index].default_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source without extended defaulting information
    struct Plain(Vec<(&'static str, &'static str, &'static str)>);

    impl Attributes for Plain {
        fn len(&self) -> usize {
            self.0.len()
        }
        fn qname(&self, index: usize) -> &str {
            self.0[index].0
        }
        fn uri(&self, index: usize) -> &str {
            self.0[index].1
        }
        fn value(&self, index: usize) -> &str {
            self.0[index].2
        }
    }

    #[test]
    fn test_plain_source_defaults() {
        let source = Plain(vec![("id", "", "1")]);
        assert!(source.is_specified(0));
        assert_eq!(source.default_value(0), None);
        assert!(!source.is_empty());
    }

    #[test]
    fn test_attribute_list() {
        let mut list = AttributeList::new();
        list.add_attribute("id", "ID", "main", None, true);
        list.add_attribute("dir", "CDATA", "ltr", Some("ltr"), false);
        list.set_id_attribute_name(Some("id"));
        assert!(list.set_uri(0, "urn:x"));
        assert!(!list.set_uri(5, "urn:x"));

        assert_eq!(Attributes::len(&list), 2);
        assert_eq!(list.type_by_name("id"), Some("ID"));
        assert_eq!(list.value_by_name("dir"), Some("ltr"));
        assert_eq!(list.uri(0), "urn:x");
        assert!(!list.is_specified(1));
        assert_eq!(list.default_value(1), Some("ltr"));
        assert_eq!(list.id_attribute_name(), Some("id"));

        list.clear();
        assert!(Attributes::is_empty(&list));
        assert_eq!(list.name(0), None);
        assert_eq!(list.id_attribute_name(), None);
    }

    #[test]
    fn test_sax_attribute_slice() {
        let attrs = [
            SaxAttribute::new("a", "", "1"),
            SaxAttribute::defaulted("b", "urn:b", "2", false, "2"),
        ];
        let source: &[SaxAttribute] = &attrs;
        assert_eq!(Attributes::len(source), 2);
        assert_eq!(source.qname(1), "b");
        assert_eq!(source.uri(1), "urn:b");
        assert!(!source.is_specified(1));
    }
}
