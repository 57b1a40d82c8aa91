//! DOM construction settings

/// What to do when one start tag reports the same attribute name twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep both; name lookups find the first one
    #[default]
    Retain,
    /// Fail construction with `DomError::DuplicateAttribute`
    Reject,
}

/// Configuration for a `DomTree`
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Handling of repeated attribute names from the parser
    pub duplicate_attributes: DuplicatePolicy,
}

impl Config {
    /// Configuration that rejects malformed parser input instead of tolerating it
    pub fn strict() -> Self {
        Self {
            duplicate_attributes: DuplicatePolicy::Reject,
        }
    }
}
