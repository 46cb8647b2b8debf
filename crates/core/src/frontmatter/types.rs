//! Frontmatter types and data structures.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::merge::MergeError;

/// Parsed YAML header: an insertion-ordered mapping of YAML values.
pub type HeaderMapping = Mapping;

/// Marker opening and closing the header block.
pub const DEFAULT_DELIMITER: &str = "---";

/// Keys that lead the header, in this order, when present.
pub const CANONICAL_KEY_ORDER: [&str; 8] =
    ["title", "desc", "id", "created", "updated", "bibliography", "__defaults__", "traitIds"];

/// Errors that can occur while loading or serializing a document.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("document has no header or body loaded")]
    IncompleteDocument,

    #[error("invalid YAML frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("failed to emit frontmatter: {0}")]
    Emit(String),

    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Preferred ordering of header keys.
///
/// Keys listed here come first, in list order. Remaining header keys follow
/// in the order they were first seen. Listed keys missing from the header are
/// skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOrder {
    keys: Vec<String>,
}

impl KeyOrder {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { keys: keys.into_iter().map(Into::into).collect() }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Configured keys followed by header keys not already listed.
    pub fn effective(&self, header: &HeaderMapping) -> Vec<Value> {
        let mut order: Vec<Value> = Vec::with_capacity(self.keys.len() + header.len());
        for key in &self.keys {
            let key = Value::String(key.clone());
            if !order.contains(&key) {
                order.push(key);
            }
        }
        for key in header.keys() {
            if !order.contains(key) {
                order.push(key.clone());
            }
        }
        order
    }

    /// A copy of `header` with its entries rearranged into this order.
    pub fn apply(&self, header: &HeaderMapping) -> HeaderMapping {
        self.effective(header)
            .into_iter()
            .filter_map(|key| {
                let value = header.get(&key)?.clone();
                Some((key, value))
            })
            .collect()
    }
}

impl Default for KeyOrder {
    fn default() -> Self {
        Self::new(CANONICAL_KEY_ORDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(mapping: &HeaderMapping) -> Vec<&str> {
        mapping.keys().filter_map(Value::as_str).collect()
    }

    fn header(yaml: &str) -> HeaderMapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn canonical_keys_first_then_first_seen() {
        let h = header("traitIds: []\ntitle: T\nextra: 1\n");
        let ordered = KeyOrder::default().apply(&h);
        assert_eq!(keys(&ordered), vec!["title", "traitIds", "extra"]);
    }

    #[test]
    fn short_canonical_list() {
        let h = header("traitIds: []\ntitle: T\nextra: 1\n");
        let ordered = KeyOrder::new(["title", "desc", "id"]).apply(&h);
        assert_eq!(keys(&ordered), vec!["title", "traitIds", "extra"]);
    }

    #[test]
    fn absent_canonical_keys_are_dropped() {
        let h = header("zeta: 1\nid: abc\nalpha: 2\n");
        let ordered = KeyOrder::default().apply(&h);
        assert_eq!(keys(&ordered), vec!["id", "zeta", "alpha"]);
        assert_eq!(ordered.len(), h.len());
    }

    #[test]
    fn effective_order_is_deduplicated() {
        let order = KeyOrder::new(["a", "b", "a"]);
        let h = header("c: 1\nb: 2\n");
        let names: Vec<String> = order
            .effective(&h)
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
