//! Frontmatter loading, merging, ordering, and serialization.
//!
//! This module provides functionality to:
//! - Split a markdown document into its YAML header and body
//! - Merge required list entries into the header without duplicates
//! - Re-emit the header in a canonical key order

pub mod codec;
pub mod document;
pub mod emitter;
pub mod merge;
pub mod types;

pub use codec::{HeaderCodec, YamlCodec};
pub use document::FrontmatterDocument;
pub use merge::{MergeError, MergeRule, RuleKind, ensure_list_at};
pub use types::{
    CANONICAL_KEY_ORDER, DEFAULT_DELIMITER, FrontmatterError, HeaderMapping, KeyOrder,
};
