//! Wiki-link recognition and rewriting.
//!
//! - [`pattern`]: named link syntaxes and whole-text matching
//! - [`resolver`]: target to label/url resolution
//! - [`rule`]: the pandoc node callback tying both together

pub mod pattern;
pub mod resolver;
pub mod rule;

pub use pattern::{LinkPattern, PatternError};
pub use resolver::{FullTarget, LabelRule, LastSegment, LinkNode, LinkResolver};
pub use rule::WikiLinkRule;
