//! The per-node rewrite rule used by the pandoc filter.

use serde_json::Value;
use tracing::debug;

use super::pattern::{self, LinkPattern};
use super::resolver::{LinkNode, LinkResolver};
use crate::pandoc::{NodeAction, Rewrite};

/// Pandoc element kind holding a literal text run.
const TEXT_KIND: &str = "Str";

/// Replaces `Str` elements that consist of exactly one wiki-link with a link.
///
/// A text run that merely contains a wiki-link (`"see [[note]] here"` inside a
/// single run, or `"[[note]],"`) is left alone.
#[derive(Debug, Clone)]
pub struct WikiLinkRule {
    pattern: &'static LinkPattern,
    resolver: LinkResolver,
}

impl WikiLinkRule {
    pub fn new(resolver: LinkResolver) -> Self {
        Self { pattern: pattern::dendron(), resolver }
    }

    /// Use another registered link syntax instead of `[[target]]`.
    pub fn with_pattern(mut self, pattern: &'static LinkPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// The link `text` would be rewritten to, if any.
    pub fn rewrite_text(&self, text: &str) -> Option<LinkNode> {
        let target = self.pattern.match_target(text)?;
        Some(self.resolver.resolve(target))
    }
}

impl Default for WikiLinkRule {
    fn default() -> Self {
        Self::new(LinkResolver::default())
    }
}

impl NodeAction for WikiLinkRule {
    fn visit(&self, kind: &str, content: &Value, _format: &str, _meta: &Value) -> Rewrite {
        if kind != TEXT_KIND {
            return Rewrite::Unchanged;
        }
        let Some(text) = content.as_str() else {
            return Rewrite::Unchanged;
        };

        match self.rewrite_text(text) {
            Some(link) => {
                debug!(text, url = %link.url, "rewrote wiki-link");
                Rewrite::Replace(link.to_pandoc())
            }
            None => Rewrite::Unchanged,
        }
    }
}
