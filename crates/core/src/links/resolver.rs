//! Turning a wiki-link target into a plain hyperlink.

use std::fmt;
use std::sync::Arc;

use serde_json::{Value, json};

/// Derives the display label for a link target.
pub trait LabelRule: Send + Sync {
    fn label(&self, target: &str) -> String;
}

/// The last `.`-separated segment: `project.notes.idea` -> `idea`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LastSegment;

impl LabelRule for LastSegment {
    fn label(&self, target: &str) -> String {
        target.rsplit('.').next().unwrap_or(target).to_string()
    }
}

/// The whole target, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTarget;

impl LabelRule for FullTarget {
    fn label(&self, target: &str) -> String {
        target.to_string()
    }
}

impl<F> LabelRule for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn label(&self, target: &str) -> String {
        self(target)
    }
}

/// A hyperlink ready to be spliced into a pandoc document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode {
    pub id: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    /// Display text, emitted as a single `Str` run.
    pub label: String,
    pub url: String,
    pub title: String,
}

impl LinkNode {
    /// Pandoc JSON for this link: `{"t": "Link", "c": [attr, inlines, target]}`.
    pub fn to_pandoc(&self) -> Value {
        let attributes: Vec<Value> =
            self.attributes.iter().map(|(k, v)| json!([k, v])).collect();
        json!({
            "t": "Link",
            "c": [
                [self.id, self.classes, attributes],
                [{ "t": "Str", "c": self.label }],
                [self.url, self.title],
            ],
        })
    }
}

/// Builds [`LinkNode`]s as `prefix + target + "." + extension`.
///
/// Targets are not escaped or validated; a malformed target yields a
/// malformed url.
#[derive(Clone)]
pub struct LinkResolver {
    label_rule: Arc<dyn LabelRule>,
    prefix: String,
    extension: String,
}

impl LinkResolver {
    pub fn new(
        label_rule: impl LabelRule + 'static,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            label_rule: Arc::new(label_rule),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_label_rule(mut self, label_rule: impl LabelRule + 'static) -> Self {
        self.label_rule = Arc::new(label_rule);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn resolve(&self, target: &str) -> LinkNode {
        LinkNode {
            id: String::new(),
            classes: Vec::new(),
            attributes: Vec::new(),
            label: self.label_rule.label(target),
            url: format!("{}{}.{}", self.prefix, target, self.extension),
            title: String::new(),
        }
    }
}

impl Default for LinkResolver {
    fn default() -> Self {
        Self::new(LastSegment, "", "md")
    }
}

impl fmt::Debug for LinkResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkResolver")
            .field("prefix", &self.prefix)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}
