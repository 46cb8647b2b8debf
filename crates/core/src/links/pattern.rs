//! Named link syntaxes and whole-text matching.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Registry name of the Dendron wiki-link syntax.
pub const DENDRON: &str = "dendron";
/// Registry name of the inline Markdown link syntax.
pub const MARKDOWN: &str = "md";

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regex for link pattern '{0}': {1}")]
    InvalidRegex(String, #[source] regex::Error),

    #[error("link pattern '{name}' has no capture group {group} (it has {available})")]
    GroupOutOfRange { name: String, group: usize, available: usize },

    #[error("unknown link pattern '{0}'")]
    UnknownPattern(String),
}

/// A link syntax: a regex plus the capture group holding the link target.
#[derive(Debug, Clone)]
pub struct LinkPattern {
    name: String,
    regex: Regex,
    target_group: usize,
}

impl LinkPattern {
    /// Compile `raw` and check that `target_group` exists in it.
    ///
    /// The regex is anchored at the start of the text; [`match_target`]
    /// additionally requires the match to run to the end.
    ///
    /// [`match_target`]: LinkPattern::match_target
    pub fn new(
        name: impl Into<String>,
        raw: &str,
        target_group: usize,
    ) -> Result<Self, PatternError> {
        let name = name.into();
        let regex = Regex::new(&format!("^(?:{raw})"))
            .map_err(|e| PatternError::InvalidRegex(name.clone(), e))?;

        // captures_len counts the implicit whole-match group 0
        let available = regex.captures_len() - 1;
        if target_group == 0 || target_group > available {
            return Err(PatternError::GroupOutOfRange { name, group: target_group, available });
        }

        Ok(Self { name, regex, target_group })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_group(&self) -> usize {
        self.target_group
    }

    /// Return the link target if `text` is, in its entirety, one link.
    ///
    /// `"[[a.b]]"` matches; `"see [[a.b]]"`, `"[[a.b]],"` and `"[[a]] [[b]]"`
    /// do not.
    pub fn match_target<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0)?;
        if whole.end() != text.len() {
            return None;
        }
        caps.get(self.target_group).map(|m| m.as_str())
    }
}

static REGISTRY: LazyLock<BTreeMap<&'static str, LinkPattern>> = LazyLock::new(|| {
    let builtins = [
        (DENDRON, r"\[\[(.*?)\]\]", 1),
        (MARKDOWN, r"\[(.*?)\]\((.*?)\)", 2),
    ];

    builtins
        .into_iter()
        .map(|(name, raw, group)| {
            let pattern = LinkPattern::new(name, raw, group).expect("builtin link pattern");
            (name, pattern)
        })
        .collect()
});

/// Look up a built-in pattern by name.
pub fn get(name: &str) -> Result<&'static LinkPattern, PatternError> {
    REGISTRY.get(name).ok_or_else(|| PatternError::UnknownPattern(name.to_string()))
}

/// Names of all built-in patterns, sorted.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// The `[[target]]` wiki-link syntax.
pub fn dendron() -> &'static LinkPattern {
    &REGISTRY[DENDRON]
}

/// The `[label](target)` Markdown link syntax.
pub fn markdown() -> &'static LinkPattern {
    &REGISTRY[MARKDOWN]
}
