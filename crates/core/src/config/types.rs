use std::path::PathBuf;

use serde::Deserialize;

use crate::frontmatter::{
    CANONICAL_KEY_ORDER, DEFAULT_DELIMITER, FrontmatterDocument, KeyOrder, MergeRule, RuleKind,
};
use crate::links::{FullTarget, LastSegment, LinkResolver, WikiLinkRule};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub frontmatter: FrontmatterConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the batch frontmatter update.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FrontmatterConfig {
    pub delimiter: String,
    /// Keys that lead every header, in this order.
    pub key_order: Vec<String>,
    /// Entries the `bibliography` rule guarantees.
    pub bibliography: Vec<String>,
    /// Entries the `filters` rule guarantees under `__defaults__.filters`.
    pub filters: Vec<String>,
    /// Rules applied when the command line names none.
    pub rules: Vec<RuleKind>,
}

impl Default for FrontmatterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            key_order: CANONICAL_KEY_ORDER.iter().map(ToString::to_string).collect(),
            bibliography: vec![default_bibliography()],
            filters: vec![default_filter()],
            rules: RuleKind::default_set(),
        }
    }
}

impl FrontmatterConfig {
    pub fn rule(&self, kind: RuleKind) -> MergeRule {
        match kind {
            RuleKind::Bibliography => MergeRule::bibliography(self.bibliography.iter().cloned()),
            RuleKind::Filters => MergeRule::filters(self.filters.iter().cloned()),
        }
    }

    /// Merge rules for `kinds`, or for the configured defaults when empty.
    pub fn merge_rules(&self, kinds: &[RuleKind]) -> Vec<MergeRule> {
        let kinds = if kinds.is_empty() { self.rules.as_slice() } else { kinds };
        kinds.iter().map(|kind| self.rule(*kind)).collect()
    }

    pub fn key_order(&self) -> KeyOrder {
        KeyOrder::new(self.key_order.iter().cloned())
    }

    /// An empty document using this delimiter and key order.
    pub fn document(&self) -> FrontmatterDocument {
        FrontmatterDocument::new()
            .with_delimiter(self.delimiter.clone())
            .with_key_order(self.key_order())
    }
}

fn default_bibliography() -> String {
    "../refs.bib".to_string()
}

fn default_filter() -> String {
    "$FILTERS$/get_markdown_links.py".to_string()
}

/// How a wiki-link target becomes link text.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LabelStyle {
    /// `project.notes.idea` -> `idea`
    #[default]
    LastSegment,
    /// `project.notes.idea` -> `project.notes.idea`
    Full,
}

impl LabelStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelStyle::LastSegment => "last-segment",
            LabelStyle::Full => "full",
        }
    }
}

/// Settings for the pandoc link filter.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    pub prefix: String,
    pub extension: String,
    pub label: LabelStyle,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self { prefix: String::new(), extension: "md".to_string(), label: LabelStyle::default() }
    }
}

impl LinksConfig {
    pub fn resolver(&self) -> LinkResolver {
        let resolver = LinkResolver::default()
            .with_prefix(self.prefix.clone())
            .with_extension(self.extension.clone());
        match self.label {
            LabelStyle::LastSegment => resolver.with_label_rule(LastSegment),
            LabelStyle::Full => resolver.with_label_rule(FullTarget),
        }
    }

    pub fn rule(&self) -> WikiLinkRule {
        WikiLinkRule::new(self.resolver())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// File the settings came from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub frontmatter: FrontmatterConfig,
    pub links: LinksConfig,
    pub logging: LoggingConfig,
}
