//! A markdown document split into YAML header and body.

use std::fmt;
use std::sync::Arc;

use super::codec::{HeaderCodec, YamlCodec};
use super::merge::MergeRule;
use super::types::{DEFAULT_DELIMITER, FrontmatterError, HeaderMapping, KeyOrder};

/// Header plus body of one markdown file.
///
/// Built empty, filled by [`load`](Self::load), written back with
/// [`dumps`](Self::dumps).
#[derive(Clone)]
pub struct FrontmatterDocument {
    delimiter: String,
    key_order: KeyOrder,
    codec: Arc<dyn HeaderCodec>,
    header: Option<HeaderMapping>,
    body: Option<String>,
}

impl FrontmatterDocument {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            key_order: KeyOrder::default(),
            codec: Arc::new(YamlCodec),
            header: None,
            body: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    pub fn with_codec(mut self, codec: impl HeaderCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    /// Split `text` into header and body.
    ///
    /// The text must open with the delimiter (leading whitespace aside) and
    /// contain it at least twice. Everything after the second delimiter is
    /// the body, including any further delimiters. A delimiter occurring
    /// inside the header itself is not supported.
    pub fn load(&mut self, text: &str) -> Result<(), FrontmatterError> {
        if self.delimiter.is_empty() {
            return Err(FrontmatterError::MalformedDocument("empty delimiter".to_string()));
        }

        let sections: Vec<&str> = text.split(self.delimiter.as_str()).collect();

        if !sections[0].trim().is_empty() {
            let lead: String = sections[0].chars().take(40).collect();
            return Err(FrontmatterError::MalformedDocument(format!(
                "does not start with '{}' frontmatter, found {lead:?}",
                self.delimiter
            )));
        }
        if sections.len() < 3 {
            return Err(FrontmatterError::MalformedDocument(format!(
                "expected opening and closing '{}', found {} section(s)",
                self.delimiter,
                sections.len()
            )));
        }

        self.header = Some(self.codec.parse(sections[1])?);
        self.body = Some(sections[2..].join(self.delimiter.as_str()));
        Ok(())
    }

    /// Parse `text` with default settings.
    pub fn parse(text: &str) -> Result<Self, FrontmatterError> {
        let mut doc = Self::new();
        doc.load(text)?;
        Ok(doc)
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn key_order(&self) -> &KeyOrder {
        &self.key_order
    }

    pub fn header(&self) -> Option<&HeaderMapping> {
        self.header.as_ref()
    }

    pub fn set_header(&mut self, header: HeaderMapping) {
        self.header = Some(header);
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    /// Run `rules` over the header in order.
    ///
    /// On error the header is left as it was before the first rule.
    pub fn apply(&mut self, rules: &[MergeRule]) -> Result<(), FrontmatterError> {
        let mut header = self.header.clone().ok_or(FrontmatterError::IncompleteDocument)?;
        for rule in rules {
            header = rule.apply(header)?;
        }
        self.header = Some(header);
        Ok(())
    }

    /// Render the document with its header keys in canonical order.
    pub fn dumps(&self) -> Result<String, FrontmatterError> {
        let (Some(header), Some(body)) = (&self.header, &self.body) else {
            return Err(FrontmatterError::IncompleteDocument);
        };

        let ordered = self.key_order.apply(header);
        let yaml = self.codec.dump(&ordered)?;

        Ok([self.delimiter.as_str(), yaml.trim(), self.delimiter.as_str(), body.trim_start()]
            .join("\n"))
    }
}

impl Default for FrontmatterDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrontmatterDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrontmatterDocument")
            .field("delimiter", &self.delimiter)
            .field("key_order", &self.key_order)
            .field("header", &self.header)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
