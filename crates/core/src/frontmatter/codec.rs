//! Pluggable header parse/dump strategies.

use serde_yaml::Value;

use super::emitter;
use super::types::{FrontmatterError, HeaderMapping};

/// Converts between header text and a [`HeaderMapping`].
pub trait HeaderCodec: Send + Sync {
    fn parse(&self, text: &str) -> Result<HeaderMapping, FrontmatterError>;
    fn dump(&self, header: &HeaderMapping) -> Result<String, FrontmatterError>;
}

/// YAML via `serde_yaml`, dumped with leaf collections in flow style.
///
/// Flow-style lists (`bibliography: [../refs.bib]`) are what citation tooling
/// such as PandocCiter expects to find on a single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl HeaderCodec for YamlCodec {
    fn parse(&self, text: &str) -> Result<HeaderMapping, FrontmatterError> {
        if text.trim().is_empty() {
            return Ok(HeaderMapping::new());
        }

        match serde_yaml::from_str::<Value>(text)? {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(HeaderMapping::new()),
            other => Err(FrontmatterError::MalformedDocument(format!(
                "frontmatter must be a mapping, found {}",
                kind_name(&other)
            ))),
        }
    }

    fn dump(&self, header: &HeaderMapping) -> Result<String, FrontmatterError> {
        emitter::to_yaml(header)
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
