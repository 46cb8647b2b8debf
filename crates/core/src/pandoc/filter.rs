//! Reading, walking and writing a whole pandoc JSON document.

use std::io::{Read, Write};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::walk::{NodeAction, walk};

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("failed to read pandoc JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to write pandoc JSON: {0}")]
    Write(#[source] serde_json::Error),

    #[error("failed to flush filter output: {0}")]
    Flush(#[source] std::io::Error),
}

/// Metadata of a pandoc document.
///
/// Current pandoc emits `{"pandoc-api-version": .., "meta": .., "blocks": ..}`;
/// releases before 1.18 emitted `[{"unMeta": ..}, blocks]`.
pub fn document_meta(doc: &Value) -> Value {
    match doc {
        Value::Object(map) => map.get("meta").cloned().unwrap_or(Value::Null),
        Value::Array(items) => {
            items.first().and_then(|head| head.get("unMeta")).cloned().unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}

/// Read a document from `input`, apply `action` everywhere, write it to `output`.
pub fn run_filter<R: Read, W: Write>(
    input: R,
    mut output: W,
    format: &str,
    action: &dyn NodeAction,
) -> Result<(), FilterError> {
    let doc: Value = serde_json::from_reader(input).map_err(FilterError::Parse)?;
    let meta = document_meta(&doc);

    debug!(format, "walking pandoc document");
    let altered = walk(doc, action, format, &meta);

    serde_json::to_writer(&mut output, &altered).map_err(FilterError::Write)?;
    output.flush().map_err(FilterError::Flush)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pandoc::Rewrite;
    use serde_json::json;

    #[test]
    fn meta_from_current_and_legacy_documents() {
        let current = json!({"pandoc-api-version": [1, 23], "meta": {"a": 1}, "blocks": []});
        assert_eq!(document_meta(&current), json!({"a": 1}));

        let legacy = json!([{"unMeta": {"b": 2}}, []]);
        assert_eq!(document_meta(&legacy), json!({"b": 2}));

        assert_eq!(document_meta(&json!("x")), Value::Null);
    }

    #[test]
    fn round_trips_through_io() {
        let input = r#"{"pandoc-api-version":[1,23],"meta":{},"blocks":[{"t":"Para","c":[{"t":"Str","c":"x"}]}]}"#;
        let upper = |kind: &str, content: &Value, _: &str, _: &Value| match (kind, content) {
            ("Str", Value::String(s)) => {
                Rewrite::Replace(json!({"t": "Str", "c": s.to_uppercase()}))
            }
            _ => Rewrite::Unchanged,
        };

        let mut out = Vec::new();
        run_filter(input.as_bytes(), &mut out, "html", &upper).unwrap();

        let written: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(written["blocks"][0]["c"][0], json!({"t": "Str", "c": "X"}));
        assert_eq!(written["pandoc-api-version"], json!([1, 23]));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let noop = |_: &str, _: &Value, _: &str, _: &Value| Rewrite::Unchanged;
        let err = run_filter("{not json".as_bytes(), Vec::new(), "html", &noop).unwrap_err();
        assert!(matches!(err, FilterError::Parse(_)));
    }
}
