//! Recursive traversal of a pandoc JSON AST.

use serde_json::{Map, Value};

/// What a [`NodeAction`] wants done with the element it was shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Keep the element and descend into it.
    Unchanged,
    /// Put this element in its place.
    Replace(Value),
    /// Put these elements in its place (an empty list deletes it).
    Splice(Vec<Value>),
}

/// Per-element callback invoked by [`walk`].
///
/// `kind` is the element's `"t"` tag, `content` its `"c"` payload (`null`
/// when absent), `format` the output format pandoc passed to the filter and
/// `meta` the document metadata.
pub trait NodeAction {
    fn visit(&self, kind: &str, content: &Value, format: &str, meta: &Value) -> Rewrite;
}

impl<F> NodeAction for F
where
    F: Fn(&str, &Value, &str, &Value) -> Rewrite,
{
    fn visit(&self, kind: &str, content: &Value, format: &str, meta: &Value) -> Rewrite {
        self(kind, content, format, meta)
    }
}

/// Apply `action` to every element of `value`, bottom-up through replacements.
///
/// Elements are only recognised as array items, which is where pandoc keeps
/// blocks and inlines. Replacement elements are walked as well.
pub fn walk(value: Value, action: &dyn NodeAction, format: &str, meta: &Value) -> Value {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match visit_item(&item, action, format, meta) {
                    Rewrite::Unchanged => out.push(walk(item, action, format, meta)),
                    Rewrite::Replace(replacement) => {
                        out.push(walk(replacement, action, format, meta));
                    }
                    Rewrite::Splice(replacements) => {
                        out.extend(
                            replacements.into_iter().map(|r| walk(r, action, format, meta)),
                        );
                    }
                }
            }
            Value::Array(out)
        }
        Value::Object(map) => {
            let walked: Map<String, Value> =
                map.into_iter().map(|(k, v)| (k, walk(v, action, format, meta))).collect();
            Value::Object(walked)
        }
        other => other,
    }
}

fn visit_item(item: &Value, action: &dyn NodeAction, format: &str, meta: &Value) -> Rewrite {
    let Some(kind) = item.get("t").and_then(Value::as_str) else {
        return Rewrite::Unchanged;
    };
    let content = item.get("c").unwrap_or(&Value::Null);
    action.visit(kind, content, format, meta)
}
