//! YAML emission with leaf collections in flow style.
//!
//! `serde_yaml` only writes block collections. Frontmatter consumers such as
//! citation tooling read `bibliography: [a.bib, b.bib]` on one line, so the
//! header is emitted here instead: a collection whose items are all scalars
//! (or which is empty) is written inline, every other collection as an
//! indented block. The top-level mapping is always a block.

use serde_yaml::{Mapping, Value};

use super::types::FrontmatterError;

const INDENT: usize = 2;

/// Emit `mapping` as a YAML document body (no `---` markers).
pub fn to_yaml(mapping: &Mapping) -> Result<String, FrontmatterError> {
    if mapping.is_empty() {
        return Ok("{}\n".to_string());
    }
    let mut out = String::new();
    block_mapping(mapping, 0, &mut out)?;
    Ok(out)
}

fn block_mapping(
    mapping: &Mapping,
    indent: usize,
    out: &mut String,
) -> Result<(), FrontmatterError> {
    let pad = " ".repeat(indent);
    for (key, value) in mapping {
        let key = flow(key, false)?;
        match value {
            Value::Mapping(inner) if !is_leaf(value) => {
                out.push_str(&format!("{pad}{key}:\n"));
                block_mapping(inner, indent + INDENT, out)?;
            }
            // sequences under a mapping key are not indented further
            Value::Sequence(items) if !is_leaf(value) => {
                out.push_str(&format!("{pad}{key}:\n"));
                block_sequence(items, indent, out)?;
            }
            _ => out.push_str(&format!("{pad}{key}: {}\n", flow(value, false)?)),
        }
    }
    Ok(())
}

fn block_sequence(
    items: &[Value],
    indent: usize,
    out: &mut String,
) -> Result<(), FrontmatterError> {
    let pad = " ".repeat(indent);
    for item in items {
        let nested = match item {
            Value::Mapping(inner) if !is_leaf(item) => {
                let mut nested = String::new();
                block_mapping(inner, indent + INDENT, &mut nested)?;
                nested
            }
            Value::Sequence(inner) if !is_leaf(item) => {
                let mut nested = String::new();
                block_sequence(inner, indent + INDENT, &mut nested)?;
                nested
            }
            _ => {
                out.push_str(&format!("{pad}- {}\n", flow(item, false)?));
                continue;
            }
        };
        // the first nested line shares its row with the dash
        out.push_str(&pad);
        out.push_str("- ");
        out.push_str(&nested[indent + INDENT..]);
    }
    Ok(())
}

/// Collections that are written inline.
fn is_leaf(value: &Value) -> bool {
    match value {
        Value::Sequence(items) => items.iter().all(is_scalar),
        Value::Mapping(mapping) => mapping.iter().all(|(k, v)| is_scalar(k) && is_scalar(v)),
        _ => true,
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Sequence(_) | Value::Mapping(_))
}

/// Single-line rendering of any value.
fn flow(value: &Value, in_flow: bool) -> Result<String, FrontmatterError> {
    Ok(match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_scalar(s, in_flow)?,
        Value::Sequence(items) => {
            let items = items.iter().map(|v| flow(v, true)).collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(mapping) => {
            let entries = mapping
                .iter()
                .map(|(k, v)| Ok(format!("{}: {}", flow(k, true)?, flow(v, true)?)))
                .collect::<Result<Vec<_>, FrontmatterError>>()?;
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, flow(&tagged.value, true)?),
    })
}

/// A string scalar, quoted only where plain style would change its meaning.
fn string_scalar(s: &str, in_flow: bool) -> Result<String, FrontmatterError> {
    if s.contains(['\n', '\r']) {
        return double_quoted(s);
    }

    let rendered =
        serde_yaml::to_string(s).map_err(|e| FrontmatterError::Emit(e.to_string()))?;
    let rendered = rendered.strip_prefix("--- ").unwrap_or(&rendered).trim_end_matches('\n');

    let quoted = rendered.starts_with(['\'', '"']);
    let folded = rendered.contains('\n') || rendered.starts_with(['|', '>']);
    let breaks_flow = in_flow && !quoted && !plain_in_flow(rendered, s);

    if folded || breaks_flow { double_quoted(s) } else { Ok(rendered.to_string()) }
}

/// Whether `rendered` reads back as the string `s` inside a flow collection.
///
/// Plain scalars that are fine in block context can turn into something else
/// between brackets: `?x` becomes a mapping key and `:x` is rejected.
fn plain_in_flow(rendered: &str, s: &str) -> bool {
    if rendered.contains(['[', ']', '{', '}', ',']) {
        return false;
    }
    match serde_yaml::from_str::<Value>(&format!("[{rendered}]")) {
        Ok(Value::Sequence(items)) => items.len() == 1 && items[0].as_str() == Some(s),
        _ => false,
    }
}

/// JSON string syntax is a valid YAML double-quoted scalar.
fn double_quoted(s: &str) -> Result<String, FrontmatterError> {
    serde_json::to_string(s).map_err(|e| FrontmatterError::Emit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(yaml: &str) -> String {
        let mapping: Mapping = serde_yaml::from_str(yaml).unwrap();
        to_yaml(&mapping).unwrap()
    }

    #[test]
    fn scalar_lists_are_inline() {
        assert_eq!(emit("bibliography:\n  - ../refs.bib\n"), "bibliography: [../refs.bib]\n");
        assert_eq!(emit("traitIds: []\n"), "traitIds: []\n");
    }

    #[test]
    fn nested_mapping_is_a_block_with_inline_leaves() {
        let out = emit("__defaults__:\n  filters:\n    - $FILTERS$/get_markdown_links.py\n");
        assert_eq!(out, "__defaults__:\n  filters: [$FILTERS$/get_markdown_links.py]\n");
    }

    #[test]
    fn scalar_mapping_is_inline() {
        assert_eq!(emit("meta:\n  a: 1\n  b: two\n"), "meta: {a: 1, b: two}\n");
    }

    #[test]
    fn sequence_of_mappings() {
        let out = emit("authors:\n  - name: A\n    tags: [x]\n  - name: B\n    tags: [y]\n");
        assert_eq!(out, "authors:\n- name: A\n  tags: [x]\n- name: B\n  tags: [y]\n");
    }

    #[test]
    fn sequence_of_sequences() {
        let out = emit("grid:\n  - [1, 2]\n  - [[3]]\n");
        assert_eq!(out, "grid:\n- [1, 2]\n- - [3]\n");
    }

    #[test]
    fn ambiguous_strings_are_quoted() {
        assert_eq!(emit("a: 'true'\n"), "a: 'true'\n");
        assert_eq!(emit("a: '1'\n"), "a: '1'\n");
        assert_eq!(emit("a: ''\n"), "a: ''\n");
    }

    #[test]
    fn flow_indicators_are_quoted_inside_lists() {
        let out = emit("a: ['x, y', '[z]']\n");
        assert!(out.starts_with("a: ["), "{out}");
        let back: Mapping = serde_yaml::from_str(&out).unwrap();
        let a = back.get("a").unwrap();
        assert_eq!(a[0].as_str(), Some("x, y"));
        assert_eq!(a[1].as_str(), Some("[z]"));
    }

    #[test]
    fn indicator_prefixed_strings_survive_flow_collections() {
        let mut tags = Mapping::new();
        tags.insert(Value::from("?x"), Value::from(1));
        tags.insert(Value::from(":x"), Value::from(2));
        let mut header = Mapping::new();
        header.insert(Value::from("list"), Value::Sequence(vec!["?x".into(), ":x".into()]));
        header.insert(Value::from("map"), Value::Mapping(tags));

        let out = to_yaml(&header).unwrap();
        assert!(out.starts_with("list: ["), "{out}");
        let back: Mapping = serde_yaml::from_str(&out).unwrap();
        assert_eq!(back, header);
    }

    #[test]
    fn indicator_prefixed_strings_in_block_values() {
        let out = emit("a: '?x'\nb: [1]\n");
        assert!(out.ends_with("b: [1]\n"), "{out}");
        let back: Mapping = serde_yaml::from_str(&out).unwrap();
        assert_eq!(back.get("a").and_then(Value::as_str), Some("?x"));
    }

    #[test]
    fn multiline_strings_are_double_quoted() {
        let out = emit("desc: \"line one\\nline two\"\n");
        assert_eq!(out, "desc: \"line one\\nline two\"\n");
    }

    #[test]
    fn empty_mapping() {
        assert_eq!(to_yaml(&Mapping::new()).unwrap(), "{}\n");
    }

    #[test]
    fn output_parses_back_to_the_same_value() {
        let source = "title: T\ncreated: 1700000000\nflag: false\nnothing: null\n\
                      nested:\n  deep:\n    list: [a, b]\n    map: {k: v}\n";
        let original: Mapping = serde_yaml::from_str(source).unwrap();
        let reparsed: Mapping = serde_yaml::from_str(&to_yaml(&original).unwrap()).unwrap();
        assert_eq!(original, reparsed);
    }
}
