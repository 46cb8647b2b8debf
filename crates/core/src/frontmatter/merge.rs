//! Header merge rules: make sure list entries exist without duplicating them.

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use super::types::HeaderMapping;

/// Errors that can occur while merging values into a header.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("merge rule has an empty key path")]
    EmptyKeyPath,
    #[error("field '{0}' is not a mapping, cannot descend into it")]
    NotMapping(String),
    #[error("field '{0}' is not a list, cannot add entries")]
    NotList(String),
}

/// Make `header[key_path[0]][key_path[1]]...` a list containing `required`.
///
/// Missing intermediate keys (or ones holding `null`) become empty mappings.
/// A missing or `null` terminal key is set to `required` as given. An existing
/// list keeps its elements and order; each required value it lacks is
/// appended.
pub fn ensure_list_at(
    mut header: HeaderMapping,
    key_path: &[String],
    required: &[String],
) -> Result<HeaderMapping, MergeError> {
    let (last, parents) = key_path.split_last().ok_or(MergeError::EmptyKeyPath)?;

    let mut current = &mut header;
    for (depth, key) in parents.iter().enumerate() {
        let key = Value::String(key.clone());
        if matches!(current.get(&key), None | Some(Value::Null)) {
            current.insert(key.clone(), Value::Mapping(HeaderMapping::new()));
        }
        let Some(Value::Mapping(next)) = current.get_mut(&key) else {
            return Err(MergeError::NotMapping(dotted(&key_path[..=depth])));
        };
        current = next;
    }

    let key = Value::String(last.clone());
    match current.get_mut(&key) {
        Some(Value::Sequence(items)) => {
            for value in required {
                let value = Value::String(value.clone());
                if !items.contains(&value) {
                    items.push(value);
                }
            }
        }
        None | Some(Value::Null) => {
            let items = required.iter().cloned().map(Value::String).collect();
            current.insert(key, Value::Sequence(items));
        }
        Some(_) => return Err(MergeError::NotList(dotted(key_path))),
    }

    Ok(header)
}

fn dotted(path: &[String]) -> String {
    path.join(".")
}

/// Built-in merge rules selectable from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// `bibliography: [...]`
    Bibliography,
    /// `__defaults__: {filters: [...]}`
    Filters,
}

impl RuleKind {
    /// Rules applied when none are requested.
    pub fn default_set() -> Vec<RuleKind> {
        vec![RuleKind::Bibliography]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Bibliography => "bibliography",
            RuleKind::Filters => "filters",
        }
    }
}

/// One `ensure_list_at` call, packaged for reuse across documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    pub key_path: Vec<String>,
    pub values: Vec<String>,
}

impl MergeRule {
    pub fn new<P, V>(key_path: P, values: V) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            key_path: key_path.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Ensure the `bibliography` list references these files.
    pub fn bibliography<V>(refs: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self::new(["bibliography"], refs)
    }

    /// Ensure the `__defaults__.filters` list declares these filters.
    pub fn filters<V>(filters: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self::new(["__defaults__", "filters"], filters)
    }

    pub fn apply(&self, header: HeaderMapping) -> Result<HeaderMapping, MergeError> {
        ensure_list_at(header, &self.key_path, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(yaml: &str) -> HeaderMapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn strings(value: &Value) -> Vec<&str> {
        value.as_sequence().unwrap().iter().filter_map(Value::as_str).collect()
    }

    #[test]
    fn existing_entry_is_not_duplicated() {
        let h = header("bibliography: [../refs.bib]\n");
        let out = MergeRule::bibliography(["../refs.bib"]).apply(h).unwrap();
        assert_eq!(strings(out.get("bibliography").unwrap()), vec!["../refs.bib"]);
    }

    #[test]
    fn missing_entries_are_appended_in_order() {
        let h = header("bibliography: [../refs.bib]\n");
        let out = MergeRule::bibliography(["../refs.bib", "../other.bib"]).apply(h).unwrap();
        assert_eq!(strings(out.get("bibliography").unwrap()), vec!["../refs.bib", "../other.bib"]);
    }

    #[test]
    fn existing_order_is_kept() {
        let h = header("bibliography: [b.bib, a.bib]\n");
        let out = MergeRule::bibliography(["c.bib", "a.bib"]).apply(h).unwrap();
        assert_eq!(strings(out.get("bibliography").unwrap()), vec!["b.bib", "a.bib", "c.bib"]);
    }

    #[test]
    fn creates_nested_structure() {
        let out = MergeRule::new(["__defaults__", "filters"], ["x.py"])
            .apply(HeaderMapping::new())
            .unwrap();
        assert_eq!(out, header("__defaults__:\n  filters: [x.py]\n"));
    }

    #[test]
    fn null_intermediate_and_terminal_are_filled() {
        let out = MergeRule::filters(["f.py"]).apply(header("__defaults__:\n")).unwrap();
        assert_eq!(out, header("__defaults__: {filters: [f.py]}\n"));

        let out = MergeRule::bibliography(["r.bib"]).apply(header("bibliography: ~\n")).unwrap();
        assert_eq!(strings(out.get("bibliography").unwrap()), vec!["r.bib"]);
    }

    #[test]
    fn keeps_sibling_keys() {
        let h = header("title: T\n__defaults__:\n  to: html\n");
        let out = MergeRule::filters(["f.py"]).apply(h).unwrap();
        assert_eq!(out, header("title: T\n__defaults__:\n  to: html\n  filters: [f.py]\n"));
    }

    #[test]
    fn applying_twice_is_stable() {
        let rule = MergeRule::filters(["f.py"]);
        let once = rule.apply(HeaderMapping::new()).unwrap();
        let twice = rule.apply(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn scalar_in_the_way() {
        let err = MergeRule::filters(["f.py"]).apply(header("__defaults__: 3\n")).unwrap_err();
        assert!(matches!(err, MergeError::NotMapping(path) if path == "__defaults__"));

        let err =
            MergeRule::bibliography(["r.bib"]).apply(header("bibliography: r.bib\n")).unwrap_err();
        assert!(matches!(err, MergeError::NotList(path) if path == "bibliography"));
    }

    #[test]
    fn empty_key_path() {
        let rule = MergeRule::new(Vec::<String>::new(), ["x"]);
        assert!(matches!(rule.apply(HeaderMapping::new()), Err(MergeError::EmptyKeyPath)));
    }

    #[test]
    fn rule_kind_from_config_text() {
        #[derive(Deserialize)]
        struct Wrapper {
            rules: Vec<RuleKind>,
        }
        let w: Wrapper = toml::from_str("rules = [\"bibliography\", \"filters\"]").unwrap();
        assert_eq!(w.rules, vec![RuleKind::Bibliography, RuleKind::Filters]);
        assert_eq!(RuleKind::default_set(), vec![RuleKind::Bibliography]);
    }
}
