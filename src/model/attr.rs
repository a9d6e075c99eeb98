//! JSON attribute helpers for model documents

use serde_json::{Map, Value};

use super::types::{attr_path_slice, ATTR_PATH_SEPARATOR};

/// Look up the attribute at a dot path; an empty path is the document itself
pub fn lookup_attr<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    if path.trim_start_matches(ATTR_PATH_SEPARATOR).is_empty() {
        return Some(doc);
    }
    attr_path_slice(path)
        .into_iter()
        .try_fold(doc, |current, key| current.get(key))
}

/// Copy of `doc` without the given top-level attributes
pub fn trim_attrs(doc: &Value, keys: &[&str]) -> Value {
    match doc {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    }
}
