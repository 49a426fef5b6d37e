//! Key lookup over decoded JSON documents.
//!
//! Bridge responses wrap the interesting values in varying envelopes
//! (`[{"success": {"username": ...}}]`, `[{"error": {...}}]`, plain maps), so
//! values are located by key anywhere in the tree rather than by fixed path.

use serde_json::Value;

/// Find the first value stored under `key` anywhere in `doc`.
///
/// Arrays are searched element by element. Within an object a direct entry
/// for `key` wins over anything nested below its siblings; otherwise the
/// values are searched depth-first in document order. Scalars are dead ends.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use hue_lights_rs::json::find;
///
/// let doc = json!([{"success": {"username": "abc"}}]);
/// assert_eq!(find(&doc, "username"), Some(&json!("abc")));
/// assert_eq!(find(&doc, "password"), None);
/// ```
pub fn find<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    match doc {
        Value::Array(items) => items.iter().find_map(|item| find(item, key)),
        Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|value| find(value, key))),
        _ => None,
    }
}

/// Collect every value stored under `key` anywhere in `doc`.
///
/// Traversal is depth-first in document order; a matching value is itself
/// searched for further matches.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use hue_lights_rs::json::find_all;
///
/// let doc = json!([{"success": {"id": "1"}}, {"success": {"id": "2"}}]);
/// assert_eq!(find_all(&doc, "id"), vec![&json!("1"), &json!("2")]);
/// ```
pub fn find_all<'a>(doc: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect(doc, key, &mut found);
    found
}

/// Returns `true` if the document carries an `error` entry at any depth.
pub fn contains_error_marker(doc: &Value) -> bool {
    find(doc, "error").is_some()
}

/// Copy of `doc` with every value stored under `key` replaced by a marker.
pub(crate) fn redacted(doc: &Value, key: &str) -> Value {
    match doc {
        Value::Array(items) => Value::Array(items.iter().map(|item| redacted(item, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let value = if k == key {
                        Value::String(REDACTED.to_string())
                    } else {
                        redacted(v, key)
                    };
                    (k.clone(), value)
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

pub(crate) const REDACTED: &str = "<redacted>";

fn collect<'a>(doc: &'a Value, key: &str, found: &mut Vec<&'a Value>) {
    match doc {
        Value::Array(items) => items.iter().for_each(|item| collect(item, key, found)),
        Value::Object(map) => {
            if let Some(value) = map.get(key) {
                found.push(value);
            }
            map.values().for_each(|value| collect(value, key, found));
        }
        _ => {}
    }
}
