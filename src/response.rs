//! Acknowledgements of write requests.

use serde_json::{Map, Value};

use crate::json;

/// What the bridge confirmed after a write.
///
/// The bridge answers writes with a list of `{"success": {<address>: <value>}}`
/// entries; this collects them into one map keyed by address.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use hue_lights_rs::Ack;
///
/// let ack = Ack::from_document(&json!([
///     {"success": {"/lights/1/state/on": true}},
///     {"success": {"/lights/1/state/bri": 200}}
/// ]));
/// assert_eq!(ack.get("/lights/1/state/bri"), Some(&json!(200)));
/// assert_eq!(ack.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ack {
    confirmed: Map<String, Value>,
}

impl Ack {
    pub fn from_document(doc: &Value) -> Self {
        let mut confirmed = Map::new();
        for success in json::find_all(doc, "success") {
            match success {
                Value::Object(entries) => {
                    confirmed.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                // DELETE answers with a plain string, e.g. "/lights/1 deleted"
                Value::String(message) => {
                    confirmed.insert(message.clone(), Value::Bool(true));
                }
                _ => {}
            }
        }
        Ack { confirmed }
    }

    pub fn get(&self, address: &str) -> Option<&Value> {
        self.confirmed.get(address)
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.confirmed.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.confirmed.iter()
    }
}
