//! Lamp groups as kept by the bridge.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Error;
use crate::keys;

type Result<T> = std::result::Result<T, Error>;

/// A group of lamps defined on the bridge.
///
/// Membership is only ever sent to the bridge (on create and modify); the
/// listing keeps id and name.
///
/// # Example
///
/// ```
/// use hue_lights_rs::Group;
///
/// let group = Group::new("3", "Living Room");
/// assert_eq!(group.id(), "3");
/// assert_eq!(group.name(), "Living Room");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Group {
    id: String,
    name: String,
}

impl Group {
    pub fn new(id: &str, name: &str) -> Self {
        Group {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    /// Decode a group from its entry in the bridge's group listing.
    pub fn from_json(id: &str, doc: &Value) -> Result<Self> {
        match doc.get(keys::NAME) {
            Some(Value::String(name)) => Ok(Group::new(id, name)),
            _ => Err(Error::malformed("group has no name", doc)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Update this group's attributes from another group.
    ///
    /// # Example
    ///
    /// ```
    /// use hue_lights_rs::Group;
    ///
    /// let mut group = Group::new("1", "foo");
    /// assert!(group.update(&Group::new("1", "bar")));
    /// assert_eq!(group.name(), "bar");
    /// assert!(!group.update(&Group::new("1", "bar")));
    /// ```
    pub fn update(&mut self, other: &Self) -> bool {
        if self.name == other.name {
            return false;
        }
        self.name.clone_from(&other.name);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_group() {
        let doc = json!({"name": "Kitchen", "lights": ["1", "2"], "type": "Room"});
        assert_eq!(Group::from_json("4", &doc).unwrap(), Group::new("4", "Kitchen"));
    }

    #[test]
    fn test_group_without_name() {
        assert!(Group::from_json("4", &json!({"lights": []})).is_err());
        assert!(Group::from_json("4", &json!({"name": 7})).is_err());
    }
}
