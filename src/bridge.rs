//! Bridge descriptors.

use serde::{Deserialize, Serialize};

/// Everything known about one bridge: where it is and how to talk to it.
///
/// Discovery fills in the id and address (plus name and MAC address when the
/// directory knows them); registration fills in the username.
///
/// # Example
///
/// ```
/// use hue_lights_rs::BridgeInfo;
///
/// let bridge = BridgeInfo::new("001788fffe123456", "192.168.1.20");
/// assert!(bridge.has_address());
/// assert!(!bridge.has_credential());
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeInfo {
    pub id: String,
    pub name: String,
    pub ip_address: String,
    pub mac_address: String,
    /// Username handed out by the bridge at registration.
    pub username: String,
    pub application_name: String,
    pub device_name: String,
}

impl BridgeInfo {
    pub fn new(id: &str, ip_address: &str) -> Self {
        BridgeInfo {
            id: id.to_string(),
            ip_address: ip_address.to_string(),
            ..Self::default()
        }
    }

    pub fn has_address(&self) -> bool {
        !self.ip_address.is_empty()
    }

    pub fn has_credential(&self) -> bool {
        !self.username.is_empty()
    }

    /// Root of the bridge API, e.g. `http://192.168.1.20/api`.
    ///
    /// The address may carry a port (`127.0.0.1:8080`) and may already include
    /// the scheme.
    pub fn api_url(&self) -> String {
        if self.ip_address.contains("://") {
            format!("{}/api", self.ip_address.trim_end_matches('/'))
        } else {
            format!("http://{}/api", self.ip_address)
        }
    }

    /// Root of the authenticated API, e.g. `http://192.168.1.20/api/<username>`.
    pub fn user_url(&self) -> String {
        format!("{}/{}", self.api_url(), self.username)
    }

    pub(crate) fn update(&mut self, other: &Self) -> bool {
        if self == other {
            return false;
        }
        self.clone_from(other);
        true
    }
}
