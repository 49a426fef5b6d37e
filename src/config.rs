//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};

use crate::errors::Error;
use crate::history::MessageHistory;

/// Settings shared by every request a [`Session`](crate::Session) makes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use hue_lights_rs::ClientConfig;
///
/// let config: ClientConfig = serde_json::from_str(r#"{"timeout": 2500}"#).unwrap();
/// assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
/// assert_eq!(config.discovery_url, ClientConfig::DEFAULT_DISCOVERY_URL);
/// ```
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Directory service listing the bridges of the caller's network.
    pub discovery_url: String,
    /// Upper bound for a whole request; `None` leaves it to the transport.
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Number of requests and responses kept for diagnostics.
    pub history_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            discovery_url: Self::DEFAULT_DISCOVERY_URL.to_string(),
            timeout: None,
            user_agent: concat!("hue-lights-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            history_capacity: MessageHistory::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_DISCOVERY_URL: &'static str = "https://discovery.meethue.com/";

    /// Build the HTTP client described by this config.
    pub fn build_http_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.as_str());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.history_capacity, 100);
        assert!(config.user_agent.starts_with("hue-lights-rs/"));
    }

    #[test]
    fn test_round_trip() {
        let config = ClientConfig {
            discovery_url: "http://127.0.0.1:9000/".into(),
            timeout: Some(Duration::from_secs(3)),
            ..ClientConfig::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"timeout\":3000"));
        assert_eq!(serde_json::from_str::<ClientConfig>(&text).unwrap(), config);
    }
}
