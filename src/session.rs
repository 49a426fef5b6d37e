//! The caller's view of the bridge: selected bridge, credential and cached lists.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::bridge::BridgeInfo;
use crate::client::BridgeClient;
use crate::config::ClientConfig;
use crate::discovery;
use crate::errors::Error;
use crate::group::Group;
use crate::history::MessageHistory;
use crate::lamp::Lamp;
use crate::registration;

type Result<T> = std::result::Result<T, Error>;

/// The persistable part of a session.
///
/// # Examples
///
/// ```
/// use hue_lights_rs::{BridgeInfo, SessionState};
///
/// let state = SessionState {
///     current: Some(BridgeInfo::new("A", "10.0.0.2")),
///     known_bridges: vec![BridgeInfo::new("A", "10.0.0.2")],
/// };
/// let text = state.serialize().unwrap();
/// assert_eq!(SessionState::restore(Some(&text)), Some(state));
/// assert_eq!(SessionState::restore(Some("")), None);
/// assert_eq!(SessionState::restore(None), None);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current: Option<BridgeInfo>,
    pub known_bridges: Vec<BridgeInfo>,
}

impl SessionState {
    pub fn serialize(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::JsonDump)
    }

    /// Decode what [`SessionState::serialize`] produced.
    ///
    /// Missing, empty and malformed input all yield `None`: no saved session
    /// is the normal first-run situation. `known_bridges` must be present,
    /// so an unrelated JSON object is not mistaken for an empty session.
    pub fn restore(text: Option<&str>) -> Option<Self> {
        let text = text.filter(|t| !t.trim().is_empty())?;
        match serde_json::from_str(text) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("ignoring stored session: {e}");
                None
            }
        }
    }
}

/// Named slots of text kept across runs, e.g. a preferences file.
pub trait SessionStore {
    fn load(&self, slot: &str) -> Option<String>;
    fn save(&mut self, slot: &str, value: String);
}

/// A [`SessionStore`] that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, slot: &str) -> Option<String> {
        self.slots.get(slot).cloned()
    }

    fn save(&mut self, slot: &str, value: String) {
        self.slots.insert(slot.to_string(), value);
    }
}

/// One caller's connection to the bridges of its network.
///
/// A session walks through discovery, registration and then ongoing lamp and
/// group control:
///
/// ```ignore
/// let mut session = Session::new()?;
/// if !session.restore_from(&store) {
///     session.discover().await?;
///     loop {
///         match session.register("my_app", "desk").await {
///             Ok(_) => break,
///             Err(e) if e.is_link_button_not_pressed() => wait_for_button().await,
///             Err(e) => return Err(e),
///         }
///     }
///     session.save_to(&mut store)?;
/// }
/// session.update_lamps().await?;
/// ```
///
/// Cached lamp and group lists are replaced wholesale on each refresh. When
/// several tasks refresh through a shared session, the last completion wins.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    config: ClientConfig,
    state: SessionState,
    lamps: Vec<Lamp>,
    groups: Vec<Group>,
    history: Arc<Mutex<MessageHistory>>,
}

impl Session {
    /// Slot name used by [`Session::save_to`] and [`Session::restore_from`].
    pub const STORE_SLOT: &'static str = "StoredHueInformation";

    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = config.build_http_client()?;
        Ok(Self::with_http(http, config))
    }

    /// Use an existing HTTP client; only the non-transport settings of
    /// `config` apply.
    pub fn with_http(http: reqwest::Client, config: ClientConfig) -> Self {
        let history = MessageHistory::with_max_entries(config.history_capacity);
        Session {
            http,
            config,
            state: SessionState::default(),
            lamps: Vec::new(),
            groups: Vec::new(),
            history: Arc::new(Mutex::new(history)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_bridge(&self) -> Option<&BridgeInfo> {
        self.state.current.as_ref()
    }

    pub fn known_bridges(&self) -> &[BridgeInfo] {
        &self.state.known_bridges
    }

    pub fn lamps(&self) -> &[Lamp] {
        &self.lamps
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn lamp(&self, id: &str) -> Option<&Lamp> {
        self.lamps.iter().find(|lamp| lamp.id() == id)
    }

    /// Make one of the known bridges the current one.
    pub fn select_bridge(&mut self, id: &str) -> bool {
        let Some(bridge) = self.state.known_bridges.iter().find(|b| b.id == id) else {
            return false;
        };
        self.state.current = Some(bridge.clone());
        true
    }

    /// Use a bridge that discovery did not report, e.g. one entered by hand.
    pub fn set_current_bridge(&mut self, bridge: BridgeInfo) {
        self.remember(&bridge);
        self.state.current = Some(bridge);
    }

    /// Ask the directory service for bridges and remember the answer.
    ///
    /// Bridges seen before keep their username and registration names; only
    /// address, MAC address and name are refreshed. Registered bridges the
    /// directory no longer lists are kept at the end. The first bridge found
    /// becomes the current one if none was selected.
    pub async fn discover(&mut self) -> Result<&[BridgeInfo]> {
        let bridges = discovery::discover_bridges(&self.http, &self.config.discovery_url).await?;
        debug!("discovered {} bridge(s)", bridges.len());
        self.merge_discovered(bridges);
        Ok(&self.state.known_bridges)
    }

    /// Register with the current bridge and keep the username it hands out.
    ///
    /// Fails with API error 101 until the bridge's link button is pressed;
    /// call again after prompting the user.
    pub async fn register(&mut self, application_name: &str, device_name: &str) -> Result<String> {
        let bridge = self
            .state
            .current
            .as_ref()
            .filter(|b| b.has_address())
            .ok_or(Error::NoBridgeSelected)?;

        let username = registration::register_with_history(
            &self.http,
            &bridge.api_url(),
            application_name,
            device_name,
            Some(&self.history),
        )
        .await?;

        let mut registered = bridge.clone();
        registered.username.clone_from(&username);
        registered.application_name = application_name.to_string();
        registered.device_name = device_name.to_string();
        self.remember(&registered);
        self.state.current = Some(registered);
        Ok(username)
    }

    /// Register again using the names stored on the current bridge.
    pub async fn register_current(&mut self) -> Result<String> {
        let (application_name, device_name) = match &self.state.current {
            Some(bridge) => (bridge.application_name.clone(), bridge.device_name.clone()),
            None => return Err(Error::NoBridgeSelected),
        };
        self.register(&application_name, &device_name).await
    }

    /// A client for the current bridge, sharing this session's HTTP pool and history.
    pub fn client(&self) -> Result<BridgeClient> {
        let bridge = self.state.current.as_ref().ok_or(Error::NoBridgeSelected)?;
        BridgeClient::with_history(self.http.clone(), bridge, Arc::clone(&self.history))
    }

    /// Refresh the cached lamp list from the current bridge.
    pub async fn update_lamps(&mut self) -> Result<&[Lamp]> {
        let lamps = self.client()?.list_lamps().await?;
        self.replace_lamps(lamps);
        Ok(&self.lamps)
    }

    /// Refresh the cached group list from the current bridge.
    pub async fn update_groups(&mut self) -> Result<&[Group]> {
        let groups = self.client()?.list_groups().await?;
        self.replace_groups(groups);
        Ok(&self.groups)
    }

    pub fn replace_lamps(&mut self, lamps: Vec<Lamp>) {
        self.lamps = lamps;
    }

    pub fn replace_groups(&mut self, groups: Vec<Group>) {
        self.groups = groups;
    }

    pub fn serialize(&self) -> Result<String> {
        self.state.serialize()
    }

    /// Replace the current and known bridges with a serialized state.
    ///
    /// Returns `false` and changes nothing if `text` is missing, empty or
    /// malformed.
    pub fn restore(&mut self, text: Option<&str>) -> bool {
        match SessionState::restore(text) {
            Some(state) => {
                self.state = state;
                true
            }
            None => false,
        }
    }

    pub fn save_to<S: SessionStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.save(Self::STORE_SLOT, self.serialize()?);
        Ok(())
    }

    pub fn restore_from<S: SessionStore + ?Sized>(&mut self, store: &S) -> bool {
        let stored = store.load(Self::STORE_SLOT);
        self.restore(stored.as_deref())
    }

    pub async fn history(&self) -> MessageHistory {
        self.history.lock().await.clone()
    }

    /// Returns diagnostics about the session and its recent requests.
    pub async fn diagnostics(&self) -> Value {
        let history = self.history.lock().await;
        json!({
            "current_bridge": self.state.current.as_ref().map(|b| json!({
                "id": b.id,
                "name": b.name,
                "ip_address": b.ip_address,
                "registered": b.has_credential(),
            })),
            "known_bridges": self.state.known_bridges.len(),
            "lamps": self.lamps.len(),
            "groups": self.groups.len(),
            "history": serde_json::to_value(history.summary()).unwrap_or(Value::Null),
        })
    }

    fn merge_discovered(&mut self, bridges: Vec<BridgeInfo>) {
        let previous = std::mem::take(&mut self.state.known_bridges);
        let registered: Vec<&BridgeInfo> = previous
            .iter()
            .chain(self.state.current.as_ref())
            .filter(|b| b.has_credential())
            .collect();

        let mut merged: Vec<BridgeInfo> = bridges
            .into_iter()
            .map(|mut found| {
                if let Some(known) = registered.iter().find(|b| b.id == found.id) {
                    found.username.clone_from(&known.username);
                    found.application_name.clone_from(&known.application_name);
                    found.device_name.clone_from(&known.device_name);
                }
                found
            })
            .collect();
        for known in &previous {
            if known.has_credential() && !merged.iter().any(|b| b.id == known.id) {
                debug!("keeping registered bridge {:?} missing from the directory", known.id);
                merged.push(known.clone());
            }
        }

        self.state.current = match self.state.current.take() {
            Some(current) => Some(
                merged
                    .iter()
                    .find(|b| b.id == current.id)
                    .cloned()
                    .unwrap_or(current),
            ),
            None => merged.first().cloned(),
        };
        self.state.known_bridges = merged;
    }

    fn remember(&mut self, bridge: &BridgeInfo) {
        match self
            .state
            .known_bridges
            .iter_mut()
            .find(|known| known.id == bridge.id)
        {
            Some(known) => {
                known.update(bridge);
            }
            None => self.state.known_bridges.push(bridge.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::with_http(reqwest::Client::new(), ClientConfig::default())
    }

    fn registered_bridge() -> BridgeInfo {
        BridgeInfo {
            id: "A".into(),
            name: "Philips hue".into(),
            ip_address: "10.0.0.2".into(),
            mac_address: "00:17:88:01:02:03".into(),
            username: "secret".into(),
            application_name: "app".into(),
            device_name: "desk".into(),
        }
    }

    #[test]
    fn test_round_trip_is_field_for_field() {
        let mut s = session();
        s.set_current_bridge(registered_bridge());
        s.set_current_bridge(BridgeInfo::new("B", "10.0.0.3"));

        let text = s.serialize().unwrap();
        let mut restored = session();
        assert!(restored.restore(Some(&text)));
        assert_eq!(restored.state(), s.state());
        assert_eq!(restored.known_bridges()[0], registered_bridge());
        assert_eq!(restored.current_bridge().unwrap().id, "B");
    }

    #[test]
    fn test_restore_empty_or_missing_is_noop() {
        let mut s = session();
        s.set_current_bridge(registered_bridge());
        let before = s.state().clone();

        assert!(!s.restore(None));
        assert!(!s.restore(Some("")));
        assert!(!s.restore(Some("{not json")));
        assert!(!s.restore(Some(r#"{"unrelated": 1}"#)));
        assert!(!s.restore(Some("[]")));
        assert_eq!(s.state(), &before);

        assert_eq!(
            SessionState::restore(Some(r#"{"known_bridges": []}"#)),
            Some(SessionState::default())
        );
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::new();
        let mut s = session();
        assert!(!s.restore_from(&store));

        s.set_current_bridge(registered_bridge());
        s.save_to(&mut store).unwrap();
        assert!(store.load(Session::STORE_SLOT).is_some());

        let mut restored = session();
        assert!(restored.restore_from(&store));
        assert_eq!(restored.current_bridge(), Some(&registered_bridge()));
    }

    #[test]
    fn test_select_bridge() {
        let mut s = session();
        s.set_current_bridge(BridgeInfo::new("A", "10.0.0.2"));
        s.set_current_bridge(BridgeInfo::new("B", "10.0.0.3"));

        assert!(s.select_bridge("A"));
        assert_eq!(s.current_bridge().unwrap().ip_address, "10.0.0.2");
        assert!(!s.select_bridge("missing"));
        assert_eq!(s.current_bridge().unwrap().id, "A");
    }

    #[test]
    fn test_client_requires_registration() {
        let mut s = session();
        assert!(matches!(s.client(), Err(Error::NoBridgeSelected)));

        s.set_current_bridge(BridgeInfo::new("A", "10.0.0.2"));
        assert!(matches!(s.client(), Err(Error::NotRegistered(_))));

        s.set_current_bridge(registered_bridge());
        assert!(s.client().is_ok());
    }

    #[test]
    fn test_replace_lamps_is_wholesale() {
        let mut s = session();
        s.replace_lamps(vec![Lamp::new("1"), Lamp::new("2")]);
        s.replace_lamps(vec![Lamp::new("3")]);
        assert_eq!(s.lamps().len(), 1);
        assert!(s.lamp("3").is_some());
        assert!(s.lamp("1").is_none());
    }
}
