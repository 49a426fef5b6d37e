//! Lamp and group operations on a registered bridge.

use std::sync::Arc;

use log::debug;
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::bridge::BridgeInfo;
use crate::errors::Error;
use crate::group::Group;
use crate::history::MessageHistory;
use crate::json;
use crate::keys;
use crate::lamp::{Lamp, LampState};
use crate::parameter::{Parameter, ParameterSet};
use crate::request::{self, Request};
use crate::response::Ack;
use crate::types::Color;

type Result<T> = std::result::Result<T, Error>;

/// Talks to the lamps and groups of one bridge on behalf of a registered user.
///
/// Cloning is cheap; clones share the HTTP connection pool and the request
/// history, so a clone can be moved into a spawned task. Each call performs
/// exactly one HTTP exchange and calls on unrelated lamps may run
/// concurrently. Nothing serializes writes to the same lamp.
///
/// # Example
///
/// ```ignore
/// let mut bridge = BridgeInfo::new("001788fffe123456", "192.168.1.20");
/// bridge.username = "83b7780291a6ceffbe0bd049104df".into();
///
/// let client = BridgeClient::new(reqwest::Client::new(), &bridge)?;
/// for lamp in client.list_lamps().await? {
///     client.set_color(lamp.id(), &Color::rgb(255, 0, 0), []).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: String,
    history: Arc<Mutex<MessageHistory>>,
}

impl BridgeClient {
    /// Create a client for `bridge`, which must have an address and a username.
    pub fn new(http: reqwest::Client, bridge: &BridgeInfo) -> Result<Self> {
        Self::with_history(http, bridge, Arc::new(Mutex::new(MessageHistory::new())))
    }

    pub(crate) fn with_history(
        http: reqwest::Client,
        bridge: &BridgeInfo,
        history: Arc<Mutex<MessageHistory>>,
    ) -> Result<Self> {
        if !bridge.has_address() {
            return Err(Error::NoBridgeSelected);
        }
        if !bridge.has_credential() {
            return Err(Error::NotRegistered(bridge.id.clone()));
        }
        Ok(BridgeClient {
            http,
            base_url: bridge.user_url(),
            history,
        })
    }

    pub async fn history(&self) -> MessageHistory {
        self.history.lock().await.clone()
    }

    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }

    /// Fetch every lamp known to the bridge.
    ///
    /// Entries that are not objects are skipped; an object entry that lacks a
    /// required field fails the whole listing.
    pub async fn list_lamps(&self) -> Result<Vec<Lamp>> {
        let doc = self.send(Method::GET, "/lights", None).await?;
        lamps_from(&doc)
    }

    /// Fetch every group known to the bridge; entries without a name are skipped.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let doc = self.send(Method::GET, "/groups", None).await?;
        groups_from(&doc)
    }

    /// Fetch a single lamp by id.
    pub async fn get_lamp(&self, id: &str) -> Result<Lamp> {
        let mut lamp = Lamp::new(id);
        self.fetch_lamp(&mut lamp).await?;
        Ok(lamp)
    }

    /// Refresh `lamp` in place from the bridge.
    pub async fn fetch_lamp(&self, lamp: &mut Lamp) -> Result<()> {
        let doc = self
            .send(Method::GET, &format!("/lights/{}", lamp.id()), None)
            .await?;
        lamp.update_from_json(&doc)
    }

    /// Change lamp attributes, e.g. `[Parameter::on(true)]`.
    ///
    /// Parameters are merged by key into one JSON object; a repeated key keeps
    /// its last value.
    pub async fn set_lamp_state<I>(&self, id: &str, params: I) -> Result<Ack>
    where
        I: IntoIterator<Item = Parameter>,
    {
        let params: ParameterSet = params.into_iter().collect();
        self.write(Method::PUT, &format!("/lights/{id}/state"), &params)
            .await
    }

    /// Send a complete state: on, brightness, hue, saturation, alert, effect
    /// and transition time.
    pub async fn set_lamp_full_state(&self, id: &str, state: &LampState) -> Result<Ack> {
        self.set_lamp_state(id, state.to_parameters()).await
    }

    /// Set a lamp to an RGB color, together with any `extra` parameters.
    ///
    /// The color's hue, saturation and brightness win over the same keys in
    /// `extra`.
    pub async fn set_color<I>(&self, id: &str, color: &Color, extra: I) -> Result<Ack>
    where
        I: IntoIterator<Item = Parameter>,
    {
        let mut params: ParameterSet = extra.into_iter().collect();
        params.extend(Parameter::color(color));
        self.set_lamp_state(id, params).await
    }

    pub async fn set_lamp_name(&self, id: &str, name: &str) -> Result<Ack> {
        let params = ParameterSet::from(vec![Parameter::name(name)]);
        self.write(Method::PUT, &format!("/lights/{id}"), &params)
            .await
    }

    /// Delete a lamp from the bridge. The bridge forgets the lamp until it is
    /// searched for again.
    pub async fn delete_lamp(&self, id: &str) -> Result<Ack> {
        let doc = self
            .send(Method::DELETE, &format!("/lights/{id}"), None)
            .await?;
        Ok(Ack::from_document(&doc))
    }

    /// Change the state of every lamp in a group at once.
    pub async fn set_group_state<I>(&self, id: &str, params: I) -> Result<Ack>
    where
        I: IntoIterator<Item = Parameter>,
    {
        let params: ParameterSet = params.into_iter().collect();
        self.write(Method::PUT, &format!("/groups/{id}/action"), &params)
            .await
    }

    /// Rename a group and/or replace its members.
    ///
    /// An empty name or member list leaves that attribute as it is.
    pub async fn modify_group<S: AsRef<str>>(
        &self,
        id: &str,
        name: Option<&str>,
        lamp_ids: Option<&[S]>,
    ) -> Result<Ack> {
        let mut params = ParameterSet::new();
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            params.push(Parameter::name(name));
        }
        if let Some(ids) = lamp_ids.filter(|ids| !ids.is_empty()) {
            params.push(Parameter::lights(ids));
        }
        self.write(Method::PUT, &format!("/groups/{id}"), &params)
            .await
    }

    pub async fn rename_group(&self, id: &str, name: &str) -> Result<Ack> {
        self.modify_group::<&str>(id, Some(name), None).await
    }

    pub async fn set_group_lamps<S: AsRef<str>>(&self, id: &str, lamp_ids: &[S]) -> Result<Ack> {
        self.modify_group(id, None, Some(lamp_ids)).await
    }

    /// Create a group; returns the id the bridge assigned, when it reports one.
    pub async fn create_group<S: AsRef<str>>(
        &self,
        name: &str,
        lamp_ids: &[S],
    ) -> Result<Option<String>> {
        let params = ParameterSet::from(vec![Parameter::name(name), Parameter::lights(lamp_ids)]);
        let doc = self
            .send(Method::POST, "/groups", Some(params.to_json()))
            .await?;
        Ok(json::find(&doc, keys::ID).and_then(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }))
    }

    pub async fn delete_group(&self, id: &str) -> Result<Ack> {
        let doc = self
            .send(Method::DELETE, &format!("/groups/{id}"), None)
            .await?;
        Ok(Ack::from_document(&doc))
    }

    async fn write(&self, method: Method, resource: &str, params: &ParameterSet) -> Result<Ack> {
        if params.is_empty() {
            return Err(Error::NoAttribute);
        }
        let doc = self.send(method, resource, Some(params.to_json())).await?;
        Ok(Ack::from_document(&doc))
    }

    async fn send(&self, method: Method, resource: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, resource);
        let mut request = Request::new(method, &url, resource);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        request::execute(&self.http, request, Some(&self.history)).await
    }
}

fn lamps_from(doc: &Value) -> Result<Vec<Lamp>> {
    let Value::Object(entries) = doc else {
        return Err(Error::malformed("expected a map of lamps", doc));
    };

    let mut lamps = Vec::with_capacity(entries.len());
    for (id, entry) in entries {
        if !entry.is_object() {
            debug!("skipping lamp {id:?}: not an object");
            continue;
        }
        lamps.push(Lamp::from_json(id, entry)?);
    }
    Ok(lamps)
}

fn groups_from(doc: &Value) -> Result<Vec<Group>> {
    let Value::Object(entries) = doc else {
        return Err(Error::malformed("expected a map of groups", doc));
    };

    Ok(entries
        .iter()
        .filter_map(|(id, entry)| match Group::from_json(id, entry) {
            Ok(group) => Some(group),
            Err(e) => {
                debug!("skipping group {id:?}: {e}");
                None
            }
        })
        .collect())
}
