//! Bridge discovery through the online directory service.

use log::debug;
use serde_json::Value;

use crate::bridge::BridgeInfo;
use crate::errors::Error;
use crate::keys;
use crate::request::{self, Request};

type Result<T> = std::result::Result<T, Error>;

/// Query the directory at `url` for bridges on the local network.
///
/// The directory answers with an array of `{id, internalipaddress, macaddress?,
/// name?}` objects. Entries lacking an id or address are skipped; the order of
/// the result follows the directory's answer. No bridge is selected here,
/// that is up to the caller.
///
/// # Examples
///
/// ```ignore
/// let http = reqwest::Client::new();
/// let bridges = discover_bridges(&http, "https://discovery.meethue.com/").await?;
/// for bridge in bridges {
///     println!("  {} - {}", bridge.id, bridge.ip_address);
/// }
/// ```
pub async fn discover_bridges(http: &reqwest::Client, url: &str) -> Result<Vec<BridgeInfo>> {
    let response = request::execute(http, Request::get(url), None).await?;
    parse_bridges(&response)
}

pub(crate) fn parse_bridges(doc: &Value) -> Result<Vec<BridgeInfo>> {
    let Value::Array(entries) = doc else {
        return Err(Error::malformed("expected an array of bridges", doc));
    };

    Ok(entries.iter().filter_map(parse_bridge).collect())
}

fn parse_bridge(entry: &Value) -> Option<BridgeInfo> {
    let id = entry.get(keys::ID).and_then(text);
    let ip = entry.get(keys::INTERNAL_IP).and_then(text);
    let (Some(id), Some(ip)) = (id, ip) else {
        debug!("skipping directory entry without id or address: {entry}");
        return None;
    };

    let mut bridge = BridgeInfo::new(&id, &ip);
    if let Some(mac) = entry.get(keys::MAC_ADDRESS).and_then(text) {
        bridge.mac_address = mac;
    }
    if let Some(name) = entry.get(keys::NAME).and_then(text) {
        bridge.name = name;
    }
    Some(bridge)
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
