//! Username registration with a bridge.

use reqwest::Method;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::errors::Error;
use crate::history::MessageHistory;
use crate::json;
use crate::keys;
use crate::request::{self, Request};

type Result<T> = std::result::Result<T, Error>;

/// Ask the bridge at `api_url` (e.g. `http://192.168.1.20/api`) for a username.
///
/// The bridge only hands one out within 30 seconds of its link button being
/// pressed. Until then it answers with error 101, which comes back as an
/// [`Error::Api`] for which [`Error::is_link_button_not_pressed`] holds; prompt
/// the user and call again. Nothing is retried here.
///
/// # Examples
///
/// ```ignore
/// match register(&http, &bridge.api_url(), "my_app", "kitchen tablet").await {
///     Ok(username) => bridge.username = username,
///     Err(e) if e.is_link_button_not_pressed() => println!("press the link button"),
///     Err(e) => return Err(e),
/// }
/// ```
pub async fn register(
    http: &reqwest::Client,
    api_url: &str,
    application_name: &str,
    device_name: &str,
) -> Result<String> {
    register_with_history(http, api_url, application_name, device_name, None).await
}

pub(crate) async fn register_with_history(
    http: &reqwest::Client,
    api_url: &str,
    application_name: &str,
    device_name: &str,
    history: Option<&Mutex<MessageHistory>>,
) -> Result<String> {
    let body = json!({ (keys::DEVICE_TYPE): device_type(application_name, device_name) });
    let request = Request::new(Method::POST, api_url, "/api")
        .with_body(body)
        .redacting(keys::USERNAME);
    let response = request::execute(http, request, history).await?;
    username_from(&response)
}

pub(crate) fn device_type(application_name: &str, device_name: &str) -> String {
    format!("{application_name}#{device_name}")
}

fn username_from(doc: &Value) -> Result<String> {
    match json::find(doc, keys::USERNAME) {
        Some(Value::String(username)) if !username.is_empty() => Ok(username.clone()),
        _ => Err(Error::malformed("response has no username", doc)),
    }
}
