//! Single request/response exchange with a bridge.

use log::debug;
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::errors::Error;
use crate::history::{MessageHistory, MessageType};
use crate::json;

type Result<T> = std::result::Result<T, Error>;

/// One HTTP request to issue against the bridge or the directory.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    method: Method,
    url: String,
    /// Resource label used in logs and history; never contains the username.
    resource: String,
    body: Option<Value>,
    /// Response key whose values stay out of the history.
    secret: Option<&'static str>,
}

impl Request {
    pub fn new(method: Method, url: &str, resource: &str) -> Self {
        Request {
            method,
            url: url.to_string(),
            resource: resource.to_string(),
            body: None,
            secret: None,
        }
    }

    pub fn get(url: &str) -> Self {
        Self::new(Method::GET, url, url)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn redacting(mut self, key: &'static str) -> Self {
        self.secret = Some(key);
        self
    }

    fn endpoint(&self) -> String {
        format!("{} {}", self.method, self.resource)
    }
}

/// Issue `request`, wait for the answer and interpret it.
///
/// Exactly one exchange happens, there is no retry. The outcome is:
/// - [`Error::Transport`] if no response arrives, or the response has a
///   failure status and a body that is neither JSON nor an error object
/// - [`Error::Decode`] if a successful response is not JSON
/// - [`Error::Api`] if the JSON carries an `error` entry at any depth
/// - the decoded document otherwise
pub(crate) async fn execute(
    http: &reqwest::Client,
    request: Request,
    history: Option<&Mutex<MessageHistory>>,
) -> Result<Value> {
    let endpoint = request.endpoint();
    let secret = request.secret;
    debug!("hue request: {endpoint}");
    if let Some(history) = history {
        let sent = request.body.clone().unwrap_or(Value::Null);
        history.lock().await.record(MessageType::Send, &endpoint, &sent);
    }

    let result = exchange(http, request).await;

    if let Some(history) = history {
        let mut history = history.lock().await;
        match &result {
            Ok(doc) => match secret {
                Some(key) => {
                    history.record(MessageType::Receive, &endpoint, &json::redacted(doc, key))
                }
                None => history.record(MessageType::Receive, &endpoint, doc),
            },
            Err(e) => history.record_error(&endpoint, &e.to_string()),
        }
    }
    result
}

async fn exchange(http: &reqwest::Client, request: Request) -> Result<Value> {
    let mut builder = http.request(request.method, &request.url);
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    let text = response.text().await?;
    debug!("hue response: {status} for {}", request.resource);

    let doc = match serde_json::from_str::<Value>(&text) {
        Ok(doc) => doc,
        Err(_) if !status.is_success() => {
            return Err(Error::transport(format!("bridge answered with status {status}")));
        }
        Err(_) => return Err(Error::undecodable(text)),
    };

    if json::contains_error_marker(&doc) {
        return Err(Error::from_document(&doc));
    }
    if !status.is_success() {
        return Err(Error::transport(format!("bridge answered with status {status}")));
    }
    Ok(doc)
}
