use log::warn;
use serde_json::Value;

use crate::json;

/// Error code the bridge reports while its link button has not been pressed.
pub const LINK_BUTTON_NOT_PRESSED: u32 = 101;

/// All error types that can occur when talking to a Hue bridge.
///
/// Every failure coming back from the bridge falls in one of three
/// categories: the request never produced a response
/// ([`Error::Transport`]), the bridge answered with an explicit error object
/// ([`Error::Api`]), or the answer could not be interpreted
/// ([`Error::Decode`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP exchange failed before a usable response was obtained.
    #[error("request failed: {message}")]
    Transport { message: String },

    /// The bridge answered with an `error` object.
    #[error("bridge error {code} at {address:?}: {description}")]
    Api {
        code: u32,
        address: String,
        description: String,
    },

    /// The response was received but is not valid JSON or lacks required fields.
    #[error("failed to decode response ({reason}): {body}")]
    Decode { reason: String, body: String },

    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// NaN and infinities have no JSON representation.
    #[error("{0} cannot be sent as a JSON number")]
    NonFiniteNumber(f64),

    /// Attempted to send a write request with no attributes set.
    #[error("invalid request; no attributes set")]
    NoAttribute,

    /// The operation needs a bridge with an address, and none is selected.
    #[error("no bridge with an address is selected")]
    NoBridgeSelected,

    /// The operation needs a credential, and the selected bridge has none.
    #[error("bridge {0:?} has no registered username")]
    NotRegistered(String),
}

impl Error {
    /// Create a transport error from the failure message of the HTTP layer.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }

    /// Create a decode error for a body that is not valid JSON at all.
    pub fn undecodable(body: impl Into<String>) -> Self {
        Error::Decode {
            reason: "invalid json".to_string(),
            body: body.into(),
        }
    }

    /// Create a decode error for a document that parsed but has the wrong shape.
    pub fn malformed(reason: impl Into<String>, doc: &Value) -> Self {
        Error::Decode {
            reason: reason.into(),
            body: doc.to_string(),
        }
    }

    /// Build an API error out of a document holding an `error` object.
    ///
    /// The `error` object may sit at any depth, the bridge usually wraps it as
    /// `[{"error": {...}}]`. Its `type` must be numeric (a number or a numeric
    /// string); anything else turns into [`Error::Decode`].
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use hue_lights_rs::Error;
    ///
    /// let doc = json!([{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]);
    /// let err = Error::from_document(&doc);
    /// assert!(err.is_link_button_not_pressed());
    /// assert_eq!(err.api_error_code(), Some(101));
    /// ```
    pub fn from_document(doc: &Value) -> Self {
        let Some(Value::Object(error)) = json::find(doc, "error") else {
            return Error::malformed("error marker is not an object", doc);
        };

        let code = match error.get("type") {
            Some(Value::Number(n)) => n.as_u64().and_then(|c| u32::try_from(c).ok()),
            Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
            _ => None,
        };
        let Some(code) = code else {
            return Error::malformed("error type is not numeric", doc);
        };

        Error::Api {
            code,
            address: text_field(error.get("address")),
            description: text_field(error.get("description")),
        }
    }

    /// Returns `true` if no response was obtained.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Returns `true` if the bridge reported an explicit error.
    pub fn is_api_error(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// Returns `true` if the response could not be interpreted.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// The bridge-reported error code, if this is an API error.
    pub fn api_error_code(&self) -> Option<u32> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if registration must be retried after pressing the link button.
    pub fn is_link_button_not_pressed(&self) -> bool {
        self.api_error_code() == Some(LINK_BUTTON_NOT_PRESSED)
    }

    /// Default failure handler: logs every detail of the error and carries on.
    pub fn log(&self) {
        match self {
            Error::Transport { message } => warn!("hue request failed: {message}"),
            Error::Api {
                code,
                address,
                description,
            } => warn!(
                "hue bridge error: code {code}, address {address:?}, description {description:?}"
            ),
            Error::Decode { reason, body } => {
                warn!("hue response could not be decoded ({reason}): {body}")
            }
            other => warn!("hue error: {other}"),
        }
    }
}

impl From<reqwest::Error> for Error {
    /// The URL is dropped: bridge URLs carry the username.
    fn from(err: reqwest::Error) -> Self {
        Error::transport(err.without_url().to_string())
    }
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_from_nested_document() {
        let doc = json!([{
            "error": {
                "type": 3,
                "address": "/lights/7",
                "description": "resource, /lights/7, not available"
            }
        }]);

        let err = Error::from_document(&doc);
        assert!(err.is_api_error());
        assert!(!err.is_transport_error());
        assert!(!err.is_decode_error());
        assert_eq!(
            err,
            Error::Api {
                code: 3,
                address: "/lights/7".into(),
                description: "resource, /lights/7, not available".into(),
            }
        );
    }

    #[test]
    fn test_link_button_is_distinguishable() {
        let pressed = Error::from_document(&json!({"error": {"type": 101}}));
        let other = Error::from_document(&json!({"error": {"type": 1}}));

        assert!(pressed.is_link_button_not_pressed());
        assert!(!other.is_link_button_not_pressed());
        assert_eq!(other.api_error_code(), Some(1));
    }

    #[test]
    fn test_numeric_string_type_is_accepted() {
        let err = Error::from_document(&json!({"error": {"type": "101"}}));
        assert_eq!(err.api_error_code(), Some(101));
    }

    #[test]
    fn test_non_numeric_type_is_a_decode_error() {
        let err = Error::from_document(&json!({"error": {"type": "oops"}}));
        assert!(err.is_decode_error());
        assert_eq!(err.api_error_code(), None);
    }

    #[test]
    fn test_missing_error_object_is_a_decode_error() {
        assert!(Error::from_document(&json!({"error": "bad"})).is_decode_error());
        assert!(Error::from_document(&json!({"ok": true})).is_decode_error());
    }

    #[test]
    fn test_categories() {
        assert!(Error::transport("connection refused").is_transport_error());
        let err = Error::undecodable("<html>");
        assert!(err.is_decode_error());
        assert!(err.to_string().contains("<html>"));
        assert!(!Error::NoBridgeSelected.is_api_error());
    }
}
