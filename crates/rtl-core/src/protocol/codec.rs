//! JSON codec for inbound bridge messages.
//!
//! Wire format: one JSON object per message, discriminated by `"type"`.
//!
//! | `type`            | fields read                                |
//! |-------------------|--------------------------------------------|
//! | `openExternalUrl` | `URL` (string), `forceExternalBrowser`     |
//! | `userAuth`        | `accessToken` (string), `refreshToken` (string) |
//! | `userLogout`      | –                                          |
//! | `appReady`        | –                                          |
//!
//! Decoding is deliberately forgiving about field *types*: a string field that
//! holds a number, `null` or an object reads as the empty string, and
//! `forceExternalBrowser` goes through [`FlexibleBool`].  Only input that is
//! not a JSON object at all is an error.

use serde::{Deserialize, Deserializer};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::protocol::messages::{
    FlexibleBool, IncomingMessage, TYPE_APP_READY, TYPE_OPEN_EXTERNAL_URL, TYPE_USER_AUTH,
    TYPE_USER_LOGOUT, UNSUPPORTED_TYPES,
};

/// Errors that can occur while parsing an inbound message.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The payload is not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Field view of an inbound envelope.
///
/// Every field is optional and type-lenient; interpretation per message type
/// happens in [`parse_message`].
#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    kind: String,

    #[serde(rename = "URL", default, deserialize_with = "lenient_string")]
    url: String,

    #[serde(rename = "forceExternalBrowser", default)]
    force_external_browser: Option<FlexibleBool>,

    #[serde(rename = "accessToken", default, deserialize_with = "lenient_string")]
    access_token: String,

    #[serde(rename = "refreshToken", default, deserialize_with = "lenient_string")]
    refresh_token: String,
}

/// Reads a string field, mapping any non-string JSON value to `""`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn json_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parses one raw message posted by the embedded web app.
///
/// # Errors
///
/// Returns [`ParseError::InvalidJson`] if `raw` is not JSON, and
/// [`ParseError::NotAnObject`] if it is JSON but not an object.  Unknown or
/// missing `type` values are **not** errors; they produce
/// [`IncomingMessage::Unknown`].
///
/// # Example
///
/// ```rust
/// use rtl_core::{parse_message, IncomingMessage};
///
/// let msg = parse_message(r#"{"type":"appReady"}"#).unwrap();
/// assert_eq!(msg, IncomingMessage::AppReady);
/// ```
pub fn parse_message(raw: &str) -> Result<IncomingMessage, ParseError> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(ParseError::NotAnObject(json_kind_name(&value)));
    }
    let envelope = RawEnvelope::deserialize(value)?;

    let msg = match envelope.kind.as_str() {
        TYPE_OPEN_EXTERNAL_URL => IncomingMessage::OpenExternalUrl {
            url: envelope.url,
            force_external: envelope
                .force_external_browser
                .as_ref()
                .map_or(false, FlexibleBool::as_bool),
        },
        TYPE_USER_AUTH => IncomingMessage::UserAuth {
            access_token: envelope.access_token,
            refresh_token: envelope.refresh_token,
        },
        TYPE_USER_LOGOUT => IncomingMessage::UserLogout,
        TYPE_APP_READY => IncomingMessage::AppReady,
        kind if UNSUPPORTED_TYPES.contains(&kind) => IncomingMessage::Unsupported {
            kind: kind.to_string(),
        },
        kind => IncomingMessage::Unknown {
            kind: kind.to_string(),
        },
    };
    Ok(msg)
}

/// Serializes a message into its wire envelope.
///
/// This is the inverse of [`parse_message`] for the four handled types.  It is
/// used by hosts and tests that simulate the web app.
/// `Unsupported` and `Unknown` messages encode as a bare `{"type": …}`.
pub fn encode_message(msg: &IncomingMessage) -> String {
    let value = match msg {
        IncomingMessage::OpenExternalUrl { url, force_external } => json!({
            "type": TYPE_OPEN_EXTERNAL_URL,
            "URL": url,
            "forceExternalBrowser": force_external,
        }),
        IncomingMessage::UserAuth {
            access_token,
            refresh_token,
        } => json!({
            "type": TYPE_USER_AUTH,
            "accessToken": access_token,
            "refreshToken": refresh_token,
        }),
        other => {
            let mut map = Map::new();
            map.insert("type".to_string(), Value::String(other.kind().to_string()));
            Value::Object(map)
        }
    };
    value.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
