//! Message types exchanged across the bridge.
//!
//! # Message flow
//!
//! ```text
//! Web app → Host:  JSON string   →  IncomingMessage   (see codec::parse_message)
//! Host → Web app:  OutboundCommand  →  JavaScript call string
//! ```
//!
//! # Inbound discriminant
//!
//! Every inbound message is a JSON object with a `"type"` field:
//!
//! ```json
//! {"type":"userAuth","accessToken":"…","refreshToken":"…"}
//! {"type":"openExternalUrl","URL":"https://example.com","forceExternalBrowser":"true"}
//! {"type":"userLogout"}
//! {"type":"appReady"}
//! ```
//!
//! Unlike a strict serde tagged enum, unknown `type` values are *not* errors:
//! the embedded app is an untrusted, independently deployed peer, so anything
//! the host does not understand becomes [`IncomingMessage::Unknown`] and is
//! dropped by the session controller.

use serde::Deserialize;

use crate::domain::config::PushTokenType;

// ── Wire discriminants ────────────────────────────────────────────────────────

pub const TYPE_OPEN_EXTERNAL_URL: &str = "openExternalUrl";
pub const TYPE_USER_AUTH: &str = "userAuth";
pub const TYPE_USER_LOGOUT: &str = "userLogout";
pub const TYPE_APP_READY: &str = "appReady";

/// Message types the web app may send that this host recognises but does not
/// implement (location sharing).
pub const UNSUPPORTED_TYPES: [&str; 3] = [
    "locationPermissionRequest",
    "locationPermissionStatus",
    "locationUpdate",
];

// ── Inbound ───────────────────────────────────────────────────────────────────

/// A parsed message from the embedded web app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingMessage {
    /// The web app wants the host to open a URL.
    OpenExternalUrl {
        /// Target URL; may be empty if the web app omitted it.
        url: String,
        /// `true` if the URL must open in the system browser rather than an
        /// in-app browser.
        force_external: bool,
    },

    /// The web app finished its own login.
    ///
    /// Tokens are carried as received; either may be empty.  Use
    /// [`AuthResult::from_tokens`] to obtain the validated pair.
    UserAuth {
        access_token: String,
        refresh_token: String,
    },

    /// The user logged out inside the web app.
    UserLogout,

    /// The web app has loaded and is ready for commands.
    AppReady,

    /// A recognised message type the host does not implement.
    Unsupported {
        /// The `type` value, e.g. `"locationUpdate"`.
        kind: String,
    },

    /// Any other `type` value, including a missing or non-string one
    /// (reported as the empty string).
    Unknown {
        kind: String,
    },
}

impl IncomingMessage {
    /// The wire `type` value of this message.
    pub fn kind(&self) -> &str {
        match self {
            IncomingMessage::OpenExternalUrl { .. } => TYPE_OPEN_EXTERNAL_URL,
            IncomingMessage::UserAuth { .. } => TYPE_USER_AUTH,
            IncomingMessage::UserLogout => TYPE_USER_LOGOUT,
            IncomingMessage::AppReady => TYPE_APP_READY,
            IncomingMessage::Unsupported { kind } | IncomingMessage::Unknown { kind } => kind,
        }
    }
}

/// A validated token pair from a `userAuth` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthResult {
    /// Returns the pair only if both tokens are non-empty.
    pub fn from_tokens(access_token: &str, refresh_token: &str) -> Option<Self> {
        if access_token.is_empty() || refresh_token.is_empty() {
            return None;
        }
        Some(Self {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        })
    }
}

/// Lenient decoding of a JSON value that is *meant* to be a boolean.
///
/// The web app has historically sent `forceExternalBrowser` both as a JSON
/// boolean and as a string.  Coercion table:
///
/// | JSON value                              | [`FlexibleBool::as_bool`] |
/// |-----------------------------------------|---------------------------|
/// | `true` / `false`                        | the same value            |
/// | `"true"` in any ASCII case              | `true`                    |
/// | any other string (incl. `"false"`, `""`)| `false`                   |
/// | number, object, array, `null`           | `false`                   |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FlexibleBool {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl FlexibleBool {
    /// Applies the coercion table above.
    pub fn as_bool(&self) -> bool {
        match self {
            FlexibleBool::Bool(b) => *b,
            FlexibleBool::Text(s) => s.eq_ignore_ascii_case("true"),
            FlexibleBool::Other(_) => false,
        }
    }
}

// ── Outbound ──────────────────────────────────────────────────────────────────

/// Global object the web app exposes for native commands.
const NATIVE_OBJECT: &str = "window.rtlNative";

/// A fire-and-forget command evaluated inside the embedded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundCommand {
    /// Ask the web app to end its session.
    Logout,

    /// Hand the device push token to the web app.
    RegisterPushToken {
        token: String,
        kind: PushTokenType,
    },
}

impl OutboundCommand {
    /// Renders the command as a JavaScript expression.
    ///
    /// Optional chaining (`?.`) keeps the call harmless on pages that have not
    /// installed the native object.
    ///
    /// ```rust
    /// use rtl_core::{OutboundCommand, PushTokenType};
    ///
    /// assert_eq!(OutboundCommand::Logout.to_script(), "window.rtlNative?.logout()");
    /// let cmd = OutboundCommand::RegisterPushToken {
    ///     token: "it's".to_string(),
    ///     kind: PushTokenType::Fcm,
    /// };
    /// assert_eq!(cmd.to_script(), r"window.rtlNative?.registerPushToken('it\'s', 'fcm')");
    /// ```
    pub fn to_script(&self) -> String {
        match self {
            OutboundCommand::Logout => format!("{NATIVE_OBJECT}?.logout()"),
            OutboundCommand::RegisterPushToken { token, kind } => format!(
                "{NATIVE_OBJECT}?.registerPushToken('{}', '{}')",
                escape_single_quoted(token),
                kind.as_str()
            ),
        }
    }
}

/// Escapes a value for a single-quoted JavaScript string literal.
///
/// Backslashes are escaped first so that a trailing `\` cannot swallow the
/// closing quote; line terminators are escaped because they end a literal.
fn escape_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
