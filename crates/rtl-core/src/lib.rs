//! # rtl-core
//!
//! Shared, I/O-free building blocks for the RTL embedded rewards bridge.
//!
//! A native host app hands a one-time credential to an embedded web app (the
//! "rewards" experience) and then talks to it through a small JSON message
//! bridge.  This crate contains the pieces of that exchange that are pure
//! functions of their inputs:
//!
//! - **`domain`** – The SDK configuration ([`SdkConfig`]), the first-party
//!   [`NavigationPolicy`], and the token-forward login URL builder.
//!
//! - **`protocol`** – The JSON envelope the web app posts to the host
//!   ([`IncomingMessage`]) and the JavaScript commands the host sends back
//!   ([`OutboundCommand`]).
//!
//! Nothing in here knows about sessions, timers, or rendering surfaces.  The
//! `rtl-sdk` crate builds the session state machine on top of these types.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `rtl_core::SdkConfig` instead of `rtl_core::domain::config::SdkConfig`.
pub use domain::config::{Environment, PushTokenType, SdkConfig};
pub use domain::navigation::{NavigationDecision, NavigationPolicy, BLANK_PAGE_URL};
pub use domain::token_forward::{build_token_forward_url, TokenForwardError};
pub use protocol::codec::{encode_message, parse_message, ParseError};
pub use protocol::messages::{AuthResult, FlexibleBool, IncomingMessage, OutboundCommand};
