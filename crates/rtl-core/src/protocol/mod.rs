//! Bridge protocol: message types and the JSON codec.
//!
//! Inbound traffic (web app → host) is a JSON object with a `"type"` field;
//! outbound traffic (host → web app) is a JavaScript call string evaluated in
//! the embedded page.

pub mod codec;
pub mod messages;

pub use codec::{encode_message, parse_message, ParseError};
pub use messages::{AuthResult, FlexibleBool, IncomingMessage, OutboundCommand};
