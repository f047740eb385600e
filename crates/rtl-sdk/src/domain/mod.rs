//! Domain layer for rtl-sdk.
//!
//! Pure types with no I/O, no async and no rendering surface: the session
//! state machine's states, the reasons a login can finish, and the tunable
//! SDK options.  The wire-level types (messages, URL builder, navigation
//! policy) live one level further in, in `rtl-core`.

pub mod options;
pub mod session;

pub use options::{SdkOptions, DEFAULT_LOGIN_TIMEOUT};
pub use session::{LoginOutcome, SessionState};
