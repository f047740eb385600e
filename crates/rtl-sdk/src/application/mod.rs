//! Application layer for rtl-sdk.
//!
//! The application layer owns the SDK's behaviour: it knows *what* happens
//! when the host logs in or the web app posts a message, but leaves *how*
//! pages are displayed to whatever implements [`RenderingSurface`].
//!
//! # Responsibilities
//!
//! - The session state machine and the single pending login
//!   ([`SessionController`], [`LoginAttempt`])
//! - The host callback contract ([`SdkListener`])
//! - The surface contract the host's view must satisfy ([`RenderingSurface`])
//!
//! # What does NOT belong here?
//!
//! - Parsing raw bridge strings (that is `rtl-core`'s codec, driven by the
//!   infrastructure bridge adapter)
//! - Printing, files, or command-line handling (infrastructure and the binary)

pub mod listener;
pub mod login_attempt;
pub mod session_controller;
pub mod surface;

pub use listener::{NoopListener, SdkListener};
pub use login_attempt::LoginAttempt;
pub use session_controller::{SdkError, SessionController};
pub use surface::RenderingSurface;
