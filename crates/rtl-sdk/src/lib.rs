//! rtl-sdk library crate.
//!
//! Embeds the RTL rewards web app in a native host: it logs the web app in
//! with a one-time token, tracks whether the user is logged in, relays the web
//! app's messages to the host, and keeps third-party navigation out of the
//! embedded view.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Host app ──▶ SessionController ──navigate / run_script──▶ RenderingSurface
//!    ▲                ▲                                          │
//!    │ SdkListener    │ IncomingMessage / NavigationDecision     │ raw JSON,
//!    │                │                                          │ URLs
//!    └────────────────┴──────────── BridgeAdapter ◀──────────────┘
//!
//! [rtl-sdk]
//!   ├── domain/           SessionState, LoginOutcome, SdkOptions
//!   ├── application/      SessionController, LoginAttempt, listener and
//!   │                     surface traits
//!   └── infrastructure/
//!         ├── bridge_adapter/   raw surface events → controller
//!         ├── console_surface/  JSON-lines surface for the demo host
//!         ├── host_config/      TOML host configuration
//!         └── recording/        recording surface and listener for tests
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `rtl-core` only.
//! - `infrastructure` depends on all other layers plus files and stdout.
//!
//! # For beginners: why this structure?
//!
//! The login state machine is the part worth testing hard, and it should not
//! care whether the page is shown by a real web view, a headless browser, or a
//! terminal.  Everything that touches the outside world therefore lives in
//! `infrastructure`, and the controller only sees the [`RenderingSurface`]
//! trait.
//!
//! [`RenderingSurface`]: application::RenderingSurface

/// Domain layer: session state and options (no I/O).
pub mod domain;

/// Application layer: session controller and host-facing contracts.
pub mod application;

/// Infrastructure layer: bridge adapter, surfaces, host configuration.
pub mod infrastructure;

pub use application::{
    LoginAttempt, NoopListener, RenderingSurface, SdkError, SdkListener, SessionController,
};
pub use domain::{LoginOutcome, SdkOptions, SessionState};
pub use infrastructure::bridge_adapter::BridgeAdapter;
