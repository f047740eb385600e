//! Infrastructure layer for rtl-sdk.
//!
//! Everything that touches the outside world: the adapter a host's rendering
//! surface reports into, a console surface for running without a real view,
//! the host configuration file, and recording doubles used by tests.
//!
//! # What does NOT belong here?
//!
//! - Login state or message semantics (that is the application layer)
//! - Wire formats (that is `rtl-core`)

pub mod bridge_adapter;
pub mod console_surface;
pub mod host_config;
pub mod recording;

pub use bridge_adapter::BridgeAdapter;
pub use console_surface::ConsoleSurface;
pub use host_config::{HostConfig, HostConfigError};
pub use recording::{ListenerEvent, RecordingListener, RecordingSurface};
