//! Host callbacks.
//!
//! The host implements [`SdkListener`] to learn about session changes and URLs
//! the web app wants opened outside the embedded view.  Every method has a
//! no-op default, so a host only overrides what it cares about.
//!
//! Callbacks are invoked on whatever task delivered the triggering message,
//! never while the controller's internal lock is held.  A listener may call
//! straight back into the controller.

use async_trait::async_trait;

/// Receiver of SDK events.
#[async_trait]
pub trait SdkListener: Send + Sync {
    /// The web app completed login.  Both tokens are non-empty.
    fn on_authenticated(&self, _access_token: &str, _refresh_token: &str) {}

    /// The user logged out inside the web app.
    fn on_logout(&self) {}

    /// The host should open `url` itself.
    ///
    /// `force_external` asks for the system browser rather than an in-app one.
    /// Navigation interception always sets it.
    fn on_open_url(&self, _url: &str, _force_external: bool) {}

    /// The web app finished loading and accepts commands.
    fn on_ready(&self) {}

    /// Asked by `request_token_and_login` for a one-time login token.
    ///
    /// Return `None` when no token can be obtained; the login then reports
    /// `false` without touching the surface.
    async fn on_needs_token(&self) -> Option<String> {
        None
    }
}

/// Listener that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl SdkListener for NoopListener {}
