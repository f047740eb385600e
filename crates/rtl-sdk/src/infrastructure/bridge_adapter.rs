//! Bridge adapter: the single entry point for events coming *from* a
//! rendering surface.
//!
//! A host wires its view's callbacks to these methods:
//!
//! | Surface event                    | Adapter method              |
//! |----------------------------------|-----------------------------|
//! | page posted a bridge message     | [`BridgeAdapter::on_raw_message`] |
//! | page wants to load a URL         | [`BridgeAdapter::on_navigation_requested`] |
//! | page finished loading            | [`BridgeAdapter::on_page_finished`] |
//! | page failed to load              | [`BridgeAdapter::on_load_error`] |
//!
//! The adapter owns no state beyond its controller handle.  Parsing happens
//! here so that malformed input never reaches the controller.

use std::sync::Arc;

use rtl_core::{parse_message, NavigationDecision};
use tracing::{debug, warn};

use crate::application::{RenderingSurface, SdkError, SessionController};

/// Routes surface events to a [`SessionController`].
#[derive(Clone)]
pub struct BridgeAdapter {
    controller: Arc<SessionController>,
}

impl BridgeAdapter {
    /// Attaches `surface` to `controller` and returns the adapter the surface
    /// should report into.
    ///
    /// # Errors
    ///
    /// [`SdkError::NotInitialized`] if the controller has no configuration
    /// yet.
    pub fn attach(
        controller: Arc<SessionController>,
        surface: Arc<dyn RenderingSurface>,
    ) -> Result<Self, SdkError> {
        controller.attach_surface(surface)?;
        Ok(Self { controller })
    }

    /// The controller this adapter feeds.
    pub fn controller(&self) -> &Arc<SessionController> {
        &self.controller
    }

    /// Handles one raw string posted by the page.
    ///
    /// Malformed messages are logged and dropped.
    pub fn on_raw_message(&self, raw: &str) {
        match parse_message(raw) {
            Ok(message) => self.controller.handle_message(message),
            Err(e) => warn!(error = %e, len = raw.len(), "dropping malformed bridge message"),
        }
    }

    /// Decides whether the surface may load `url`.
    pub fn on_navigation_requested(&self, url: &str) -> NavigationDecision {
        self.controller.intercept_navigation(url)
    }

    /// The surface finished loading `url`.
    pub fn on_page_finished(&self, url: &str) {
        debug!(%url, "page finished loading");
    }

    /// The surface failed to load a page.  A login in progress is left to its
    /// timeout.
    pub fn on_load_error(&self, url: &str, description: &str) {
        warn!(%url, %description, "page failed to load");
    }
}

impl std::fmt::Debug for BridgeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeAdapter")
            .field("logged_in", &self.controller.is_logged_in())
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
