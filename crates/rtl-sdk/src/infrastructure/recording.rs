//! Recording test doubles.
//!
//! [`RecordingSurface`] and [`RecordingListener`] record every call in order
//! so tests can assert on exactly what the controller did, without a real web
//! view or host app.  They are public so the integration tests and downstream
//! host crates can use them too.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::application::{RenderingSurface, SdkListener};

/// Surface that records navigations and scripts.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    navigations: Mutex<Vec<String>>,
    scripts: Mutex<Vec<String>>,
}

impl RecordingSurface {
    /// URLs passed to `navigate`, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().clone()
    }

    /// Scripts passed to `run_script`, oldest first.
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().clone()
    }
}

impl RenderingSurface for RecordingSurface {
    fn navigate(&self, url: &str) {
        self.navigations.lock().push(url.to_string());
    }

    fn run_script(&self, script: &str) {
        self.scripts.lock().push(script.to_string());
    }
}

/// One listener callback, as recorded by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    Authenticated {
        access_token: String,
        refresh_token: String,
    },
    Logout,
    OpenUrl {
        url: String,
        force_external: bool,
    },
    Ready,
}

/// Listener that records callbacks and answers `on_needs_token` with a fixed
/// token.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<ListenerEvent>>,
    token: Option<String>,
}

impl RecordingListener {
    /// A listener that supplies `token` when asked.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            events: Mutex::default(),
            token: Some(token.into()),
        }
    }

    /// Callbacks received so far, oldest first.
    pub fn events(&self) -> Vec<ListenerEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl SdkListener for RecordingListener {
    fn on_authenticated(&self, access_token: &str, refresh_token: &str) {
        self.events.lock().push(ListenerEvent::Authenticated {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        });
    }

    fn on_logout(&self) {
        self.events.lock().push(ListenerEvent::Logout);
    }

    fn on_open_url(&self, url: &str, force_external: bool) {
        self.events.lock().push(ListenerEvent::OpenUrl {
            url: url.to_string(),
            force_external,
        });
    }

    fn on_ready(&self) {
        self.events.lock().push(ListenerEvent::Ready);
    }

    async fn on_needs_token(&self) -> Option<String> {
        self.token.clone()
    }
}
