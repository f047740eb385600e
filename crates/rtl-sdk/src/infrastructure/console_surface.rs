//! A rendering surface that writes what it is asked to do as JSON lines.
//!
//! Used by the `rtl-sdk-demo` binary to drive the SDK from a terminal, and
//! handy for piping into another process that plays the web view's part.
//!
//! Each call becomes one line:
//!
//! ```text
//! {"surface":"navigate","url":"https://crowdplay.staging.getboon.com/auth/token-forward?..."}
//! {"surface":"runScript","script":"window.rtlNative?.logout()"}
//! ```

use std::io::{self, Write};

use parking_lot::Mutex;
use serde_json::json;
use tracing::warn;

use crate::application::RenderingSurface;

/// Surface that reports each call as a JSON line on a writer.
pub struct ConsoleSurface {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSurface {
    /// Writes to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes to any sink.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    fn emit(&self, line: serde_json::Value) {
        let mut out = self.out.lock();
        // A surface call cannot fail from the controller's point of view.
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %e, "console surface write failed");
        }
    }
}

impl RenderingSurface for ConsoleSurface {
    fn navigate(&self, url: &str) {
        self.emit(json!({ "surface": "navigate", "url": url }));
    }

    fn run_script(&self, script: &str) {
        self.emit(json!({ "surface": "runScript", "script": script }));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
