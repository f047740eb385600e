//! The rendering surface abstraction.
//!
//! A rendering surface is whatever displays the web app: a platform web view
//! on a device, a headless browser in CI, or [`ConsoleSurface`] in the demo.
//! The SDK needs only two capabilities from it.
//!
//! Both calls are fire-and-forget.  Page-level failures come back through
//! the bridge adapter's `on_load_error`, never through these methods.
//!
//! [`ConsoleSurface`]: crate::infrastructure::console_surface::ConsoleSurface

/// Displays the web app and evaluates script inside it.
#[cfg_attr(test, mockall::automock)]
pub trait RenderingSurface: Send + Sync {
    /// Loads `url` in the surface.
    fn navigate(&self, url: &str);

    /// Evaluates a JavaScript expression in the current page.
    fn run_script(&self, script: &str);
}
