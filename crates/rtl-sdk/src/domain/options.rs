//! SDK runtime options.
//!
//! [`SdkOptions`] carries the knobs a host may tune without touching the
//! session controller: how long a login may take and which domains count as
//! first-party.  The [`SdkConfig`](rtl_core::SdkConfig) supplied through
//! `initialize` is separate; it identifies *which* web app to load, while these
//! options describe *how* the bridge behaves.
//!
//! Keeping options as a plain struct (no global state, no environment reads
//! inside the domain) makes the controller easy to construct in tests.  The
//! infrastructure layer populates it from a TOML file or CLI flags.

use std::time::Duration;

use rtl_core::NavigationPolicy;

/// How long a login attempt may wait for `userAuth` before resolving `false`.
pub const DEFAULT_LOGIN_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Behavioural options for a `SessionController`.
///
/// # Example
///
/// ```rust
/// use rtl_sdk::domain::SdkOptions;
///
/// let opts = SdkOptions::default();
/// assert_eq!(opts.login_timeout.as_secs(), 30);
/// ```
#[derive(Debug, Clone)]
pub struct SdkOptions {
    /// Deadline for a pending login.
    ///
    /// The timer starts when the token-forward URL is handed to the surface.
    pub login_timeout: Duration,

    /// First-party domains; everything else is handed to the host.
    pub navigation: NavigationPolicy,
}

impl Default for SdkOptions {
    /// | Field           | Default                              |
    /// |-----------------|--------------------------------------|
    /// | login_timeout   | 30 seconds                           |
    /// | navigation      | `getboon.com`, `affinaloyalty.com`   |
    fn default() -> Self {
        Self {
            login_timeout: DEFAULT_LOGIN_TIMEOUT,
            navigation: NavigationPolicy::default(),
        }
    }
}

impl SdkOptions {
    /// Returns the options with a different login timeout.
    pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
        self.login_timeout = timeout;
        self
    }

    /// Returns the options with a different navigation policy.
    pub fn with_navigation(mut self, navigation: NavigationPolicy) -> Self {
        self.navigation = navigation;
        self
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_login_timeout_is_30s() {
        // Arrange / Act
        let opts = SdkOptions::default();
        // Assert
        assert_eq!(opts.login_timeout, Duration::from_millis(30_000));
    }

    #[test]
    fn test_default_navigation_is_reference_domain_set() {
        let opts = SdkOptions::default();
        assert_eq!(opts.navigation.domains(), &["getboon.com", "affinaloyalty.com"]);
    }

    #[test]
    fn test_builders_replace_fields() {
        let opts = SdkOptions::default()
            .with_login_timeout(Duration::from_secs(5))
            .with_navigation(NavigationPolicy::from_domains(["partner.example"]));
        assert_eq!(opts.login_timeout, Duration::from_secs(5));
        assert!(opts.navigation.is_internal("https://a.partner.example/"));
        assert!(!opts.navigation.is_internal("https://crowdplay.prod.getboon.com/"));
    }
}
