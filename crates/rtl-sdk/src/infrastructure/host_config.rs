//! TOML host configuration.
//!
//! A host that drives the SDK from a file (the demo binary does) describes
//! the embedded program, its environment, and the SDK options in one place:
//!
//! ```toml
//! [sdk]
//! program = "crowdplay"
//! environment = "staging"          # or "production"
//! url_scheme = "rtlsdkexample"
//! login_timeout_secs = 30
//! log_level = "info"
//!
//! [navigation]
//! extra_domains = ["partner.example"]
//! replace_defaults = false         # true: only extra_domains are first-party
//!
//! [login]
//! token = "one-time-token"         # optional
//! ```
//!
//! # Serde default values
//!
//! Every field has a default, so an empty file is a valid configuration
//! describing the reference `crowdplay` staging setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rtl_core::{Environment, NavigationPolicy, SdkConfig};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::SdkOptions;

/// Error type for host configuration files.
#[derive(Debug, Error)]
pub enum HostConfigError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Longest login deadline a host may configure (one day).
pub const MAX_LOGIN_TIMEOUT_SECS: u64 = 86_400;

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HostConfig {
    #[serde(default)]
    pub sdk: SdkSection,
    #[serde(default)]
    pub navigation: NavigationSection,
    #[serde(default)]
    pub login: LoginSection,
}

/// Which web app to embed and how the SDK behaves.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SdkSection {
    /// Program identifier; becomes the host's first label.
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_environment")]
    pub environment: Environment,
    /// Deep-link scheme the web app uses to return to the host.
    #[serde(default = "default_url_scheme")]
    pub url_scheme: String,
    #[serde(default = "default_login_timeout_secs")]
    pub login_timeout_secs: u64,
    /// `tracing` filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// First-party domain settings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NavigationSection {
    #[serde(default)]
    pub extra_domains: Vec<String>,
    /// Use `extra_domains` alone instead of adding them to the built-in set.
    #[serde(default)]
    pub replace_defaults: bool,
}

/// Login credentials supplied up front.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoginSection {
    #[serde(default)]
    pub token: Option<String>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_program() -> String {
    "crowdplay".to_string()
}
fn default_environment() -> Environment {
    Environment::Staging
}
fn default_url_scheme() -> String {
    "rtlsdkexample".to_string()
}
fn default_login_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SdkSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            environment: default_environment(),
            url_scheme: default_url_scheme(),
            login_timeout_secs: default_login_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl HostConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// [`HostConfigError::Parse`] if the TOML is malformed or a value has the
    /// wrong type, [`HostConfigError::Invalid`] if a value is out of range.
    pub fn from_toml_str(content: &str) -> Result<Self, HostConfigError> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks values that parse but cannot be used.  Run again after CLI
    /// overrides are merged in.
    ///
    /// # Errors
    ///
    /// [`HostConfigError::Invalid`] if `login_timeout_secs` is zero or above
    /// [`MAX_LOGIN_TIMEOUT_SECS`].
    pub fn validate(&self) -> Result<(), HostConfigError> {
        let secs = self.sdk.login_timeout_secs;
        if secs == 0 || secs > MAX_LOGIN_TIMEOUT_SECS {
            return Err(HostConfigError::Invalid {
                field: "sdk.login_timeout_secs",
                reason: format!("{secs} is outside 1..={MAX_LOGIN_TIMEOUT_SECS}"),
            });
        }
        Ok(())
    }

    /// Loads a configuration file.  Unlike the built-in defaults, a missing
    /// file is an error: the caller asked for this path explicitly.
    ///
    /// # Errors
    ///
    /// [`HostConfigError::Io`] if the file cannot be read, otherwise as
    /// [`HostConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, HostConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| HostConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The configuration passed to `SessionController::initialize`.
    pub fn sdk_config(&self) -> SdkConfig {
        SdkConfig::new(
            self.sdk.program.clone(),
            self.sdk.environment,
            self.sdk.url_scheme.clone(),
        )
    }

    /// Options for `SessionController::with_options`.
    pub fn sdk_options(&self) -> SdkOptions {
        let navigation = if self.navigation.replace_defaults {
            NavigationPolicy::from_domains(&self.navigation.extra_domains)
        } else {
            self.navigation
                .extra_domains
                .iter()
                .fold(NavigationPolicy::default(), |policy, domain| {
                    policy.with_domain(domain)
                })
        };
        SdkOptions::default()
            .with_login_timeout(Duration::from_secs(self.sdk.login_timeout_secs))
            .with_navigation(navigation)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
