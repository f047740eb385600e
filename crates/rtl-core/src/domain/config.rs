//! SDK configuration types.
//!
//! [`SdkConfig`] is installed once by the host through `initialize` and never
//! mutated afterwards.  Re-initializing replaces the whole value rather than
//! patching fields, so every reader always sees a consistent triple.
//!
//! # Environments
//!
//! | Variant      | Web app host                       |
//! |--------------|------------------------------------|
//! | `Staging`    | `{program}.staging.getboon.com`    |
//! | `Production` | `{program}.prod.getboon.com`       |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target deployment of the embedded web app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// `*.staging.getboon.com`
    Staging,
    /// `*.prod.getboon.com`
    Production,
}

impl Environment {
    /// The shared host suffix that the program id is prefixed onto.
    pub fn host_suffix(self) -> &'static str {
        match self {
            Environment::Staging => "staging.getboon.com",
            Environment::Production => "prod.getboon.com",
        }
    }

    /// Lowercase name used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    /// Accepts `staging`, `production` or `prod`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!(
                "unknown environment '{other}' (expected 'staging' or 'production')"
            )),
        }
    }
}

/// Push notification provider a device token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushTokenType {
    /// Apple Push Notification service.
    Apns,
    /// Firebase Cloud Messaging.
    Fcm,
}

impl PushTokenType {
    /// Wire value passed to `registerPushToken` in the embedded app.
    pub fn as_str(self) -> &'static str {
        match self {
            PushTokenType::Apns => "apns",
            PushTokenType::Fcm => "fcm",
        }
    }
}

impl fmt::Display for PushTokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PushTokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apns" => Ok(PushTokenType::Apns),
            "fcm" => Ok(PushTokenType::Fcm),
            other => Err(format!("unknown push token type '{other}' (expected 'apns' or 'fcm')")),
        }
    }
}

/// Configuration supplied by the host when the SDK is initialized.
///
/// # Example
///
/// ```rust
/// use rtl_core::{Environment, SdkConfig};
///
/// let cfg = SdkConfig::new("crowdplay", Environment::Staging, "rtlsdkexample");
/// assert_eq!(cfg.web_host(), "crowdplay.staging.getboon.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Program identifier, also the leftmost label of the web app host
    /// (e.g. `"crowdplay"`).
    pub program: String,

    /// Which deployment of the web app to talk to.
    pub environment: Environment,

    /// The host app's URL scheme, used by the web app to deep-link back.
    pub url_scheme: String,
}

impl SdkConfig {
    /// Creates a configuration from its three parts.
    ///
    /// No validation happens here; an empty `program` or `url_scheme` is
    /// reported later when the login URL is built.
    pub fn new(
        program: impl Into<String>,
        environment: Environment,
        url_scheme: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            environment,
            url_scheme: url_scheme.into(),
        }
    }

    /// Fully qualified host of the web app for this program and environment.
    pub fn web_host(&self) -> String {
        format!("{}.{}", self.program, self.environment.host_suffix())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staging_host_suffix() {
        assert_eq!(Environment::Staging.host_suffix(), "staging.getboon.com");
    }

    #[test]
    fn test_production_host_suffix_uses_prod_label() {
        assert_eq!(Environment::Production.host_suffix(), "prod.getboon.com");
    }

    #[test]
    fn test_environment_from_str_is_case_insensitive() {
        assert_eq!("STAGING".parse::<Environment>(), Ok(Environment::Staging));
        assert_eq!("Production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
    }

    #[test]
    fn test_environment_from_str_rejects_unknown_value() {
        // Arrange / Act
        let result = "qa".parse::<Environment>();

        // Assert: the error names the offending value
        let err = result.unwrap_err();
        assert!(err.contains("qa"));
    }

    #[test]
    fn test_push_token_type_wire_values() {
        assert_eq!(PushTokenType::Apns.as_str(), "apns");
        assert_eq!(PushTokenType::Fcm.as_str(), "fcm");
        assert_eq!("FCM".parse::<PushTokenType>(), Ok(PushTokenType::Fcm));
    }

    #[test]
    fn test_web_host_for_production() {
        let cfg = SdkConfig::new("acme", Environment::Production, "acmeapp");
        assert_eq!(cfg.web_host(), "acme.prod.getboon.com");
    }

    #[test]
    fn test_environment_deserializes_from_lowercase_string() {
        let env: Environment = serde_json::from_str(r#""staging""#).unwrap();
        assert_eq!(env, Environment::Staging);
    }
}
