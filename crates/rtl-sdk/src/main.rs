//! RTL SDK demo host: entry point.
//!
//! Runs a [`SessionController`] against a [`ConsoleSurface`], so the whole
//! login and messaging flow can be driven from a terminal or a script.  The
//! surface prints what a real web view would be asked to do; lines typed on
//! stdin play the part of the web view reporting back.
//!
//! # Usage
//!
//! ```text
//! rtl-sdk-demo [OPTIONS]
//!
//! Options:
//!   --config        <PATH>     TOML host configuration
//!   --program       <ID>       Embedded program [default: crowdplay]
//!   --environment   <ENV>      staging | production [default: staging]
//!   --url-scheme    <SCHEME>   Deep-link scheme [default: rtlsdkexample]
//!   --token         <TOKEN>    Log in with this token at startup
//!   --login-timeout <SECS>     Login deadline [default: 30]
//!   --extra-domain  <DOMAIN>   Additional first-party domain (repeatable)
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable             | Flag              |
//! |----------------------|-------------------|
//! | `RTL_CONFIG`         | `--config`        |
//! | `RTL_PROGRAM`        | `--program`       |
//! | `RTL_ENVIRONMENT`    | `--environment`   |
//! | `RTL_URL_SCHEME`     | `--url-scheme`    |
//! | `RTL_TOKEN`          | `--token`         |
//! | `RTL_LOGIN_TIMEOUT`  | `--login-timeout` |
//!
//! Flags override the config file, which overrides the built-in defaults.
//!
//! # Stdin commands
//!
//! | Line                       | Effect                                     |
//! |----------------------------|--------------------------------------------|
//! | `login <token>`            | start a new login                          |
//! | `nav <url>`                | ask whether the surface may load `url`     |
//! | `loaded <url>`             | report a finished page load                |
//! | `error <url> <reason...>`  | report a failed page load                  |
//! | `logout`                   | send the logout command to the web app     |
//! | `push <apns\|fcm> <token>` | register a device push token               |
//! | `status`                   | print the login state                      |
//! | anything else              | treated as a raw bridge message (JSON)     |
//!
//! Log output goes to stderr; stdout carries only JSON lines.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use rtl_core::{Environment, NavigationDecision, PushTokenType};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rtl_sdk::application::{SdkListener, SessionController};
use rtl_sdk::infrastructure::{BridgeAdapter, ConsoleSurface, HostConfig};
use rtl_sdk::LoginAttempt;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// RTL SDK demo host.
///
/// Embeds the rewards web app behind a console surface and drives it from
/// stdin.
#[derive(Debug, Parser)]
#[command(
    name = "rtl-sdk-demo",
    about = "Drive the RTL embedded web-app bridge from a terminal",
    version
)]
struct Cli {
    /// TOML host configuration file.
    #[arg(long, env = "RTL_CONFIG")]
    config: Option<PathBuf>,

    /// Program identifier of the embedded web app.
    #[arg(long, env = "RTL_PROGRAM")]
    program: Option<String>,

    /// Backend environment: `staging` or `production`.
    #[arg(long, env = "RTL_ENVIRONMENT")]
    environment: Option<Environment>,

    /// Deep-link scheme the web app uses to return to this host.
    #[arg(long, env = "RTL_URL_SCHEME")]
    url_scheme: Option<String>,

    /// One-time login token used at startup.
    #[arg(long, env = "RTL_TOKEN")]
    token: Option<String>,

    /// Login deadline in seconds.
    #[arg(long, env = "RTL_LOGIN_TIMEOUT")]
    login_timeout: Option<u64>,

    /// Additional first-party domain; may be given more than once.
    #[arg(long = "extra-domain")]
    extra_domains: Vec<String>,
}

impl Cli {
    /// Merges the config file (if any) with the command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if `--config` names a file that cannot be read or
    /// parsed, or if a flag sets an out-of-range value.
    fn into_host_config(self) -> anyhow::Result<HostConfig> {
        let mut cfg = match &self.config {
            Some(path) => HostConfig::load(path)
                .with_context(|| format!("loading host config {}", path.display()))?,
            None => HostConfig::default(),
        };

        if let Some(program) = self.program {
            cfg.sdk.program = program;
        }
        if let Some(environment) = self.environment {
            cfg.sdk.environment = environment;
        }
        if let Some(url_scheme) = self.url_scheme {
            cfg.sdk.url_scheme = url_scheme;
        }
        if let Some(secs) = self.login_timeout {
            cfg.sdk.login_timeout_secs = secs;
        }
        if self.token.is_some() {
            cfg.login.token = self.token;
        }
        cfg.navigation.extra_domains.extend(self.extra_domains);
        cfg.validate().context("checking merged host config")?;
        Ok(cfg)
    }
}

// ── Stdin commands ────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
enum DemoCommand {
    Login(String),
    Navigate(String),
    PageFinished(String),
    LoadError { url: String, description: String },
    Logout,
    Push { kind: PushTokenType, token: String },
    Status,
    Raw(String),
}

impl DemoCommand {
    /// Parses one stdin line.  Blank lines yield `None`.
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let cmd = match word {
            "login" if !rest.is_empty() => DemoCommand::Login(rest.to_string()),
            "nav" if !rest.is_empty() => DemoCommand::Navigate(rest.to_string()),
            "loaded" if !rest.is_empty() => DemoCommand::PageFinished(rest.to_string()),
            "error" if !rest.is_empty() => {
                let (url, description) = rest.split_once(' ').unwrap_or((rest, ""));
                DemoCommand::LoadError {
                    url: url.to_string(),
                    description: description.trim().to_string(),
                }
            }
            "logout" if rest.is_empty() => DemoCommand::Logout,
            "status" if rest.is_empty() => DemoCommand::Status,
            "push" => match rest.split_once(' ') {
                Some((kind, token)) => match kind.parse::<PushTokenType>() {
                    Ok(kind) => DemoCommand::Push {
                        kind,
                        token: token.trim().to_string(),
                    },
                    Err(_) => DemoCommand::Raw(line.to_string()),
                },
                None => DemoCommand::Raw(line.to_string()),
            },
            _ => DemoCommand::Raw(line.to_string()),
        };
        Some(cmd)
    }
}

// ── Demo listener ─────────────────────────────────────────────────────────────

/// Prints listener events as JSON lines and supplies the configured token.
struct DemoListener {
    token: Option<String>,
}

#[async_trait]
impl SdkListener for DemoListener {
    fn on_authenticated(&self, access_token: &str, refresh_token: &str) {
        info!("authenticated");
        println!(
            "{}",
            json!({
                "event": "authenticated",
                "accessTokenLen": access_token.len(),
                "refreshTokenLen": refresh_token.len(),
            })
        );
    }

    fn on_logout(&self) {
        println!("{}", json!({ "event": "logout" }));
    }

    fn on_open_url(&self, url: &str, force_external: bool) {
        println!(
            "{}",
            json!({ "event": "openUrl", "url": url, "forceExternal": force_external })
        );
    }

    fn on_ready(&self) {
        println!("{}", json!({ "event": "ready" }));
    }

    async fn on_needs_token(&self) -> Option<String> {
        self.token.clone()
    }
}

fn watch_login(logins: &mut JoinSet<()>, attempt: LoginAttempt) {
    logins.spawn(async move {
        let id = attempt.id();
        let outcome = attempt.outcome().await;
        println!(
            "{}",
            json!({
                "event": "loginFinished",
                "attempt": id.to_string(),
                "success": outcome.succeeded(),
                "outcome": outcome.to_string(),
            })
        );
    });
}

fn dispatch(adapter: &BridgeAdapter, logins: &mut JoinSet<()>, command: DemoCommand) {
    let controller = adapter.controller();
    match command {
        DemoCommand::Login(token) => match controller.start_login(&token) {
            Ok(attempt) => watch_login(logins, attempt),
            Err(e) => warn!(error = %e, "login not started"),
        },
        DemoCommand::Navigate(url) => {
            let decision = match adapter.on_navigation_requested(&url) {
                NavigationDecision::Allow => "allow",
                NavigationDecision::Cancel => "cancel",
            };
            println!("{}", json!({ "navigation": url, "decision": decision }));
        }
        DemoCommand::PageFinished(url) => adapter.on_page_finished(&url),
        DemoCommand::LoadError { url, description } => adapter.on_load_error(&url, &description),
        DemoCommand::Logout => controller.logout(),
        DemoCommand::Push { kind, token } => controller.register_push_token(&token, kind),
        DemoCommand::Status => println!(
            "{}",
            json!({
                "loggedIn": controller.is_logged_in(),
                "pendingLogin": controller.has_pending_login(),
            })
        ),
        DemoCommand::Raw(raw) => adapter.on_raw_message(&raw),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. `tracing_subscriber` is initialised on stderr.  `RUST_LOG` wins over
///    the config file's `log_level`.
/// 2. CLI arguments and the optional config file are merged into a
///    [`HostConfig`].
/// 3. The controller is initialised and the console surface attached.
/// 4. If a token is configured, a login starts through the listener's
///    `on_needs_token`.
/// 5. Stdin lines are dispatched until EOF or Ctrl+C.  Logins still pending
///    at exit are cancelled.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let host = cli.into_host_config()?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&host.sdk.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let sdk_config = host.sdk_config();
    info!(
        "RTL SDK demo starting, web host {}",
        sdk_config.web_host()
    );

    let listener = Arc::new(DemoListener {
        token: host.login.token.clone(),
    });
    let controller = SessionController::with_options(listener, host.sdk_options());
    controller.initialize(
        sdk_config.program,
        sdk_config.environment,
        sdk_config.url_scheme,
    );
    let adapter = BridgeAdapter::attach(Arc::clone(&controller), Arc::new(ConsoleSurface::stdout()))
        .context("attaching console surface")?;

    let mut logins = JoinSet::new();
    if host.login.token.is_some() {
        let controller = Arc::clone(&controller);
        logins.spawn(async move {
            match controller.request_token_and_login().await {
                Ok(success) => info!(success, "startup login finished"),
                Err(e) => warn!(error = %e, "startup login failed"),
            }
        });
    }

    // ── Main loop ─────────────────────────────────────────────────────────────
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    info!("stdin closed");
                    break;
                };
                if let Some(command) = DemoCommand::parse(&line) {
                    dispatch(&adapter, &mut logins, command);
                }
            }
            // Reap finished login watchers so the set does not grow.
            Some(_) = logins.join_next(), if !logins.is_empty() => {}
            _ = &mut ctrl_c => {
                info!("received Ctrl+C, shutting down");
                break;
            }
        }
    }

    // Aborted watchers drop their attempts, which cancels the logins.
    logins.shutdown().await;
    info!("RTL SDK demo stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
