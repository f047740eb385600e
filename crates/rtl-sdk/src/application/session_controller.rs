//! The session controller: login state machine and message dispatch.
//!
//! # Responsibilities
//!
//! - Holding the [`SdkConfig`] and the login state ([`SessionState`]).
//! - Running at most one login attempt at a time, with a deadline.
//! - Turning parsed web-app messages into state changes and listener calls.
//! - Sending outbound commands (logout, push token) to the attached surface.
//! - Deciding which navigations stay inside the surface.
//!
//! # Locking rules
//!
//! All mutable state sits behind one `parking_lot::Mutex`.  The lock is
//! released before any listener callback, surface call, or `.await`, so hosts
//! may call back into the controller from inside a callback.
//!
//! # Single-fire completion
//!
//! A pending login is an `Option<PendingLogin>` slot.  Completion always
//! *takes* the slot under the lock, then resolves the taken value after the
//! lock is dropped.  Only one path can take a given attempt, so each attempt
//! resolves exactly once and its timeout task is aborted on every path.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use rtl_core::{
    build_token_forward_url, AuthResult, Environment, IncomingMessage, NavigationDecision,
    OutboundCommand, PushTokenType, SdkConfig,
};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::listener::SdkListener;
use crate::application::login_attempt::LoginAttempt;
use crate::application::surface::RenderingSurface;
use crate::domain::{LoginOutcome, SdkOptions, SessionState};

// ── Error type ────────────────────────────────────────────────────────────────

/// Failures the controller reports to its caller.
///
/// Conditions that only make a login fail (no surface, empty token) are not
/// errors; they resolve the [`LoginAttempt`] to `false`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SdkError {
    /// `initialize` must be called first.
    #[error("the SDK has not been initialized")]
    NotInitialized,

    /// A login needs a Tokio runtime for its timeout task.
    #[error("login requires a running Tokio runtime")]
    NoRuntime,
}

// ── Internal state ────────────────────────────────────────────────────────────

struct PendingLogin {
    id: Uuid,
    respond: oneshot::Sender<LoginOutcome>,
    timer: JoinHandle<()>,
}

impl PendingLogin {
    /// Stops the timer and delivers the outcome.  Call without the lock held.
    fn resolve(self, outcome: LoginOutcome) {
        self.timer.abort();
        info!(attempt = %self.id, %outcome, "login attempt finished");
        // The receiver may already be gone (cancelled attempt).
        let _ = self.respond.send(outcome);
    }
}

#[derive(Default)]
struct ControllerState {
    config: Option<SdkConfig>,
    session: SessionState,
    surface: Option<Arc<dyn RenderingSurface>>,
    pending: Option<PendingLogin>,
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Owns the SDK's session state.  Always used behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use rtl_core::Environment;
/// use rtl_sdk::application::{NoopListener, SessionController};
///
/// # async fn demo() -> Result<(), rtl_sdk::application::SdkError> {
/// let controller = SessionController::new(Arc::new(NoopListener));
/// controller.initialize("crowdplay", Environment::Staging, "rtlsdkexample");
/// assert_eq!(controller.is_logged_in(), Some(false));
/// # Ok(())
/// # }
/// ```
pub struct SessionController {
    state: Mutex<ControllerState>,
    listener: RwLock<Arc<dyn SdkListener>>,
    options: SdkOptions,
    this: Weak<SessionController>,
}

impl SessionController {
    /// Creates a controller with default options.
    pub fn new(listener: Arc<dyn SdkListener>) -> Arc<Self> {
        Self::with_options(listener, SdkOptions::default())
    }

    /// Creates a controller with explicit options.
    pub fn with_options(listener: Arc<dyn SdkListener>, options: SdkOptions) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            state: Mutex::new(ControllerState::default()),
            listener: RwLock::new(listener),
            options,
            this: this.clone(),
        })
    }

    /// Replaces the listener.  Events already being delivered finish on the
    /// previous one.
    pub fn set_listener(&self, listener: Arc<dyn SdkListener>) {
        *self.listener.write() = listener;
    }

    /// The options this controller was built with.
    pub fn options(&self) -> &SdkOptions {
        &self.options
    }

    // ── Configuration and state ───────────────────────────────────────────

    /// Stores the configuration and resets the session to logged out.
    ///
    /// Calling it again replaces the configuration.  A login still pending
    /// from before resolves `false`.
    pub fn initialize(
        &self,
        program: impl Into<String>,
        environment: Environment,
        url_scheme: impl Into<String>,
    ) {
        let config = SdkConfig::new(program, environment, url_scheme);
        info!(
            program = %config.program,
            environment = %config.environment,
            url_scheme = %config.url_scheme,
            "SDK initialized"
        );

        let pending = {
            let mut state = self.state.lock();
            state.config = Some(config);
            state.session = SessionState::Initialized { logged_in: false };
            state.pending.take()
        };
        if let Some(pending) = pending {
            pending.resolve(LoginOutcome::Reset);
        }
    }

    /// `None` before `initialize`, otherwise whether the web app is logged in.
    pub fn is_logged_in(&self) -> Option<bool> {
        self.state.lock().session.logged_in()
    }

    /// The current configuration, if initialized.
    pub fn config(&self) -> Option<SdkConfig> {
        self.state.lock().config.clone()
    }

    /// `true` while a login attempt is waiting for `userAuth` or its deadline.
    pub fn has_pending_login(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    /// Binds the surface that displays the web app, replacing any previous
    /// one.
    pub fn attach_surface(&self, surface: Arc<dyn RenderingSurface>) -> Result<(), SdkError> {
        let mut state = self.state.lock();
        if state.config.is_none() {
            return Err(SdkError::NotInitialized);
        }
        if state.surface.replace(surface).is_some() {
            debug!("rendering surface replaced");
        } else {
            debug!("rendering surface attached");
        }
        Ok(())
    }

    // ── Login ─────────────────────────────────────────────────────────────

    /// Starts logging in with a one-time `token`.
    ///
    /// Any login already pending resolves `false` before the surface is asked
    /// to navigate.  The returned [`LoginAttempt`] resolves `true` when the web
    /// app reports `userAuth`, or `false` on timeout, supersession, re-init,
    /// or when the login cannot start (no surface, empty token).
    ///
    /// # Errors
    ///
    /// - [`SdkError::NotInitialized`] before `initialize`.
    /// - [`SdkError::NoRuntime`] when called outside a Tokio runtime.
    pub fn start_login(&self, token: &str) -> Result<LoginAttempt, SdkError> {
        let (config, surface, superseded, runtime) = {
            let mut state = self.state.lock();
            let config = state.config.clone().ok_or(SdkError::NotInitialized)?;
            let runtime = Handle::try_current().map_err(|_| SdkError::NoRuntime)?;
            (config, state.surface.clone(), state.pending.take(), runtime)
        };
        if let Some(previous) = superseded {
            previous.resolve(LoginOutcome::Superseded);
        }

        let Some(surface) = surface else {
            warn!("login requested without a rendering surface");
            return Ok(LoginAttempt::resolved(LoginOutcome::Rejected));
        };
        if token.is_empty() {
            warn!("login requested with an empty token");
            return Ok(LoginAttempt::resolved(LoginOutcome::Rejected));
        }
        let url = match build_token_forward_url(&config, token) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot build the token-forward URL");
                return Ok(LoginAttempt::resolved(LoginOutcome::Rejected));
            }
        };

        let id = Uuid::new_v4();
        let (respond, rx) = oneshot::channel();
        let deadline = login_deadline(Instant::now(), self.options.login_timeout);

        // The timer is spawned with the lock held, so it cannot look at the
        // slot before this attempt is in it.
        let displaced = {
            let mut state = self.state.lock();
            let timer = runtime.spawn(expire_at(self.this.clone(), id, deadline));
            state.pending.replace(PendingLogin { id, respond, timer })
        };
        if let Some(displaced) = displaced {
            displaced.resolve(LoginOutcome::Superseded);
        }

        info!(
            attempt = %id,
            token = %token_preview(token),
            timeout_ms = self.options.login_timeout.as_millis() as u64,
            "login started"
        );
        surface.navigate(&url);

        Ok(LoginAttempt::pending(id, rx, self.this.clone()))
    }

    /// Asks the listener for a token, then logs in with it.
    ///
    /// Resolves `false` without touching the surface if the listener has no
    /// token to offer.
    pub async fn request_token_and_login(&self) -> Result<bool, SdkError> {
        if self.state.lock().config.is_none() {
            return Err(SdkError::NotInitialized);
        }
        let listener = self.listener();
        match listener.on_needs_token().await {
            Some(token) => Ok(self.start_login(&token)?.await),
            None => {
                info!("listener supplied no login token");
                Ok(false)
            }
        }
    }

    /// Resolves attempt `id` if it is still the pending one.
    pub(crate) fn complete_attempt(&self, id: Uuid, outcome: LoginOutcome) {
        let pending = {
            let mut state = self.state.lock();
            match &state.pending {
                Some(p) if p.id == id => state.pending.take(),
                _ => None,
            }
        };
        if let Some(pending) = pending {
            pending.resolve(outcome);
        }
    }

    // ── Outbound commands ─────────────────────────────────────────────────

    /// Asks the web app to log out.  Ignored when no surface is attached.
    pub fn logout(&self) {
        self.send_command(&OutboundCommand::Logout);
    }

    /// Hands a device push token to the web app.  Ignored when no surface is
    /// attached.
    pub fn register_push_token(&self, token: &str, kind: PushTokenType) {
        self.send_command(&OutboundCommand::RegisterPushToken {
            token: token.to_string(),
            kind,
        });
    }

    fn send_command(&self, command: &OutboundCommand) {
        let surface = self.state.lock().surface.clone();
        match surface {
            Some(surface) => surface.run_script(&command.to_script()),
            None => debug!("no rendering surface; command dropped"),
        }
    }

    // ── Inbound messages ──────────────────────────────────────────────────

    /// Applies one message from the web app.
    pub fn handle_message(&self, message: IncomingMessage) {
        debug!(kind = message.kind(), "web app message");
        match message {
            IncomingMessage::UserAuth {
                access_token,
                refresh_token,
            } => match AuthResult::from_tokens(&access_token, &refresh_token) {
                Some(auth) => self.on_user_auth(auth),
                None => warn!("userAuth without both tokens ignored"),
            },
            IncomingMessage::UserLogout => {
                self.state.lock().session.set_logged_in(false);
                info!("web app logged out");
                self.listener().on_logout();
            }
            IncomingMessage::AppReady => self.listener().on_ready(),
            IncomingMessage::OpenExternalUrl {
                url,
                force_external,
            } => {
                if url.is_empty() {
                    warn!("openExternalUrl without a URL ignored");
                } else {
                    self.listener().on_open_url(&url, force_external);
                }
            }
            IncomingMessage::Unsupported { kind } => {
                debug!(%kind, "message type not supported by this host");
            }
            IncomingMessage::Unknown { kind } => {
                debug!(%kind, "unknown message type ignored");
            }
        }
    }

    fn on_user_auth(&self, auth: AuthResult) {
        {
            let mut state = self.state.lock();
            if state.session == SessionState::Uninitialized {
                debug!("userAuth before initialize; session state unchanged");
            }
            state.session.set_logged_in(true);
        }
        info!("web app authenticated");
        self.listener()
            .on_authenticated(&auth.access_token, &auth.refresh_token);

        let pending = self.state.lock().pending.take();
        if let Some(pending) = pending {
            pending.resolve(LoginOutcome::Authenticated);
        }
    }

    // ── Navigation ────────────────────────────────────────────────────────

    /// Decides whether the surface may load `url`.
    ///
    /// Cancelled navigations are handed to the listener as
    /// `on_open_url(url, true)`.
    pub fn intercept_navigation(&self, url: &str) -> NavigationDecision {
        let decision = self.options.navigation.decide(url);
        if decision == NavigationDecision::Cancel {
            debug!(%url, "external navigation handed to host");
            self.listener().on_open_url(url, true);
        }
        decision
    }

    fn listener(&self) -> Arc<dyn SdkListener> {
        Arc::clone(&self.listener.read())
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(pending) = self.state.get_mut().pending.take() {
            pending.resolve(LoginOutcome::Cancelled);
        }
    }
}

/// Timeout task for one attempt.  Holds only a weak reference so that a
/// forgotten controller is not kept alive by its own timer.
async fn expire_at(controller: Weak<SessionController>, id: Uuid, deadline: Instant) {
    tokio::time::sleep_until(deadline).await;
    if let Some(controller) = controller.upgrade() {
        warn!(attempt = %id, "login timed out");
        controller.complete_attempt(id, LoginOutcome::TimedOut);
    }
}

/// Deadlines past this are treated as "never".
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + timeout`, with the timeout capped so the sum cannot overflow.
fn login_deadline(now: Instant, timeout: Duration) -> Instant {
    now + timeout.min(FAR_FUTURE)
}

/// First few characters of a token, for logs.
fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(4).collect();
    if head.len() < token.len() {
        format!("{head}…")
    } else {
        head
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
