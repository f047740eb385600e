//! Session state and login outcomes.
//!
//! ```text
//!                  initialize                 userAuth
//! Uninitialized ─────────────▶ Initialized{false} ───────▶ Initialized{true}
//!                                   ▲                          │
//!                                   └──────── userLogout ──────┘
//!                    (initialize again from any state resets to {false})
//! ```

use std::fmt;

/// Login state owned by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// `initialize` has not been called yet.
    #[default]
    Uninitialized,
    /// Configured; `logged_in` mirrors the embedded app's session.
    Initialized { logged_in: bool },
}

impl SessionState {
    /// Tri-state view: `None` before initialization, otherwise the login flag.
    pub fn logged_in(self) -> Option<bool> {
        match self {
            SessionState::Uninitialized => None,
            SessionState::Initialized { logged_in } => Some(logged_in),
        }
    }

    /// Updates the login flag.  Has no effect before initialization.
    pub fn set_logged_in(&mut self, value: bool) {
        if let SessionState::Initialized { logged_in } = self {
            *logged_in = value;
        }
    }
}

/// Why a login attempt finished.
///
/// Only [`LoginOutcome::Authenticated`] counts as success; the host-facing
/// result of a login is [`LoginOutcome::succeeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// A `userAuth` message with both tokens arrived.
    Authenticated,
    /// The login deadline elapsed first.
    TimedOut,
    /// A newer login attempt replaced this one.
    Superseded,
    /// The caller dropped the attempt (or the controller went away).
    Cancelled,
    /// The SDK was re-initialized while the attempt was pending.
    Reset,
    /// The attempt never started: no surface, empty token, or incomplete
    /// configuration.
    Rejected,
}

impl LoginOutcome {
    /// The boolean login result reported to the host.
    pub fn succeeded(self) -> bool {
        matches!(self, LoginOutcome::Authenticated)
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoginOutcome::Authenticated => "authenticated",
            LoginOutcome::TimedOut => "timed out",
            LoginOutcome::Superseded => "superseded",
            LoginOutcome::Cancelled => "cancelled",
            LoginOutcome::Reset => "reset",
            LoginOutcome::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_uninitialized() {
        assert_eq!(SessionState::default(), SessionState::Uninitialized);
        assert_eq!(SessionState::default().logged_in(), None);
    }

    #[test]
    fn test_set_logged_in_before_initialize_is_ignored() {
        // Arrange
        let mut state = SessionState::Uninitialized;
        // Act
        state.set_logged_in(true);
        // Assert
        assert_eq!(state.logged_in(), None);
    }

    #[test]
    fn test_set_logged_in_after_initialize() {
        let mut state = SessionState::Initialized { logged_in: false };
        state.set_logged_in(true);
        assert_eq!(state.logged_in(), Some(true));
        state.set_logged_in(false);
        assert_eq!(state.logged_in(), Some(false));
    }

    #[test]
    fn test_only_authenticated_succeeds() {
        assert!(LoginOutcome::Authenticated.succeeded());
        for outcome in [
            LoginOutcome::TimedOut,
            LoginOutcome::Superseded,
            LoginOutcome::Cancelled,
            LoginOutcome::Reset,
            LoginOutcome::Rejected,
        ] {
            assert!(!outcome.succeeded(), "{outcome} must not count as success");
        }
    }
}
