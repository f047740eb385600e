//! The host-facing handle for one login attempt.
//!
//! # How completion works
//!
//! `start_login` creates a `tokio::sync::oneshot` channel.  The sender is
//! parked in the controller's pending slot; the receiver lives here.  Whoever
//! takes the sender out of the slot (the `userAuth` handler, the timeout
//! task, a newer login, a re-initialize, or this handle's `Drop`) is the one
//! and only resolver.  The slot is emptied under the controller lock, so a
//! second resolver never finds a sender.
//!
//! # Cancellation
//!
//! Dropping an unresolved `LoginAttempt` clears the pending slot and stops the
//! timeout task.  A `userAuth` arriving afterwards still updates the session
//! and notifies the listener, but completes nothing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use uuid::Uuid;

use crate::application::session_controller::SessionController;
use crate::domain::LoginOutcome;

/// A pending login.  Resolves to `true` only when the web app authenticated.
///
/// Await it directly for the boolean, or call [`LoginAttempt::outcome`] to
/// learn why it finished.
#[must_use = "dropping a LoginAttempt cancels the login"]
pub struct LoginAttempt {
    id: Uuid,
    rx: oneshot::Receiver<LoginOutcome>,
    controller: Weak<SessionController>,
    outcome: Option<LoginOutcome>,
}

impl LoginAttempt {
    /// Handle for an attempt registered in the controller's pending slot.
    pub(crate) fn pending(
        id: Uuid,
        rx: oneshot::Receiver<LoginOutcome>,
        controller: Weak<SessionController>,
    ) -> Self {
        Self {
            id,
            rx,
            controller,
            outcome: None,
        }
    }

    /// Handle for an attempt that finished before it started.
    pub(crate) fn resolved(outcome: LoginOutcome) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        Self {
            id: Uuid::new_v4(),
            rx,
            controller: Weak::new(),
            outcome: None,
        }
    }

    /// Identifier used in log lines for this attempt.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Waits for the attempt and reports why it finished.
    pub async fn outcome(mut self) -> LoginOutcome {
        std::future::poll_fn(|cx| self.poll_outcome(cx)).await
    }

    fn poll_outcome(&mut self, cx: &mut Context<'_>) -> Poll<LoginOutcome> {
        if let Some(outcome) = self.outcome {
            return Poll::Ready(outcome);
        }
        let outcome = match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => outcome,
            // Sender dropped without a value: the controller went away.
            Poll::Ready(Err(_)) => LoginOutcome::Cancelled,
            Poll::Pending => return Poll::Pending,
        };
        self.outcome = Some(outcome);
        Poll::Ready(outcome)
    }
}

impl std::fmt::Debug for LoginAttempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginAttempt")
            .field("id", &self.id)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Future for LoginAttempt {
    type Output = bool;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<bool> {
        self.get_mut().poll_outcome(cx).map(LoginOutcome::succeeded)
    }
}

impl Drop for LoginAttempt {
    fn drop(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        if let Some(controller) = self.controller.upgrade() {
            controller.complete_attempt(self.id, LoginOutcome::Cancelled);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
