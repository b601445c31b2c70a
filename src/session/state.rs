//! Session state as seen by the UI.

use crate::api::Conversation;

/// States of the training-session launcher.
///
/// ```text
/// Idle ──Start training──▶ Creating ──Ok──▶ Active
///                                   ──Err─▶ Error
/// Active / Error ──dismiss──▶ Idle
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No conversation requested yet.
    Idle,
    /// A create-conversation request is in flight.
    Creating,
    /// The service returned a conversation.
    Active(Conversation),
    /// The request failed; holds the user-facing message.
    Error(String),
}

impl SessionState {
    /// Returns `true` while a request is in flight.
    ///
    /// ```
    /// use fi_trainer::session::SessionState;
    ///
    /// assert!(!SessionState::Idle.is_busy());
    /// assert!(SessionState::Creating.is_busy());
    /// assert!(!SessionState::Error("x".into()).is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Creating)
    }

    /// A short label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Ready",
            SessionState::Creating => "Starting session...",
            SessionState::Active(_) => "Session ready",
            SessionState::Error(_) => "Error",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}
