//! Gateway interception contract.
//!
//! Every backend call passes through one gateway. The gateway attaches the
//! stored credential to the request and classifies the response with
//! [`intercept`]. A rejected credential clears the token store and is
//! announced on an [`InvalidationSignal`]. The gateway never touches session
//! state or navigation itself: the session manager and the navigator react to
//! the signal.

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// HTTP status the backend uses for a missing, invalid or expired credential.
pub const UNAUTHORIZED: u16 = 401;

/// Errors returned by gateway calls.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend rejected the credential. The token store has already been
    /// cleared and the session invalidated.
    #[error("not authorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("request failed with status {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend `detail` message, or the status reason.
        detail: String,
    },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns the backend-provided detail message, if there is one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }

    /// Returns true for failures that happened before a response arrived.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// How a call treats a 401 response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// Clear the credential and invalidate the session.
    #[default]
    Invalidate,
    /// Report the 401 like any other failure. Used for the credential
    /// exchange, where 401 means "wrong password" rather than "session expired".
    PassThrough,
}

/// What the gateway must do with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception {
    /// 2xx: hand the body to the caller.
    Accept,
    /// Clear the token store, emit [`GatewayEvent::SessionInvalidated`] and
    /// fail with [`ApiError::Unauthorized`].
    Invalidate,
    /// Fail with [`ApiError::Status`].
    Reject,
}

/// Classifies a response status.
#[must_use]
pub const fn intercept(status: u16, policy: UnauthorizedPolicy) -> Interception {
    match (status, policy) {
        (200..=299, _) => Interception::Accept,
        (UNAUTHORIZED, UnauthorizedPolicy::Invalidate) => Interception::Invalidate,
        _ => Interception::Reject,
    }
}

/// Events the gateway publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayEvent {
    /// A request was rejected as unauthorized and the credential was cleared.
    SessionInvalidated,
}

/// Broadcast channel carrying [`GatewayEvent`]s.
#[derive(Debug, Clone)]
pub struct InvalidationSignal {
    sender: broadcast::Sender<GatewayEvent>,
}

impl InvalidationSignal {
    /// Default buffer size.
    pub const DEFAULT_CAPACITY: usize = 16;

    /// Creates a signal buffering up to [`Self::DEFAULT_CAPACITY`] undelivered events.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::DEFAULT_CAPACITY);
        Self { sender }
    }

    /// Registers a new listener.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GatewayEvent> {
        self.sender.subscribe()
    }

    /// Announces that the stored credential was rejected.
    pub fn session_invalidated(&self) {
        // No listeners is fine: nothing is holding session state.
        let listeners = self
            .sender
            .send(GatewayEvent::SessionInvalidated)
            .unwrap_or(0);
        debug!(listeners, "session invalidated by gateway");
    }
}

impl Default for InvalidationSignal {
    fn default() -> Self {
        Self::new()
    }
}
