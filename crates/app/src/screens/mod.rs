//! Screens: one module per area, printing to stdout.

pub mod auth;
pub mod notifications;
pub mod password_reset;
pub mod subscriptions;
pub mod users;

use submanager_application::{ApiError, ApplicationError, PasswordResetError, SessionError};
use submanager_domain::DomainError;
use thiserror::Error;

/// Failures a screen reports to the user.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid email or password")]
    InvalidLogin(#[source] SessionError),

    #[error(transparent)]
    Session(SessionError),

    #[error(transparent)]
    Reset(#[from] PasswordResetError),

    #[error(transparent)]
    Input(#[from] DomainError),
}

impl From<SessionError> for ScreenError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::AuthenticationFailure { .. } => Self::InvalidLogin(error),
            SessionError::Storage(_) => Self::Session(error),
        }
    }
}

impl ScreenError {
    /// True when the backend rejected the stored credential mid-screen.
    pub const fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Unauthorized)
                | Self::Application(ApplicationError::Api(ApiError::Unauthorized))
        )
    }
}

/// Result type for screens.
pub type ScreenResult = Result<(), ScreenError>;

/// Formats an amount the way the dashboard shows it.
pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failure_message() {
        let error = ScreenError::from(SessionError::AuthenticationFailure {
            source: ApiError::Status {
                status: 401,
                detail: "Incorrect username or password".to_string(),
            },
        });
        assert_eq!(error.to_string(), "Invalid email or password");
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ScreenError::from(ApplicationError::Api(ApiError::Unauthorized)).is_unauthorized());
        assert!(ScreenError::Api(ApiError::Unauthorized).is_unauthorized());
    }

    #[test]
    fn test_money() {
        assert_eq!(money(15.5), "$15.50");
    }
}
