//! Password reset backend port

use async_trait::async_trait;
use submanager_domain::{ForgotPasswordRequest, ResetPasswordRequest, VerifyOtpRequest};

use crate::gateway::ApiError;

/// The three calls behind the password-reset wizard.
#[async_trait]
pub trait PasswordResetApi: Send + Sync {
    /// Emails a one-time code.
    async fn request_reset_code(&self, request: &ForgotPasswordRequest) -> Result<(), ApiError>;

    /// Checks a one-time code.
    async fn verify_reset_code(&self, request: &VerifyOtpRequest) -> Result<(), ApiError>;

    /// Sets the new password.
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError>;
}
