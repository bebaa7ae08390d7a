//! `/auth` password-reset endpoints.
//!
//! These calls are unrelated to the signed-in session: a 401 for a bad code
//! is an ordinary rejection and must not log the user out.

use async_trait::async_trait;
use reqwest::Method;
use submanager_application::gateway::{ApiError, UnauthorizedPolicy};
use submanager_application::ports::PasswordResetApi;
use submanager_domain::{ForgotPasswordRequest, ResetPasswordRequest, VerifyOtpRequest};

use crate::adapters::BackendClient;

#[async_trait]
impl PasswordResetApi for BackendClient {
    async fn request_reset_code(&self, request: &ForgotPasswordRequest) -> Result<(), ApiError> {
        let url = self.endpoint("/auth/forgot-password")?;
        self.send_discarding_with(
            self.request(Method::POST, url).json(request),
            UnauthorizedPolicy::PassThrough,
        )
        .await
    }

    async fn verify_reset_code(&self, request: &VerifyOtpRequest) -> Result<(), ApiError> {
        let url = self.endpoint("/auth/verify-otp")?;
        self.send_discarding_with(
            self.request(Method::POST, url).json(request),
            UnauthorizedPolicy::PassThrough,
        )
        .await
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        let url = self.endpoint("/auth/reset-password")?;
        self.send_discarding_with(
            self.request(Method::POST, url).json(request),
            UnauthorizedPolicy::PassThrough,
        )
        .await
    }
}
