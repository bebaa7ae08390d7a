//! Password-reset wizard.
//!
//! Three backend calls guarded by a step machine: the wizard only advances
//! when the current step's call succeeds, and a failure leaves it where it was
//! with an error message for the screen.

use std::sync::Arc;

use submanager_domain::{
    DomainError, ForgotPasswordRequest, ResetPasswordRequest, ResetStep, VerifyOtpRequest,
    validate_email,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::gateway::ApiError;
use crate::ports::PasswordResetApi;

/// Length of the emailed one-time code.
pub const OTP_LENGTH: usize = 6;

/// Shortest accepted new password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Shown after the code was sent.
pub const CODE_SENT_MESSAGE: &str = "Password reset code sent to your email";

/// Errors from a wizard step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordResetError {
    /// A step was submitted out of order.
    #[error("expected step {expected:?}, wizard is at {actual:?}")]
    WrongStep {
        /// Step the submission belongs to.
        expected: ResetStep,
        /// Step the wizard is on.
        actual: ResetStep,
    },

    /// Input failed local validation.
    #[error("{0}")]
    Invalid(#[from] DomainError),

    /// The code is not exactly [`OTP_LENGTH`] digits.
    #[error("the code must be {OTP_LENGTH} digits")]
    MalformedCode,

    /// The new password is shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// The backend refused the step.
    #[error("{0}")]
    Rejected(String),

    /// No response from the backend.
    #[error("Network error. Please try again.")]
    Network,
}

impl PasswordResetError {
    fn from_api(error: ApiError, fallback: &str) -> Self {
        if error.is_network() {
            return Self::Network;
        }
        Self::Rejected(error.detail().unwrap_or(fallback).to_string())
    }
}

/// State of one password-reset attempt.
pub struct PasswordResetWizard<P: PasswordResetApi> {
    api: Arc<P>,
    step: ResetStep,
    email: String,
    otp: String,
    message: Option<String>,
    error: Option<String>,
}

impl<P: PasswordResetApi> PasswordResetWizard<P> {
    /// Starts at [`ResetStep::EnterEmail`].
    #[must_use]
    pub const fn new(api: Arc<P>) -> Self {
        Self {
            api,
            step: ResetStep::EnterEmail,
            email: String::new(),
            otp: String::new(),
            message: None,
            error: None,
        }
    }

    /// Resumes at a later step with values gathered earlier.
    ///
    /// Used when each step runs in a separate process.
    #[must_use]
    pub fn resume(api: Arc<P>, step: ResetStep, email: &str, otp: &str) -> Self {
        Self {
            step,
            email: email.trim().to_string(),
            otp: otp.trim().to_string(),
            ..Self::new(api)
        }
    }

    /// Step currently awaiting input.
    #[must_use]
    pub const fn step(&self) -> ResetStep {
        self.step
    }

    /// Email the code was sent to; empty before the first step.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Informational message from the last successful step.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Error from the last failed step.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Step 1: emails a code to `email`.
    ///
    /// # Errors
    /// Fails on an invalid email or when the backend refuses.
    pub async fn submit_email(&mut self, email: &str) -> Result<ResetStep, PasswordResetError> {
        self.expect_step(ResetStep::EnterEmail)?;
        let email = email.trim();
        let outcome = match validate_email(email) {
            Ok(()) => self
                .api
                .request_reset_code(&ForgotPasswordRequest {
                    email: email.to_string(),
                })
                .await
                .map_err(|e| PasswordResetError::from_api(e, "Failed to send reset code")),
            Err(e) => Err(e.into()),
        };
        self.settle(outcome)?;
        self.email = email.to_string();
        self.message = Some(CODE_SENT_MESSAGE.to_string());
        Ok(self.step)
    }

    /// Step 2: checks the emailed code.
    ///
    /// # Errors
    /// Fails on a malformed code or when the backend rejects it.
    pub async fn submit_code(&mut self, otp: &str) -> Result<ResetStep, PasswordResetError> {
        self.expect_step(ResetStep::VerifyCode)?;
        let otp = otp.trim();
        let outcome = if otp.len() == OTP_LENGTH && otp.bytes().all(|b| b.is_ascii_digit()) {
            self.api
                .verify_reset_code(&VerifyOtpRequest {
                    email: self.email.clone(),
                    otp: otp.to_string(),
                })
                .await
                .map_err(|e| PasswordResetError::from_api(e, "Invalid OTP"))
        } else {
            Err(PasswordResetError::MalformedCode)
        };
        self.settle(outcome)?;
        self.otp = otp.to_string();
        Ok(self.step)
    }

    /// Step 3: sets the new password.
    ///
    /// # Errors
    /// Fails on a short password or when the backend refuses.
    pub async fn submit_password(
        &mut self,
        new_password: &str,
    ) -> Result<ResetStep, PasswordResetError> {
        self.expect_step(ResetStep::NewPassword)?;
        let outcome = if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            Err(PasswordResetError::PasswordTooShort)
        } else {
            self.api
                .reset_password(&ResetPasswordRequest {
                    email: self.email.clone(),
                    otp: self.otp.clone(),
                    new_password: new_password.to_string(),
                })
                .await
                .map_err(|e| PasswordResetError::from_api(e, "Failed to reset password"))
        };
        self.settle(outcome)?;
        info!(email = %self.email, "password reset completed");
        Ok(self.step)
    }

    /// Goes back one step and clears messages.
    ///
    /// Returns `None` from the first step: the screen leaves for login.
    pub fn back(&mut self) -> Option<ResetStep> {
        let previous = self.step.back()?;
        self.step = previous;
        self.message = None;
        self.error = None;
        Some(previous)
    }

    fn expect_step(&self, expected: ResetStep) -> Result<(), PasswordResetError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(PasswordResetError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn settle(&mut self, outcome: Result<(), PasswordResetError>) -> Result<(), PasswordResetError> {
        match outcome {
            Ok(()) => {
                self.error = None;
                self.step = self.step.next();
                debug!(step = self.step.number(), "password reset advanced");
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }
}
