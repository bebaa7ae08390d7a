//! Password-reset wizard steps and payloads.

use serde::{Deserialize, Serialize};

/// Position in the password-reset wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResetStep {
    /// Ask for the account email.
    #[default]
    EnterEmail,
    /// Ask for the emailed one-time code.
    VerifyCode,
    /// Ask for the new password.
    NewPassword,
    /// Password changed.
    Done,
}

impl ResetStep {
    /// One-based step number for a progress indicator.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::EnterEmail => 1,
            Self::VerifyCode => 2,
            Self::NewPassword => 3,
            Self::Done => 4,
        }
    }

    /// The step after a successful submission.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::EnterEmail => Self::VerifyCode,
            Self::VerifyCode => Self::NewPassword,
            Self::NewPassword | Self::Done => Self::Done,
        }
    }

    /// The previous step, or `None` when going back leaves the wizard.
    #[must_use]
    pub const fn back(self) -> Option<Self> {
        match self {
            Self::EnterEmail => None,
            Self::VerifyCode => Some(Self::EnterEmail),
            Self::NewPassword => Some(Self::VerifyCode),
            Self::Done => Some(Self::NewPassword),
        }
    }
}

/// `POST /auth/forgot-password` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    /// Account email.
    pub email: String,
}

/// `POST /auth/verify-otp` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    /// Account email.
    pub email: String,
    /// Emailed one-time code.
    pub otp: String,
}

/// `POST /auth/reset-password` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    /// Account email.
    pub email: String,
    /// Verified one-time code.
    pub otp: String,
    /// Replacement password.
    pub new_password: String,
}
