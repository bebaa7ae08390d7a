//! User accounts managed by administrators.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A user account as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Backend id.
    #[serde(alias = "_id")]
    pub id: String,
    /// Login email.
    pub email: String,
    /// Administrator flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Creation timestamp as reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Administrator flag.
    pub is_admin: bool,
}

impl NewUser {
    /// Checks the fields a form would reject.
    ///
    /// # Errors
    /// Returns an error for an empty or malformed email, or an empty password.
    pub fn validate(&self) -> DomainResult<()> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(DomainError::MissingField("password"));
        }
        Ok(())
    }
}

/// Rejects empty addresses and addresses without a local part and a domain.
///
/// # Errors
/// Returns [`DomainError::MissingField`] or [`DomainError::InvalidEmail`].
pub fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::MissingField("email"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(DomainError::InvalidEmail(email.to_string())),
    }
}

/// Reminder settings for the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    /// Whether renewal reminders are emailed.
    pub email_enabled: bool,
    /// How many days before renewal to remind.
    pub reminder_days_before: u32,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_enabled: true,
            reminder_days_before: 7,
        }
    }
}

/// Account figures for the admin overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    /// Number of accounts.
    pub total: usize,
    /// Number of administrators.
    pub admins: usize,
}

impl UserStats {
    /// Counts `users`.
    #[must_use]
    pub fn of(users: &[UserAccount]) -> Self {
        Self {
            total: users.len(),
            admins: users.iter().filter(|u| u.is_admin).count(),
        }
    }
}
