//! User administration port

use async_trait::async_trait;
use submanager_domain::{NewUser, NotificationPreferences, UserAccount};

use crate::gateway::ApiError;

/// Account management. Everything except the preferences call is
/// administrator-only on the backend.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Lists all accounts.
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError>;

    /// Creates an account.
    async fn create_user(&self, user: &NewUser) -> Result<UserAccount, ApiError>;

    /// Deletes an account.
    async fn delete_user(&self, id: &str) -> Result<(), ApiError>;

    /// Updates the current user's reminder settings.
    async fn update_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), ApiError>;
}
