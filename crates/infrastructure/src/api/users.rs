//! `/users` endpoints.

use async_trait::async_trait;
use reqwest::Method;
use submanager_application::gateway::ApiError;
use submanager_application::ports::UserApi;
use submanager_domain::{NewUser, NotificationPreferences, UserAccount};

use crate::adapters::BackendClient;

#[async_trait]
impl UserApi for BackendClient {
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.get_json(self.endpoint("/users/")?).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<UserAccount, ApiError> {
        self.send_json(Method::POST, self.endpoint("/users/")?, user)
            .await
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let url = self.resource("/users", id, &[])?;
        self.send_discarding(self.request(Method::DELETE, url)).await
    }

    async fn update_notification_preferences(
        &self,
        preferences: &NotificationPreferences,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("/users/me/notifications")?;
        self.send_discarding(self.request(Method::PUT, url).json(preferences))
            .await
    }
}
