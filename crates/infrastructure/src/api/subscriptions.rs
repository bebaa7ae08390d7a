//! `/subscriptions` endpoints.

use async_trait::async_trait;
use reqwest::Method;
use submanager_application::gateway::ApiError;
use submanager_application::ports::SubscriptionApi;
use submanager_domain::{InsightsEnvelope, Subscription, SubscriptionDraft, SubscriptionInsights};

use crate::adapters::BackendClient;

const COLLECTION: &str = "/subscriptions";

#[async_trait]
impl SubscriptionApi for BackendClient {
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.get_json(self.endpoint("/subscriptions/")?).await
    }

    async fn upcoming_renewals(&self, within_days: u32) -> Result<Vec<Subscription>, ApiError> {
        let url = self.endpoint_with_query(
            "/subscriptions/upcoming",
            &[("within_days", within_days.to_string())],
        )?;
        self.get_json(url).await
    }

    async fn create_subscription(
        &self,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, ApiError> {
        self.send_json(Method::POST, self.endpoint("/subscriptions/")?, draft)
            .await
    }

    async fn update_subscription(
        &self,
        id: &str,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, ApiError> {
        self.send_json(Method::PUT, self.resource(COLLECTION, id, &[])?, draft)
            .await
    }

    async fn delete_subscription(&self, id: &str) -> Result<(), ApiError> {
        let url = self.resource(COLLECTION, id, &[])?;
        self.send_discarding(self.request(Method::DELETE, url)).await
    }

    async fn subscription_insights(&self, id: &str) -> Result<SubscriptionInsights, ApiError> {
        let envelope: InsightsEnvelope = self
            .get_json(self.resource(COLLECTION, id, &["insights"])?)
            .await?;
        Ok(envelope.insights)
    }
}
