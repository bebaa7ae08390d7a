//! Subscription backend port

use async_trait::async_trait;
use submanager_domain::{Subscription, SubscriptionDraft, SubscriptionInsights};

use crate::gateway::ApiError;

/// Subscription CRUD, renewals and insights.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    /// Lists the current user's subscriptions (all of them for administrators).
    async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError>;

    /// Lists subscriptions renewing within `within_days` days.
    async fn upcoming_renewals(&self, within_days: u32) -> Result<Vec<Subscription>, ApiError>;

    /// Creates a subscription.
    async fn create_subscription(
        &self,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, ApiError>;

    /// Replaces a subscription's fields.
    async fn update_subscription(
        &self,
        id: &str,
        draft: &SubscriptionDraft,
    ) -> Result<Subscription, ApiError>;

    /// Deletes a subscription.
    async fn delete_subscription(&self, id: &str) -> Result<(), ApiError>;

    /// Requests AI cost insights for a subscription.
    async fn subscription_insights(&self, id: &str) -> Result<SubscriptionInsights, ApiError>;
}
