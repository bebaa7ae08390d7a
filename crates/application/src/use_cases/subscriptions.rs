//! Create, edit and delete subscriptions.

use std::sync::Arc;

use submanager_domain::{Subscription, SubscriptionDraft};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::SubscriptionApi;

/// Use case for subscription changes made from the dashboard.
pub struct ManageSubscriptions<A: SubscriptionApi> {
    api: Arc<A>,
}

impl<A: SubscriptionApi> ManageSubscriptions<A> {
    /// Creates a new `ManageSubscriptions` use case.
    #[must_use]
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Validates and creates a subscription.
    ///
    /// # Errors
    /// Returns a domain error before any call if the draft is invalid,
    /// otherwise the backend error.
    pub async fn create(&self, draft: &SubscriptionDraft) -> ApplicationResult<Subscription> {
        draft.validate()?;
        let created = self.api.create_subscription(draft).await?;
        info!(id = %created.id, service = %created.service_name, "subscription created");
        Ok(created)
    }

    /// Validates and updates a subscription.
    ///
    /// # Errors
    /// Same as [`Self::create`].
    pub async fn update(
        &self,
        id: &str,
        draft: &SubscriptionDraft,
    ) -> ApplicationResult<Subscription> {
        draft.validate()?;
        let updated = self.api.update_subscription(id, draft).await?;
        info!(id, "subscription updated");
        Ok(updated)
    }

    /// Deletes a subscription.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn delete(&self, id: &str) -> ApplicationResult<()> {
        self.api.delete_subscription(id).await?;
        info!(id, "subscription deleted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ApplicationError;
    use crate::testing::{FakeBackend, date, subscription};
    use submanager_domain::{BillingCycle, DomainError, Visibility};

    #[tokio::test]
    async fn test_create_shared() {
        let backend = FakeBackend::default();
        let use_case = ManageSubscriptions::new(Arc::new(backend.clone()));
        let draft = SubscriptionDraft::new("Netflix", 15.49, BillingCycle::Monthly, date("2025-05-01"))
            .with_visibility(Visibility::Shared);

        let created = use_case.create(&draft).await.unwrap();

        assert!(created.is_shared());
        assert_eq!(backend.subscriptions().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_backend() {
        let backend = FakeBackend::default();
        let use_case = ManageSubscriptions::new(Arc::new(backend.clone()));
        let draft = SubscriptionDraft::new("  ", 5.0, BillingCycle::Monthly, date("2025-05-01"));

        let error = use_case.create(&draft).await.unwrap_err();

        assert!(matches!(
            error,
            ApplicationError::Domain(DomainError::MissingField("service_name"))
        ));
        assert!(backend.subscriptions().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let backend = FakeBackend::default();
        backend.put_subscriptions(vec![subscription("s1", 10.0, "2025-05-01")]);
        let use_case = ManageSubscriptions::new(Arc::new(backend.clone()));

        let mut draft = SubscriptionDraft::from(&backend.subscriptions()[0]);
        draft.cost = 12.0;
        let updated = use_case.update("s1", &draft).await.unwrap();
        assert!((updated.cost - 12.0).abs() < f64::EPSILON);

        use_case.delete("s1").await.unwrap();
        assert!(backend.subscriptions().is_empty());
        assert!(use_case.delete("s1").await.is_err());
    }
}
