//! Notification inbox.

use std::sync::Arc;

use submanager_domain::{Notification, RenewalCheck};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::NotificationApi;

/// Page size used by the inbox when none is configured.
pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 50;

/// One page of notifications plus the unread badge count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbox {
    /// Latest notifications, in backend order.
    pub notifications: Vec<Notification>,
    /// Unread count across all notifications, not just this page.
    pub unread: u64,
}

/// Reads and updates the current user's notifications.
pub struct NotificationInbox<N: NotificationApi> {
    api: Arc<N>,
    limit: u32,
}

impl<N: NotificationApi> NotificationInbox<N> {
    /// Creates an inbox using [`DEFAULT_NOTIFICATION_LIMIT`].
    #[must_use]
    pub const fn new(api: Arc<N>) -> Self {
        Self {
            api,
            limit: DEFAULT_NOTIFICATION_LIMIT,
        }
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Fetches the list and the unread badge together.
    ///
    /// # Errors
    /// Fails if either call fails.
    pub async fn load(&self) -> ApplicationResult<Inbox> {
        let (notifications, unread) = tokio::try_join!(
            self.api.list_notifications(self.limit),
            self.api.unread_count(),
        )?;
        Ok(Inbox {
            notifications,
            unread,
        })
    }

    /// # Errors
    /// Returns the backend error.
    pub async fn unread(&self) -> ApplicationResult<u64> {
        Ok(self.api.unread_count().await?)
    }

    /// # Errors
    /// Returns the backend error.
    pub async fn mark_read(&self, id: &str) -> ApplicationResult<()> {
        self.api.mark_read(id).await?;
        Ok(())
    }

    /// Asks the backend to create reminders for upcoming renewals.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn check_renewals(&self) -> ApplicationResult<RenewalCheck> {
        let outcome = self.api.check_renewals().await?;
        info!(created = outcome.notifications_created, "renewal check finished");
        Ok(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gateway::ApiError;
    use crate::testing::FakeBackend;

    #[tokio::test]
    async fn test_load_empty_inbox() {
        let inbox = NotificationInbox::new(Arc::new(FakeBackend::default())).with_limit(10);

        let loaded = inbox.load().await.unwrap();

        assert!(loaded.notifications.is_empty());
        assert_eq!(loaded.unread, 0);
    }

    #[tokio::test]
    async fn test_unauthorized_surfaces_as_error() {
        let backend = FakeBackend::default();
        backend.fail_with(ApiError::Unauthorized);
        let inbox = NotificationInbox::new(Arc::new(backend));

        assert!(inbox.check_renewals().await.is_err());
        assert!(inbox.mark_read("n1").await.is_err());
    }
}
