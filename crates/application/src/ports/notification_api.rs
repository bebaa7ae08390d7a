//! Notification backend port

use async_trait::async_trait;
use submanager_domain::{Notification, RenewalCheck};

use crate::gateway::ApiError;

/// Renewal reminders for the current user.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Lists the newest `limit` notifications.
    async fn list_notifications(&self, limit: u32) -> Result<Vec<Notification>, ApiError>;

    /// Counts unread notifications.
    async fn unread_count(&self) -> Result<u64, ApiError>;

    /// Marks a notification as read.
    async fn mark_read(&self, id: &str) -> Result<(), ApiError>;

    /// Asks the backend to scan for upcoming renewals now.
    async fn check_renewals(&self) -> Result<RenewalCheck, ApiError>;
}
