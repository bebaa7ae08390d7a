//! Renewal notifications.

use serde::{Deserialize, Serialize};

/// A notification addressed to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Backend id.
    #[serde(alias = "_id")]
    pub id: String,
    /// Human-readable text.
    #[serde(default)]
    pub message: String,
    /// Backend category, e.g. `renewal_reminder`.
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    /// Related subscription.
    #[serde(default)]
    pub subscription_id: Option<String>,
    /// Whether the user has seen it.
    #[serde(default)]
    pub is_read: bool,
    /// Creation timestamp as reported by the backend.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of the unread-count endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadCount {
    /// Unread notifications.
    #[serde(alias = "unread_count")]
    pub count: u64,
}

/// Response of the renewal check trigger.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenewalCheck {
    /// Backend status message.
    pub message: Option<String>,
    /// Notifications created by the check, when reported.
    pub notifications_created: Option<u64>,
}
