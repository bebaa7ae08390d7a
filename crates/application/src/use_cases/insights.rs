//! Per-subscription insights, fetched once per subscription.

use std::collections::HashMap;
use std::sync::Arc;

use submanager_domain::SubscriptionInsights;
use tokio::sync::Mutex;
use tracing::debug;

use crate::ApplicationResult;
use crate::ports::SubscriptionApi;

/// Caches insights by subscription id for the lifetime of a screen.
pub struct InsightsCache<A: SubscriptionApi> {
    api: Arc<A>,
    entries: Mutex<HashMap<String, SubscriptionInsights>>,
}

impl<A: SubscriptionApi> InsightsCache<A> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns cached insights, fetching them on first use.
    ///
    /// The lock is not held during the fetch, so lookups for other
    /// subscriptions proceed meanwhile. Failures are not cached, so a later
    /// call retries.
    ///
    /// # Errors
    /// Returns the backend error when the fetch fails.
    pub async fn get_or_fetch(&self, subscription_id: &str) -> ApplicationResult<SubscriptionInsights> {
        let hit = self.entries.lock().await.get(subscription_id).cloned();
        if let Some(hit) = hit {
            debug!(subscription_id, "insights cache hit");
            return Ok(hit);
        }

        let fetched = self.api.subscription_insights(subscription_id).await?;
        // A concurrent fetch for the same id may have landed first; keep it.
        let insights = self
            .entries
            .lock()
            .await
            .entry(subscription_id.to_string())
            .or_insert(fetched)
            .clone();
        Ok(insights)
    }
}
