//! Load dashboard use case.

use std::sync::Arc;

use chrono::NaiveDate;
use submanager_domain::{SpendingSummary, Subscription};

use crate::ApplicationResult;
use crate::ports::{Clock, SubscriptionApi};

/// Renewal window used by the dashboard when none is configured.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// Everything the dashboard screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// All of the user's subscriptions.
    pub subscriptions: Vec<Subscription>,
    /// Subscriptions renewing inside the window, soonest first.
    pub upcoming: Vec<Subscription>,
    /// Spending figures over `subscriptions`.
    pub summary: SpendingSummary,
    /// Size of the renewal window in days.
    pub window_days: u32,
    /// Date the view was computed for.
    pub today: NaiveDate,
}

impl DashboardView {
    /// Days until each upcoming renewal.
    pub fn upcoming_with_days(&self) -> impl Iterator<Item = (&Subscription, i64)> {
        self.upcoming
            .iter()
            .map(|s| (s, s.days_until_renewal(self.today)))
    }
}

/// Use case fetching the subscription list and upcoming renewals together.
pub struct LoadDashboard<A: SubscriptionApi, C: Clock> {
    api: Arc<A>,
    clock: C,
    window_days: u32,
}

impl<A: SubscriptionApi, C: Clock> LoadDashboard<A, C> {
    /// Creates the use case with the default renewal window.
    pub const fn new(api: Arc<A>, clock: C) -> Self {
        Self {
            api,
            clock,
            window_days: DEFAULT_UPCOMING_DAYS,
        }
    }

    /// Overrides the renewal window.
    #[must_use]
    pub const fn with_window(mut self, window_days: u32) -> Self {
        self.window_days = window_days;
        self
    }

    /// Fetches both lists concurrently.
    ///
    /// # Errors
    /// Fails if either call fails.
    pub async fn execute(&self) -> ApplicationResult<DashboardView> {
        let (subscriptions, mut upcoming) = tokio::try_join!(
            self.api.list_subscriptions(),
            self.api.upcoming_renewals(self.window_days),
        )?;

        upcoming.sort_by_key(|s| s.renewal_date);
        let summary = SpendingSummary::of(&subscriptions);

        Ok(DashboardView {
            subscriptions,
            upcoming,
            summary,
            window_days: self.window_days,
            today: self.clock.today(),
        })
    }
}
