//! Administrator overview and user management.

use std::sync::Arc;

use submanager_domain::{NewUser, SpendingSummary, Subscription, UserAccount, UserStats};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::{SubscriptionApi, UserApi};

/// Data behind the admin panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminView {
    /// Every subscription visible to the administrator.
    pub subscriptions: Vec<Subscription>,
    /// All user accounts.
    pub users: Vec<UserAccount>,
    /// Spending totals over `subscriptions`.
    pub spending: SpendingSummary,
    /// Account counts over `users`.
    pub user_stats: UserStats,
}

/// Loads subscriptions and users together.
pub struct LoadAdminOverview<S: SubscriptionApi, U: UserApi> {
    subscriptions: Arc<S>,
    users: Arc<U>,
}

impl<S: SubscriptionApi, U: UserApi> LoadAdminOverview<S, U> {
    /// Creates the use case.
    #[must_use]
    pub const fn new(subscriptions: Arc<S>, users: Arc<U>) -> Self {
        Self {
            subscriptions,
            users,
        }
    }

    /// # Errors
    /// Fails if either list cannot be fetched.
    pub async fn execute(&self) -> ApplicationResult<AdminView> {
        let (subscriptions, users) = tokio::try_join!(
            self.subscriptions.list_subscriptions(),
            self.users.list_users(),
        )?;

        Ok(AdminView {
            spending: SpendingSummary::of(&subscriptions),
            user_stats: UserStats::of(&users),
            subscriptions,
            users,
        })
    }
}

/// Creates and removes user accounts.
pub struct ManageUsers<U: UserApi> {
    api: Arc<U>,
}

impl<U: UserApi> ManageUsers<U> {
    /// Creates the use case.
    #[must_use]
    pub const fn new(api: Arc<U>) -> Self {
        Self { api }
    }

    /// Validates and creates an account.
    ///
    /// # Errors
    /// Returns a domain error for an invalid form, otherwise the backend error.
    pub async fn create(&self, new_user: &NewUser) -> ApplicationResult<UserAccount> {
        new_user.validate()?;
        let created = self.api.create_user(new_user).await?;
        info!(id = %created.id, admin = created.is_admin, "user created");
        Ok(created)
    }

    /// # Errors
    /// Returns the backend error.
    pub async fn delete(&self, id: &str) -> ApplicationResult<()> {
        self.api.delete_user(id).await?;
        info!(id, "user deleted");
        Ok(())
    }
}
