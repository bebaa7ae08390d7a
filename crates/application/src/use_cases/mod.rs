//! Application use cases (business logic orchestration).

mod admin;
mod dashboard;
mod insights;
mod notifications;
mod password_reset;
mod subscriptions;

pub use admin::{AdminView, LoadAdminOverview, ManageUsers};
pub use dashboard::{DEFAULT_UPCOMING_DAYS, DashboardView, LoadDashboard};
pub use insights::InsightsCache;
pub use notifications::{DEFAULT_NOTIFICATION_LIMIT, Inbox, NotificationInbox};
pub use password_reset::{
    CODE_SENT_MESSAGE, MIN_PASSWORD_LENGTH, OTP_LENGTH, PasswordResetError, PasswordResetWizard,
};
pub use subscriptions::ManageSubscriptions;
