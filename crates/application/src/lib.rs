//! SubManager Application - Session control, ports and use cases
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for the backend, token storage and time)
//! - The session manager state machine and guard-driven navigation
//! - The gateway interception contract
//! - Use case orchestration
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
mod testing;

pub use auth::{MemoryTokenStore, Navigation, Navigator, ScreenTicket, SessionError, SessionManager};
pub use error::{ApplicationError, ApplicationResult};
pub use gateway::{
    ApiError, GatewayEvent, Interception, InvalidationSignal, UnauthorizedPolicy, intercept,
};
pub use ports::{
    AuthApi, Clock, NotificationApi, PasswordResetApi, SubscriptionApi, TokenStore,
    TokenStoreError, UserApi,
};
pub use use_cases::{
    AdminView, DashboardView, Inbox, InsightsCache, LoadAdminOverview, LoadDashboard,
    ManageSubscriptions, ManageUsers, NotificationInbox, PasswordResetError, PasswordResetWizard,
};
