//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod auth_api;
mod clock;
mod notification_api;
mod password_reset_api;
mod subscription_api;
mod token_store;
mod user_api;

pub use auth_api::AuthApi;
pub use clock::Clock;
pub use notification_api::NotificationApi;
pub use password_reset_api::PasswordResetApi;
pub use subscription_api::SubscriptionApi;
pub use token_store::{TokenStore, TokenStoreError};
pub use user_api::UserApi;
