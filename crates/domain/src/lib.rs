//! SubManager Domain - Core business types
//!
//! This crate defines the domain model for the SubManager client.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod insights;
pub mod notification;
pub mod password_reset;
pub mod route;
pub mod session;
pub mod subscription;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use insights::{InsightsEnvelope, Necessity, RecommendedAction, SubscriptionInsights};
pub use notification::{Notification, RenewalCheck, UnreadCount};
pub use password_reset::{
    ForgotPasswordRequest, ResetPasswordRequest, ResetStep, VerifyOtpRequest,
};
pub use route::{GuardDecision, Route, RouteRequirement, decide};
pub use session::{Credential, Identity, Session, SessionStatus, TokenGrant};
pub use subscription::{
    BillingCycle, SpendingSummary, Subscription, SubscriptionDraft, Visibility, parse_date,
};
pub use user::{NewUser, NotificationPreferences, UserAccount, UserStats, validate_email};
