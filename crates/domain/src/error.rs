//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A monetary amount is negative or not a number.
    #[error("invalid cost: {0}")]
    InvalidCost(String),

    /// A billing cycle name is not recognized.
    #[error("unknown billing cycle: {0} (expected monthly, yearly, quarterly or weekly)")]
    InvalidBillingCycle(String),

    /// A date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// An email address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A route path is not known.
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
