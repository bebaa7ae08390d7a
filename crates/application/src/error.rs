//! Application error types

use thiserror::Error;
use submanager_domain::DomainError;

use crate::auth::SessionError;
use crate::gateway::ApiError;
use crate::ports::TokenStoreError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] TokenStoreError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
