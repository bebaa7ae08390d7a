//! Token store port
//!
//! A single slot holding the bearer credential. The session manager and the
//! gateway share one instance; whoever writes last wins.

use async_trait::async_trait;
use submanager_domain::Credential;

/// Errors that can occur while persisting the credential.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No location for the token file could be determined.
    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Storage for the bearer credential.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Replaces the stored credential.
    async fn save(&self, credential: &Credential) -> Result<(), TokenStoreError>;

    /// Returns the stored credential, if any.
    async fn read(&self) -> Result<Option<Credential>, TokenStoreError>;

    /// Removes the stored credential. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}
