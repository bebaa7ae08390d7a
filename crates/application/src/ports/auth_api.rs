//! Authentication backend port

use async_trait::async_trait;
use submanager_domain::{Credential, Identity};

use crate::gateway::ApiError;

/// Credential exchange and identity lookup.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges an email and password for a credential.
    ///
    /// A 401 from this call is a wrong password, not an expired session, so
    /// implementations must not invalidate the stored credential for it.
    async fn authenticate(&self, email: &str, password: &str) -> Result<Credential, ApiError>;

    /// Looks up the user behind the stored credential.
    async fn fetch_current_identity(&self) -> Result<Identity, ApiError>;
}
