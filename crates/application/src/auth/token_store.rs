//! In-memory token store.
//!
//! Keeps the credential in a single `RwLock`-guarded slot. Nothing survives
//! the process; use the file-backed store for that.

use std::sync::Arc;

use async_trait::async_trait;
use submanager_domain::Credential;
use tokio::sync::RwLock;

use crate::ports::{TokenStore, TokenStoreError};

/// Thread-safe in-memory token store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<RwLock<Option<Credential>>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `credential`.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(credential))),
        }
    }

    /// Returns the stored credential without going through the port.
    pub async fn peek(&self) -> Option<Credential> {
        self.slot.read().await.clone()
    }

    /// Returns true if a credential is stored.
    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(&self, credential: &Credential) -> Result<(), TokenStoreError> {
        let mut slot = self.slot.write().await;
        *slot = Some(credential.clone());
        Ok(())
    }

    async fn read(&self) -> Result<Option<Credential>, TokenStoreError> {
        Ok(self.peek().await)
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        let mut slot = self.slot.write().await;
        slot.take();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_read() {
        let store = MemoryTokenStore::new();
        assert!(store.read().await.unwrap().is_none());

        store.save(&Credential::new("access123")).await.unwrap();

        let read = store.read().await.unwrap();
        assert_eq!(read.unwrap().expose(), "access123");
    }

    #[tokio::test]
    async fn test_save_replaces() {
        let store = MemoryTokenStore::with_credential(Credential::new("old"));
        store.save(&Credential::new("new")).await.unwrap();
        assert_eq!(store.peek().await.unwrap().expose(), "new");
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = MemoryTokenStore::with_credential(Credential::new("a"));
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_the_slot() {
        let store = MemoryTokenStore::new();
        let shared = store.clone();
        store.save(&Credential::new("tok")).await.unwrap();
        assert!(!shared.is_empty().await);
    }
}
