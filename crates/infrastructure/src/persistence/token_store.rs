//! File-backed token store.
//!
//! Keeps the raw bearer credential in a single file in the platform-specific
//! config directory:
//! - Linux: ~/.config/submanager/token
//! - macOS: ~/Library/Application Support/submanager/token
//! - Windows: %APPDATA%/submanager/token
//!
//! On unix the file is created owner-only (0600). Writes go to a staging
//! file that is renamed over the token, so a crash never leaves a partial
//! credential behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use submanager_application::ports::{TokenStore, TokenStoreError};
use submanager_domain::Credential;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[cfg(unix)]
const TOKEN_FILE_MODE: u32 = 0o600;

/// Token store persisting the credential between runs.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location.
    ///
    /// # Errors
    /// Returns [`TokenStoreError::NoConfigDir`] if the platform has no config directory.
    pub fn in_config_dir() -> Result<Self, TokenStoreError> {
        dirs::config_dir()
            .map(|p| Self::new(p.join("submanager").join("token")))
            .ok_or(TokenStoreError::NoConfigDir)
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }
}

async fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn save(&self, credential: &Credential) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Creation mode only applies to new files, so drop any leftover first.
        let staging = self.staging_path();
        remove_if_present(&staging).await?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(TOKEN_FILE_MODE);

        let mut file = options.open(&staging).await?;
        file.write_all(credential.expose().as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&staging, &self.path).await?;
        debug!(path = %self.path.display(), "credential saved");
        Ok(())
    }

    async fn read(&self) -> Result<Option<Credential>, TokenStoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| Credential::new(token)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        remove_if_present(&self.path).await?;
        debug!(path = %self.path.display(), "credential cleared");
        Ok(())
    }
}
