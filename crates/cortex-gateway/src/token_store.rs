//! Persistent token storage.
//!
//! [`FileTokenStore`] keeps the session token at `~/.config/cortex/token`
//! so a restart can restore the session without prompting for credentials.
//! The file is written with mode 600 on Unix and the token value itself is
//! never logged.

use async_trait::async_trait;
use cortex_core::credential::TokenStore;
use cortex_core::error::{CortexError, Result};
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;

/// Token storage backed by a file under the user's config directory.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location, `~/.config/cortex/token`.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CortexError::credential("Could not determine home directory"))?;
        Ok(Self {
            path: home.join(".config").join("cortex").join("token"),
        })
    }

    /// Creates a store at an explicit path. Used by tests.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                let token = content.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(CortexError::credential(format!(
                "Failed to read stored token: {err}"
            ))),
        }
    }

    async fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|err| {
                CortexError::credential(format!("Failed to create config directory: {err}"))
            })?;
        }
        fs::write(&self.path, token).await.map_err(|err| {
            CortexError::credential(format!("Failed to persist token: {err}"))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms).await.map_err(|err| {
                CortexError::credential(format!("Failed to restrict token permissions: {err}"))
            })?;
        }

        tracing::debug!(target: "gateway", path = %self.path.display(), "token persisted");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(CortexError::credential(format!(
                "Failed to remove stored token: {err}"
            ))),
        }
    }
}

/// In-memory token storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a token, as if a previous session persisted one.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn set(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("token"));

        assert_eq!(store.get().await.unwrap(), None);

        store.set("tok-xyz").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok-xyz"));

        store.remove().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("token"));
        store.remove().await.unwrap();
        store.remove().await.unwrap();
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("nested").join("deeper").join("token"));
        store.set("tok-abc").await.unwrap();
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok-abc"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store = FileTokenStore::at(path.clone());
        store.set("tok-abc").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_blank_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();
        let store = FileTokenStore::at(path);
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryTokenStore::with_token("seed");
        assert_eq!(store.get().await.unwrap().as_deref(), Some("seed"));
        store.remove().await.unwrap();
        assert_eq!(store.get().await.unwrap(), None);
    }
}
