//! Object storage for uploaded media.
//!
//! Handlers talk to [`StorageBackend`]; production uses [`LocalStorage`],
//! whose root directory is also mounted read-only under `/storage`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

/// URL prefix under which stored objects are served.
pub const PUBLIC_PREFIX: &str = "/storage";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O error for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait StorageBackend: Send + Sync + 'static {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Remove the object. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Public URL path for `key`.
    fn public_url(&self, key: &str) -> String {
        format!("{PUBLIC_PREFIX}/{key}")
    }
}

/// Filesystem-backed storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

/// Keys are relative `/`-separated paths without `.` or `..` segments.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = || StorageError::InvalidKey(key.to_string());
    if key.is_empty() || key.contains('\\') || key.contains('\0') {
        return Err(invalid());
    }
    let all_normal = Path::new(key)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !all_normal || key.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return Err(invalid());
    }
    Ok(())
}

#[async_trait]
impl StorageBackend for LocalStorage {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io)?;
        }
        tokio::fs::write(&path, bytes).await.map_err(io)?;
        tracing::debug!(key, size = bytes.len(), "Stored object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn key_validation() {
        assert!(validate_key("media/2025/03/abc-affiche.jpg").is_ok());
        for bad in [
            "",
            "/etc/passwd",
            "../secret",
            "media/../../x",
            "media//x.png",
            "media/./x.png",
            "media\\x.png",
        ] {
            assert_matches!(validate_key(bad), Err(StorageError::InvalidKey(_)), "{bad}");
        }
    }

    #[tokio::test]
    async fn put_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        storage.put("media/2025/03/a.png", b"png").await.unwrap();
        let path = dir.path().join("media/2025/03/a.png");
        assert_eq!(std::fs::read(&path).unwrap(), b"png");

        storage.delete("media/2025/03/a.png").await.unwrap();
        assert!(!path.exists());
        // Idempotent.
        storage.delete("media/2025/03/a.png").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("root"));
        assert_matches!(
            storage.put("../outside.txt", b"x").await,
            Err(StorageError::InvalidKey(_))
        );
        assert!(!dir.path().join("outside.txt").exists());
    }

    #[test]
    fn public_url() {
        let storage = LocalStorage::new("/tmp/x");
        assert_eq!(
            storage.public_url("media/2025/03/a.png"),
            "/storage/media/2025/03/a.png"
        );
    }
}
