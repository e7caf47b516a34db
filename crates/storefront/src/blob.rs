//! # Blob Store
//!
//! Where uploaded product images go. A store takes bytes and hands back the path under
//! which clients can fetch them (`/uploads/<file>`).

use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// URL prefix uploaded files are served under.
pub const UPLOADS_PREFIX: &str = "/uploads";

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` and returns the public path of the stored file.
    async fn put(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, StoreError>;
}

/// Stored file name: upload time in milliseconds, a dash, then the client's file name
/// reduced to safe characters.
fn stored_name(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let mut safe: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    if safe.trim_matches('.').is_empty() {
        safe = "upload".to_string();
    }
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), safe)
}

/// Files on local disk.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Uses `root`, creating it if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::Blob(format!("{}: {e}", root.display())))?;
        info!(root = %root.display(), "Blob store ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        let name = stored_name(original_name);
        let path = self.root.join(&name);
        let size = bytes.len();
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::Blob(format!("{}: {e}", path.display())))?;
        debug!(file = %name, size, "Stored upload");
        Ok(format!("{UPLOADS_PREFIX}/{name}"))
    }
}

/// Keeps files in memory. For tests.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents stored under a path returned by [`BlobStore::put`].
    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, original_name: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        let path = format!("{UPLOADS_PREFIX}/{}", stored_name(original_name));
        self.files.lock().await.insert(path.clone(), bytes);
        Ok(path)
    }
}
