/// Typed I/O facade over a storage backend

use super::traits::{FileMetadata, StorageBackend};
use crate::core::config::{BackendKind, DirectoryConfig};
use crate::{EdgarFlowError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pairs resolved paths with one backend to perform typed reads and writes.
/// Bound to a single backend kind and root for the life of the instance.
pub struct StorageManager {
    backend: Arc<dyn StorageBackend>,
}

impl StorageManager {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Pick the backend the configuration names, rooted at its root path.
    pub fn for_config(config: &DirectoryConfig) -> Self {
        Self::new(super::create_backend(
            config.backend,
            config.root_path.clone(),
        ))
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }

    // Raw byte operations delegate straight through.

    pub fn exists(&self, path: &Path) -> Result<bool> {
        self.backend.exists(path)
    }

    pub fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        self.backend.read_bytes(path)
    }

    pub fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<bool> {
        self.backend.write_bytes(path, data)
    }

    pub fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.backend.list_directory(path)
    }

    pub fn create_directory(&self, path: &Path) -> Result<bool> {
        self.backend.create_directory(path)
    }

    pub fn delete_path(&self, path: &Path) -> Result<bool> {
        self.backend.delete_path(path)
    }

    pub fn move_path(&self, from: &Path, to: &Path) -> Result<bool> {
        self.backend.move_path(from, to)
    }

    pub fn get_metadata(&self, path: &Path) -> Result<Option<FileMetadata>> {
        self.backend.get_metadata(path)
    }

    /// UTF-8 read; fails with `InvalidFormat` on non-UTF-8 content.
    pub fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = self.backend.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| {
            EdgarFlowError::InvalidFormat(format!("{}: {}", path.display(), e))
        })
    }

    /// UTF-8 write.
    pub fn write_text(&self, path: &Path, text: &str) -> Result<bool> {
        self.backend.write_bytes(path, text.as_bytes())
    }

    /// JSON read; fails with `InvalidFormat` on a parse error.
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let bytes = self.backend.read_bytes(path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            EdgarFlowError::InvalidFormat(format!("{}: {}", path.display(), e))
        })
    }

    /// Pretty-printed JSON write.
    pub fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<bool> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| EdgarFlowError::InvalidFormat(e.to_string()))?;
        self.backend.write_bytes(path, &bytes)
    }
}
