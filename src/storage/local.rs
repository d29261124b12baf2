/// Local filesystem storage backend

use super::traits::{FileMetadata, StorageBackend};
use crate::core::config::BackendKind;
use crate::security;
use crate::{EdgarFlowError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Stores data directly on the local filesystem under a fixed root.
///
/// Unexpected OS errors are swallowed into `Ok(false)`/empty results with a
/// warning; only the cases the contract names surface as typed errors.
pub struct LocalFilesystemBackend {
    root: PathBuf,
}

impl LocalFilesystemBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: security::normalize_lexically(&root.into()),
        }
    }

    /// Join a relative path to the root; absolute paths pass through.
    /// Relative joins must stay at or beneath the root.
    fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let joined = security::normalize_lexically(&self.root.join(path));
        if joined.starts_with(&self.root) {
            Ok(joined)
        } else {
            Err(EdgarFlowError::PathTraversal {
                path: joined,
                root: self.root.clone(),
            })
        }
    }
}

impl StorageBackend for LocalFilesystemBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::LocalFilesystem
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        Ok(self.resolve(path)?.exists())
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let target = self.resolve(path)?;
        if !target.exists() {
            return Err(EdgarFlowError::FileNotFound(target));
        }
        Ok(fs::read(&target)?)
    }

    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<bool> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %target.display(), error = %e, "failed to create parent directory");
                return Ok(false);
            }
        }
        match fs::write(&target, data) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(path = %target.display(), error = %e, "write failed");
                Ok(false)
            }
        }
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let target = self.resolve(path)?;
        if !target.exists() {
            return Err(EdgarFlowError::FileNotFound(target));
        }
        let mut entries = Vec::new();
        match fs::read_dir(&target) {
            Ok(iter) => {
                for entry in iter.flatten() {
                    entries.push(entry.path());
                }
            }
            Err(e) => warn!(path = %target.display(), error = %e, "listing failed"),
        }
        entries.sort();
        Ok(entries)
    }

    fn create_directory(&self, path: &Path) -> Result<bool> {
        let target = self.resolve(path)?;
        match fs::create_dir_all(&target) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(path = %target.display(), error = %e, "directory creation failed");
                Ok(false)
            }
        }
    }

    fn delete_path(&self, path: &Path) -> Result<bool> {
        let target = self.resolve(path)?;
        if !target.exists() {
            return Err(EdgarFlowError::FileNotFound(target));
        }
        let result = if target.is_dir() {
            fs::remove_dir_all(&target)
        } else {
            fs::remove_file(&target)
        };
        match result {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(path = %target.display(), error = %e, "deletion failed");
                Ok(false)
            }
        }
    }

    fn move_path(&self, from: &Path, to: &Path) -> Result<bool> {
        let source = self.resolve(from)?;
        let dest = self.resolve(to)?;
        if let Some(parent) = dest.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(path = %dest.display(), error = %e, "failed to create parent directory");
                return Ok(false);
            }
        }
        match fs::rename(&source, &dest) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!(
                    from = %source.display(),
                    to = %dest.display(),
                    error = %e,
                    "move failed"
                );
                Ok(false)
            }
        }
    }

    fn get_metadata(&self, path: &Path) -> Result<Option<FileMetadata>> {
        let target = self.resolve(path)?;
        match fs::metadata(&target) {
            Ok(meta) => Ok(Some(FileMetadata {
                size: meta.len(),
                is_dir: meta.is_dir(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
            })),
            Err(_) => Ok(None),
        }
    }
}
