/// Storage backend contract shared by the local filesystem implementation
/// and the cloud object-store placeholders.
///
/// Paths are interpreted relative to the backend root; absolute paths pass
/// through verbatim. Relative paths must normalize to a location at or
/// beneath the root.
use crate::core::config::BackendKind;
use crate::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Metadata for a stored file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub size: u64,
    pub is_dir: bool,
    pub modified: Option<DateTime<Utc>>,
}

/// Uniform capability set over a storage medium.
pub trait StorageBackend: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Root that relative paths are joined to.
    fn root(&self) -> &Path;

    fn exists(&self, path: &Path) -> Result<bool>;

    /// Fails with `FileNotFound` when the target is missing.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Creates missing parent directories. `Ok(false)` when the OS rejected
    /// the write.
    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<bool>;

    /// Fails with `FileNotFound` when the target is missing.
    fn list_directory(&self, path: &Path) -> Result<Vec<PathBuf>>;

    fn create_directory(&self, path: &Path) -> Result<bool>;

    /// Recurses into directories. Fails with `FileNotFound` when the target
    /// is missing.
    fn delete_path(&self, path: &Path) -> Result<bool>;

    /// Creates missing parent directories of the destination.
    fn move_path(&self, from: &Path, to: &Path) -> Result<bool>;

    /// `Ok(None)` when the target is missing or unreadable.
    fn get_metadata(&self, path: &Path) -> Result<Option<FileMetadata>>;
}
