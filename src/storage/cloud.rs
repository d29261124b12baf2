/// Object-store placeholders
///
/// These exist to prove that call sites can be written once against the
/// backend contract ahead of a real cloud implementation. Every operation
/// fails with `NotImplemented` immediately; no partial attempt is made.

use super::traits::{FileMetadata, StorageBackend};
use crate::core::config::BackendKind;
use crate::{EdgarFlowError, Result};
use std::path::{Path, PathBuf};

/// Placeholder backend for the cloud object stores (S3, GCS, Azure Blob).
pub struct CloudObjectBackend {
    kind: BackendKind,
    root: PathBuf,
}

impl CloudObjectBackend {
    /// `kind` must be one of the cloud variants.
    pub fn new(kind: BackendKind, root: impl Into<PathBuf>) -> Self {
        debug_assert!(kind.is_cloud());
        Self {
            kind,
            root: root.into(),
        }
    }

    fn unimplemented<T>(&self, operation: &'static str) -> Result<T> {
        Err(EdgarFlowError::NotImplemented {
            backend: self.kind.as_str(),
            operation,
        })
    }
}

impl StorageBackend for CloudObjectBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn exists(&self, _path: &Path) -> Result<bool> {
        self.unimplemented("exists")
    }

    fn read_bytes(&self, _path: &Path) -> Result<Vec<u8>> {
        self.unimplemented("read_bytes")
    }

    fn write_bytes(&self, _path: &Path, _data: &[u8]) -> Result<bool> {
        self.unimplemented("write_bytes")
    }

    fn list_directory(&self, _path: &Path) -> Result<Vec<PathBuf>> {
        self.unimplemented("list_directory")
    }

    fn create_directory(&self, _path: &Path) -> Result<bool> {
        self.unimplemented("create_directory")
    }

    fn delete_path(&self, _path: &Path) -> Result<bool> {
        self.unimplemented("delete_path")
    }

    fn move_path(&self, _from: &Path, _to: &Path) -> Result<bool> {
        self.unimplemented("move_path")
    }

    fn get_metadata(&self, _path: &Path) -> Result<Option<FileMetadata>> {
        self.unimplemented("get_metadata")
    }
}
