//! Backend-agnostic storage: the capability trait, the local filesystem
//! implementation, the cloud placeholders, and the typed I/O facade.

pub mod cloud;
pub mod local;
pub mod manager;
pub mod traits;

pub use cloud::CloudObjectBackend;
pub use local::LocalFilesystemBackend;
pub use manager::StorageManager;
pub use traits::{FileMetadata, StorageBackend};

use crate::core::config::BackendKind;
use std::path::PathBuf;
use std::sync::Arc;

/// Construct the backend `kind` names, rooted at `root`. Cloud kinds yield
/// placeholders whose every operation fails with `NotImplemented`.
pub fn create_backend(kind: BackendKind, root: PathBuf) -> Arc<dyn StorageBackend> {
    match kind {
        BackendKind::LocalFilesystem => Arc::new(LocalFilesystemBackend::new(root)),
        cloud => Arc::new(CloudObjectBackend::new(cloud, root)),
    }
}
