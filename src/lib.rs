//! Directory and storage abstraction core for a staged financial-research
//! data pipeline: path resolution with a shared cache, legacy folder-name
//! translation, input validation, and a backend-agnostic storage interface.

pub mod core;
pub mod security;
pub mod storage;
pub mod utils;

pub use crate::core::config::{BackendKind, ConfigLoader, DirectoryConfig, LayerSpec};
pub use crate::core::layers::DataLayer;
pub use crate::core::legacy::LegacyPathTranslator;
pub use crate::core::resolver::{CacheStats, CommonDir, PathResolver};
pub use crate::storage::{StorageBackend, StorageManager};

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for edgarflow operations
#[derive(Error, Debug)]
pub enum EdgarFlowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid path component: {0}")]
    InvalidPathComponent(String),

    #[error("Path traversal: {path} escapes root {root}")]
    PathTraversal { path: PathBuf, root: PathBuf },

    #[error("Dangerous command rejected: {0}")]
    DangerousCommand(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Operation timed out after {seconds}s")]
    OperationTimeout { seconds: f64 },

    #[error("{operation} is not implemented for the {backend} backend")]
    NotImplemented {
        backend: &'static str,
        operation: &'static str,
    },

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type alias for edgarflow operations
pub type Result<T> = std::result::Result<T, EdgarFlowError>;
