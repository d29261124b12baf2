pub mod config;
pub mod layers;
pub mod legacy;
pub mod resolver;

pub use config::{BackendKind, CommonPaths, ConfigLoader, DirectoryConfig, LayerSpec};
pub use layers::DataLayer;
pub use legacy::LegacyPathTranslator;
pub use resolver::{CacheStats, CommonDir, PathResolver, DEFAULT_BRANCH};
