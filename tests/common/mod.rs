/// Common test utilities for edgarflow tests
///
/// Shared fixtures so the integration suites do not duplicate config and
/// filesystem setup.

use edgarflow::{DirectoryConfig, PathResolver};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Install a subscriber so `RUST_LOG=warn cargo test` surfaces the crate's
/// fallback warnings. Safe to call from every test; only the first wins.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test environment owning a unique temporary data root.
pub struct TestEnvironment {
    temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let root = temp_dir.path().join("findata");
        TestEnvironment { temp_dir, root }
    }

    /// A config pointing at this environment's root.
    pub fn config(&self) -> DirectoryConfig {
        let mut config = DirectoryConfig::default();
        config.root_path = self.root.clone();
        config
    }

    /// A resolver over this environment's root.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.config())
    }

    /// A path inside the temp dir but outside the data root.
    pub fn outside_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// Write a minimal valid config file naming `root` as the data root.
pub fn write_config_file(path: &Path, root: &Path) {
    let contents = format!(
        r#"
[storage]
backend = "local_filesystem"
root_path = "{}"

[layers.raw_data]
description = "raw"
subdirs = ["sec_filings"]

[common]

[legacy_mapping]
archive_2019 = "daily_index"
"#,
        root.display()
    );
    std::fs::write(path, contents).expect("failed to write config file");
}
