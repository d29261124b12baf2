//! Path resolution across the staged directory hierarchy.
//!
//! One mutex guards the resolver's in-memory state: the active config
//! snapshot, the legacy alias table, the resolution cache, and its hit/miss
//! counters. The lock is held only for map operations and path composition,
//! never across filesystem I/O.

use crate::core::config::{ConfigLoader, DirectoryConfig};
use crate::core::layers::DataLayer;
use crate::core::legacy::LegacyPathTranslator;
use crate::security;
use crate::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Branch name that leaves build folders unsuffixed.
pub const DEFAULT_BRANCH: &str = "main";

/// Shared non-layer directories under the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonDir {
    Config,
    Logs,
    Temp,
    Cache,
}

/// Snapshot of cache effectiveness counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

struct ResolverState {
    config: DirectoryConfig,
    legacy: LegacyPathTranslator,
    cache: HashMap<(DataLayer, Option<String>), PathBuf>,
    hits: u64,
    misses: u64,
}

impl ResolverState {
    fn new(config: DirectoryConfig) -> Self {
        let legacy = LegacyPathTranslator::new(&config);
        Self {
            config,
            legacy,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

/// Resolves (layer, partition, subpath) references to absolute paths.
///
/// Constructed explicitly and shared via `Arc` by callers that need it;
/// there is no process-wide instance.
pub struct PathResolver {
    config_path: Option<PathBuf>,
    state: Mutex<ResolverState>,
}

impl PathResolver {
    /// Build from an already-loaded configuration.
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            config_path: None,
            state: Mutex::new(ResolverState::new(config)),
        }
    }

    /// Build from a config file. Load failures fall back to the built-in
    /// defaults; they are never fatal.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = ConfigLoader::load(&path);
        Self {
            config_path: Some(path),
            state: Mutex::new(ResolverState::new(config)),
        }
    }

    /// Absolute path of a layer folder, optionally sharded by `partition`.
    ///
    /// `partition` is sanitized before use. Resolutions are cached per
    /// `(layer, partition)`; a hit returns the stored value without
    /// recomputation.
    pub fn layer_path(&self, layer: DataLayer, partition: Option<&str>) -> Result<PathBuf> {
        let partition = match partition {
            Some(p) => Some(security::sanitize_path_component(p)?),
            None => None,
        };

        let mut guard = self.state.lock();
        let state = &mut *guard;
        let key = (layer, partition);
        if let Some(path) = state.cache.get(&key) {
            state.hits += 1;
            return Ok(path.clone());
        }
        state.misses += 1;

        let mut path = state.config.root_path.join(layer.folder_name());
        if let Some(partition) = &key.1 {
            path.push(partition);
        }
        state.cache.insert(key, path.clone());
        Ok(path)
    }

    /// `layer_path(..)/subdir`. A cheap concatenation over the cached base,
    /// so it is not cached independently.
    pub fn subdir_path(
        &self,
        layer: DataLayer,
        subdir: &str,
        partition: Option<&str>,
    ) -> Result<PathBuf> {
        Ok(self.layer_path(layer, partition)?.join(subdir))
    }

    /// `layer_path(layer)/source[/date_partition][/ticker]`.
    ///
    /// `source` and `ticker` are appended as given. Callers holding
    /// untrusted values must run them through
    /// [`security::sanitize_path_component`] first.
    pub fn source_path(
        &self,
        source: &str,
        layer: DataLayer,
        date_partition: Option<&str>,
        ticker: Option<&str>,
    ) -> Result<PathBuf> {
        let mut path = self.layer_path(layer, None)?;
        path.push(source);
        if let Some(date) = date_partition {
            path.push(date);
        }
        if let Some(ticker) = ticker {
            path.push(ticker);
        }
        Ok(path)
    }

    /// Build-output folder under the results layer. A branch other than
    /// [`DEFAULT_BRANCH`] suffixes the folder name with `_<branch>`; a
    /// timestamp appends a `build_<timestamp>` segment.
    pub fn build_path(&self, timestamp: Option<&str>, branch: Option<&str>) -> Result<PathBuf> {
        let mut path = self.layer_path(DataLayer::QueryResults, None)?;
        if let Some(branch) = branch {
            if branch != DEFAULT_BRANCH {
                path.set_file_name(format!(
                    "{}_{}",
                    DataLayer::QueryResults.folder_name(),
                    branch
                ));
            }
        }
        if let Some(timestamp) = timestamp {
            path.push(format!("build_{}", timestamp));
        }
        Ok(path)
    }

    /// Path of one of the shared folders under the root.
    pub fn common_path(&self, dir: CommonDir) -> PathBuf {
        let state = self.state.lock();
        let name = match dir {
            CommonDir::Config => state.config.common.config.as_str(),
            CommonDir::Logs => state.config.common.logs.as_str(),
            CommonDir::Temp => state.config.common.temp.as_str(),
            CommonDir::Cache => state.config.common.cache.as_str(),
        };
        state.config.root_path.join(name)
    }

    /// Idempotently create every layer folder, its declared subdirectories,
    /// and the common logs/temp/cache folders. The config folder is assumed
    /// to exist already. Safe to call repeatedly and concurrently.
    pub fn ensure_directories(&self) -> Result<()> {
        // Collect targets under the lock, create them after releasing it.
        let targets = {
            let state = self.state.lock();
            let mut targets: Vec<PathBuf> = Vec::new();
            for (&layer, spec) in &state.config.layers {
                let base = state.config.root_path.join(layer.folder_name());
                for subdir in &spec.subdirs {
                    targets.push(base.join(subdir));
                }
                targets.push(base);
            }
            for name in [
                &state.config.common.logs,
                &state.config.common.temp,
                &state.config.common.cache,
            ] {
                targets.push(state.config.root_path.join(name));
            }
            targets
        };

        for target in &targets {
            fs::create_dir_all(target)?;
        }
        debug!(count = targets.len(), "directory tree ensured");
        Ok(())
    }

    /// Re-read the configuration, rebuild the legacy table, and atomically
    /// clear the entire cache and its counters. A resolver built without a
    /// backing file re-applies its in-memory config; the cache is cleared
    /// either way.
    pub fn reload_config(&self) -> Result<()> {
        let new_config = match &self.config_path {
            Some(path) => ConfigLoader::load(path),
            None => self.state.lock().config.clone(),
        };
        let legacy = LegacyPathTranslator::new(&new_config);

        let mut state = self.state.lock();
        state.config = new_config;
        state.legacy = legacy;
        state.cache.clear();
        state.hits = 0;
        state.misses = 0;
        debug!("config reloaded, path cache invalidated");
        Ok(())
    }

    /// Drop every cached resolution and reset the counters without touching
    /// the configuration.
    pub fn clear_cache(&self) {
        let mut state = self.state.lock();
        state.cache.clear();
        state.hits = 0;
        state.misses = 0;
    }

    pub fn cache_stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.cache.len(),
        }
    }

    /// Translate a deprecated folder name; `None` means "not an alias".
    pub fn legacy_layer(&self, name: &str) -> Option<DataLayer> {
        self.state.lock().legacy.resolve(name)
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> DirectoryConfig {
        self.state.lock().config.clone()
    }

    pub fn root_path(&self) -> PathBuf {
        self.state.lock().config.root_path.clone()
    }

    /// Human-readable summary of the resolved topology and cache state.
    pub fn describe(&self) -> String {
        let state = self.state.lock();
        let mut out = String::new();
        let _ = writeln!(out, "Root: {}", state.config.root_path.display());
        let _ = writeln!(out, "Backend: {}", state.config.backend);
        for (&layer, spec) in &state.config.layers {
            let _ = writeln!(
                out,
                "  {} -> {} ({} subdirs)",
                layer,
                layer.folder_name(),
                spec.subdirs.len()
            );
        }
        let _ = writeln!(
            out,
            "Cache: {} entries, {} hits, {} misses",
            state.cache.len(),
            state.hits,
            state.misses
        );
        out
    }
}
