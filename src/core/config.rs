//! Directory-topology configuration: typed structures, loader, defaults.

use crate::core::layers::DataLayer;
use crate::{EdgarFlowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Folder name of the data root when no configuration overrides it.
pub const DEFAULT_ROOT_FOLDER: &str = "findata";

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    LocalFilesystem,
    AwsS3,
    GcpGcs,
    AzureBlob,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::LocalFilesystem => "local_filesystem",
            BackendKind::AwsS3 => "aws_s3",
            BackendKind::GcpGcs => "gcp_gcs",
            BackendKind::AzureBlob => "azure_blob",
        }
    }

    /// Parse a backend name, coercing unrecognized values to the local
    /// filesystem with a warning rather than rejecting them.
    pub fn parse_lenient(name: &str) -> BackendKind {
        match name {
            "local_filesystem" => BackendKind::LocalFilesystem,
            "aws_s3" => BackendKind::AwsS3,
            "gcp_gcs" => BackendKind::GcpGcs,
            "azure_blob" => BackendKind::AzureBlob,
            other => {
                warn!(
                    backend = %other,
                    "unrecognized storage backend, falling back to local_filesystem"
                );
                BackendKind::LocalFilesystem
            }
        }
    }

    pub fn is_cloud(&self) -> bool {
        !matches!(self, BackendKind::LocalFilesystem)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-layer topology entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subdirs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_hints: Option<BTreeMap<String, String>>,
}

impl LayerSpec {
    /// Built-in spec for a layer absent from the config file.
    pub fn default_for(layer: DataLayer) -> Self {
        Self {
            description: layer.description().to_string(),
            subdirs: layer
                .default_subdirs()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            performance_hints: None,
        }
    }
}

/// Folder names of the shared non-layer directories under the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPaths {
    #[serde(default = "default_config_folder")]
    pub config: String,
    #[serde(default = "default_logs_folder")]
    pub logs: String,
    #[serde(default = "default_temp_folder")]
    pub temp: String,
    #[serde(default = "default_cache_folder")]
    pub cache: String,
}

fn default_config_folder() -> String {
    "config".to_string()
}

fn default_logs_folder() -> String {
    "logs".to_string()
}

fn default_temp_folder() -> String {
    "temp".to_string()
}

fn default_cache_folder() -> String {
    "cache".to_string()
}

impl Default for CommonPaths {
    fn default() -> Self {
        Self {
            config: default_config_folder(),
            logs: default_logs_folder(),
            temp: default_temp_folder(),
            cache: default_cache_folder(),
        }
    }
}

/// The fully validated directory topology. Loosely-typed structures do not
/// survive past the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub backend: BackendKind,
    pub root_path: PathBuf,
    pub layers: BTreeMap<DataLayer, LayerSpec>,
    pub common: CommonPaths,
    pub legacy_mapping: BTreeMap<String, DataLayer>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        let root = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".edgarflow")
            .join(DEFAULT_ROOT_FOLDER);

        Self {
            backend: BackendKind::LocalFilesystem,
            root_path: root,
            layers: DataLayer::ALL
                .iter()
                .map(|&layer| (layer, LayerSpec::default_for(layer)))
                .collect(),
            common: CommonPaths::default(),
            legacy_mapping: BTreeMap::new(),
        }
    }
}

impl DirectoryConfig {
    /// The spec for `layer`, falling back to built-ins when the loaded
    /// config omitted it.
    pub fn layer_spec(&self, layer: DataLayer) -> LayerSpec {
        self.layers
            .get(&layer)
            .cloned()
            .unwrap_or_else(|| LayerSpec::default_for(layer))
    }
}

// On-disk shape of the config file. Kept separate so schema violations are
// caught at deserialization and the backend name can be coerced leniently.
#[derive(Debug, Serialize, Deserialize)]
struct RawConfig {
    storage: RawStorage,
    layers: BTreeMap<String, LayerSpec>,
    common: CommonPaths,
    #[serde(default)]
    legacy_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawStorage {
    backend: String,
    root_path: String,
}

/// Loads the directory topology. Never fails outward: any problem logs a
/// warning and yields the built-in defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `path`, returning `DirectoryConfig::default()` on a missing
    /// file, a parse failure, or a schema violation.
    pub fn load(path: &Path) -> DirectoryConfig {
        match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load directory config, using built-in defaults"
                );
                DirectoryConfig::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<DirectoryConfig> {
        let contents = std::fs::read_to_string(path)?;
        let raw: RawConfig = toml::from_str(&contents).map_err(|e| {
            EdgarFlowError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> DirectoryConfig {
        let backend = BackendKind::parse_lenient(&raw.storage.backend);
        let root_path = expand_home(&raw.storage.root_path);

        // Start from the built-in topology so layers the file omits keep
        // their defaults.
        let mut layers: BTreeMap<DataLayer, LayerSpec> = DataLayer::ALL
            .iter()
            .map(|&layer| (layer, LayerSpec::default_for(layer)))
            .collect();
        for (name, spec) in raw.layers {
            match DataLayer::from_config_name(&name) {
                Some(layer) => {
                    layers.insert(layer, spec);
                }
                None => warn!(layer = %name, "unknown layer in config, skipping"),
            }
        }

        let mut legacy_mapping = BTreeMap::new();
        for (alias, target) in raw.legacy_mapping {
            match DataLayer::from_config_name(&target) {
                Some(layer) => {
                    legacy_mapping.insert(alias, layer);
                }
                None => warn!(
                    alias = %alias,
                    target = %target,
                    "legacy mapping targets an unknown layer, skipping"
                ),
            }
        }

        DirectoryConfig {
            backend,
            root_path,
            layers,
            common: raw.common,
            legacy_mapping,
        }
    }

    /// Persist `config` back to `path` as pretty TOML.
    pub fn save(path: &Path, config: &DirectoryConfig) -> Result<()> {
        let raw = RawConfig {
            storage: RawStorage {
                backend: config.backend.as_str().to_string(),
                root_path: config.root_path.display().to_string(),
            },
            layers: config
                .layers
                .iter()
                .map(|(layer, spec)| (layer.config_name().to_string(), spec.clone()))
                .collect(),
            common: config.common.clone(),
            legacy_mapping: config
                .legacy_mapping
                .iter()
                .map(|(alias, layer)| (alias.clone(), layer.config_name().to_string()))
                .collect(),
        };
        let contents = toml::to_string_pretty(&raw)
            .map_err(|e| EdgarFlowError::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_covers_all_layers() {
        let config = DirectoryConfig::default();
        assert_eq!(config.layers.len(), DataLayer::ALL.len());
        assert_eq!(config.backend, BackendKind::LocalFilesystem);
        assert!(config.root_path.ends_with(DEFAULT_ROOT_FOLDER));
    }

    #[test]
    fn test_unknown_backend_coerces_to_local() {
        assert_eq!(
            BackendKind::parse_lenient("hdfs"),
            BackendKind::LocalFilesystem
        );
        assert_eq!(BackendKind::parse_lenient("aws_s3"), BackendKind::AwsS3);
    }

    #[test]
    fn test_unknown_layers_and_targets_are_skipped() {
        let raw: RawConfig = toml::from_str(
            r#"
            [storage]
            backend = "local_filesystem"
            root_path = "/srv/findata"

            [layers.raw_data]
            subdirs = ["sec_filings"]

            [layers.staging]
            subdirs = ["junk"]

            [common]

            [legacy_mapping]
            old_raw = "raw_data"
            old_junk = "staging"
            "#,
        )
        .unwrap();
        let config = ConfigLoader::from_raw(raw);

        assert_eq!(config.root_path, PathBuf::from("/srv/findata"));
        assert_eq!(config.layers.len(), DataLayer::ALL.len());
        assert_eq!(
            config.layers[&DataLayer::RawData].subdirs,
            vec!["sec_filings".to_string()]
        );
        assert_eq!(
            config.legacy_mapping.get("old_raw"),
            Some(&DataLayer::RawData)
        );
        assert!(!config.legacy_mapping.contains_key("old_junk"));
    }

    #[test]
    fn test_schema_violation_is_a_config_error() {
        // No [storage] table at all.
        let parsed: std::result::Result<RawConfig, _> = toml::from_str(
            r#"
            [layers]
            [common]
            "#,
        );
        assert!(parsed.is_err());
    }
}
