//! Backward-compatible translation of deprecated folder names.

use crate::core::config::{DirectoryConfig, DEFAULT_ROOT_FOLDER};
use crate::core::layers::DataLayer;
use std::collections::HashMap;

// Aliases from before the directory migration: the numbered stage folders,
// the unnumbered layer folders, and two bare names still seen in old
// manifests.
const BUILTIN_ALIASES: &[(&str, DataLayer)] = &[
    ("stage_01_raw", DataLayer::RawData),
    ("stage_02_delta", DataLayer::DailyDelta),
    ("stage_03_index", DataLayer::DailyIndex),
    ("stage_04_graph", DataLayer::GraphRag),
    ("stage_05_results", DataLayer::QueryResults),
    ("raw_data", DataLayer::RawData),
    ("daily_delta", DataLayer::DailyDelta),
    ("daily_index", DataLayer::DailyIndex),
    ("graph_rag", DataLayer::GraphRag),
    ("query_results", DataLayer::QueryResults),
    ("data", DataLayer::RawData),
    (DEFAULT_ROOT_FOLDER, DataLayer::RawData),
];

/// Maps deprecated folder names to current data layers. A pure lookup;
/// unknown names are "not an alias", never an error.
#[derive(Debug, Clone)]
pub struct LegacyPathTranslator {
    mapping: HashMap<String, DataLayer>,
}

impl LegacyPathTranslator {
    /// Build the table from the built-in aliases overlaid by the config's
    /// `legacy_mapping` (config entries win on conflict).
    pub fn new(config: &DirectoryConfig) -> Self {
        let mut mapping: HashMap<String, DataLayer> = BUILTIN_ALIASES
            .iter()
            .map(|&(name, layer)| (name.to_string(), layer))
            .collect();
        for (alias, layer) in &config.legacy_mapping {
            mapping.insert(alias.clone(), *layer);
        }
        Self { mapping }
    }

    /// Resolve a deprecated name to its current layer.
    pub fn resolve(&self, name: &str) -> Option<DataLayer> {
        self.mapping.get(name).copied()
    }

    /// The built-in alias table, for diagnostics.
    pub fn builtin_aliases() -> &'static [(&'static str, DataLayer)] {
        BUILTIN_ALIASES
    }
}
