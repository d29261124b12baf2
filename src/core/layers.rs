//! The five-stage layer taxonomy of the data pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One stage of the pipeline, ordered by processing depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLayer {
    /// Unprocessed SEC filings and market data, as fetched
    RawData,
    /// Day-over-day changes extracted from the raw layer
    DailyDelta,
    /// Per-day indexes built over the accumulated deltas
    DailyIndex,
    /// Knowledge-graph artifacts for retrieval-augmented generation
    GraphRag,
    /// Query results and drafted valuation reports
    QueryResults,
}

impl DataLayer {
    /// All layers in pipeline order.
    pub const ALL: [DataLayer; 5] = [
        DataLayer::RawData,
        DataLayer::DailyDelta,
        DataLayer::DailyIndex,
        DataLayer::GraphRag,
        DataLayer::QueryResults,
    ];

    /// Canonical on-disk folder name for this layer.
    pub fn folder_name(&self) -> &'static str {
        match self {
            DataLayer::RawData => "01_raw",
            DataLayer::DailyDelta => "02_daily_delta",
            DataLayer::DailyIndex => "03_daily_index",
            DataLayer::GraphRag => "04_graph_rag",
            DataLayer::QueryResults => "05_query_results",
        }
    }

    /// The snake_case name used in configuration files.
    pub fn config_name(&self) -> &'static str {
        match self {
            DataLayer::RawData => "raw_data",
            DataLayer::DailyDelta => "daily_delta",
            DataLayer::DailyIndex => "daily_index",
            DataLayer::GraphRag => "graph_rag",
            DataLayer::QueryResults => "query_results",
        }
    }

    /// Parse a configuration-file layer name.
    pub fn from_config_name(name: &str) -> Option<DataLayer> {
        DataLayer::ALL
            .iter()
            .copied()
            .find(|layer| layer.config_name() == name)
    }

    /// Subdirectories created under this layer when the config declares none.
    pub fn default_subdirs(&self) -> &'static [&'static str] {
        match self {
            DataLayer::RawData => &["sec_filings", "market_data", "fundamentals"],
            DataLayer::DailyDelta => &["filings", "prices"],
            DataLayer::DailyIndex => &["by_date", "by_ticker"],
            DataLayer::GraphRag => &["entities", "relations", "embeddings"],
            DataLayer::QueryResults => &["reports", "exports"],
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DataLayer::RawData => "Unprocessed SEC filings and market data",
            DataLayer::DailyDelta => "Day-over-day changes extracted from raw data",
            DataLayer::DailyIndex => "Per-day indexes over accumulated deltas",
            DataLayer::GraphRag => "Knowledge-graph artifacts for retrieval",
            DataLayer::QueryResults => "Query results and drafted reports",
        }
    }
}

impl fmt::Display for DataLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}
