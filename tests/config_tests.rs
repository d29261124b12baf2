use edgarflow::{BackendKind, ConfigLoader, DataLayer, DirectoryConfig};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_default_round_trips_through_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("directories.toml");

    let mut config = DirectoryConfig::default();
    config.root_path = dir.path().join("findata");
    config
        .legacy_mapping
        .insert("archive_2019".to_string(), DataLayer::DailyIndex);

    ConfigLoader::save(&path, &config).unwrap();
    let loaded = ConfigLoader::load(&path);

    assert_eq!(loaded.backend, config.backend);
    assert_eq!(loaded.root_path, config.root_path);
    assert_eq!(loaded.layers.len(), config.layers.len());
    assert_eq!(
        loaded.legacy_mapping.get("archive_2019"),
        Some(&DataLayer::DailyIndex)
    );
    for layer in DataLayer::ALL {
        assert_eq!(loaded.layers[&layer].subdirs, config.layers[&layer].subdirs);
    }
}

#[test]
fn test_malformed_toml_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("directories.toml");
    std::fs::write(&path, "this is { not toml").unwrap();

    let config = ConfigLoader::load(&path);
    assert_eq!(config.backend, BackendKind::LocalFilesystem);
    assert_eq!(config.layers.len(), DataLayer::ALL.len());
}

#[test]
fn test_missing_required_sections_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("directories.toml");
    // Parses as TOML but lacks the required `storage` table.
    std::fs::write(&path, "[layers]\n[common]\n").unwrap();

    let config = ConfigLoader::load(&path);
    assert_eq!(config, DirectoryConfig::default());
}

#[test]
fn test_unknown_backend_name_is_coerced_with_local() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("directories.toml");
    std::fs::write(
        &path,
        r#"
[storage]
backend = "tape_robot"
root_path = "/srv/findata"

[layers]
[common]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(&path);
    assert_eq!(config.backend, BackendKind::LocalFilesystem);
    assert_eq!(config.root_path, std::path::PathBuf::from("/srv/findata"));
}

#[test]
fn test_layer_overrides_and_performance_hints() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("directories.toml");
    std::fs::write(
        &path,
        r#"
[storage]
backend = "local_filesystem"
root_path = "/srv/findata"

[layers.graph_rag]
description = "entity graph"
subdirs = ["entities"]

[layers.graph_rag.performance_hints]
prefer = "ssd"

[common]
logs = "run_logs"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(&path);
    let graph = &config.layers[&DataLayer::GraphRag];
    assert_eq!(graph.description, "entity graph");
    assert_eq!(graph.subdirs, vec!["entities".to_string()]);
    assert_eq!(
        graph.performance_hints.as_ref().unwrap().get("prefer"),
        Some(&"ssd".to_string())
    );
    // Unlisted layers keep their built-in defaults; overridden common names stick.
    assert!(!config.layers[&DataLayer::RawData].subdirs.is_empty());
    assert_eq!(config.common.logs, "run_logs");
}
