use std::path::PathBuf;

use tempfile::TempDir;

use ipxact::{
    Config, ConfigError, ConfigManager, DocumentLoader, IpxactError, SchemaVersion,
    UnimplementedContent,
};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(!config.schema.directories.is_empty());
    assert_eq!(config.schema.default_version, SchemaVersion::Ieee2014);
    assert!(config.schema.cache_capacity > 0);
    assert_eq!(
        config.parsing.unimplemented_content,
        UnimplementedContent::Preserve
    );
}

#[test]
fn test_with_schema_directory_replaces_search_path() {
    let config = Config::with_schema_directory("/opt/ipxact");

    assert_eq!(config.schema.directories, vec![PathBuf::from("/opt/ipxact")]);
    assert_eq!(config.schema.cache_capacity, Config::default().schema.cache_capacity);
}

#[test]
fn test_load_json_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ipxact.json");
    std::fs::write(
        &config_path,
        r#"{
            "schema": { "directories": ["schemas"], "default_version": "2022" },
            "parsing": { "unimplemented_content": "discard" }
        }"#,
    )
    .unwrap();

    let config = ConfigManager::load_from_file(&config_path).unwrap();

    assert_eq!(config.schema.directories, vec![PathBuf::from("schemas")]);
    assert_eq!(config.schema.default_version, SchemaVersion::Ieee2022);
    assert_eq!(
        config.parsing.unimplemented_content,
        UnimplementedContent::Discard
    );
    // unspecified fields keep their defaults
    assert_eq!(config.schema.cache_capacity, 16);
}

#[test]
fn test_toml_roundtrip() {
    let mut config = Config::with_schema_directory("lib/schema");
    config.schema.default_version = SchemaVersion::Ieee2009;

    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();

    assert_eq!(parsed, config);
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("ipxact.yaml");
    std::fs::write(&config_path, "schema: {}").unwrap();

    let result = ConfigManager::load_from_file(&config_path);

    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"));
}

#[test]
fn test_validation_rejects_zero_capacity() {
    let mut config = Config::with_schema_directory("lib/schema");
    config.schema.cache_capacity = 0;

    assert!(matches!(
        ConfigManager::validate_config(&config),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_loader_rejects_invalid_config() {
    let mut config = Config::default();
    config.schema.directories.clear();

    let result = DocumentLoader::new(&config);

    assert!(matches!(
        result,
        Err(IpxactError::Config(ConfigError::Validation(_)))
    ));
}
