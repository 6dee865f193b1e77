//! Schema loader tests
//!
//! Resolution of release schemas over the configured directories and
//! compilation of the fixture XSDs.

use std::sync::Arc;

use tempfile::TempDir;

use crate::common::TestFixtures;
use ipxact::{IpxactError, SchemaCache, SchemaLoader, SchemaRegistry, SchemaVersion};

fn loader(directories: Vec<std::path::PathBuf>) -> SchemaLoader {
    SchemaLoader::new(directories, Arc::new(SchemaCache::new(4)))
}

#[test]
fn test_resolve_uses_first_directory_with_schema() {
    let fixtures = TestFixtures::new();
    let empty = TempDir::new().unwrap();
    let loader = loader(vec![empty.path().to_path_buf(), fixtures.schema_dir()]);

    let descriptor = SchemaRegistry::by_version(SchemaVersion::Ieee2014);
    let path = loader.resolve(descriptor).unwrap();

    assert_eq!(path, fixtures.schema_dir().join("ieee-1685-2014/index.xsd"));
}

#[test]
fn test_missing_schema_lists_searched_paths() {
    let empty = TempDir::new().unwrap();
    let loader = loader(vec![empty.path().to_path_buf()]);

    let descriptor = SchemaRegistry::by_version(SchemaVersion::Spirit10);
    let error = loader.resolve(descriptor).unwrap_err();

    match error {
        IpxactError::SchemaLoad { details, .. } => {
            assert!(details.contains(descriptor.schema_uri));
            assert!(details.contains("spirit-1.0"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_load_schema_compiles_fixture_once() {
    let fixtures = TestFixtures::new();
    let loader = loader(vec![fixtures.schema_dir()]);
    let descriptor = SchemaRegistry::by_version(SchemaVersion::Ieee2014);

    let first = loader.load_schema(descriptor).unwrap();
    let second = loader.load_schema(descriptor).unwrap();

    assert!(first.same_schema(&second));
    assert!(loader.cache().contains(descriptor.schema_uri));
}

#[test]
fn test_broken_schema_is_a_load_error() {
    let temp_dir = TempDir::new().unwrap();
    let schema_dir = temp_dir.path().join("ieee-1685-2022");
    std::fs::create_dir_all(&schema_dir).unwrap();
    std::fs::write(schema_dir.join("index.xsd"), "<xs:schema").unwrap();

    let loader = loader(vec![temp_dir.path().to_path_buf()]);
    let descriptor = SchemaRegistry::by_version(SchemaVersion::Ieee2022);

    assert!(matches!(
        loader.load_schema(descriptor),
        Err(IpxactError::SchemaLoad { .. })
    ));
    assert!(!loader.cache().contains(descriptor.schema_uri));
}
