//! Unit tests for the compiled schema cache
//!
//! These tests verify that the cache:
//! - Compiles a schema once per key
//! - Does not remember failed compiles
//! - Is shared between threads, with one compile for concurrent misses

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use ipxact::{LibXml2Error, LibXml2Wrapper, SchemaCache};

const SIMPLE_XSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:element name="root" type="xs:string"/>
</xs:schema>"#;

fn compile() -> Result<ipxact::XmlSchemaPtr, LibXml2Error> {
    LibXml2Wrapper::new().parse_schema_from_memory(SIMPLE_XSD.as_bytes())
}

#[test]
fn test_get_or_load_compiles_once() {
    let cache = SchemaCache::new(4);
    let compiles = AtomicUsize::new(0);

    for _ in 0..3 {
        let schema = cache
            .get_or_load("urn:simple", || {
                compiles.fetch_add(1, Ordering::SeqCst);
                compile()
            })
            .unwrap();
        assert!(schema.is_valid());
    }

    assert_eq!(compiles.load(Ordering::SeqCst), 1);
    assert!(cache.contains("urn:simple"));
    assert_eq!(cache.stats().entry_count, 1);
}

#[test]
fn test_failed_load_is_not_cached() {
    let cache = SchemaCache::new(4);

    let result = cache.get_or_load("urn:broken", || {
        Err::<ipxact::XmlSchemaPtr, _>(LibXml2Error::SchemaParseFailed {
            errors: vec!["broken".to_string()],
        })
    });

    assert!(result.is_err());
    assert!(!cache.contains("urn:broken"));
    assert!(cache.get_or_load("urn:broken", compile).is_ok());
}

#[test]
fn test_remove_and_clear() {
    let cache = SchemaCache::new(4);
    cache.get_or_load("urn:a", compile).unwrap();
    cache.get_or_load("urn:b", compile).unwrap();

    cache.remove("urn:a");
    assert!(cache.get("urn:a").is_none());
    assert!(cache.get("urn:b").is_some());

    cache.clear();
    assert_eq!(cache.stats().entry_count, 0);
}

#[test]
fn test_concurrent_readers_share_entry() {
    let cache = Arc::new(SchemaCache::new(4));
    let first = cache.get_or_load("urn:shared", compile).unwrap();

    let same = (0..16)
        .into_par_iter()
        .map(|_| cache.get_or_load("urn:shared", compile).unwrap())
        .all(|schema| schema.same_schema(&first));

    assert!(same);
}

#[test]
fn test_concurrent_misses_compile_once() {
    let cache = SchemaCache::new(4);
    let compiles = AtomicUsize::new(0);

    let schemas: Vec<_> = (0..16)
        .into_par_iter()
        .map(|_| {
            cache
                .get_or_load("urn:raced", || {
                    compiles.fetch_add(1, Ordering::SeqCst);
                    compile()
                })
                .unwrap()
        })
        .collect();

    assert_eq!(compiles.load(Ordering::SeqCst), 1);
    assert!(schemas.iter().all(|schema| schema.same_schema(&schemas[0])));
}
