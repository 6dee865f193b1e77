mod common;

use rayon::prelude::*;

use common::{MockDataBuilder, TestFixtures};
use ipxact::{LibXml2Error, LibXml2Wrapper, ValidationResult};

const SIMPLE_XSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:element name="root" type="xs:string"/>
</xs:schema>"#;

fn fixture_schema(fixtures: &TestFixtures) -> ipxact::XmlSchemaPtr {
    LibXml2Wrapper::new()
        .parse_schema_file(&fixtures.schema_dir().join("ieee-1685-2014/index.xsd"))
        .unwrap()
}

#[test]
fn test_fixture_schema_accepts_examples() {
    let fixtures = TestFixtures::new();
    let wrapper = LibXml2Wrapper::new();
    let schema = fixture_schema(&fixtures);

    for name in ["Catalog.xml", "Component.xml", "Design.xml", "Abstractor.xml"] {
        let content = std::fs::read(fixtures.example(name)).unwrap();
        let result = wrapper.validate_memory(&schema, &content, name).unwrap();

        assert_eq!(result, ValidationResult::Valid, "{}", name);
    }
}

#[test]
fn test_schema_violation_collects_messages() {
    let fixtures = TestFixtures::new();
    let wrapper = LibXml2Wrapper::new();
    let schema = fixture_schema(&fixtures);
    let xml = MockDataBuilder::component("fifo", "\t<ipxact:unknown/>");

    let result = wrapper
        .validate_memory(&schema, xml.as_bytes(), "fifo.xml")
        .unwrap();

    match result {
        ValidationResult::Invalid { error_count, errors } => {
            assert!(error_count > 0);
            assert!(errors.iter().any(|error| error.contains("unknown")));
        }
        other => panic!("expected invalid, got {:?}", other),
    }
}

#[test]
fn test_unreadable_document() {
    let wrapper = LibXml2Wrapper::new();
    let schema = wrapper
        .parse_schema_from_memory(SIMPLE_XSD.as_bytes())
        .unwrap();

    let result = wrapper.validate_memory(&schema, b"<root>", "truncated.xml");

    assert!(matches!(
        result,
        Err(LibXml2Error::DocumentReadFailed { document }) if document == "truncated.xml"
    ));
}

#[test]
fn test_missing_schema_file() {
    let fixtures = TestFixtures::new();

    let result = LibXml2Wrapper::new().parse_schema_file(&fixtures.schema_dir().join("absent.xsd"));

    assert!(result.is_err());
}

#[test]
fn test_concurrent_validations() {
    let fixtures = TestFixtures::new();
    let schema = fixture_schema(&fixtures);
    let content = std::fs::read(fixtures.component_xml()).unwrap();

    let results: Vec<ValidationResult> = (0..8)
        .into_par_iter()
        .map(|i| {
            LibXml2Wrapper::new()
                .validate_memory(&schema, &content, &format!("component-{}", i))
                .unwrap()
        })
        .collect();

    assert!(results.iter().all(ValidationResult::is_valid));
}

#[test]
fn test_schema_reuse() {
    let wrapper = LibXml2Wrapper::new();
    let schema = wrapper
        .parse_schema_from_memory(SIMPLE_XSD.as_bytes())
        .unwrap();

    for i in 0..5 {
        let xml = format!("<root>run {}</root>", i);
        let result = wrapper
            .validate_memory(&schema, xml.as_bytes(), "reuse.xml")
            .unwrap();
        assert!(result.is_valid());
    }
}
