//! Error type tests
//!
//! Messages and the load stage each error is attributed to.

use std::path::PathBuf;

use ipxact::{ConfigError, IpxactError, LibXml2Error, LoadStage};

#[test]
fn test_file_not_found_message_names_path() {
    let error = IpxactError::FileNotFound {
        path: PathBuf::from("lib/Component.xml"),
    };

    assert!(error.to_string().contains("lib/Component.xml"));
    assert_eq!(error.stage(), LoadStage::Open);
}

#[test]
fn test_schema_validation_joins_errors() {
    let error = IpxactError::SchemaValidation {
        document: "Component.xml".to_string(),
        schema_uri: "urn:schema".to_string(),
        errors: vec!["first".to_string(), "second".to_string()],
    };

    let message = error.to_string();
    assert!(message.contains("Component.xml"));
    assert!(message.contains("first; second"));
    assert_eq!(error.stage(), LoadStage::Validate);
}

#[test]
fn test_extraction_errors_belong_to_extract_stage() {
    let errors = [
        IpxactError::UnsupportedTag {
            tag: "bogus".to_string(),
            context: "component".to_string(),
        },
        IpxactError::UnsupportedItemType {
            item: "Model",
            container: "Component::add_item",
        },
        IpxactError::DuplicateFileSet {
            name: "rtl".to_string(),
        },
        IpxactError::MissingElement {
            element: "name",
            parent: "file",
        },
    ];

    for error in &errors {
        assert_eq!(error.stage(), LoadStage::Extract, "{}", error);
    }
}

#[test]
fn test_schema_resolution_errors() {
    let namespace = IpxactError::UnsupportedNamespace {
        namespace: "urn:unknown".to_string(),
    };
    let root = IpxactError::UnexpectedRootTag {
        expected: "catalog",
        found: "component".to_string(),
        document: "Component.xml".to_string(),
    };

    assert_eq!(namespace.stage(), LoadStage::SchemaResolve);
    assert_eq!(root.stage(), LoadStage::SchemaResolve);
    assert!(root.to_string().contains("expected 'catalog', found 'component'"));
}

#[test]
fn test_conversions() {
    let from_libxml2: IpxactError = LibXml2Error::ValidationContextFailed.into();
    assert!(matches!(from_libxml2, IpxactError::LibXml2(_)));

    let from_config: IpxactError = ConfigError::Validation("bad".to_string()).into();
    assert!(matches!(from_config, IpxactError::Config(_)));
    assert_eq!(from_config.stage(), LoadStage::Open);
}
