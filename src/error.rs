use std::path::PathBuf;

use thiserror::Error;

/// Stage of the document load state machine at which an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadStage {
    /// Opening and reading the source bytes
    Open,
    /// Decoding and parsing the XML text
    Parse,
    /// Resolving the namespace, root tag and schema resource
    SchemaResolve,
    /// Validating the document against the compiled schema
    Validate,
    /// Building the element tree from the validated XML
    Extract,
}

/// Main error type for every fallible operation of the object model
#[derive(Error, Debug)]
pub enum IpxactError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("IO error: {path} - {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML in {document}: {source}")]
    MalformedXml {
        document: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Schema load error: {path} - {details}")]
    SchemaLoad { path: PathBuf, details: String },

    #[error("Schema validation failed: {document} against {schema_uri} - {}", .errors.join("; "))]
    SchemaValidation {
        document: String,
        schema_uri: String,
        errors: Vec<String>,
    },

    #[error("Unexpected root tag in {document}: expected '{expected}', found '{found}'")]
    UnexpectedRootTag {
        expected: &'static str,
        found: String,
        document: String,
    },

    #[error("Unsupported namespace: '{namespace}'")]
    UnsupportedNamespace { namespace: String },

    #[error("Unsupported tag '{tag}' at {context}")]
    UnsupportedTag { tag: String, context: String },

    #[error("Unexpected tag: expected '{expected}', found '{found}'")]
    UnexpectedTag { expected: &'static str, found: String },

    #[error("Unsupported child tag '{tag}' in node '{parent}'")]
    UnsupportedChildTag { tag: String, parent: String },

    #[error("Unsupported item type '{item}' for {container}")]
    UnsupportedItemType {
        item: &'static str,
        container: &'static str,
    },

    #[error("Missing required element '{element}' in node '{parent}'")]
    MissingElement {
        element: &'static str,
        parent: &'static str,
    },

    #[error("Invalid identifier: {field} = '{value}'")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("Invalid field: '{field}' of '{element}' must not be empty")]
    InvalidField {
        field: &'static str,
        element: &'static str,
    },

    #[error("Invalid value '{value}' for '{element}'")]
    InvalidValue { element: &'static str, value: String },

    #[error("Duplicate fileset '{name}'")]
    DuplicateFileSet { name: String },

    #[error("LibXML2 error: {0}")]
    LibXml2(#[from] LibXml2Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl IpxactError {
    /// The load stage this error belongs to, for diagnostics.
    pub fn stage(&self) -> LoadStage {
        match self {
            IpxactError::FileNotFound { .. } | IpxactError::Io { .. } | IpxactError::Config(_) => {
                LoadStage::Open
            }
            IpxactError::MalformedXml { .. } => LoadStage::Parse,
            IpxactError::UnsupportedNamespace { .. }
            | IpxactError::UnexpectedRootTag { .. }
            | IpxactError::SchemaLoad { .. } => LoadStage::SchemaResolve,
            IpxactError::SchemaValidation { .. } | IpxactError::LibXml2(_) => LoadStage::Validate,
            IpxactError::UnsupportedTag { .. }
            | IpxactError::UnexpectedTag { .. }
            | IpxactError::UnsupportedChildTag { .. }
            | IpxactError::UnsupportedItemType { .. }
            | IpxactError::MissingElement { .. }
            | IpxactError::InvalidIdentifier { .. }
            | IpxactError::InvalidField { .. }
            | IpxactError::InvalidValue { .. }
            | IpxactError::DuplicateFileSet { .. } => LoadStage::Extract,
        }
    }
}

/// Configuration-specific error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

/// LibXML2-specific error types
#[derive(Error, Debug)]
pub enum LibXml2Error {
    #[error("Schema parsing failed: {}", .errors.join("; "))]
    SchemaParseFailed { errors: Vec<String> },

    #[error("Schema parser context creation failed: {path}")]
    ParserContextFailed { path: PathBuf },

    #[error("Validation context creation failed")]
    ValidationContextFailed,

    #[error("Document could not be read by libxml2: {document}")]
    DocumentReadFailed { document: String },

    #[error("Validation of {document} failed with internal error code {code}")]
    ValidationFailed { code: i32, document: String },

    #[error("Invalid path for libxml2: {path}")]
    InvalidPath { path: PathBuf },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, IpxactError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// LibXML2 result type alias
pub type LibXml2Result<T> = std::result::Result<T, LibXml2Error>;
