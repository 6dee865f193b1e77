//! Registry of the IP-XACT schema releases this crate understands.
//!
//! Each release is described by a static [`SchemaDescriptor`]. The registry
//! resolves the namespace URI of a parsed document to its descriptor and
//! provides the default descriptor used when authoring new documents.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{IpxactError, Result};

/// The XML Schema instance namespace, declared on every serialized root element.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// IP-XACT schema releases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaVersion {
    #[serde(rename = "1.0")]
    Spirit10,
    #[serde(rename = "1.1")]
    Spirit11,
    #[serde(rename = "1.2")]
    Spirit12,
    #[serde(rename = "1.4")]
    Spirit14,
    #[serde(rename = "1.5")]
    Spirit15,
    #[serde(rename = "2009")]
    Ieee2009,
    #[serde(rename = "2014")]
    Ieee2014,
    #[serde(rename = "2022")]
    Ieee2022,
}

impl SchemaVersion {
    /// Version label as used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::Spirit10 => "1.0",
            SchemaVersion::Spirit11 => "1.1",
            SchemaVersion::Spirit12 => "1.2",
            SchemaVersion::Spirit14 => "1.4",
            SchemaVersion::Spirit15 => "1.5",
            SchemaVersion::Ieee2009 => "2009",
            SchemaVersion::Ieee2014 => "2014",
            SchemaVersion::Ieee2022 => "2022",
        }
    }

    /// Releases published in a SPIRIT namespace. Their root elements carry
    /// `description` after the content groups instead of after the identity.
    pub fn is_spirit(self) -> bool {
        self <= SchemaVersion::Ieee2009
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        SchemaVersion::Ieee2014
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema descriptor made of version, namespace prefix, URI, URL and local path.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaDescriptor {
    pub version: SchemaVersion,
    /// Prefix bound to the IP-XACT namespace in serialized documents
    pub namespace_prefix: &'static str,
    /// XML namespace URI, unique per release
    pub schema_uri: &'static str,
    /// Canonical location of the schema, written to `xsi:schemaLocation`
    pub schema_url: &'static str,
    /// Entry XSD relative to a schema directory
    pub local_path: &'static str,
    /// SPIRIT releases qualify the attributes of library references (`spirit:vendor`).
    pub qualified_reference_attributes: bool,
}

impl SchemaDescriptor {
    pub fn local_path(&self) -> &Path {
        Path::new(self.local_path)
    }

    /// Prefix-qualified tag name for a local name in this schema's namespace
    pub fn qualify(&self, local_name: &str) -> String {
        format!("{}:{}", self.namespace_prefix, local_name)
    }
}

static DESCRIPTORS: [SchemaDescriptor; 8] = [
    SchemaDescriptor {
        version: SchemaVersion::Spirit10,
        namespace_prefix: "spirit",
        schema_uri: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.0",
        schema_url: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.0/index.xsd",
        local_path: "spirit-1.0/index.xsd",
        qualified_reference_attributes: true,
    },
    SchemaDescriptor {
        version: SchemaVersion::Spirit11,
        namespace_prefix: "spirit",
        schema_uri: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.1",
        schema_url: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.1/index.xsd",
        local_path: "spirit-1.1/index.xsd",
        qualified_reference_attributes: true,
    },
    SchemaDescriptor {
        version: SchemaVersion::Spirit12,
        namespace_prefix: "spirit",
        schema_uri: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.2",
        schema_url: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.2/index.xsd",
        local_path: "spirit-1.2/index.xsd",
        qualified_reference_attributes: true,
    },
    SchemaDescriptor {
        version: SchemaVersion::Spirit14,
        namespace_prefix: "spirit",
        schema_uri: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.4",
        schema_url: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.4/index.xsd",
        local_path: "spirit-1.4/index.xsd",
        qualified_reference_attributes: true,
    },
    SchemaDescriptor {
        version: SchemaVersion::Spirit15,
        namespace_prefix: "spirit",
        schema_uri: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.5",
        schema_url: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1.5/index.xsd",
        local_path: "spirit-1.5/index.xsd",
        qualified_reference_attributes: true,
    },
    SchemaDescriptor {
        version: SchemaVersion::Ieee2009,
        namespace_prefix: "spirit",
        schema_uri: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1685-2009",
        schema_url: "http://www.spiritconsortium.org/XMLSchema/SPIRIT/1685-2009/index.xsd",
        local_path: "ieee-1685-2009/index.xsd",
        qualified_reference_attributes: true,
    },
    SchemaDescriptor {
        version: SchemaVersion::Ieee2014,
        namespace_prefix: "ipxact",
        schema_uri: "http://www.accellera.org/XMLSchema/IPXACT/1685-2014",
        schema_url: "http://www.accellera.org/XMLSchema/IPXACT/1685-2014/index.xsd",
        local_path: "ieee-1685-2014/index.xsd",
        qualified_reference_attributes: false,
    },
    SchemaDescriptor {
        version: SchemaVersion::Ieee2022,
        namespace_prefix: "ipxact",
        schema_uri: "http://www.accellera.org/XMLSchema/IPXACT/1685-2022",
        schema_url: "http://www.accellera.org/XMLSchema/IPXACT/1685-2022/index.xsd",
        local_path: "ieee-1685-2022/index.xsd",
        qualified_reference_attributes: false,
    },
];

/// Immutable catalog of schema descriptors with reverse lookup by namespace URI.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    by_uri: HashMap<&'static str, &'static SchemaDescriptor>,
    default_version: SchemaVersion,
}

static GLOBAL_REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

impl SchemaRegistry {
    /// Build a registry whose default descriptor is `default_version`.
    pub fn new(default_version: SchemaVersion) -> Self {
        let by_uri = DESCRIPTORS
            .iter()
            .map(|descriptor| (descriptor.schema_uri, descriptor))
            .collect();

        Self {
            by_uri,
            default_version,
        }
    }

    /// Process-wide registry with the built-in default version (IEEE 1685-2014).
    pub fn global() -> &'static SchemaRegistry {
        GLOBAL_REGISTRY.get_or_init(|| SchemaRegistry::new(SchemaVersion::default()))
    }

    /// Resolve a document namespace to its schema descriptor.
    pub fn descriptor_for(&self, namespace_uri: &str) -> Result<&'static SchemaDescriptor> {
        self.by_uri
            .get(namespace_uri)
            .copied()
            .ok_or_else(|| IpxactError::UnsupportedNamespace {
                namespace: namespace_uri.to_string(),
            })
    }

    pub fn default_descriptor(&self) -> &'static SchemaDescriptor {
        Self::by_version(self.default_version)
    }

    pub fn default_version(&self) -> SchemaVersion {
        self.default_version
    }

    pub fn by_version(version: SchemaVersion) -> &'static SchemaDescriptor {
        DESCRIPTORS
            .iter()
            .find(|descriptor| descriptor.version == version)
            .unwrap_or(&DESCRIPTORS[6])
    }

    /// All known descriptors, oldest release first.
    pub fn iter(&self) -> impl Iterator<Item = &'static SchemaDescriptor> {
        DESCRIPTORS.iter()
    }

    pub fn is_supported(&self, namespace_uri: &str) -> bool {
        self.by_uri.contains_key(namespace_uri)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new(SchemaVersion::default())
    }
}
