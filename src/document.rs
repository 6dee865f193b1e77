//! Loading documents: read, parse, resolve the schema, validate, extract.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use roxmltree::Node;

use crate::abstraction::{AbstractionDefinition, Abstractor};
use crate::cache::SchemaCache;
use crate::catalog::Catalog;
use crate::component::Component;
use crate::config::{Config, ConfigManager, UnimplementedContent};
use crate::design::Design;
use crate::design_configuration::DesignConfiguration;
use crate::element::{DocumentHeader, ParseContext, RootDocument};
use crate::error::{IpxactError, LibXml2Error, Result};
use crate::file_source::{FileSource, FsSource};
use crate::generator_chain::GeneratorChain;
use crate::libxml2::{LibXml2Wrapper, ValidationResult, XmlSchemaPtr};
use crate::schema::{SchemaDescriptor, SchemaRegistry};
use crate::schema_loader::SchemaLoader;
use crate::vlnv::Vlnv;
use crate::xml::{capture_root_attributes, decode, element_children, local_name, parse, text_of};

const ANY_ROOT_TAG: &str = "catalog, component, design, designConfiguration, generatorChain, abstractionDefinition or abstractor";

/// Loads IP-XACT documents into their typed object model.
///
/// Every load runs the same stages: the bytes are read through the
/// [`FileSource`], parsed, matched against the schema registry by root
/// namespace, validated with the compiled XSD and only then walked to build
/// the element tree.
pub struct DocumentLoader<S: FileSource = FsSource> {
    registry: SchemaRegistry,
    schemas: SchemaLoader,
    libxml2: LibXml2Wrapper,
    policy: UnimplementedContent,
    source: S,
}

impl DocumentLoader<FsSource> {
    /// Loader reading from the filesystem.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_source(config, FsSource)
    }

    /// Loader configured from the first configuration file found, or the defaults.
    pub fn from_default_config() -> Result<Self> {
        let config = ConfigManager::load_config()?;
        Self::new(&config)
    }

    /// Process-wide loader built from the default configuration on first use.
    pub fn shared() -> Result<&'static DocumentLoader> {
        static SHARED: OnceLock<DocumentLoader> = OnceLock::new();

        if let Some(loader) = SHARED.get() {
            return Ok(loader);
        }
        let loader = Self::from_default_config()?;
        Ok(SHARED.get_or_init(|| loader))
    }
}

impl<S: FileSource> DocumentLoader<S> {
    pub fn with_source(config: &Config, source: S) -> Result<Self> {
        ConfigManager::validate_config(config)?;

        let cache = Arc::new(SchemaCache::new(config.schema.cache_capacity));
        Ok(Self {
            registry: SchemaRegistry::new(config.schema.default_version),
            schemas: SchemaLoader::new(config.schema.directories.clone(), cache),
            libxml2: LibXml2Wrapper::new(),
            policy: config.parsing.unimplemented_content,
            source,
        })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn schemas(&self) -> &SchemaLoader {
        &self.schemas
    }

    pub fn policy(&self) -> UnimplementedContent {
        self.policy
    }

    /// Load the document of type `D` stored at `path`.
    pub fn load<D: RootDocument>(&self, path: impl AsRef<Path>) -> Result<D> {
        let path = path.as_ref();
        let bytes = self.read(path)?;

        let mut document: D = self.load_bytes(&path.display().to_string(), &bytes)?;
        document.header_mut().source_file = Some(path.to_path_buf());
        Ok(document)
    }

    /// Load a document held in memory; `name` identifies it in diagnostics.
    pub fn load_bytes<D: RootDocument>(&self, name: &str, bytes: &[u8]) -> Result<D> {
        let text = decode(name, bytes)?;
        let tree = parse(name, text)?;
        tracing::debug!(document = name, "parsed");

        self.process(tree.root_element(), bytes, name)
    }

    /// Load whichever root document is stored at `path`.
    pub fn load_any(&self, path: impl AsRef<Path>) -> Result<AnyDocument> {
        let path = path.as_ref();
        let bytes = self.read(path)?;
        let name = path.display().to_string();

        let text = decode(&name, &bytes)?;
        let tree = parse(&name, text)?;
        tracing::debug!(document = %name, "parsed");

        let root = tree.root_element();
        let mut document = match local_name(root) {
            Catalog::ROOT_TAG => AnyDocument::Catalog(self.process(root, &bytes, &name)?),
            Component::ROOT_TAG => AnyDocument::Component(self.process(root, &bytes, &name)?),
            Design::ROOT_TAG => AnyDocument::Design(self.process(root, &bytes, &name)?),
            DesignConfiguration::ROOT_TAG => {
                AnyDocument::DesignConfiguration(self.process(root, &bytes, &name)?)
            }
            GeneratorChain::ROOT_TAG => {
                AnyDocument::GeneratorChain(self.process(root, &bytes, &name)?)
            }
            AbstractionDefinition::ROOT_TAG => {
                AnyDocument::AbstractionDefinition(self.process(root, &bytes, &name)?)
            }
            Abstractor::ROOT_TAG => AnyDocument::Abstractor(self.process(root, &bytes, &name)?),
            other => {
                self.descriptor_of(root)?;
                return Err(IpxactError::UnexpectedRootTag {
                    expected: ANY_ROOT_TAG,
                    found: other.to_string(),
                    document: name,
                });
            }
        };

        document.header_mut().source_file = Some(path.to_path_buf());
        Ok(document)
    }

    /// Serialize `document` for `schema` and validate the result.
    pub fn validate_document<D: RootDocument>(
        &self,
        document: &D,
        schema: &SchemaDescriptor,
    ) -> Result<()> {
        let xml = document.to_xml(schema);
        let name = format!("{} {}", D::ROOT_TAG, document.vlnv());
        let compiled = self.schemas.load_schema(schema)?;

        self.validate(&compiled, xml.as_bytes(), &name, schema)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let bytes = self.source.read(path)?;
        tracing::debug!(document = %path.display(), bytes = bytes.len(), "opened");
        Ok(bytes)
    }

    fn process<D: RootDocument>(&self, root: Node<'_, '_>, bytes: &[u8], name: &str) -> Result<D> {
        let descriptor = self.descriptor_of(root)?;

        let found = local_name(root);
        if found != D::ROOT_TAG {
            return Err(IpxactError::UnexpectedRootTag {
                expected: D::ROOT_TAG,
                found: found.to_string(),
                document: name.to_string(),
            });
        }

        let schema = self.schemas.load_schema(descriptor)?;
        tracing::debug!(document = name, schema_uri = descriptor.schema_uri, "schema resolved");

        self.validate(&schema, bytes, name, descriptor)?;
        tracing::debug!(document = name, "validated");

        let document = self.extract(root, name)?;
        tracing::debug!(document = name, root = D::ROOT_TAG, "extracted");
        Ok(document)
    }

    fn descriptor_of(&self, root: Node<'_, '_>) -> Result<&'static SchemaDescriptor> {
        let namespace = root.tag_name().namespace().unwrap_or_default();
        self.registry.descriptor_for(namespace)
    }

    fn validate(
        &self,
        schema: &XmlSchemaPtr,
        bytes: &[u8],
        name: &str,
        descriptor: &SchemaDescriptor,
    ) -> Result<()> {
        match self.libxml2.validate_memory(schema, bytes, name)? {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid {
                error_count,
                mut errors,
            } => {
                if errors.is_empty() {
                    errors.push(format!("{} validation error(s)", error_count));
                }
                Err(IpxactError::SchemaValidation {
                    document: name.to_string(),
                    schema_uri: descriptor.schema_uri.to_string(),
                    errors,
                })
            }
            ValidationResult::InternalError { code } => Err(LibXml2Error::ValidationFailed {
                code,
                document: name.to_string(),
            }
            .into()),
        }
    }

    /// Walk the top-level children once: the first header fields are captured,
    /// everything else goes to the document's `parse_child` in document order.
    fn extract<D: RootDocument>(&self, root: Node<'_, '_>, name: &str) -> Result<D> {
        let mut vendor = None;
        let mut library = None;
        let mut vlnv_name = None;
        let mut version = None;
        let mut display_name = None;
        let mut short_description = None;
        let mut description = None;
        let mut children = Vec::new();

        for child in element_children(root) {
            match local_name(child) {
                "vendor" if vendor.is_none() => vendor = Some(text_of(child)),
                "library" if library.is_none() => library = Some(text_of(child)),
                "name" if vlnv_name.is_none() => vlnv_name = Some(text_of(child)),
                "version" if version.is_none() => version = Some(text_of(child)),
                "displayName" if display_name.is_none() => display_name = Some(text_of(child)),
                "shortDescription" if short_description.is_none() => {
                    short_description = Some(text_of(child))
                }
                "description" if description.is_none() => description = Some(text_of(child)),
                _ => children.push(child),
            }
        }

        let required = |value: Option<String>, element: &'static str| {
            value.ok_or(IpxactError::MissingElement {
                element,
                parent: D::ROOT_TAG,
            })
        };
        let vlnv = Vlnv::new(
            required(vendor, "vendor")?,
            required(library, "library")?,
            required(vlnv_name, "name")?,
            &required(version, "version")?,
        )?;

        let ctx = ParseContext::new(name, self.policy);
        let mut attributes = capture_root_attributes(root);
        if !attributes.is_empty() && self.policy == UnimplementedContent::Discard {
            tracing::warn!(
                document = name,
                count = attributes.len(),
                "discarding root attributes"
            );
            attributes.clear();
        }

        let mut document = D::from_header(DocumentHeader {
            vlnv,
            display_name,
            short_description,
            description: description.unwrap_or_default(),
            attributes,
            source_file: None,
        });

        for child in children {
            document.parse_child(child, &ctx)?;
        }
        Ok(document)
    }
}

/// A loaded document of any root type.
#[derive(Debug, Clone)]
pub enum AnyDocument {
    Catalog(Catalog),
    Component(Component),
    Design(Design),
    DesignConfiguration(DesignConfiguration),
    GeneratorChain(GeneratorChain),
    AbstractionDefinition(AbstractionDefinition),
    Abstractor(Abstractor),
}

impl AnyDocument {
    pub fn root_tag(&self) -> &'static str {
        match self {
            AnyDocument::Catalog(_) => Catalog::ROOT_TAG,
            AnyDocument::Component(_) => Component::ROOT_TAG,
            AnyDocument::Design(_) => Design::ROOT_TAG,
            AnyDocument::DesignConfiguration(_) => DesignConfiguration::ROOT_TAG,
            AnyDocument::GeneratorChain(_) => GeneratorChain::ROOT_TAG,
            AnyDocument::AbstractionDefinition(_) => AbstractionDefinition::ROOT_TAG,
            AnyDocument::Abstractor(_) => Abstractor::ROOT_TAG,
        }
    }

    pub fn header(&self) -> &DocumentHeader {
        match self {
            AnyDocument::Catalog(document) => document.header(),
            AnyDocument::Component(document) => document.header(),
            AnyDocument::Design(document) => document.header(),
            AnyDocument::DesignConfiguration(document) => document.header(),
            AnyDocument::GeneratorChain(document) => document.header(),
            AnyDocument::AbstractionDefinition(document) => document.header(),
            AnyDocument::Abstractor(document) => document.header(),
        }
    }

    fn header_mut(&mut self) -> &mut DocumentHeader {
        match self {
            AnyDocument::Catalog(document) => document.header_mut(),
            AnyDocument::Component(document) => document.header_mut(),
            AnyDocument::Design(document) => document.header_mut(),
            AnyDocument::DesignConfiguration(document) => document.header_mut(),
            AnyDocument::GeneratorChain(document) => document.header_mut(),
            AnyDocument::AbstractionDefinition(document) => document.header_mut(),
            AnyDocument::Abstractor(document) => document.header_mut(),
        }
    }

    pub fn vlnv(&self) -> &Vlnv {
        &self.header().vlnv
    }

    pub fn to_xml(&self, schema: &SchemaDescriptor) -> String {
        match self {
            AnyDocument::Catalog(document) => document.to_xml(schema),
            AnyDocument::Component(document) => document.to_xml(schema),
            AnyDocument::Design(document) => document.to_xml(schema),
            AnyDocument::DesignConfiguration(document) => document.to_xml(schema),
            AnyDocument::GeneratorChain(document) => document.to_xml(schema),
            AnyDocument::AbstractionDefinition(document) => document.to_xml(schema),
            AnyDocument::Abstractor(document) => document.to_xml(schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadStage;
    use crate::schema::SchemaVersion;
    use std::fs;
    use tempfile::TempDir;

    const HEADER_XSD: &str = r###"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"
           xmlns:ipxact="http://www.accellera.org/XMLSchema/IPXACT/1685-2014"
           targetNamespace="http://www.accellera.org/XMLSchema/IPXACT/1685-2014"
           elementFormDefault="qualified">
    <xs:complexType name="document">
        <xs:sequence>
            <xs:element name="vendor" type="xs:string"/>
            <xs:element name="library" type="xs:string"/>
            <xs:element name="name" type="xs:string"/>
            <xs:element name="version" type="xs:string"/>
            <xs:element name="description" type="xs:string" minOccurs="0"/>
            <xs:any namespace="##targetNamespace" processContents="skip" minOccurs="0" maxOccurs="unbounded"/>
        </xs:sequence>
        <xs:anyAttribute processContents="skip"/>
    </xs:complexType>
    <xs:element name="component" type="ipxact:document"/>
    <xs:element name="design" type="ipxact:document"/>
</xs:schema>"###;

    const COMPONENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ipxact:component xmlns:ipxact="http://www.accellera.org/XMLSchema/IPXACT/1685-2014">
    <!-- header -->
    <ipxact:vendor>VHDL</ipxact:vendor>
    <ipxact:library>PoC</ipxact:library>
    <ipxact:name>uart</ipxact:name>
    <ipxact:version>1.0</ipxact:version>
    <ipxact:description>UART</ipxact:description>
    <ipxact:fileSets>
        <ipxact:fileSet>
            <ipxact:name>sources</ipxact:name>
            <ipxact:file>
                <ipxact:name>src/uart.vhdl</ipxact:name>
                <ipxact:fileType>vhdlSource</ipxact:fileType>
            </ipxact:file>
        </ipxact:fileSet>
    </ipxact:fileSets>
</ipxact:component>
"#;

    fn loader() -> (DocumentLoader, TempDir) {
        let dir = TempDir::new().unwrap();
        let schema_dir = dir.path().join("ieee-1685-2014");
        fs::create_dir_all(&schema_dir).unwrap();
        fs::write(schema_dir.join("index.xsd"), HEADER_XSD).unwrap();

        let loader = DocumentLoader::new(&Config::with_schema_directory(dir.path())).unwrap();
        (loader, dir)
    }

    #[test]
    fn test_load_bytes_extracts_header_and_children() {
        let (loader, _dir) = loader();
        let component: Component = loader.load_bytes("uart.xml", COMPONENT.as_bytes()).unwrap();

        assert_eq!(component.vlnv().to_string(), "VHDL:PoC:uart:1.0");
        assert_eq!(component.description(), "UART");
        assert!(component.source_file().is_none());
        assert_eq!(component.file_set("sources").unwrap().files().len(), 1);
    }

    #[test]
    fn test_load_sets_source_file() {
        let (loader, dir) = loader();
        let path = dir.path().join("uart.xml");
        fs::write(&path, COMPONENT).unwrap();

        let component: Component = loader.load(&path).unwrap();
        assert_eq!(component.source_file(), Some(path.as_path()));
    }

    #[test]
    fn test_wrong_root_type() {
        let (loader, _dir) = loader();
        match loader.load_bytes::<Design>("uart.xml", COMPONENT.as_bytes()) {
            Err(IpxactError::UnexpectedRootTag {
                expected, found, ..
            }) => {
                assert_eq!(expected, "design");
                assert_eq!(found, "component");
            }
            other => panic!("Expected UnexpectedRootTag, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_namespace() {
        let (loader, _dir) = loader();
        let xml = r#"<component xmlns="urn:example"><vendor>v</vendor></component>"#;

        let error = loader
            .load_bytes::<Component>("x.xml", xml.as_bytes())
            .unwrap_err();
        assert!(matches!(error, IpxactError::UnsupportedNamespace { ref namespace } if namespace == "urn:example"));
        assert_eq!(error.stage(), LoadStage::SchemaResolve);
    }

    #[test]
    fn test_schema_violation_is_reported() {
        let (loader, _dir) = loader();
        let broken = COMPONENT.replace("<ipxact:version>1.0</ipxact:version>", "");

        match loader.load_bytes::<Component>("uart.xml", broken.as_bytes()) {
            Err(IpxactError::SchemaValidation {
                document, errors, ..
            }) => {
                assert_eq!(document, "uart.xml");
                assert!(!errors.is_empty());
            }
            other => panic!("Expected SchemaValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_xml() {
        let (loader, _dir) = loader();
        let error = loader
            .load_bytes::<Component>("bad.xml", b"<ipxact:component")
            .unwrap_err();
        assert_eq!(error.stage(), LoadStage::Parse);
    }

    #[test]
    fn test_load_any_dispatches_on_root_tag() {
        let (loader, dir) = loader();
        let path = dir.path().join("uart.xml");
        fs::write(&path, COMPONENT).unwrap();

        let document = loader.load_any(&path).unwrap();
        assert_eq!(document.root_tag(), "component");
        assert_eq!(document.vlnv().name(), "uart");
        assert_eq!(document.header().source_file.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_validate_document_round_trip() {
        let (loader, _dir) = loader();
        let component: Component = loader.load_bytes("uart.xml", COMPONENT.as_bytes()).unwrap();

        let schema = SchemaRegistry::by_version(SchemaVersion::Ieee2014);
        loader.validate_document(&component, schema).unwrap();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = Config::default();
        config.schema.directories.clear();

        assert!(matches!(
            DocumentLoader::new(&config),
            Err(IpxactError::Config(_))
        ));
    }
}
