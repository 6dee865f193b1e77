//! # ipxact
//!
//! A typed document object model for IP-XACT (SPIRIT 1.0 through IEEE 1685-2022).
//!
//! Documents are validated against the XSD of their schema release before the
//! element tree is built, and serialize back to XML for any supported release.
//!
//! ```no_run
//! use ipxact::{Catalog, Config, DocumentLoader, RootDocument, SchemaRegistry};
//!
//! let loader = DocumentLoader::new(&Config::with_schema_directory("lib/schema"))?;
//! let catalog: Catalog = loader.load("Catalog.xml")?;
//! println!("{} lists {} catalogs", catalog.vlnv(), catalog.catalogs().len());
//!
//! let xml = catalog.to_xml(SchemaRegistry::global().default_descriptor());
//! # let _ = xml;
//! # Ok::<(), ipxact::IpxactError>(())
//! ```

pub mod abstraction;
pub mod cache;
pub mod catalog;
pub mod component;
pub mod config;
pub mod design;
pub mod design_configuration;
pub mod document;
pub mod element;
pub mod error;
pub mod file_source;
pub mod generator_chain;
pub mod libxml2;
pub mod schema;
pub mod schema_loader;
pub mod vlnv;
pub mod xml;

pub use abstraction::{
    AbstractionDefinition, AbstractionDefinitionItem, AbstractionPort, Abstractor,
    AbstractorGenerator, AbstractorInterface, AbstractorItem, AbstractorMode,
};
pub use cache::{CacheStats, SchemaCache};
pub use catalog::{Catalog, CatalogGroup, CatalogItem, IpxactFile};
pub use component::{
    AddressSpace, BusInterface, Channel, Component, ComponentGenerator, ComponentItem, Cpu, File,
    FileSet, FileType, IndirectInterface, MemoryMap, Mode, Model, OtherClockDriver, PowerDomain,
    RemapState, ResetType, WhiteboxElement,
};
pub use config::{Config, ConfigManager, ParsingConfig, SchemaConfig, UnimplementedContent};
pub use design::{AdHocConnection, ComponentInstance, Design, DesignItem, Interconnection};
pub use design_configuration::{
    DesignConfiguration, DesignConfigurationItem, GeneratorChainConfiguration,
    InterconnectionConfiguration, ViewConfiguration,
};
pub use document::{AnyDocument, DocumentLoader};
pub use element::{
    Assertion, Choice, DocumentHeader, Element, Parameter, ParseContext, RootDocument,
    VendorExtensions,
};
pub use error::{ConfigError, IpxactError, LibXml2Error, LoadStage, Result};
pub use file_source::{FileSource, FsSource};
pub use generator_chain::{
    ChainStep, ComponentGeneratorSelector, Generator, GeneratorChain, GeneratorChainItem,
    GeneratorChainSelector,
};
pub use libxml2::{LibXml2Wrapper, ValidationResult, XmlSchemaPtr};
pub use schema::{SchemaDescriptor, SchemaRegistry, SchemaVersion};
pub use schema_loader::SchemaLoader;
pub use vlnv::{Version, Vlnv};
pub use xml::{OpaqueAttribute, OpaqueElement, OpaqueNode, XmlNamespace, XmlWriter};
