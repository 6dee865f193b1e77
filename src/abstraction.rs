//! The `abstractionDefinition` and `abstractor` root documents.

use indexmap::IndexMap;
use roxmltree::Node;

use crate::component::{FileSet, Model};
use crate::element::{
    Assertion, Choice, DocumentHeader, ParseContext, Parameter, RootDocument, VendorExtensions,
    opaque_element, parse_group, parse_opaque, parse_opaque_group, write_group, write_optional,
};
use crate::error::{IpxactError, Result};
use crate::vlnv::Vlnv;
use crate::xml::{XmlWriter, local_name, required_text};

opaque_element!(AbstractionPort, "port");
opaque_element!(AbstractorInterface, "abstractorInterface");
opaque_element!(AbstractorGenerator, "abstractorGenerator");

/// Everything that can be added to an [`AbstractionDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractionDefinitionItem {
    BusType(Vlnv),
    Extends(Vlnv),
    Port(AbstractionPort),
    Choice(Choice),
    Parameter(Parameter),
    Assertion(Assertion),
    VendorExtensions(VendorExtensions),
}

impl AbstractionDefinitionItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AbstractionDefinitionItem::BusType(_) => "BusType",
            AbstractionDefinitionItem::Extends(_) => "Extends",
            AbstractionDefinitionItem::Port(_) => "Port",
            AbstractionDefinitionItem::Choice(_) => "Choice",
            AbstractionDefinitionItem::Parameter(_) => "Parameter",
            AbstractionDefinitionItem::Assertion(_) => "Assertion",
            AbstractionDefinitionItem::VendorExtensions(_) => "VendorExtensions",
        }
    }
}

impl From<AbstractionPort> for AbstractionDefinitionItem {
    fn from(item: AbstractionPort) -> Self {
        AbstractionDefinitionItem::Port(item)
    }
}

impl From<Choice> for AbstractionDefinitionItem {
    fn from(item: Choice) -> Self {
        AbstractionDefinitionItem::Choice(item)
    }
}

impl From<Parameter> for AbstractionDefinitionItem {
    fn from(item: Parameter) -> Self {
        AbstractionDefinitionItem::Parameter(item)
    }
}

impl From<Assertion> for AbstractionDefinitionItem {
    fn from(item: Assertion) -> Self {
        AbstractionDefinitionItem::Assertion(item)
    }
}

impl From<VendorExtensions> for AbstractionDefinitionItem {
    fn from(item: VendorExtensions) -> Self {
        AbstractionDefinitionItem::VendorExtensions(item)
    }
}

/// An IP-XACT `abstractionDefinition` document.
///
/// The bus type is mandatory in the schema; it is `None` only for a
/// definition under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractionDefinition {
    header: DocumentHeader,
    bus_type: Option<Vlnv>,
    extends: Option<Vlnv>,
    ports: Vec<AbstractionPort>,
    choices: Vec<Choice>,
    parameters: Vec<Parameter>,
    assertions: Vec<Assertion>,
    vendor_extensions: Option<VendorExtensions>,
}

impl AbstractionDefinition {
    pub fn new(vlnv: Vlnv, description: impl Into<String>, bus_type: Vlnv) -> Self {
        let mut definition = Self::from_header(DocumentHeader::new(vlnv, description));
        definition.bus_type = Some(bus_type);
        definition
    }

    pub fn add_item(&mut self, item: impl Into<AbstractionDefinitionItem>) -> Result<()> {
        match item.into() {
            AbstractionDefinitionItem::Port(item) => self.ports.push(item),
            AbstractionDefinitionItem::Choice(item) => self.choices.push(item),
            AbstractionDefinitionItem::Parameter(item) => self.parameters.push(item),
            AbstractionDefinitionItem::Assertion(item) => self.assertions.push(item),
            item => {
                return Err(IpxactError::UnsupportedItemType {
                    item: item.kind_name(),
                    container: "AbstractionDefinition",
                });
            }
        }
        Ok(())
    }

    pub fn set_item(&mut self, item: impl Into<AbstractionDefinitionItem>) -> Result<()> {
        match item.into() {
            AbstractionDefinitionItem::BusType(vlnv) => self.bus_type = Some(vlnv),
            AbstractionDefinitionItem::Extends(vlnv) => self.extends = Some(vlnv),
            AbstractionDefinitionItem::VendorExtensions(item) => {
                self.vendor_extensions = Some(item)
            }
            other => {
                return Err(IpxactError::UnsupportedItemType {
                    item: other.kind_name(),
                    container: "AbstractionDefinition",
                });
            }
        }
        Ok(())
    }

    pub fn bus_type(&self) -> Option<&Vlnv> {
        self.bus_type.as_ref()
    }

    pub fn extends(&self) -> Option<&Vlnv> {
        self.extends.as_ref()
    }

    pub fn ports(&self) -> &[AbstractionPort] {
        &self.ports
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    pub fn vendor_extensions(&self) -> Option<&VendorExtensions> {
        self.vendor_extensions.as_ref()
    }
}

impl RootDocument for AbstractionDefinition {
    const ROOT_TAG: &'static str = "abstractionDefinition";

    fn from_header(header: DocumentHeader) -> Self {
        Self {
            header,
            bus_type: None,
            extends: None,
            ports: Vec::new(),
            choices: Vec::new(),
            parameters: Vec::new(),
            assertions: Vec::new(),
            vendor_extensions: None,
        }
    }

    fn header(&self) -> &DocumentHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut DocumentHeader {
        &mut self.header
    }

    fn parse_child(&mut self, node: Node<'_, '_>, ctx: &ParseContext) -> Result<()> {
        match local_name(node) {
            "busType" => self.bus_type = Some(Vlnv::from_attributes(node)?),
            "extends" => self.extends = Some(Vlnv::from_attributes(node)?),
            "ports" => parse_opaque_group(node, ctx, &mut self.ports)?,
            "choices" => parse_opaque_group(node, ctx, &mut self.choices)?,
            "parameters" => parse_opaque_group(node, ctx, &mut self.parameters)?,
            "assertions" => parse_opaque_group(node, ctx, &mut self.assertions)?,
            "vendorExtensions" => self.vendor_extensions = parse_opaque(node, ctx)?,
            other => {
                return Err(IpxactError::UnsupportedTag {
                    tag: other.to_string(),
                    context: format!("abstractionDefinition in {}", ctx.document),
                });
            }
        }
        Ok(())
    }

    fn write_children(&self, w: &mut XmlWriter<'_>) {
        if let Some(bus_type) = &self.bus_type {
            bus_type.write_reference(w, "busType");
        }
        if let Some(extends) = &self.extends {
            extends.write_reference(w, "extends");
        }
        write_group(w, "ports", &self.ports);
        self.header.write_spirit_description(w);
        write_group(w, "choices", &self.choices);
        write_group(w, "parameters", &self.parameters);
        write_group(w, "assertions", &self.assertions);
        write_optional(w, self.vendor_extensions.as_ref());
    }
}

/// `abstractorMode` with its optional `group` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractorMode {
    pub mode: String,
    pub group: Option<String>,
}

impl AbstractorMode {
    pub fn new(mode: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            group: None,
        }
    }

    fn from_xml(node: Node<'_, '_>) -> Result<Self> {
        Ok(Self {
            mode: required_text(node, "abstractorMode")?,
            group: node.attribute("group").map(str::to_string),
        })
    }

    fn write_xml(&self, w: &mut XmlWriter<'_>) {
        match &self.group {
            Some(group) => w.leaf_with("abstractorMode", &[("group", group)], &self.mode),
            None => w.leaf("abstractorMode", &self.mode),
        }
    }
}

/// Everything that can be added to an [`Abstractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractorItem {
    Mode(AbstractorMode),
    BusType(Vlnv),
    AbstractorInterface(AbstractorInterface),
    Model(Model),
    AbstractorGenerator(AbstractorGenerator),
    Choice(Choice),
    FileSet(FileSet),
    Parameter(Parameter),
    Assertion(Assertion),
    VendorExtensions(VendorExtensions),
}

impl AbstractorItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AbstractorItem::Mode(_) => "AbstractorMode",
            AbstractorItem::BusType(_) => "BusType",
            AbstractorItem::AbstractorInterface(_) => "AbstractorInterface",
            AbstractorItem::Model(_) => "Model",
            AbstractorItem::AbstractorGenerator(_) => "AbstractorGenerator",
            AbstractorItem::Choice(_) => "Choice",
            AbstractorItem::FileSet(_) => "FileSet",
            AbstractorItem::Parameter(_) => "Parameter",
            AbstractorItem::Assertion(_) => "Assertion",
            AbstractorItem::VendorExtensions(_) => "VendorExtensions",
        }
    }
}

impl From<AbstractorMode> for AbstractorItem {
    fn from(item: AbstractorMode) -> Self {
        AbstractorItem::Mode(item)
    }
}

impl From<AbstractorInterface> for AbstractorItem {
    fn from(item: AbstractorInterface) -> Self {
        AbstractorItem::AbstractorInterface(item)
    }
}

impl From<Model> for AbstractorItem {
    fn from(item: Model) -> Self {
        AbstractorItem::Model(item)
    }
}

impl From<AbstractorGenerator> for AbstractorItem {
    fn from(item: AbstractorGenerator) -> Self {
        AbstractorItem::AbstractorGenerator(item)
    }
}

impl From<Choice> for AbstractorItem {
    fn from(item: Choice) -> Self {
        AbstractorItem::Choice(item)
    }
}

impl From<FileSet> for AbstractorItem {
    fn from(item: FileSet) -> Self {
        AbstractorItem::FileSet(item)
    }
}

impl From<Parameter> for AbstractorItem {
    fn from(item: Parameter) -> Self {
        AbstractorItem::Parameter(item)
    }
}

impl From<Assertion> for AbstractorItem {
    fn from(item: Assertion) -> Self {
        AbstractorItem::Assertion(item)
    }
}

impl From<VendorExtensions> for AbstractorItem {
    fn from(item: VendorExtensions) -> Self {
        AbstractorItem::VendorExtensions(item)
    }
}

/// An IP-XACT `abstractor` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abstractor {
    header: DocumentHeader,
    mode: Option<AbstractorMode>,
    bus_type: Option<Vlnv>,
    abstractor_interfaces: Vec<AbstractorInterface>,
    model: Option<Model>,
    abstractor_generators: Vec<AbstractorGenerator>,
    choices: Vec<Choice>,
    file_sets: IndexMap<String, FileSet>,
    parameters: Vec<Parameter>,
    assertions: Vec<Assertion>,
    vendor_extensions: Option<VendorExtensions>,
}

impl Abstractor {
    pub fn new(
        vlnv: Vlnv,
        description: impl Into<String>,
        mode: AbstractorMode,
        bus_type: Vlnv,
    ) -> Self {
        let mut abstractor = Self::from_header(DocumentHeader::new(vlnv, description));
        abstractor.mode = Some(mode);
        abstractor.bus_type = Some(bus_type);
        abstractor
    }

    pub fn add_item(&mut self, item: impl Into<AbstractorItem>) -> Result<()> {
        match item.into() {
            AbstractorItem::AbstractorInterface(item) => self.abstractor_interfaces.push(item),
            AbstractorItem::AbstractorGenerator(item) => self.abstractor_generators.push(item),
            AbstractorItem::Choice(item) => self.choices.push(item),
            AbstractorItem::FileSet(item) => self.add_file_set(item)?,
            AbstractorItem::Parameter(item) => self.parameters.push(item),
            AbstractorItem::Assertion(item) => self.assertions.push(item),
            item => {
                return Err(IpxactError::UnsupportedItemType {
                    item: item.kind_name(),
                    container: "Abstractor",
                });
            }
        }
        Ok(())
    }

    pub fn set_item(&mut self, item: impl Into<AbstractorItem>) -> Result<()> {
        match item.into() {
            AbstractorItem::Mode(mode) => self.mode = Some(mode),
            AbstractorItem::BusType(vlnv) => self.bus_type = Some(vlnv),
            AbstractorItem::Model(model) => self.model = Some(model),
            AbstractorItem::VendorExtensions(item) => self.vendor_extensions = Some(item),
            other => {
                return Err(IpxactError::UnsupportedItemType {
                    item: other.kind_name(),
                    container: "Abstractor",
                });
            }
        }
        Ok(())
    }

    pub fn add_file_set(&mut self, file_set: FileSet) -> Result<()> {
        if self.file_sets.contains_key(file_set.name()) {
            return Err(IpxactError::DuplicateFileSet {
                name: file_set.name().to_string(),
            });
        }
        self.file_sets.insert(file_set.name().to_string(), file_set);
        Ok(())
    }

    pub fn mode(&self) -> Option<&AbstractorMode> {
        self.mode.as_ref()
    }

    pub fn bus_type(&self) -> Option<&Vlnv> {
        self.bus_type.as_ref()
    }

    pub fn abstractor_interfaces(&self) -> &[AbstractorInterface] {
        &self.abstractor_interfaces
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn abstractor_generators(&self) -> &[AbstractorGenerator] {
        &self.abstractor_generators
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn file_sets(&self) -> &IndexMap<String, FileSet> {
        &self.file_sets
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    pub fn vendor_extensions(&self) -> Option<&VendorExtensions> {
        self.vendor_extensions.as_ref()
    }

    fn parse_file_sets(&mut self, node: Node<'_, '_>) -> Result<()> {
        let mut file_sets: Vec<FileSet> = Vec::new();
        parse_group(node, &mut file_sets)?;
        for file_set in file_sets {
            self.add_file_set(file_set)?;
        }
        Ok(())
    }
}

impl RootDocument for Abstractor {
    const ROOT_TAG: &'static str = "abstractor";

    fn from_header(header: DocumentHeader) -> Self {
        Self {
            header,
            mode: None,
            bus_type: None,
            abstractor_interfaces: Vec::new(),
            model: None,
            abstractor_generators: Vec::new(),
            choices: Vec::new(),
            file_sets: IndexMap::new(),
            parameters: Vec::new(),
            assertions: Vec::new(),
            vendor_extensions: None,
        }
    }

    fn header(&self) -> &DocumentHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut DocumentHeader {
        &mut self.header
    }

    fn parse_child(&mut self, node: Node<'_, '_>, ctx: &ParseContext) -> Result<()> {
        match local_name(node) {
            "abstractorMode" => self.mode = Some(AbstractorMode::from_xml(node)?),
            "busType" => self.bus_type = Some(Vlnv::from_attributes(node)?),
            "abstractorInterfaces" => {
                parse_opaque_group(node, ctx, &mut self.abstractor_interfaces)?
            }
            "model" => self.model = parse_opaque(node, ctx)?,
            "abstractorGenerators" => {
                parse_opaque_group(node, ctx, &mut self.abstractor_generators)?
            }
            "choices" => parse_opaque_group(node, ctx, &mut self.choices)?,
            "fileSets" => self.parse_file_sets(node)?,
            "parameters" => parse_opaque_group(node, ctx, &mut self.parameters)?,
            "assertions" => parse_opaque_group(node, ctx, &mut self.assertions)?,
            "vendorExtensions" => self.vendor_extensions = parse_opaque(node, ctx)?,
            other => {
                return Err(IpxactError::UnsupportedTag {
                    tag: other.to_string(),
                    context: format!("abstractor in {}", ctx.document),
                });
            }
        }
        Ok(())
    }

    fn write_children(&self, w: &mut XmlWriter<'_>) {
        if let Some(mode) = &self.mode {
            mode.write_xml(w);
        }
        if let Some(bus_type) = &self.bus_type {
            bus_type.write_reference(w, "busType");
        }
        write_group(w, "abstractorInterfaces", &self.abstractor_interfaces);
        write_optional(w, self.model.as_ref());
        write_group(w, "abstractorGenerators", &self.abstractor_generators);
        write_group(w, "choices", &self.choices);
        write_group(w, "fileSets", self.file_sets.values());
        self.header.write_spirit_description(w);
        write_group(w, "parameters", &self.parameters);
        write_group(w, "assertions", &self.assertions);
        write_optional(w, self.vendor_extensions.as_ref());
    }
}
