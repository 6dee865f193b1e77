//! The `component` root document and its file sets.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use roxmltree::Node;

use crate::element::{
    Assertion, Choice, DocumentHeader, Element, Parameter, ParseContext, RootDocument,
    VendorExtensions, expect_tag, opaque_element, parse_opaque, parse_opaque_group, write_group,
    write_optional,
};
use crate::error::{IpxactError, Result};
use crate::vlnv::Vlnv;
use crate::xml::{
    XmlWriter, bool_of, bool_text, element_children, local_name, required_text, text_of,
};

opaque_element!(PowerDomain, "powerDomain");
opaque_element!(BusInterface, "busInterface");
opaque_element!(IndirectInterface, "indirectInterface");
opaque_element!(Channel, "channel");
opaque_element!(
    /// IEEE 1685-2022 operating `mode`
    Mode,
    "mode"
);
opaque_element!(RemapState, "remapState");
opaque_element!(AddressSpace, "addressSpace");
opaque_element!(MemoryMap, "memoryMap");
opaque_element!(
    /// `model`: views, instantiations and ports
    Model,
    "model"
);
opaque_element!(ComponentGenerator, "componentGenerator");
opaque_element!(WhiteboxElement, "whiteboxElement");
opaque_element!(Cpu, "cpu");
opaque_element!(OtherClockDriver, "otherClockDriver");
opaque_element!(ResetType, "resetType");

/// A `fileType` entry: a predefined kind such as `vhdlSource`, or `user`
/// together with a user-defined name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
    pub kind: String,
    pub user: Option<String>,
}

impl FileType {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            user: None,
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self {
            kind: "user".to_string(),
            user: Some(name.into()),
        }
    }
}

/// A `file` entry of a file set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: PathBuf,
    file_types: Vec<FileType>,
    is_structural: bool,
    is_include_file: Option<bool>,
    logical_name: Option<String>,
    description: Option<String>,
}

impl File {
    pub fn new(name: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file_types: Vec::new(),
            is_structural: false,
            is_include_file: None,
            logical_name: None,
            description: None,
        }
    }

    pub fn with_file_type(mut self, file_type: FileType) -> Self {
        self.file_types.push(file_type);
        self
    }

    pub fn with_logical_name(mut self, logical_name: impl Into<String>) -> Self {
        self.logical_name = Some(logical_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn structural(mut self, is_structural: bool) -> Self {
        self.is_structural = is_structural;
        self
    }

    pub fn include_file(mut self, is_include_file: bool) -> Self {
        self.is_include_file = Some(is_include_file);
        self
    }

    pub fn name(&self) -> &Path {
        &self.name
    }

    pub fn file_types(&self) -> &[FileType] {
        &self.file_types
    }

    pub fn is_structural(&self) -> bool {
        self.is_structural
    }

    pub fn is_include_file(&self) -> Option<bool> {
        self.is_include_file
    }

    pub fn logical_name(&self) -> Option<&str> {
        self.logical_name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Element for File {
    const TAG: &'static str = "file";

    fn from_xml(node: Node<'_, '_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;

        let mut name = None;
        let mut file = File::new(PathBuf::new());
        for child in element_children(node) {
            match local_name(child) {
                "name" => name = Some(required_text(child, "file")?),
                "fileType" => file.file_types.push(FileType {
                    kind: text_of(child),
                    user: child.attribute("user").map(str::to_string),
                }),
                "isStructural" => file.is_structural = bool_of(child, "isStructural")?,
                "isIncludeFile" => file.is_include_file = Some(bool_of(child, "isIncludeFile")?),
                "logicalName" => file.logical_name = Some(text_of(child)),
                "description" => file.description = Some(text_of(child)),
                other => {
                    return Err(IpxactError::UnsupportedChildTag {
                        tag: other.to_string(),
                        parent: Self::TAG.to_string(),
                    });
                }
            }
        }

        file.name = name
            .map(PathBuf::from)
            .ok_or(IpxactError::MissingElement {
                element: "name",
                parent: Self::TAG,
            })?;
        Ok(file)
    }

    fn write_xml(&self, w: &mut XmlWriter<'_>) {
        w.start(Self::TAG, &[]);
        w.leaf("name", &self.name.to_string_lossy());
        for file_type in &self.file_types {
            match &file_type.user {
                Some(user) => w.leaf_with("fileType", &[("user", user)], &file_type.kind),
                None => w.leaf("fileType", &file_type.kind),
            }
        }
        if self.is_structural {
            w.leaf("isStructural", bool_text(true));
        }
        if let Some(is_include_file) = self.is_include_file {
            w.leaf("isIncludeFile", bool_text(is_include_file));
        }
        if let Some(logical_name) = &self.logical_name {
            w.leaf("logicalName", logical_name);
        }
        if let Some(description) = &self.description {
            w.leaf("description", description);
        }
        w.end(Self::TAG);
    }
}

/// A named list of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    name: String,
    description: Option<String>,
    groups: Vec<String>,
    files: Vec<File>,
}

impl FileSet {
    pub fn new(name: impl Into<String>, files: Vec<File>) -> Self {
        Self {
            name: name.into(),
            description: None,
            groups: Vec::new(),
            files,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn add_file(&mut self, file: File) {
        self.files.push(file);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }
}

impl Element for FileSet {
    const TAG: &'static str = "fileSet";

    fn from_xml(node: Node<'_, '_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;

        let mut name = None;
        let mut file_set = FileSet::new(String::new(), Vec::new());
        for child in element_children(node) {
            match local_name(child) {
                "name" => name = Some(required_text(child, "fileSet")?),
                "description" => file_set.description = Some(text_of(child)),
                "group" => file_set.groups.push(text_of(child)),
                "file" => file_set.files.push(File::from_xml(child)?),
                other => {
                    return Err(IpxactError::UnsupportedChildTag {
                        tag: other.to_string(),
                        parent: Self::TAG.to_string(),
                    });
                }
            }
        }

        file_set.name = name.ok_or(IpxactError::MissingElement {
            element: "name",
            parent: Self::TAG,
        })?;
        Ok(file_set)
    }

    fn write_xml(&self, w: &mut XmlWriter<'_>) {
        w.start(Self::TAG, &[]);
        w.leaf("name", &self.name);
        if let Some(description) = &self.description {
            w.leaf("description", description);
        }
        for group in &self.groups {
            w.leaf("group", group);
        }
        for file in &self.files {
            file.write_xml(w);
        }
        w.end(Self::TAG);
    }
}

/// Everything that can be added to a [`Component`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentItem {
    PowerDomain(PowerDomain),
    BusInterface(BusInterface),
    IndirectInterface(IndirectInterface),
    Channel(Channel),
    Mode(Mode),
    RemapState(RemapState),
    AddressSpace(AddressSpace),
    MemoryMap(MemoryMap),
    Model(Model),
    ComponentGenerator(ComponentGenerator),
    Choice(Choice),
    FileSet(FileSet),
    WhiteboxElement(WhiteboxElement),
    Cpu(Cpu),
    OtherClockDriver(OtherClockDriver),
    ResetType(ResetType),
    Parameter(Parameter),
    Assertion(Assertion),
}

impl ComponentItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ComponentItem::PowerDomain(_) => "PowerDomain",
            ComponentItem::BusInterface(_) => "BusInterface",
            ComponentItem::IndirectInterface(_) => "IndirectInterface",
            ComponentItem::Channel(_) => "Channel",
            ComponentItem::Mode(_) => "Mode",
            ComponentItem::RemapState(_) => "RemapState",
            ComponentItem::AddressSpace(_) => "AddressSpace",
            ComponentItem::MemoryMap(_) => "MemoryMap",
            ComponentItem::Model(_) => "Model",
            ComponentItem::ComponentGenerator(_) => "ComponentGenerator",
            ComponentItem::Choice(_) => "Choice",
            ComponentItem::FileSet(_) => "FileSet",
            ComponentItem::WhiteboxElement(_) => "WhiteboxElement",
            ComponentItem::Cpu(_) => "Cpu",
            ComponentItem::OtherClockDriver(_) => "OtherClockDriver",
            ComponentItem::ResetType(_) => "ResetType",
            ComponentItem::Parameter(_) => "Parameter",
            ComponentItem::Assertion(_) => "Assertion",
        }
    }
}

macro_rules! component_item_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for ComponentItem {
                fn from(item: $variant) -> Self {
                    ComponentItem::$variant(item)
                }
            }
        )*
    };
}

component_item_from!(
    PowerDomain,
    BusInterface,
    IndirectInterface,
    Channel,
    Mode,
    RemapState,
    AddressSpace,
    MemoryMap,
    Model,
    ComponentGenerator,
    Choice,
    FileSet,
    WhiteboxElement,
    Cpu,
    OtherClockDriver,
    ResetType,
    Parameter,
    Assertion,
);

/// An IP-XACT `component` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    header: DocumentHeader,
    power_domains: Vec<PowerDomain>,
    bus_interfaces: Vec<BusInterface>,
    indirect_interfaces: Vec<IndirectInterface>,
    channels: Vec<Channel>,
    modes: Vec<Mode>,
    remap_states: Vec<RemapState>,
    address_spaces: Vec<AddressSpace>,
    memory_maps: Vec<MemoryMap>,
    model: Option<Model>,
    component_generators: Vec<ComponentGenerator>,
    choices: Vec<Choice>,
    file_sets: IndexMap<String, FileSet>,
    whitebox_elements: Vec<WhiteboxElement>,
    cpus: Vec<Cpu>,
    other_clock_drivers: Vec<OtherClockDriver>,
    reset_types: Vec<ResetType>,
    parameters: Vec<Parameter>,
    assertions: Vec<Assertion>,
    vendor_extensions: Option<VendorExtensions>,
}

impl Component {
    pub fn new(vlnv: Vlnv, description: impl Into<String>) -> Self {
        Self::from_header(DocumentHeader::new(vlnv, description))
    }

    /// Append a list item. `Model` is a single item and goes through [`Component::set_item`].
    pub fn add_item(&mut self, item: impl Into<ComponentItem>) -> Result<()> {
        match item.into() {
            ComponentItem::PowerDomain(item) => self.power_domains.push(item),
            ComponentItem::BusInterface(item) => self.bus_interfaces.push(item),
            ComponentItem::IndirectInterface(item) => self.indirect_interfaces.push(item),
            ComponentItem::Channel(item) => self.channels.push(item),
            ComponentItem::Mode(item) => self.modes.push(item),
            ComponentItem::RemapState(item) => self.remap_states.push(item),
            ComponentItem::AddressSpace(item) => self.address_spaces.push(item),
            ComponentItem::MemoryMap(item) => self.memory_maps.push(item),
            ComponentItem::ComponentGenerator(item) => self.component_generators.push(item),
            ComponentItem::Choice(item) => self.choices.push(item),
            ComponentItem::FileSet(item) => self.add_file_set(item)?,
            ComponentItem::WhiteboxElement(item) => self.whitebox_elements.push(item),
            ComponentItem::Cpu(item) => self.cpus.push(item),
            ComponentItem::OtherClockDriver(item) => self.other_clock_drivers.push(item),
            ComponentItem::ResetType(item) => self.reset_types.push(item),
            ComponentItem::Parameter(item) => self.parameters.push(item),
            ComponentItem::Assertion(item) => self.assertions.push(item),
            item @ ComponentItem::Model(_) => {
                return Err(IpxactError::UnsupportedItemType {
                    item: item.kind_name(),
                    container: "Component",
                });
            }
        }
        Ok(())
    }

    /// Replace a single-valued item. Only `Model` is single-valued.
    pub fn set_item(&mut self, item: impl Into<ComponentItem>) -> Result<()> {
        match item.into() {
            ComponentItem::Model(model) => {
                self.model = Some(model);
                Ok(())
            }
            other => Err(IpxactError::UnsupportedItemType {
                item: other.kind_name(),
                container: "Component",
            }),
        }
    }

    /// Add a file set; names are unique within a component.
    pub fn add_file_set(&mut self, file_set: FileSet) -> Result<()> {
        if self.file_sets.contains_key(file_set.name()) {
            return Err(IpxactError::DuplicateFileSet {
                name: file_set.name().to_string(),
            });
        }
        self.file_sets.insert(file_set.name().to_string(), file_set);
        Ok(())
    }

    pub fn set_vendor_extensions(&mut self, vendor_extensions: VendorExtensions) {
        self.vendor_extensions = Some(vendor_extensions);
    }

    pub fn file_sets(&self) -> &IndexMap<String, FileSet> {
        &self.file_sets
    }

    pub fn file_set(&self, name: &str) -> Option<&FileSet> {
        self.file_sets.get(name)
    }

    pub fn power_domains(&self) -> &[PowerDomain] {
        &self.power_domains
    }

    pub fn bus_interfaces(&self) -> &[BusInterface] {
        &self.bus_interfaces
    }

    pub fn indirect_interfaces(&self) -> &[IndirectInterface] {
        &self.indirect_interfaces
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn remap_states(&self) -> &[RemapState] {
        &self.remap_states
    }

    pub fn address_spaces(&self) -> &[AddressSpace] {
        &self.address_spaces
    }

    pub fn memory_maps(&self) -> &[MemoryMap] {
        &self.memory_maps
    }

    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub fn component_generators(&self) -> &[ComponentGenerator] {
        &self.component_generators
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn whitebox_elements(&self) -> &[WhiteboxElement] {
        &self.whitebox_elements
    }

    pub fn cpus(&self) -> &[Cpu] {
        &self.cpus
    }

    pub fn other_clock_drivers(&self) -> &[OtherClockDriver] {
        &self.other_clock_drivers
    }

    pub fn reset_types(&self) -> &[ResetType] {
        &self.reset_types
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
        for child in element_children(node) {
            if local_name(child) != FileSet::TAG {
                return Err(IpxactError::UnsupportedChildTag {
                    tag: local_name(child).to_string(),
                    parent: "fileSets".to_string(),
                });
            }
            self.add_file_set(FileSet::from_xml(child)?)?;
        }
        Ok(())
    }
}

impl RootDocument for Component {
    const ROOT_TAG: &'static str = "component";

    fn from_header(header: DocumentHeader) -> Self {
        Self {
            header,
            power_domains: Vec::new(),
            bus_interfaces: Vec::new(),
            indirect_interfaces: Vec::new(),
            channels: Vec::new(),
            modes: Vec::new(),
            remap_states: Vec::new(),
            address_spaces: Vec::new(),
            memory_maps: Vec::new(),
            model: None,
            component_generators: Vec::new(),
            choices: Vec::new(),
            file_sets: IndexMap::new(),
            whitebox_elements: Vec::new(),
            cpus: Vec::new(),
            other_clock_drivers: Vec::new(),
            reset_types: Vec::new(),
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
            "powerDomains" => parse_opaque_group(node, ctx, &mut self.power_domains),
            "busInterfaces" => parse_opaque_group(node, ctx, &mut self.bus_interfaces),
            "indirectInterfaces" => parse_opaque_group(node, ctx, &mut self.indirect_interfaces),
            "channels" => parse_opaque_group(node, ctx, &mut self.channels),
            "modes" => parse_opaque_group(node, ctx, &mut self.modes),
            "remapStates" => parse_opaque_group(node, ctx, &mut self.remap_states),
            "addressSpaces" => parse_opaque_group(node, ctx, &mut self.address_spaces),
            "memoryMaps" => parse_opaque_group(node, ctx, &mut self.memory_maps),
            "model" => {
                self.model = parse_opaque(node, ctx)?;
                Ok(())
            }
            "componentGenerators" => parse_opaque_group(node, ctx, &mut self.component_generators),
            "choices" => parse_opaque_group(node, ctx, &mut self.choices),
            "fileSets" => self.parse_file_sets(node),
            "whiteboxElements" => parse_opaque_group(node, ctx, &mut self.whitebox_elements),
            "cpus" => parse_opaque_group(node, ctx, &mut self.cpus),
            "otherClockDrivers" => parse_opaque_group(node, ctx, &mut self.other_clock_drivers),
            "resetTypes" => parse_opaque_group(node, ctx, &mut self.reset_types),
            "parameters" => parse_opaque_group(node, ctx, &mut self.parameters),
            "assertions" => parse_opaque_group(node, ctx, &mut self.assertions),
            "vendorExtensions" => {
                self.vendor_extensions = parse_opaque(node, ctx)?;
                Ok(())
            }
            other => Err(IpxactError::UnsupportedTag {
                tag: other.to_string(),
                context: format!("component in {}", ctx.document),
            }),
        }
    }

    fn write_children(&self, w: &mut XmlWriter<'_>) {
        write_group(w, "powerDomains", &self.power_domains);
        write_group(w, "busInterfaces", &self.bus_interfaces);
        write_group(w, "indirectInterfaces", &self.indirect_interfaces);
        write_group(w, "channels", &self.channels);
        write_group(w, "modes", &self.modes);
        write_group(w, "remapStates", &self.remap_states);
        write_group(w, "addressSpaces", &self.address_spaces);
        write_group(w, "memoryMaps", &self.memory_maps);
        write_optional(w, self.model.as_ref());
        write_group(w, "componentGenerators", &self.component_generators);
        write_group(w, "choices", &self.choices);
        write_group(w, "fileSets", self.file_sets.values());
        write_group(w, "whiteboxElements", &self.whitebox_elements);
        write_group(w, "cpus", &self.cpus);
        write_group(w, "otherClockDrivers", &self.other_clock_drivers);
        self.header.write_spirit_description(w);
        write_group(w, "resetTypes", &self.reset_types);
        write_group(w, "parameters", &self.parameters);
        write_group(w, "assertions", &self.assertions);
        write_optional(w, self.vendor_extensions.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaRegistry, SchemaVersion};
    use crate::xml::{OpaqueElement, parse};

    fn component() -> Component {
        Component::new(
            Vlnv::new("VHDL", "PoC", "uart", "1.0").unwrap(),
            "UART",
        )
    }

    fn vhdl(path: &str) -> File {
        File::new(path).with_file_type(FileType::new("vhdlSource"))
    }

    #[test]
    fn test_add_file_set_rejects_duplicates() {
        let mut component = component();
        component
            .add_file_set(FileSet::new("sources", vec![vhdl("src/uart.vhdl")]))
            .unwrap();

        match component.add_file_set(FileSet::new("sources", vec![])) {
            Err(IpxactError::DuplicateFileSet { name }) => assert_eq!(name, "sources"),
            other => panic!("Expected DuplicateFileSet, got {:?}", other),
        }
        assert_eq!(component.file_sets().len(), 1);
        assert_eq!(component.file_set("sources").unwrap().files().len(), 1);
    }

    #[test]
    fn test_add_item_dispatch() {
        let mut component = component();
        component.add_item(BusInterface::new()).unwrap();
        component.add_item(Parameter::new()).unwrap();
        component
            .add_item(FileSet::new("sim", vec![vhdl("tb.vhdl")]))
            .unwrap();

        assert_eq!(component.bus_interfaces().len(), 1);
        assert_eq!(component.parameters().len(), 1);
        assert!(component.file_set("sim").is_some());
        assert!(matches!(
            component.add_item(FileSet::new("sim", vec![])),
            Err(IpxactError::DuplicateFileSet { .. })
        ));
    }

    #[test]
    fn test_model_is_set_not_added() {
        let mut component = component();

        match component.add_item(Model::new()) {
            Err(IpxactError::UnsupportedItemType { item, container }) => {
                assert_eq!(item, "Model");
                assert_eq!(container, "Component");
            }
            other => panic!("Expected UnsupportedItemType, got {:?}", other),
        }

        component.set_item(Model::new()).unwrap();
        assert!(component.model().is_some());

        match component.set_item(Cpu::new()) {
            Err(IpxactError::UnsupportedItemType { item, .. }) => assert_eq!(item, "Cpu"),
            other => panic!("Expected UnsupportedItemType, got {:?}", other),
        }
    }

    #[test]
    fn test_file_parsing() {
        let xml = r#"<ipxact:file xmlns:ipxact="http://www.accellera.org/XMLSchema/IPXACT/1685-2014">
            <ipxact:name>src/uart_rx.vhdl</ipxact:name>
            <ipxact:fileType>vhdlSource-2008</ipxact:fileType>
            <ipxact:fileType user="constraints">user</ipxact:fileType>
            <ipxact:isIncludeFile>false</ipxact:isIncludeFile>
            <ipxact:logicalName>PoC</ipxact:logicalName>
        </ipxact:file>"#;
        let doc = parse("file.xml", xml).unwrap();
        let file = File::from_xml(doc.root_element()).unwrap();

        assert_eq!(file.name(), Path::new("src/uart_rx.vhdl"));
        assert_eq!(file.file_types()[0], FileType::new("vhdlSource-2008"));
        assert_eq!(file.file_types()[1], FileType::user("constraints"));
        assert_eq!(file.is_include_file(), Some(false));
        assert!(!file.is_structural());
        assert_eq!(file.logical_name(), Some("PoC"));
    }

    #[test]
    fn test_file_rejects_unknown_child_and_missing_name() {
        let unknown = parse("f.xml", "<file><name>a.vhdl</name><bogus/></file>").unwrap();
        match File::from_xml(unknown.root_element()) {
            Err(IpxactError::UnsupportedChildTag { tag, parent }) => {
                assert_eq!(tag, "bogus");
                assert_eq!(parent, "file");
            }
            other => panic!("Expected UnsupportedChildTag, got {:?}", other),
        }

        let nameless = parse("f.xml", "<file><fileType>vhdlSource</fileType></file>").unwrap();
        assert!(matches!(
            File::from_xml(nameless.root_element()),
            Err(IpxactError::MissingElement { element: "name", .. })
        ));

        let wrong = parse("f.xml", "<fileSet/>").unwrap();
        assert!(matches!(
            File::from_xml(wrong.root_element()),
            Err(IpxactError::UnexpectedTag { expected: "file", .. })
        ));
    }

    #[test]
    fn test_file_set_xml() {
        let file_set = FileSet::new(
            "sources",
            vec![
                vhdl("src/a.vhdl")
                    .with_logical_name("lib")
                    .include_file(true),
            ],
        )
        .with_description("RTL")
        .with_group("rtl");

        let schema = SchemaRegistry::by_version(SchemaVersion::Ieee2014);
        let xml = file_set.to_xml(0, schema);
        assert_eq!(
            xml,
            "<ipxact:fileSet>\n\
             \t<ipxact:name>sources</ipxact:name>\n\
             \t<ipxact:description>RTL</ipxact:description>\n\
             \t<ipxact:group>rtl</ipxact:group>\n\
             \t<ipxact:file>\n\
             \t\t<ipxact:name>src/a.vhdl</ipxact:name>\n\
             \t\t<ipxact:fileType>vhdlSource</ipxact:fileType>\n\
             \t\t<ipxact:isIncludeFile>true</ipxact:isIncludeFile>\n\
             \t\t<ipxact:logicalName>lib</ipxact:logicalName>\n\
             \t</ipxact:file>\n\
             </ipxact:fileSet>\n"
        );

        let wrapped = format!(
            "<ipxact:root xmlns:ipxact=\"{}\">{}</ipxact:root>",
            schema.schema_uri, xml
        );
        let doc = parse("fs.xml", &wrapped).unwrap();
        let node = element_children(doc.root_element()).next().unwrap();
        assert_eq!(FileSet::from_xml(node).unwrap(), file_set);
    }

    #[test]
    fn test_serialization_order_and_omission() {
        let mut component = component();
        component
            .add_file_set(FileSet::new("sources", vec![vhdl("a.vhdl")]))
            .unwrap();
        component
            .add_item(BusInterface::from_content(OpaqueElement::new("busInterface").with_child(
                OpaqueElement::new("name").with_text("clk"),
            ))
            .unwrap())
            .unwrap();

        let schema = SchemaRegistry::by_version(SchemaVersion::Ieee2014);
        let xml = component.to_xml(schema);

        let bus = xml.find("<ipxact:busInterfaces>").unwrap();
        let files = xml.find("<ipxact:fileSets>").unwrap();
        assert!(bus < files);
        assert!(!xml.contains("memoryMaps"));
        assert!(!xml.contains("vendorExtensions"));
        assert!(xml.contains("<ipxact:description>UART</ipxact:description>"));
    }
}
