//! The `catalog` root document: an index of IP-XACT files by VLNV.

use std::fmt;

use indexmap::IndexMap;
use roxmltree::Node;

use crate::component::Component;
use crate::element::{
    DocumentHeader, Element, ParseContext, RootDocument, VendorExtensions, expect_tag,
    parse_group, parse_opaque, write_optional,
};
use crate::error::{IpxactError, Result};
use crate::vlnv::Vlnv;
use crate::xml::{XmlWriter, element_children, local_name, required_text, text_of};

/// The groups of a catalog, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogGroup {
    Catalogs,
    BusDefinitions,
    AbstractionDefinitions,
    Components,
    Abstractors,
    Designs,
    DesignConfigurations,
    GeneratorChains,
    /// IEEE 1685-2022 `typeDefinitions` documents
    TypeDefinitions,
}

impl CatalogGroup {
    pub const ALL: [CatalogGroup; 9] = [
        CatalogGroup::Catalogs,
        CatalogGroup::BusDefinitions,
        CatalogGroup::AbstractionDefinitions,
        CatalogGroup::Components,
        CatalogGroup::Abstractors,
        CatalogGroup::Designs,
        CatalogGroup::DesignConfigurations,
        CatalogGroup::GeneratorChains,
        CatalogGroup::TypeDefinitions,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            CatalogGroup::Catalogs => "catalogs",
            CatalogGroup::BusDefinitions => "busDefinitions",
            CatalogGroup::AbstractionDefinitions => "abstractionDefinitions",
            CatalogGroup::Components => "components",
            CatalogGroup::Abstractors => "abstractors",
            CatalogGroup::Designs => "designs",
            CatalogGroup::DesignConfigurations => "designConfigurations",
            CatalogGroup::GeneratorChains => "generatorChains",
            CatalogGroup::TypeDefinitions => "typeDefinitions",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.tag() == tag)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CatalogGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An `ipxactFile` entry: where the document with a given VLNV lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpxactFile {
    vlnv: Vlnv,
    name: String,
    description: String,
}

impl IpxactFile {
    pub fn new(vlnv: Vlnv, name: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IpxactError::InvalidField {
                field: "name",
                element: Self::TAG,
            });
        }

        Ok(Self {
            vlnv,
            name,
            description: description.into(),
        })
    }

    pub fn vlnv(&self) -> &Vlnv {
        &self.vlnv
    }

    /// Path of the referenced file, relative to the catalog
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Element for IpxactFile {
    const TAG: &'static str = "ipxactFile";

    fn from_xml(node: Node<'_, '_>) -> Result<Self> {
        expect_tag(node, Self::TAG)?;

        let mut vlnv = None;
        let mut name = None;
        let mut description = String::new();
        for child in element_children(node) {
            match local_name(child) {
                "vlnv" => vlnv = Some(Vlnv::from_attributes(child)?),
                "name" => name = Some(required_text(child, Self::TAG)?),
                "description" => description = text_of(child),
                other => {
                    return Err(IpxactError::UnsupportedChildTag {
                        tag: other.to_string(),
                        parent: Self::TAG.to_string(),
                    });
                }
            }
        }

        let vlnv = vlnv.ok_or(IpxactError::MissingElement {
            element: "vlnv",
            parent: Self::TAG,
        })?;
        let name = name.ok_or(IpxactError::MissingElement {
            element: "name",
            parent: Self::TAG,
        })?;
        IpxactFile::new(vlnv, name, description)
    }

    fn write_xml(&self, w: &mut XmlWriter<'_>) {
        w.start(Self::TAG, &[]);
        self.vlnv.write_reference(w, "vlnv");
        w.leaf("name", &self.name);
        if !self.description.is_empty() {
            w.leaf("description", &self.description);
        }
        w.end(Self::TAG);
    }
}

/// Everything that can be added to a [`Catalog`].
#[derive(Debug, Clone)]
pub enum CatalogItem {
    File(IpxactFile),
    Component(Component),
}

impl From<IpxactFile> for CatalogItem {
    fn from(file: IpxactFile) -> Self {
        CatalogItem::File(file)
    }
}

impl From<Component> for CatalogItem {
    fn from(component: Component) -> Self {
        CatalogItem::Component(component)
    }
}

/// An IP-XACT `catalog` document.
#[derive(Debug, Clone)]
pub struct Catalog {
    header: DocumentHeader,
    groups: [IndexMap<Vlnv, IpxactFile>; 9],
    components: Vec<Component>,
    vendor_extensions: Option<VendorExtensions>,
}

impl Catalog {
    pub fn new(vlnv: Vlnv, description: impl Into<String>) -> Self {
        Self::from_header(DocumentHeader::new(vlnv, description))
    }

    /// Files go to the `catalogs` group; components are embedded.
    pub fn add_item(&mut self, item: impl Into<CatalogItem>) {
        match item.into() {
            CatalogItem::File(file) => self.add_file(CatalogGroup::Catalogs, file),
            CatalogItem::Component(component) => self.components.push(component),
        }
    }

    /// Insert `file` into `group`, replacing any entry with the same VLNV.
    pub fn add_file(&mut self, group: CatalogGroup, file: IpxactFile) {
        self.groups[group.index()].insert(file.vlnv().clone(), file);
    }

    pub fn catalogs(&self) -> &IndexMap<Vlnv, IpxactFile> {
        self.files(CatalogGroup::Catalogs)
    }

    pub fn files(&self, group: CatalogGroup) -> &IndexMap<Vlnv, IpxactFile> {
        &self.groups[group.index()]
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn vendor_extensions(&self) -> Option<&VendorExtensions> {
        self.vendor_extensions.as_ref()
    }

    pub fn set_vendor_extensions(&mut self, vendor_extensions: VendorExtensions) {
        self.vendor_extensions = Some(vendor_extensions);
    }

    /// Reference entries for embedded components not already listed.
    fn embedded_references(&self) -> Vec<IpxactFile> {
        let listed = self.files(CatalogGroup::Components);
        let mut references: Vec<IpxactFile> = Vec::new();

        for component in &self.components {
            let vlnv = component.vlnv();
            if listed.contains_key(vlnv) || references.iter().any(|file| file.vlnv() == vlnv) {
                continue;
            }
            let name = component
                .source_file()
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("{}.xml", vlnv.name()));

            references.push(IpxactFile {
                vlnv: vlnv.clone(),
                name,
                description: component.description().to_string(),
            });
        }
        references
    }
}

impl RootDocument for Catalog {
    const ROOT_TAG: &'static str = "catalog";

    fn from_header(header: DocumentHeader) -> Self {
        Self {
            header,
            groups: Default::default(),
            components: Vec::new(),
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
        let tag = local_name(node);
        if tag == VendorExtensions::TAG {
            self.vendor_extensions = parse_opaque(node, ctx)?;
            return Ok(());
        }

        let group = CatalogGroup::from_tag(tag).ok_or_else(|| IpxactError::UnsupportedTag {
            tag: tag.to_string(),
            context: format!("catalog in {}", ctx.document),
        })?;

        let mut files: Vec<IpxactFile> = Vec::new();
        parse_group(node, &mut files)?;
        for file in files {
            self.add_file(group, file);
        }
        Ok(())
    }

    fn write_children(&self, w: &mut XmlWriter<'_>) {
        let embedded = self.embedded_references();

        for group in CatalogGroup::ALL {
            let files = self.files(group);
            let extra: &[IpxactFile] = if group == CatalogGroup::Components {
                &embedded
            } else {
                &[]
            };
            if files.is_empty() && extra.is_empty() {
                continue;
            }

            w.start(group.tag(), &[]);
            for file in files.values().chain(extra) {
                file.write_xml(w);
            }
            w.end(group.tag());
        }

        self.header.write_spirit_description(w);
        write_optional(w, self.vendor_extensions.as_ref());
    }
}
