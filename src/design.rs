//! The `design` root document.

use roxmltree::Node;

use crate::element::{
    Assertion, DocumentHeader, Element, ParseContext, Parameter, RootDocument, VendorExtensions,
    opaque_element, parse_opaque, parse_opaque_group, write_group, write_optional,
};
use crate::error::{IpxactError, Result};
use crate::vlnv::Vlnv;
use crate::xml::{OpaqueElement, XmlWriter, element_children, local_name};

opaque_element!(ComponentInstance, "componentInstance");
opaque_element!(
    /// `interconnection` or `monitorInterconnection`; both live in `interconnections`.
    Interconnection,
    "interconnection",
    "monitorInterconnection"
);

impl Interconnection {
    /// An empty `monitorInterconnection`
    pub fn monitor() -> Self {
        Self(OpaqueElement::new("monitorInterconnection"))
    }

    pub fn is_monitor(&self) -> bool {
        self.0.name() == "monitorInterconnection"
    }
}
opaque_element!(AdHocConnection, "adHocConnection");

/// Everything that can be added to a [`Design`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignItem {
    ComponentInstance(ComponentInstance),
    Interconnection(Interconnection),
    AdHocConnection(AdHocConnection),
    Parameter(Parameter),
    Assertion(Assertion),
    VendorExtensions(VendorExtensions),
}

impl DesignItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DesignItem::ComponentInstance(_) => "ComponentInstance",
            DesignItem::Interconnection(_) => "Interconnection",
            DesignItem::AdHocConnection(_) => "AdHocConnection",
            DesignItem::Parameter(_) => "Parameter",
            DesignItem::Assertion(_) => "Assertion",
            DesignItem::VendorExtensions(_) => "VendorExtensions",
        }
    }
}

impl From<ComponentInstance> for DesignItem {
    fn from(item: ComponentInstance) -> Self {
        DesignItem::ComponentInstance(item)
    }
}

impl From<Interconnection> for DesignItem {
    fn from(item: Interconnection) -> Self {
        DesignItem::Interconnection(item)
    }
}

impl From<AdHocConnection> for DesignItem {
    fn from(item: AdHocConnection) -> Self {
        DesignItem::AdHocConnection(item)
    }
}

impl From<Parameter> for DesignItem {
    fn from(item: Parameter) -> Self {
        DesignItem::Parameter(item)
    }
}

impl From<Assertion> for DesignItem {
    fn from(item: Assertion) -> Self {
        DesignItem::Assertion(item)
    }
}

impl From<VendorExtensions> for DesignItem {
    fn from(item: VendorExtensions) -> Self {
        DesignItem::VendorExtensions(item)
    }
}

/// An IP-XACT `design` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Design {
    header: DocumentHeader,
    component_instances: Vec<ComponentInstance>,
    interconnections: Vec<Interconnection>,
    ad_hoc_connections: Vec<AdHocConnection>,
    parameters: Vec<Parameter>,
    assertions: Vec<Assertion>,
    vendor_extensions: Option<VendorExtensions>,
}

impl Design {
    pub fn new(vlnv: Vlnv, description: impl Into<String>) -> Self {
        Self::from_header(DocumentHeader::new(vlnv, description))
    }

    pub fn add_item(&mut self, item: impl Into<DesignItem>) -> Result<()> {
        match item.into() {
            DesignItem::ComponentInstance(item) => self.component_instances.push(item),
            DesignItem::Interconnection(item) => self.interconnections.push(item),
            DesignItem::AdHocConnection(item) => self.ad_hoc_connections.push(item),
            DesignItem::Parameter(item) => self.parameters.push(item),
            DesignItem::Assertion(item) => self.assertions.push(item),
            item @ DesignItem::VendorExtensions(_) => {
                return Err(IpxactError::UnsupportedItemType {
                    item: item.kind_name(),
                    container: "Design",
                });
            }
        }
        Ok(())
    }

    pub fn set_item(&mut self, item: impl Into<DesignItem>) -> Result<()> {
        match item.into() {
            DesignItem::VendorExtensions(item) => {
                self.vendor_extensions = Some(item);
                Ok(())
            }
            other => Err(IpxactError::UnsupportedItemType {
                item: other.kind_name(),
                container: "Design",
            }),
        }
    }

    pub fn component_instances(&self) -> &[ComponentInstance] {
        &self.component_instances
    }

    pub fn interconnections(&self) -> &[Interconnection] {
        &self.interconnections
    }

    pub fn ad_hoc_connections(&self) -> &[AdHocConnection] {
        &self.ad_hoc_connections
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

    fn parse_interconnections(&mut self, node: Node<'_, '_>, ctx: &ParseContext) -> Result<()> {
        if ctx.discards(node) {
            return Ok(());
        }
        // monitorInterconnection shares the wrapper; keep both kinds in document order
        for child in element_children(node) {
            let interconnection =
                Interconnection::from_xml(child).map_err(|_| IpxactError::UnsupportedChildTag {
                    tag: local_name(child).to_string(),
                    parent: "interconnections".to_string(),
                })?;
            self.interconnections.push(interconnection);
        }
        Ok(())
    }
}

impl RootDocument for Design {
    const ROOT_TAG: &'static str = "design";

    fn from_header(header: DocumentHeader) -> Self {
        Self {
            header,
            component_instances: Vec::new(),
            interconnections: Vec::new(),
            ad_hoc_connections: Vec::new(),
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
            "componentInstances" => parse_opaque_group(node, ctx, &mut self.component_instances),
            "interconnections" => self.parse_interconnections(node, ctx),
            "adHocConnections" => parse_opaque_group(node, ctx, &mut self.ad_hoc_connections),
            "parameters" => parse_opaque_group(node, ctx, &mut self.parameters),
            "assertions" => parse_opaque_group(node, ctx, &mut self.assertions),
            "vendorExtensions" => {
                self.vendor_extensions = parse_opaque(node, ctx)?;
                Ok(())
            }
            other => Err(IpxactError::UnsupportedTag {
                tag: other.to_string(),
                context: format!("design in {}", ctx.document),
            }),
        }
    }

    fn write_children(&self, w: &mut XmlWriter<'_>) {
        write_group(w, "componentInstances", &self.component_instances);
        write_group(w, "interconnections", &self.interconnections);
        write_group(w, "adHocConnections", &self.ad_hoc_connections);
        self.header.write_spirit_description(w);
        write_group(w, "parameters", &self.parameters);
        write_group(w, "assertions", &self.assertions);
        write_optional(w, self.vendor_extensions.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnimplementedContent;
    use crate::element::Element;
    use crate::schema::{SchemaRegistry, SchemaVersion};
    use crate::xml::parse;

    fn design() -> Design {
        Design::new(Vlnv::new("VHDL", "PoC", "top", "1.0").unwrap(), "Top level")
    }

    #[test]
    fn test_add_and_set_items() {
        let mut design = design();
        design.add_item(ComponentInstance::new()).unwrap();
        design.add_item(AdHocConnection::new()).unwrap();
        design.set_item(VendorExtensions::new()).unwrap();

        assert_eq!(design.component_instances().len(), 1);
        assert_eq!(design.ad_hoc_connections().len(), 1);
        assert!(design.vendor_extensions().is_some());

        assert!(matches!(
            design.add_item(VendorExtensions::new()),
            Err(IpxactError::UnsupportedItemType { item: "VendorExtensions", container: "Design" })
        ));
        assert!(matches!(
            design.set_item(Parameter::new()),
            Err(IpxactError::UnsupportedItemType { item: "Parameter", .. })
        ));
    }

    #[test]
    fn test_monitor_interconnections_are_kept() {
        let xml = r#"<interconnections>
            <interconnection><name>a</name></interconnection>
            <monitorInterconnection><name>m</name></monitorInterconnection>
        </interconnections>"#;
        let doc = parse("d.xml", xml).unwrap();
        let ctx = ParseContext::new("d.xml", UnimplementedContent::Preserve);

        let mut design = design();
        design.parse_child(doc.root_element(), &ctx).unwrap();

        let names: Vec<&str> = design
            .interconnections()
            .iter()
            .map(|item| item.content().name())
            .collect();
        assert_eq!(names, ["interconnection", "monitorInterconnection"]);
    }

    #[test]
    fn test_monitor_interconnection_added_in_memory() {
        let mut design = design();
        design.add_item(Interconnection::new()).unwrap();
        design.add_item(Interconnection::monitor()).unwrap();

        let built = OpaqueElement::new("monitorInterconnection")
            .with_child(OpaqueElement::new("name").with_text("tap"));
        design
            .add_item(Interconnection::from_content(built).unwrap())
            .unwrap();

        let monitors: Vec<bool> = design
            .interconnections()
            .iter()
            .map(Interconnection::is_monitor)
            .collect();
        assert_eq!(monitors, [false, true, true]);
        assert!(matches!(
            Interconnection::from_content(OpaqueElement::new("adHocConnection")),
            Err(IpxactError::UnexpectedTag { expected: "interconnection", .. })
        ));

        let xml = design.to_xml(SchemaRegistry::by_version(SchemaVersion::Ieee2014));
        assert!(xml.contains("<ipxact:monitorInterconnection>"));
    }

    #[test]
    fn test_unknown_child_is_rejected() {
        let doc = parse("d.xml", "<fileSets/>").unwrap();
        let ctx = ParseContext::new("d.xml", UnimplementedContent::Preserve);

        match design().parse_child(doc.root_element(), &ctx) {
            Err(IpxactError::UnsupportedTag { tag, context }) => {
                assert_eq!(tag, "fileSets");
                assert!(context.contains("d.xml"));
            }
            other => panic!("Expected UnsupportedTag, got {:?}", other),
        }
    }

    #[test]
    fn test_instances_serialize_in_schema_order() {
        let mut design = design();
        design
            .add_item(
                AdHocConnection::from_content(
                    OpaqueElement::new("adHocConnection")
                        .with_child(OpaqueElement::new("name").with_text("irq")),
                )
                .unwrap(),
            )
            .unwrap();
        design
            .add_item(
                ComponentInstance::from_content(
                    OpaqueElement::new("componentInstance")
                        .with_child(OpaqueElement::new("instanceName").with_text("u0")),
                )
                .unwrap(),
            )
            .unwrap();

        let xml = design.to_xml(SchemaRegistry::by_version(SchemaVersion::Ieee2014));
        let instances = xml.find("<ipxact:componentInstances>").unwrap();
        let ad_hoc = xml.find("<ipxact:adHocConnections>").unwrap();
        assert!(instances < ad_hoc);
        assert!(xml.contains("<ipxact:instanceName>u0</ipxact:instanceName>"));
        assert!(!xml.contains("interconnections"));

        let item = &design.component_instances()[0];
        assert_eq!(item.content().name(), ComponentInstance::TAG);
    }
}
