//! The `designConfiguration` root document.

use roxmltree::Node;

use crate::element::{
    Assertion, DocumentHeader, Element, ParseContext, Parameter, RootDocument, VendorExtensions,
    opaque_element, parse_opaque, parse_opaque_group, write_group, write_optional,
};
use crate::error::{IpxactError, Result};
use crate::vlnv::Vlnv;
use crate::xml::{XmlWriter, local_name};

opaque_element!(GeneratorChainConfiguration, "generatorChainConfiguration");
opaque_element!(InterconnectionConfiguration, "interconnectionConfiguration");
opaque_element!(ViewConfiguration, "viewConfiguration");

/// Everything that can be added to a [`DesignConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignConfigurationItem {
    DesignRef(Vlnv),
    GeneratorChainConfiguration(GeneratorChainConfiguration),
    InterconnectionConfiguration(InterconnectionConfiguration),
    ViewConfiguration(ViewConfiguration),
    Parameter(Parameter),
    Assertion(Assertion),
    VendorExtensions(VendorExtensions),
}

impl DesignConfigurationItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DesignConfigurationItem::DesignRef(_) => "DesignRef",
            DesignConfigurationItem::GeneratorChainConfiguration(_) => {
                "GeneratorChainConfiguration"
            }
            DesignConfigurationItem::InterconnectionConfiguration(_) => {
                "InterconnectionConfiguration"
            }
            DesignConfigurationItem::ViewConfiguration(_) => "ViewConfiguration",
            DesignConfigurationItem::Parameter(_) => "Parameter",
            DesignConfigurationItem::Assertion(_) => "Assertion",
            DesignConfigurationItem::VendorExtensions(_) => "VendorExtensions",
        }
    }
}

impl From<GeneratorChainConfiguration> for DesignConfigurationItem {
    fn from(item: GeneratorChainConfiguration) -> Self {
        DesignConfigurationItem::GeneratorChainConfiguration(item)
    }
}

impl From<InterconnectionConfiguration> for DesignConfigurationItem {
    fn from(item: InterconnectionConfiguration) -> Self {
        DesignConfigurationItem::InterconnectionConfiguration(item)
    }
}

impl From<ViewConfiguration> for DesignConfigurationItem {
    fn from(item: ViewConfiguration) -> Self {
        DesignConfigurationItem::ViewConfiguration(item)
    }
}

impl From<Parameter> for DesignConfigurationItem {
    fn from(item: Parameter) -> Self {
        DesignConfigurationItem::Parameter(item)
    }
}

impl From<Assertion> for DesignConfigurationItem {
    fn from(item: Assertion) -> Self {
        DesignConfigurationItem::Assertion(item)
    }
}

impl From<VendorExtensions> for DesignConfigurationItem {
    fn from(item: VendorExtensions) -> Self {
        DesignConfigurationItem::VendorExtensions(item)
    }
}

/// An IP-XACT `designConfiguration` document. The configuration items sit
/// directly under the root element, without wrapper tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignConfiguration {
    header: DocumentHeader,
    design_ref: Option<Vlnv>,
    generator_chain_configurations: Vec<GeneratorChainConfiguration>,
    interconnection_configurations: Vec<InterconnectionConfiguration>,
    view_configurations: Vec<ViewConfiguration>,
    parameters: Vec<Parameter>,
    assertions: Vec<Assertion>,
    vendor_extensions: Option<VendorExtensions>,
}

impl DesignConfiguration {
    pub fn new(vlnv: Vlnv, description: impl Into<String>) -> Self {
        Self::from_header(DocumentHeader::new(vlnv, description))
    }

    pub fn add_item(&mut self, item: impl Into<DesignConfigurationItem>) -> Result<()> {
        match item.into() {
            DesignConfigurationItem::GeneratorChainConfiguration(item) => {
                self.generator_chain_configurations.push(item)
            }
            DesignConfigurationItem::InterconnectionConfiguration(item) => {
                self.interconnection_configurations.push(item)
            }
            DesignConfigurationItem::ViewConfiguration(item) => self.view_configurations.push(item),
            DesignConfigurationItem::Parameter(item) => self.parameters.push(item),
            DesignConfigurationItem::Assertion(item) => self.assertions.push(item),
            item @ (DesignConfigurationItem::DesignRef(_)
            | DesignConfigurationItem::VendorExtensions(_)) => {
                return Err(IpxactError::UnsupportedItemType {
                    item: item.kind_name(),
                    container: "DesignConfiguration",
                });
            }
        }
        Ok(())
    }

    pub fn set_item(&mut self, item: impl Into<DesignConfigurationItem>) -> Result<()> {
        match item.into() {
            DesignConfigurationItem::DesignRef(vlnv) => self.design_ref = Some(vlnv),
            DesignConfigurationItem::VendorExtensions(item) => self.vendor_extensions = Some(item),
            other => {
                return Err(IpxactError::UnsupportedItemType {
                    item: other.kind_name(),
                    container: "DesignConfiguration",
                });
            }
        }
        Ok(())
    }

    /// Reference the design this configuration applies to.
    pub fn set_design_ref(&mut self, design: Vlnv) {
        self.design_ref = Some(design);
    }

    pub fn design_ref(&self) -> Option<&Vlnv> {
        self.design_ref.as_ref()
    }

    pub fn generator_chain_configurations(&self) -> &[GeneratorChainConfiguration] {
        &self.generator_chain_configurations
    }

    pub fn interconnection_configurations(&self) -> &[InterconnectionConfiguration] {
        &self.interconnection_configurations
    }

    pub fn view_configurations(&self) -> &[ViewConfiguration] {
        &self.view_configurations
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

    fn push_opaque<T: Element>(
        node: Node<'_, '_>,
        ctx: &ParseContext,
        items: &mut Vec<T>,
    ) -> Result<()> {
        if let Some(item) = parse_opaque(node, ctx)? {
            items.push(item);
        }
        Ok(())
    }
}

impl RootDocument for DesignConfiguration {
    const ROOT_TAG: &'static str = "designConfiguration";

    fn from_header(header: DocumentHeader) -> Self {
        Self {
            header,
            design_ref: None,
            generator_chain_configurations: Vec::new(),
            interconnection_configurations: Vec::new(),
            view_configurations: Vec::new(),
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
            "designRef" => {
                self.design_ref = Some(Vlnv::from_attributes(node)?);
                Ok(())
            }
            "generatorChainConfiguration" => {
                Self::push_opaque(node, ctx, &mut self.generator_chain_configurations)
            }
            "interconnectionConfiguration" => {
                Self::push_opaque(node, ctx, &mut self.interconnection_configurations)
            }
            "viewConfiguration" => Self::push_opaque(node, ctx, &mut self.view_configurations),
            "parameters" => parse_opaque_group(node, ctx, &mut self.parameters),
            "assertions" => parse_opaque_group(node, ctx, &mut self.assertions),
            "vendorExtensions" => {
                self.vendor_extensions = parse_opaque(node, ctx)?;
                Ok(())
            }
            other => Err(IpxactError::UnsupportedTag {
                tag: other.to_string(),
                context: format!("designConfiguration in {}", ctx.document),
            }),
        }
    }

    fn write_children(&self, w: &mut XmlWriter<'_>) {
        if let Some(design_ref) = &self.design_ref {
            design_ref.write_reference(w, "designRef");
        }
        for item in &self.generator_chain_configurations {
            item.write_xml(w);
        }
        for item in &self.interconnection_configurations {
            item.write_xml(w);
        }
        for item in &self.view_configurations {
            item.write_xml(w);
        }
        self.header.write_spirit_description(w);
        write_group(w, "parameters", &self.parameters);
        write_group(w, "assertions", &self.assertions);
        write_optional(w, self.vendor_extensions.as_ref());
    }
}
