//! The `generatorChain` root document.

use roxmltree::Node;

use crate::element::{
    Assertion, Choice, DocumentHeader, Element, ParseContext, Parameter, RootDocument,
    VendorExtensions, opaque_element, parse_opaque, parse_opaque_group, write_group,
    write_optional,
};
use crate::error::{IpxactError, Result};
use crate::vlnv::Vlnv;
use crate::xml::{XmlWriter, local_name, required_text};

opaque_element!(GeneratorChainSelector, "generatorChainSelector");
opaque_element!(ComponentGeneratorSelector, "componentGeneratorSelector");
opaque_element!(Generator, "generator");

/// One step of a chain; steps keep their document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainStep {
    GeneratorChainSelector(GeneratorChainSelector),
    ComponentGeneratorSelector(ComponentGeneratorSelector),
    Generator(Generator),
}

impl ChainStep {
    fn write_xml(&self, w: &mut XmlWriter<'_>) {
        match self {
            ChainStep::GeneratorChainSelector(step) => step.write_xml(w),
            ChainStep::ComponentGeneratorSelector(step) => step.write_xml(w),
            ChainStep::Generator(step) => step.write_xml(w),
        }
    }
}

/// Everything that can be added to a [`GeneratorChain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorChainItem {
    Step(ChainStep),
    ChainGroup(String),
    Choice(Choice),
    Parameter(Parameter),
    Assertion(Assertion),
    VendorExtensions(VendorExtensions),
}

impl GeneratorChainItem {
    pub fn kind_name(&self) -> &'static str {
        match self {
            GeneratorChainItem::Step(ChainStep::GeneratorChainSelector(_)) => {
                "GeneratorChainSelector"
            }
            GeneratorChainItem::Step(ChainStep::ComponentGeneratorSelector(_)) => {
                "ComponentGeneratorSelector"
            }
            GeneratorChainItem::Step(ChainStep::Generator(_)) => "Generator",
            GeneratorChainItem::ChainGroup(_) => "ChainGroup",
            GeneratorChainItem::Choice(_) => "Choice",
            GeneratorChainItem::Parameter(_) => "Parameter",
            GeneratorChainItem::Assertion(_) => "Assertion",
            GeneratorChainItem::VendorExtensions(_) => "VendorExtensions",
        }
    }
}

impl From<GeneratorChainSelector> for GeneratorChainItem {
    fn from(item: GeneratorChainSelector) -> Self {
        GeneratorChainItem::Step(ChainStep::GeneratorChainSelector(item))
    }
}

impl From<ComponentGeneratorSelector> for GeneratorChainItem {
    fn from(item: ComponentGeneratorSelector) -> Self {
        GeneratorChainItem::Step(ChainStep::ComponentGeneratorSelector(item))
    }
}

impl From<Generator> for GeneratorChainItem {
    fn from(item: Generator) -> Self {
        GeneratorChainItem::Step(ChainStep::Generator(item))
    }
}

impl From<Choice> for GeneratorChainItem {
    fn from(item: Choice) -> Self {
        GeneratorChainItem::Choice(item)
    }
}

impl From<Parameter> for GeneratorChainItem {
    fn from(item: Parameter) -> Self {
        GeneratorChainItem::Parameter(item)
    }
}

impl From<Assertion> for GeneratorChainItem {
    fn from(item: Assertion) -> Self {
        GeneratorChainItem::Assertion(item)
    }
}

impl From<VendorExtensions> for GeneratorChainItem {
    fn from(item: VendorExtensions) -> Self {
        GeneratorChainItem::VendorExtensions(item)
    }
}

/// An IP-XACT `generatorChain` document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorChain {
    header: DocumentHeader,
    steps: Vec<ChainStep>,
    chain_groups: Vec<String>,
    choices: Vec<Choice>,
    parameters: Vec<Parameter>,
    assertions: Vec<Assertion>,
    vendor_extensions: Option<VendorExtensions>,
}

impl GeneratorChain {
    pub fn new(vlnv: Vlnv, description: impl Into<String>) -> Self {
        Self::from_header(DocumentHeader::new(vlnv, description))
    }

    pub fn add_item(&mut self, item: impl Into<GeneratorChainItem>) -> Result<()> {
        match item.into() {
            GeneratorChainItem::Step(step) => self.steps.push(step),
            GeneratorChainItem::ChainGroup(group) => self.chain_groups.push(group),
            GeneratorChainItem::Choice(item) => self.choices.push(item),
            GeneratorChainItem::Parameter(item) => self.parameters.push(item),
            GeneratorChainItem::Assertion(item) => self.assertions.push(item),
            item @ GeneratorChainItem::VendorExtensions(_) => {
                return Err(IpxactError::UnsupportedItemType {
                    item: item.kind_name(),
                    container: "GeneratorChain",
                });
            }
        }
        Ok(())
    }

    pub fn set_item(&mut self, item: impl Into<GeneratorChainItem>) -> Result<()> {
        match item.into() {
            GeneratorChainItem::VendorExtensions(item) => {
                self.vendor_extensions = Some(item);
                Ok(())
            }
            other => Err(IpxactError::UnsupportedItemType {
                item: other.kind_name(),
                container: "GeneratorChain",
            }),
        }
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn chain_groups(&self) -> &[String] {
        &self.chain_groups
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

    fn push_step<T: Element>(
        &mut self,
        node: Node<'_, '_>,
        ctx: &ParseContext,
        step: fn(T) -> ChainStep,
    ) -> Result<()> {
        if let Some(item) = parse_opaque(node, ctx)? {
            self.steps.push(step(item));
        }
        Ok(())
    }
}

impl RootDocument for GeneratorChain {
    const ROOT_TAG: &'static str = "generatorChain";

    fn from_header(header: DocumentHeader) -> Self {
        Self {
            header,
            steps: Vec::new(),
            chain_groups: Vec::new(),
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
            "generatorChainSelector" => {
                self.push_step(node, ctx, ChainStep::GeneratorChainSelector)
            }
            "componentGeneratorSelector" => {
                self.push_step(node, ctx, ChainStep::ComponentGeneratorSelector)
            }
            "generator" => self.push_step(node, ctx, ChainStep::Generator),
            "chainGroup" => {
                self.chain_groups.push(required_text(node, "chainGroup")?);
                Ok(())
            }
            "choices" => parse_opaque_group(node, ctx, &mut self.choices),
            "parameters" => parse_opaque_group(node, ctx, &mut self.parameters),
            "assertions" => parse_opaque_group(node, ctx, &mut self.assertions),
            "vendorExtensions" => {
                self.vendor_extensions = parse_opaque(node, ctx)?;
                Ok(())
            }
            other => Err(IpxactError::UnsupportedTag {
                tag: other.to_string(),
                context: format!("generatorChain in {}", ctx.document),
            }),
        }
    }

    fn write_children(&self, w: &mut XmlWriter<'_>) {
        for step in &self.steps {
            step.write_xml(w);
        }
        for group in &self.chain_groups {
            w.leaf("chainGroup", group);
        }
        if w.schema().version.is_spirit() {
            if let Some(display_name) = &self.header.display_name {
                w.leaf("displayName", display_name);
            }
        }
        self.header.write_spirit_description(w);
        write_group(w, "choices", &self.choices);
        write_group(w, "parameters", &self.parameters);
        write_group(w, "assertions", &self.assertions);
        write_optional(w, self.vendor_extensions.as_ref());
    }
}
