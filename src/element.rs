//! Contracts shared by every IP-XACT element type.

use std::path::{Path, PathBuf};

use roxmltree::Node;

use crate::config::UnimplementedContent;
use crate::document::DocumentLoader;
use crate::error::{IpxactError, Result};
use crate::schema::{SchemaDescriptor, SchemaVersion};
use crate::vlnv::Vlnv;
use crate::xml::{OpaqueAttribute, XmlWriter, element_children, local_name, root_attributes};

/// An element that can be read from and written to IP-XACT XML.
pub trait Element: Sized {
    /// Local tag name
    const TAG: &'static str;

    /// Build the element from a node whose local name is [`Element::TAG`].
    fn from_xml(node: Node<'_, '_>) -> Result<Self>;

    /// Write the element at the writer's current depth.
    fn write_xml(&self, w: &mut XmlWriter<'_>);

    fn to_xml(&self, indent: usize, schema: &SchemaDescriptor) -> String {
        let mut w = XmlWriter::new(schema, indent);
        self.write_xml(&mut w);
        w.into_string()
    }
}

/// Identity and description shared by all root documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub vlnv: Vlnv,
    pub display_name: Option<String>,
    /// `shortDescription`, written for IEEE 1685-2022 and later
    pub short_description: Option<String>,
    pub description: String,
    /// Attributes of the root element other than namespace declarations and
    /// `xsi:schemaLocation`
    pub attributes: Vec<OpaqueAttribute>,
    /// File the document was loaded from; `None` for in-memory documents
    pub source_file: Option<PathBuf>,
}

impl DocumentHeader {
    pub fn new(vlnv: Vlnv, description: impl Into<String>) -> Self {
        Self {
            vlnv,
            display_name: None,
            short_description: None,
            description: description.into(),
            attributes: Vec::new(),
            source_file: None,
        }
    }

    /// The identity, followed by the descriptive elements for releases that
    /// keep them in the leading header.
    pub fn write_xml(&self, w: &mut XmlWriter<'_>) {
        self.vlnv.write_expanded(w);
        let version = w.schema().version;
        if version.is_spirit() {
            return;
        }
        if let Some(display_name) = &self.display_name {
            w.leaf("displayName", display_name);
        }
        if version >= SchemaVersion::Ieee2022 {
            if let Some(short_description) = &self.short_description {
                w.leaf("shortDescription", short_description);
            }
        }
        self.write_description(w);
    }

    /// `description` at its SPIRIT position, after the content groups. Later
    /// releases already wrote it with the identity.
    pub fn write_spirit_description(&self, w: &mut XmlWriter<'_>) {
        if w.schema().version.is_spirit() {
            self.write_description(w);
        }
    }

    fn write_description(&self, w: &mut XmlWriter<'_>) {
        if !self.description.is_empty() {
            w.leaf("description", &self.description);
        }
    }
}

/// Settings threaded through the extraction of one document.
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub policy: UnimplementedContent,
    /// Document name used in diagnostics
    pub document: String,
}

impl ParseContext {
    pub fn new(document: impl Into<String>, policy: UnimplementedContent) -> Self {
        Self {
            policy,
            document: document.into(),
        }
    }

    /// True when `node` should be skipped under the discard policy.
    pub fn discards(&self, node: Node<'_, '_>) -> bool {
        if self.policy == UnimplementedContent::Discard {
            tracing::warn!(
                document = %self.document,
                group = local_name(node),
                "discarding unimplemented content"
            );
            return true;
        }
        false
    }
}

/// A top-level IP-XACT document: catalog, component, design, ...
pub trait RootDocument: Sized {
    const ROOT_TAG: &'static str;

    fn from_header(header: DocumentHeader) -> Self;

    fn header(&self) -> &DocumentHeader;

    fn header_mut(&mut self) -> &mut DocumentHeader;

    /// Consume one top-level child that is not part of the header.
    fn parse_child(&mut self, node: Node<'_, '_>, ctx: &ParseContext) -> Result<()>;

    /// Write every non-header child in schema order, including the SPIRIT
    /// position of `description` through
    /// [`DocumentHeader::write_spirit_description`].
    fn write_children(&self, w: &mut XmlWriter<'_>);

    fn vlnv(&self) -> &Vlnv {
        &self.header().vlnv
    }

    fn description(&self) -> &str {
        &self.header().description
    }

    fn display_name(&self) -> Option<&str> {
        self.header().display_name.as_deref()
    }

    fn source_file(&self) -> Option<&Path> {
        self.header().source_file.as_deref()
    }

    /// Complete document text, starting with the XML declaration.
    fn to_xml(&self, schema: &SchemaDescriptor) -> String {
        let attributes = root_attributes(schema, &self.header().attributes);
        let attributes: Vec<(&str, &str)> = attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();

        let mut w = XmlWriter::new(schema, 0);
        w.declaration();
        w.start_multiline(Self::ROOT_TAG, &attributes);
        self.header().write_xml(&mut w);
        self.write_children(&mut w);
        w.end(Self::ROOT_TAG);
        w.into_string()
    }

    /// Load through the shared loader, configured from the standard locations.
    fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        DocumentLoader::shared()?.load(path)
    }

    fn save(&self, path: impl AsRef<Path>, schema: &SchemaDescriptor) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_xml(schema)).map_err(|source| IpxactError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fail with `UnexpectedTag` unless `node` has the local name `expected`.
pub fn expect_tag(node: Node<'_, '_>, expected: &'static str) -> Result<()> {
    let found = local_name(node);
    if found != expected {
        return Err(IpxactError::UnexpectedTag {
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Parse every child of the wrapper `node` as a `T`.
pub fn parse_group<T: Element>(node: Node<'_, '_>, items: &mut Vec<T>) -> Result<()> {
    for child in element_children(node) {
        let tag = local_name(child);
        if tag != T::TAG {
            return Err(IpxactError::UnsupportedChildTag {
                tag: tag.to_string(),
                parent: local_name(node).to_string(),
            });
        }
        items.push(T::from_xml(child)?);
    }
    Ok(())
}

/// [`parse_group`] for opaque item types, honouring the unimplemented-content policy.
pub fn parse_opaque_group<T: Element>(
    node: Node<'_, '_>,
    ctx: &ParseContext,
    items: &mut Vec<T>,
) -> Result<()> {
    if ctx.discards(node) {
        return Ok(());
    }
    parse_group(node, items)
}

/// A single opaque element, honouring the unimplemented-content policy.
pub fn parse_opaque<T: Element>(node: Node<'_, '_>, ctx: &ParseContext) -> Result<Option<T>> {
    if ctx.discards(node) {
        return Ok(None);
    }
    T::from_xml(node).map(Some)
}

/// Write `items` inside a `wrapper` tag; nothing is written when there are none.
pub fn write_group<'a, T: Element + 'a>(
    w: &mut XmlWriter<'_>,
    wrapper: &str,
    items: impl IntoIterator<Item = &'a T>,
) {
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return;
    }
    w.start(wrapper, &[]);
    for item in items {
        item.write_xml(w);
    }
    w.end(wrapper);
}

pub fn write_optional<T: Element>(w: &mut XmlWriter<'_>, item: Option<&T>) {
    if let Some(item) = item {
        item.write_xml(w);
    }
}

/// Declare a newtype over [`OpaqueElement`](crate::xml::OpaqueElement) for an
/// element the object model stores verbatim.
macro_rules! opaque_element {
    ($(#[$meta:meta])* $name:ident, $tag:literal $(, $alias:literal)* $(,)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name($crate::xml::OpaqueElement);

        impl $name {
            /// An empty element
            pub fn new() -> Self {
                Self($crate::xml::OpaqueElement::new($tag))
            }

            /// Wrap captured or hand-built content; its name must be one of the
            /// element's tags.
            pub fn from_content(content: $crate::xml::OpaqueElement) -> $crate::error::Result<Self> {
                Self::check_tag(content.name())?;
                Ok(Self(content))
            }

            fn check_tag(found: &str) -> $crate::error::Result<()> {
                if found != $tag $(&& found != $alias)* {
                    return Err($crate::error::IpxactError::UnexpectedTag {
                        expected: $tag,
                        found: found.to_string(),
                    });
                }
                Ok(())
            }

            pub fn content(&self) -> &$crate::xml::OpaqueElement {
                &self.0
            }

            pub fn into_content(self) -> $crate::xml::OpaqueElement {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::element::Element for $name {
            const TAG: &'static str = $tag;

            fn from_xml(node: roxmltree::Node<'_, '_>) -> $crate::error::Result<Self> {
                Self::check_tag($crate::xml::local_name(node))?;
                Ok(Self($crate::xml::OpaqueElement::capture(node)))
            }

            fn write_xml(&self, w: &mut $crate::xml::XmlWriter<'_>) {
                self.0.write_xml(w);
            }
        }
    };
}

pub(crate) use opaque_element;

opaque_element!(
    /// `vendorExtensions`: free-form content in foreign namespaces
    VendorExtensions,
    "vendorExtensions"
);

opaque_element!(Parameter, "parameter");
opaque_element!(Assertion, "assertion");
opaque_element!(Choice, "choice");
