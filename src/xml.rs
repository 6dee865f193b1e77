//! The narrow XML contract of the object model.
//!
//! Reading goes through `roxmltree`: a document is decoded once, parsed into
//! a read-only tree, and walked by the element types. Writing goes through
//! [`XmlWriter`], a tab-indented, prefix-aware layer over `quick_xml::Writer`.
//! Subtrees the object model does not interpret are kept as [`OpaqueElement`]
//! values.

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use roxmltree::{Document, Node, ParsingOptions};

use crate::error::{IpxactError, Result};
use crate::schema::{SchemaDescriptor, XSI_NAMESPACE};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode document bytes as UTF-8, tolerating a byte order mark.
pub fn decode<'b>(document: &str, bytes: &'b [u8]) -> Result<&'b str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    std::str::from_utf8(bytes).map_err(|error| IpxactError::MalformedXml {
        document: document.to_string(),
        source: Box::new(error),
    })
}

/// Parse decoded text into a tree.
pub fn parse<'i>(document: &str, text: &'i str) -> Result<Document<'i>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    Document::parse_with_options(text, options).map_err(|error| IpxactError::MalformedXml {
        document: document.to_string(),
        source: Box::new(error),
    })
}

pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Element children in document order. Comments, processing instructions and
/// text between elements are skipped.
pub fn element_children<'a, 'i>(node: Node<'a, 'i>) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(|child| child.is_element())
}

/// Concatenated, trimmed text content of an element's direct text children.
pub fn text_of(node: Node<'_, '_>) -> String {
    let text: String = node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect();
    text.trim().to_string()
}

/// Text content that must not be empty.
pub fn required_text(node: Node<'_, '_>, element: &'static str) -> Result<String> {
    let text = text_of(node);
    if text.is_empty() {
        return Err(IpxactError::InvalidField {
            field: "text",
            element,
        });
    }
    Ok(text)
}

/// `xs:boolean` content.
pub fn bool_of(node: Node<'_, '_>, element: &'static str) -> Result<bool> {
    match text_of(node).as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(IpxactError::InvalidValue {
            element,
            value: other.to_string(),
        }),
    }
}

/// An attribute matched by local name, whatever its namespace.
pub fn attribute_by_local_name<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attribute| attribute.name() == name)
        .map(|attribute| attribute.value())
}

pub fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Tab-indented XML writer bound to one schema descriptor.
///
/// Events go through a `quick_xml::Writer`; methods taking a local name
/// qualify it with the descriptor's namespace prefix, the `_raw` variants
/// write the given name unchanged. A writer created at a non-zero depth
/// produces a fragment whose element lines are shifted by that many tabs.
pub struct XmlWriter<'s> {
    writer: Writer<Vec<u8>>,
    base: usize,
    depth: usize,
    schema: &'s SchemaDescriptor,
}

impl<'s> XmlWriter<'s> {
    pub fn new(schema: &'s SchemaDescriptor, depth: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b'\t', 1),
            base: depth,
            depth,
            schema,
        }
    }

    pub fn schema(&self) -> &'s SchemaDescriptor {
        self.schema
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn qualified(&self, local_name: &str) -> String {
        self.schema.qualify(local_name)
    }

    pub fn declaration(&mut self) {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)));
    }

    pub fn start(&mut self, local_name: &str, attributes: &[(&str, &str)]) {
        let name = self.qualified(local_name);
        self.start_raw(&name, attributes);
    }

    pub fn start_raw(&mut self, name: &str, attributes: &[(&str, &str)]) {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.emit(Event::Start(start));
        self.depth += 1;
    }

    /// Start tag with every attribute on its own line, as used for root elements.
    pub fn start_multiline(&mut self, local_name: &str, attributes: &[(&str, &str)]) {
        let name = self.qualified(local_name);
        let pad = "\t".repeat(self.depth + 1);
        let mut content = name.clone();
        for (key, value) in attributes {
            content.push('\n');
            content.push_str(&pad);
            content.push_str(key);
            content.push_str("=\"");
            content.push_str(&escape(*value));
            content.push('"');
        }
        self.emit(Event::Start(BytesStart::from_content(content, name.len())));
        self.depth += 1;
    }

    pub fn end(&mut self, local_name: &str) {
        let name = self.qualified(local_name);
        self.end_raw(&name);
    }

    pub fn end_raw(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.emit(Event::End(BytesEnd::new(name)));
    }

    /// `<p:name>text</p:name>` on one line.
    pub fn leaf(&mut self, local_name: &str, text: &str) {
        let name = self.qualified(local_name);
        self.leaf_raw(&name, &[], text);
    }

    pub fn leaf_with(&mut self, local_name: &str, attributes: &[(&str, &str)], text: &str) {
        let name = self.qualified(local_name);
        self.leaf_raw(&name, attributes, text);
    }

    pub fn leaf_raw(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.emit(Event::Start(start));
        self.emit(Event::Text(BytesText::new(text)));
        self.emit(Event::End(BytesEnd::new(name)));
    }

    pub fn empty(&mut self, local_name: &str, attributes: &[(&str, &str)]) {
        let name = self.qualified(local_name);
        self.empty_raw(&name, attributes);
    }

    pub fn empty_raw(&mut self, name: &str, attributes: &[(&str, &str)]) {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.emit(Event::Empty(start));
    }

    /// A text node inside mixed content.
    pub fn text(&mut self, text: &str) {
        self.emit(Event::Text(BytesText::new(text)));
    }

    pub fn into_string(self) -> String {
        let bytes = self.writer.into_inner();
        if bytes.is_empty() {
            return String::new();
        }
        let text = String::from_utf8_lossy(&bytes);
        let mut out = if self.base == 0 {
            text.into_owned()
        } else {
            shift_element_lines(&text, self.base)
        };
        out.push('\n');
        out
    }

    fn emit(&mut self, event: Event<'_>) {
        if let Err(error) = self.writer.write_event(event) {
            tracing::error!(%error, "failed to write XML event");
        }
    }
}

/// Prefix `depth` tabs to every line that opens with a tag. Escaped text
/// never contains `<`, so continuation lines of multi-line text are kept.
fn shift_element_lines(text: &str, depth: usize) -> String {
    let pad = "\t".repeat(depth);
    text.split('\n')
        .map(|line| {
            if line.trim_start_matches('\t').starts_with('<') {
                format!("{}{}", pad, line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Namespace of an opaque element or attribute name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNamespace {
    /// The IP-XACT namespace of the enclosing document, re-prefixed on output
    Ipxact,
    /// Any other namespace, with the prefix it was declared under
    Foreign { uri: String, prefix: String },
    /// No namespace
    Unqualified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueAttribute {
    pub namespace: XmlNamespace,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpaqueNode {
    Element(OpaqueElement),
    Text(String),
}

/// A captured XML subtree the object model stores without interpreting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueElement {
    namespace: XmlNamespace,
    name: String,
    attributes: Vec<OpaqueAttribute>,
    children: Vec<OpaqueNode>,
}

impl OpaqueElement {
    /// An empty element in the IP-XACT namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: XmlNamespace::Ipxact,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn foreign(
        uri: impl Into<String>,
        prefix: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: XmlNamespace::Foreign {
                uri: uri.into(),
                prefix: prefix.into(),
            },
            ..Self::new(name)
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(OpaqueAttribute {
            namespace: XmlNamespace::Unqualified,
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_child(mut self, child: OpaqueElement) -> Self {
        self.children.push(OpaqueNode::Element(child));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(OpaqueNode::Text(text.into()));
        self
    }

    /// Capture `node` and its descendants. Names in the namespace of the
    /// document's root element are recorded as IP-XACT names.
    pub fn capture(node: Node<'_, '_>) -> Self {
        let ipxact_uri = node.document().root_element().tag_name().namespace();
        Self::capture_in(node, ipxact_uri)
    }

    fn capture_in(node: Node<'_, '_>, ipxact_uri: Option<&str>) -> Self {
        let namespace = classify(node, node.tag_name().namespace(), ipxact_uri);

        let attributes = capture_attributes(node, ipxact_uri);

        let children = node
            .children()
            .filter_map(|child| {
                if child.is_element() {
                    Some(OpaqueNode::Element(Self::capture_in(child, ipxact_uri)))
                } else if child.is_text() {
                    child
                        .text()
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                        .map(|text| OpaqueNode::Text(text.to_string()))
                } else {
                    None
                }
            })
            .collect();

        Self {
            namespace,
            name: node.tag_name().name().to_string(),
            attributes,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &XmlNamespace {
        &self.namespace
    }

    pub fn attributes(&self) -> &[OpaqueAttribute] {
        &self.attributes
    }

    /// Value of the first attribute with this local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    pub fn children(&self) -> &[OpaqueNode] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &OpaqueElement> {
        self.children.iter().filter_map(|child| match child {
            OpaqueNode::Element(element) => Some(element),
            OpaqueNode::Text(_) => None,
        })
    }

    /// First child element with this local name.
    pub fn child(&self, name: &str) -> Option<&OpaqueElement> {
        self.child_elements().find(|child| child.name == name)
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                OpaqueNode::Text(text) => Some(text.as_str()),
                OpaqueNode::Element(_) => None,
            })
            .collect()
    }

    pub fn write_xml(&self, w: &mut XmlWriter<'_>) {
        self.write_scoped(w, &[]);
    }

    fn write_scoped(&self, w: &mut XmlWriter<'_>, in_scope: &[(String, String)]) {
        let reserved = [w.schema().namespace_prefix, "xsi", "xml"];
        let mut scope = in_scope.to_vec();
        let mut declarations: Vec<(String, String)> = Vec::new();

        let mut bind = |namespace: &XmlNamespace| -> Option<String> {
            let XmlNamespace::Foreign { uri, prefix } = namespace else {
                return None;
            };
            if uri == XML_NAMESPACE {
                return Some("xml".to_string());
            }
            if let Some((bound, _)) = scope.iter().find(|(_, bound_uri)| bound_uri == uri) {
                return Some(bound.clone());
            }
            let prefix = free_prefix(prefix, &reserved, &scope);
            scope.push((prefix.clone(), uri.clone()));
            declarations.push((format!("xmlns:{}", prefix), uri.clone()));
            Some(prefix)
        };

        let name = qualified_name(w, &self.namespace, &self.name, bind(&self.namespace));
        let attribute_names: Vec<String> = self
            .attributes
            .iter()
            .map(|attribute| {
                let prefix = bind(&attribute.namespace);
                qualified_name(w, &attribute.namespace, &attribute.name, prefix)
            })
            .collect();

        let mut attributes: Vec<(&str, &str)> = declarations
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        attributes.extend(
            attribute_names
                .iter()
                .zip(&self.attributes)
                .map(|(key, attribute)| (key.as_str(), attribute.value.as_str())),
        );

        match self.children.as_slice() {
            [] => w.empty_raw(&name, &attributes),
            [OpaqueNode::Text(text)] => w.leaf_raw(&name, &attributes, text),
            children => {
                w.start_raw(&name, &attributes);
                for child in children {
                    match child {
                        OpaqueNode::Element(element) => element.write_scoped(w, &scope),
                        OpaqueNode::Text(text) => w.text(text),
                    }
                }
                w.end_raw(&name);
            }
        }
    }
}

fn capture_attributes(node: Node<'_, '_>, ipxact_uri: Option<&str>) -> Vec<OpaqueAttribute> {
    node.attributes()
        .map(|attribute| OpaqueAttribute {
            namespace: classify(node, attribute.namespace(), ipxact_uri),
            name: attribute.name().to_string(),
            value: attribute.value().to_string(),
        })
        .collect()
}

/// Attributes of a root element, without the `xsi` ones regenerated on output.
pub fn capture_root_attributes(root: Node<'_, '_>) -> Vec<OpaqueAttribute> {
    capture_attributes(root, root.tag_name().namespace())
        .into_iter()
        .filter(|attribute| {
            !matches!(&attribute.namespace, XmlNamespace::Foreign { uri, .. } if uri == XSI_NAMESPACE)
        })
        .collect()
}

fn classify(node: Node<'_, '_>, uri: Option<&str>, ipxact_uri: Option<&str>) -> XmlNamespace {
    match uri {
        None => XmlNamespace::Unqualified,
        Some(uri) if Some(uri) == ipxact_uri => XmlNamespace::Ipxact,
        Some(uri) if uri == XML_NAMESPACE => XmlNamespace::Foreign {
            uri: uri.to_string(),
            prefix: "xml".to_string(),
        },
        Some(uri) => {
            let prefix = node
                .lookup_prefix(uri)
                .filter(|prefix| !prefix.is_empty())
                .unwrap_or("ext");
            XmlNamespace::Foreign {
                uri: uri.to_string(),
                prefix: prefix.to_string(),
            }
        }
    }
}

fn free_prefix(preferred: &str, reserved: &[&str], scope: &[(String, String)]) -> String {
    let taken = |candidate: &str| {
        reserved.contains(&candidate) || scope.iter().any(|(prefix, _)| prefix == candidate)
    };

    if !taken(preferred) {
        return preferred.to_string();
    }
    (1..)
        .map(|n| format!("{}{}", preferred, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| preferred.to_string())
}

fn qualified_name(
    w: &XmlWriter<'_>,
    namespace: &XmlNamespace,
    name: &str,
    foreign_prefix: Option<String>,
) -> String {
    match (namespace, foreign_prefix) {
        (XmlNamespace::Ipxact, _) => w.qualified(name),
        (XmlNamespace::Foreign { .. }, Some(prefix)) => format!("{}:{}", prefix, name),
        _ => name.to_string(),
    }
}

/// The `xsi:schemaLocation` value for a descriptor, when it has a URL.
pub fn schema_location(schema: &SchemaDescriptor) -> Option<String> {
    if schema.schema_url.is_empty() {
        return None;
    }
    Some(format!("{} {}", schema.schema_uri, schema.schema_url))
}

/// Namespace declarations and schema location written on every root element,
/// followed by the document's own root attributes.
pub fn root_attributes(
    schema: &SchemaDescriptor,
    extra: &[OpaqueAttribute],
) -> Vec<(String, String)> {
    let mut attributes = vec![
        ("xmlns:xsi".to_string(), XSI_NAMESPACE.to_string()),
        (
            format!("xmlns:{}", schema.namespace_prefix),
            schema.schema_uri.to_string(),
        ),
    ];

    let reserved = [schema.namespace_prefix, "xsi", "xml"];
    let mut scope: Vec<(String, String)> = Vec::new();
    let mut own = Vec::with_capacity(extra.len());
    for attribute in extra {
        let name = match &attribute.namespace {
            XmlNamespace::Ipxact => schema.qualify(&attribute.name),
            XmlNamespace::Unqualified => attribute.name.clone(),
            XmlNamespace::Foreign { uri, .. } if uri == XML_NAMESPACE => {
                format!("xml:{}", attribute.name)
            }
            XmlNamespace::Foreign { uri, prefix } => {
                let bound = match scope.iter().find(|(_, bound_uri)| bound_uri == uri) {
                    Some((bound, _)) => bound.clone(),
                    None => {
                        let bound = free_prefix(prefix, &reserved, &scope);
                        attributes.push((format!("xmlns:{}", bound), uri.clone()));
                        scope.push((bound.clone(), uri.clone()));
                        bound
                    }
                };
                format!("{}:{}", bound, attribute.name)
            }
        };
        own.push((name, attribute.value.clone()));
    }

    if let Some(location) = schema_location(schema) {
        attributes.push(("xsi:schemaLocation".to_string(), location));
    }
    attributes.extend(own);
    attributes
}
