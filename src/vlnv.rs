use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use regex::Regex;
use roxmltree::Node;

use crate::error::{IpxactError, Result};
use crate::schema::SchemaDescriptor;
use crate::xml::{XmlWriter, attribute_by_local_name};

/// Cached regex for version strings such as `1.0`, `2014`, `v1.2.3-beta`
static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_version_regex() -> &'static Regex {
    VERSION_REGEX.get_or_init(|| {
        Regex::new(r"^[vV]?(\d+(?:\.\d+)*)(?:[-+_.]?([0-9A-Za-z][0-9A-Za-z.+_-]*))?$")
            .expect("Failed to compile version regex")
    })
}

/// A version made of numeric segments and an optional pre-release or build suffix.
///
/// The original text is kept and written back unchanged. Ordering compares
/// the numeric segments first (missing segments count as zero), so
/// `1.10 > 1.9` and `1.0 < 1.0.1`; a version with a suffix orders before the
/// same version without one.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    segments: Vec<u64>,
    suffix: Option<String>,
}

impl Version {
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || IpxactError::InvalidIdentifier {
            field: "version",
            value: text.to_string(),
        };

        let trimmed = text.trim();
        let captures = get_version_regex().captures(trimmed).ok_or_else(invalid)?;

        let segments = captures[1]
            .split('.')
            .map(|segment| segment.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;
        let suffix = captures.get(2).map(|m| m.as_str().to_string());

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
            suffix,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    pub fn major(&self) -> u64 {
        self.segments[0]
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        let segment = |version: &Version, i: usize| version.segments.get(i).copied().unwrap_or(0);

        (0..len)
            .map(|i| segment(self, i).cmp(&segment(other, i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| match (&self.suffix, &other.suffix) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
            })
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for Version {
    type Err = IpxactError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Vendor, library, name and version: the identity of an IP-XACT document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vlnv {
    vendor: String,
    library: String,
    name: String,
    version: Version,
}

impl Vlnv {
    pub fn new(
        vendor: impl Into<String>,
        library: impl Into<String>,
        name: impl Into<String>,
        version: &str,
    ) -> Result<Self> {
        let vendor = non_empty("vendor", vendor.into())?;
        let library = non_empty("library", library.into())?;
        let name = non_empty("name", name.into())?;
        let version = Version::parse(version)?;

        Ok(Self {
            vendor,
            library,
            name,
            version,
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Read a library reference (`<vlnv vendor=".." .../>`, `<designRef .../>`).
    /// Attributes are matched by local name, so both the qualified SPIRIT form
    /// and the unqualified IEEE 1685-2014 form are accepted.
    pub fn from_attributes(node: Node<'_, '_>) -> Result<Self> {
        let parent = match node.tag_name().name() {
            "designRef" => "designRef",
            "busType" => "busType",
            "extends" => "extends",
            _ => "vlnv",
        };
        let attribute = |field: &'static str| {
            attribute_by_local_name(node, field).ok_or(IpxactError::MissingElement {
                element: field,
                parent,
            })
        };

        Vlnv::new(
            attribute("vendor")?,
            attribute("library")?,
            attribute("name")?,
            attribute("version")?,
        )
    }

    /// Single self-closing `vlnv` tag carrying the four fields as attributes.
    pub fn to_xml_attribute_form(&self, indent: usize, schema: &SchemaDescriptor) -> String {
        let mut w = XmlWriter::new(schema, indent);
        self.write_reference(&mut w, "vlnv");
        w.into_string()
    }

    /// Four sibling tags, as in the header of a root document.
    pub fn to_xml_expanded_form(&self, indent: usize, schema: &SchemaDescriptor) -> String {
        let mut w = XmlWriter::new(schema, indent);
        self.write_expanded(&mut w);
        w.into_string()
    }

    /// Write a library reference element named `tag`.
    pub fn write_reference(&self, w: &mut XmlWriter<'_>, tag: &str) {
        let schema = w.schema();
        let key = |field: &str| {
            if schema.qualified_reference_attributes {
                schema.qualify(field)
            } else {
                field.to_string()
            }
        };
        let keys = [key("vendor"), key("library"), key("name"), key("version")];

        w.empty(
            tag,
            &[
                (keys[0].as_str(), self.vendor.as_str()),
                (keys[1].as_str(), self.library.as_str()),
                (keys[2].as_str(), self.name.as_str()),
                (keys[3].as_str(), self.version.as_str()),
            ],
        );
    }

    pub fn write_expanded(&self, w: &mut XmlWriter<'_>) {
        w.leaf("vendor", &self.vendor);
        w.leaf("library", &self.library);
        w.leaf("name", &self.name);
        w.leaf("version", self.version.as_str());
    }
}

impl fmt::Display for Vlnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IpxactError::InvalidIdentifier { field, value });
    }
    Ok(trimmed.to_string())
}
