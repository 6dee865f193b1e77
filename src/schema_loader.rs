use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::SchemaCache;
use crate::error::{IpxactError, LibXml2Error, Result};
use crate::libxml2::{LibXml2Wrapper, XmlSchemaPtr};
use crate::schema::SchemaDescriptor;

/// Locates the XSD of a schema release on disk and compiles it through the cache.
pub struct SchemaLoader {
    directories: Vec<PathBuf>,
    cache: Arc<SchemaCache>,
    libxml2: LibXml2Wrapper,
}

impl SchemaLoader {
    pub fn new(directories: Vec<PathBuf>, cache: Arc<SchemaCache>) -> Self {
        Self {
            directories,
            cache,
            libxml2: LibXml2Wrapper::new(),
        }
    }

    /// First existing `<directory>/<local path>` over the configured directories.
    pub fn resolve(&self, descriptor: &SchemaDescriptor) -> Result<PathBuf> {
        let local_path = descriptor.local_path();

        self.directories
            .iter()
            .map(|dir| dir.join(local_path))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| IpxactError::SchemaLoad {
                path: local_path.to_path_buf(),
                details: format!(
                    "schema for {} not found in: {}",
                    descriptor.schema_uri,
                    self.searched(local_path).join(", ")
                ),
            })
    }

    /// Compiled schema for `descriptor`, compiled on first request.
    pub fn load_schema(&self, descriptor: &SchemaDescriptor) -> Result<XmlSchemaPtr> {
        if let Some(schema) = self.cache.get(descriptor.schema_uri) {
            tracing::debug!(schema_uri = descriptor.schema_uri, "compiled schema cache hit");
            return Ok(schema);
        }

        let path = self.resolve(descriptor)?;
        self.cache
            .get_or_load(descriptor.schema_uri, || {
                tracing::info!(
                    schema_uri = descriptor.schema_uri,
                    path = %path.display(),
                    "compiling schema"
                );
                self.libxml2.parse_schema_file(&path)
            })
            .map_err(|error| Self::compile_error(&path, &error))
    }

    fn compile_error(path: &Path, error: &LibXml2Error) -> IpxactError {
        let details = match error {
            LibXml2Error::SchemaParseFailed { errors } if !errors.is_empty() => errors.join("; "),
            other => other.to_string(),
        };

        IpxactError::SchemaLoad {
            path: path.to_path_buf(),
            details,
        }
    }

    fn searched(&self, local_path: &Path) -> Vec<String> {
        self.directories
            .iter()
            .map(|dir| dir.join(local_path).display().to_string())
            .collect()
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn cache(&self) -> &Arc<SchemaCache> {
        &self.cache
    }
}
