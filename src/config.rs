use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult as Result};
use crate::schema::SchemaVersion;

/// File names tried by [`ConfigManager::find_config_file`], in order.
const CONFIG_NAMES: [&str; 4] = ["ipxact.toml", "ipxact.json", ".ipxact.toml", ".ipxact.json"];

/// Main library configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub schema: SchemaConfig,
    pub parsing: ParsingConfig,
}

/// Where schemas are found and how compiled schemas are kept
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchemaConfig {
    /// Directories searched in order for a release's local schema path
    pub directories: Vec<PathBuf>,
    /// Release used when authoring new documents
    pub default_version: SchemaVersion,
    /// Maximum number of compiled schemas kept in memory
    pub cache_capacity: u64,
}

/// Extraction settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ParsingConfig {
    pub unimplemented_content: UnimplementedContent,
}

/// What to do with element groups the object model keeps only as opaque subtrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnimplementedContent {
    /// Capture the subtree and re-emit it verbatim on serialization
    #[default]
    Preserve,
    /// Skip the subtree and log a warning
    Discard,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        let mut directories = vec![PathBuf::from("lib/schema")];
        if let Some(data_dir) = dirs::data_dir() {
            directories.push(data_dir.join("ipxact").join("schema"));
        }

        Self {
            directories,
            default_version: SchemaVersion::default(),
            cache_capacity: 16,
        }
    }
}

impl Config {
    /// Configuration searching only `directory` for schemas.
    pub fn with_schema_directory(directory: impl Into<PathBuf>) -> Self {
        let mut config = Config::default();
        config.schema.directories = vec![directory.into()];
        config
    }
}

/// Configuration manager for loading configuration files
pub struct ConfigManager;

impl ConfigManager {
    /// Load the first configuration file found in a standard location, or the defaults.
    pub fn load_config() -> Result<Config> {
        let config = Self::find_config_file()?.unwrap_or_default();
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            Some(ext) => return Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => match toml::from_str::<Config>(&content) {
                Ok(config) => config,
                Err(_) => serde_json::from_str(&content)?,
            },
        };

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    /// Find a configuration file in the working directory, then in the user config directory.
    pub fn find_config_file() -> Result<Option<Config>> {
        Self::find_config_file_in(Path::new("."))
    }

    pub(crate) fn find_config_file_in(working_dir: &Path) -> Result<Option<Config>> {
        for name in &CONFIG_NAMES {
            let path = working_dir.join(name);
            if path.exists() {
                return Ok(Some(Self::load_from_file(&path)?));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join("ipxact");
            for name in &CONFIG_NAMES {
                let path = app_config_dir.join(name);
                if path.exists() {
                    return Ok(Some(Self::load_from_file(&path)?));
                }
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if config.schema.directories.is_empty() {
            return Err(ConfigError::Validation(
                "At least one schema directory must be specified".to_string(),
            ));
        }

        if config
            .schema
            .directories
            .iter()
            .any(|dir| dir.as_os_str().is_empty())
        {
            return Err(ConfigError::Validation(
                "Schema directories must not be empty paths".to_string(),
            ));
        }

        if config.schema.cache_capacity == 0 {
            return Err(ConfigError::Validation(
                "Schema cache capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
