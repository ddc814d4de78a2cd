//! Configuration for schema addressing
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-access.toml)
//! - Environment variables (SCHEMA_ACCESS__*)
//!
//! ## Example config file (schema-access.toml):
//! ```toml
//! [engine]
//! opaque_widgets = ["RawJsonTree", "CodeEditor"]
//!
//! [output]
//! format = "compact"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::node::RAW_JSON_TREE;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaAccessConfig {
    /// Addressing engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Output settings for the CLI
    #[serde(default)]
    pub output: OutputConfig,
}

/// Addressing engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Widget values that stop access-key expansion at an object
    #[serde(default = "default_opaque_widgets")]
    pub opaque_widgets: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON rendering (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// Render a value in this format
    pub fn render(&self, value: &serde_json::Value) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

fn default_opaque_widgets() -> Vec<String> {
    vec![RAW_JSON_TREE.to_string()]
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            opaque_widgets: default_opaque_widgets(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
        }
    }
}

impl SchemaAccessConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-access.toml",
            ".schema-access.toml",
            "config/schema-access.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "schema-access") {
            let xdg_config = config_dir.config_dir().join("schema-access.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // SCHEMA_ACCESS__ENGINE__OPAQUE_WIDGETS=RawJsonTree,CodeEditor
        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_ACCESS")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("engine.opaque_widgets")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
