//! Configuration types and management for surql-introspect.
//!
//! Configuration is read from YAML. Every section has serde defaults so a
//! partial file only needs to name the values it changes.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{IntrospectError, Result, ResultExt};

pub use validation::{validate_non_empty, validate_non_empty_list, validate_positive_usize};

/// Main configuration for the introspection tooling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntrospectConfig {
    /// Schema export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl IntrospectConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            IntrospectError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            IntrospectError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.export.validate().map_err(|e| {
            IntrospectError::config_field(format!("Invalid export configuration: {e}"), "export")
        })
    }
}

/// Schema export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Title shown by the save dialog
    #[serde(default = "ExportConfig::default_dialog_title")]
    pub dialog_title: String,

    /// File name suggested to the save dialog
    #[serde(default = "ExportConfig::default_file_name")]
    pub default_file_name: String,

    /// Label of the file type filter
    #[serde(default = "ExportConfig::default_filter_name")]
    pub filter_name: String,

    /// Extensions accepted by the file type filter
    #[serde(default = "ExportConfig::default_extensions")]
    pub extensions: Vec<String>,

    /// Text of the leading comment, followed by the generation timestamp
    #[serde(default = "ExportConfig::default_banner")]
    pub banner: String,

    /// Upper bound on `INFO FOR TABLE` queries in flight at once
    #[serde(default = "ExportConfig::default_max_concurrent_table_queries")]
    pub max_concurrent_table_queries: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dialog_title: Self::default_dialog_title(),
            default_file_name: Self::default_file_name(),
            filter_name: Self::default_filter_name(),
            extensions: Self::default_extensions(),
            banner: Self::default_banner(),
            max_concurrent_table_queries: Self::default_max_concurrent_table_queries(),
        }
    }
}

impl ExportConfig {
    fn default_dialog_title() -> String {
        "Save database schema".to_string()
    }

    fn default_file_name() -> String {
        "schema.surql".to_string()
    }

    fn default_filter_name() -> String {
        "SurrealDB Schema".to_string()
    }

    fn default_extensions() -> Vec<String> {
        vec!["surql".to_string(), "sql".to_string(), "surrealql".to_string()]
    }

    fn default_banner() -> String {
        "Export generated by surql-introspect on".to_string()
    }

    const fn default_max_concurrent_table_queries() -> usize {
        4
    }

    /// Validate export settings
    pub fn validate(&self) -> Result<()> {
        validate_non_empty(&self.default_file_name, "default_file_name")?;
        validate_non_empty(&self.filter_name, "filter_name")?;
        validate_non_empty_list(&self.extensions, "extensions")?;
        validate_positive_usize(
            self.max_concurrent_table_queries,
            "max_concurrent_table_queries",
        )?;
        Ok(())
    }
}
