//! Configuration Layer Management
//!
//! Resolves the configuration file (explicit `--config`, then an implicit
//! `.surql-introspect.yml`/`.yaml`, then defaults) and applies CLI overrides.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::ExportArgs;
use surql_introspect::core::config::{ExportConfig, IntrospectConfig};

/// Implicit configuration files, in lookup order.
const IMPLICIT_CONFIG_FILES: [&str; 2] = [".surql-introspect.yml", ".surql-introspect.yaml"];

/// Convert CLI arguments to configuration overrides
pub trait ApplyCliArgs<T> {
    /// Override settings the arguments name explicitly
    fn apply_cli_args(&mut self, args: &T);
}

impl ApplyCliArgs<ExportArgs> for ExportConfig {
    fn apply_cli_args(&mut self, args: &ExportArgs) {
        if let Some(max_concurrent) = args.max_concurrent {
            self.max_concurrent_table_queries = max_concurrent;
        }
    }
}

/// Load and validate the effective configuration
pub fn load_configuration(explicit: Option<&Path>) -> anyhow::Result<IntrospectConfig> {
    let implicit = if explicit.is_none() {
        IMPLICIT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    } else {
        None
    };

    let config = match explicit.map(Path::to_path_buf).or(implicit) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            IntrospectConfig::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!(
                    "Failed to load configuration from {}: {}",
                    path.display(),
                    e
                )
            })?
        }
        None => IntrospectConfig::default(),
    };

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}
