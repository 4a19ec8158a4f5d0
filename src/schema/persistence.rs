//! Where schema exports are saved.
//!
//! The host asks the user for a path and then writes the text. Either step is
//! behind [`SaveTarget`]; a save request that yields no path means the user
//! cancelled.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::ExportConfig;
use crate::core::errors::{IntrospectError, Result};

/// File type filter offered by a save dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    /// Label shown for the filter
    pub name: String,
    /// Accepted extensions without the leading dot
    pub extensions: Vec<String>,
}

/// Parameters of a save dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Dialog title
    pub title: String,
    /// Suggested file name
    pub default_path: String,
    /// File type filters
    pub filters: Vec<FileFilter>,
}

impl SaveRequest {
    /// Build the dialog parameters for a schema export.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            title: config.dialog_title.clone(),
            default_path: config.default_file_name.clone(),
            filters: vec![FileFilter {
                name: config.filter_name.clone(),
                extensions: config.extensions.clone(),
            }],
        }
    }
}

/// Save dialog and file writer.
#[async_trait]
pub trait SaveTarget: Send + Sync {
    /// Ask for a destination. `None` means the user cancelled.
    async fn request_save_path(&self, request: &SaveRequest) -> Result<Option<PathBuf>>;

    /// Write text to the chosen destination.
    async fn write_text(&self, path: &Path, content: &str) -> Result<()>;
}

/// [`SaveTarget`] with a destination chosen up front.
#[derive(Debug, Clone, Default)]
pub struct FileSaveTarget {
    path: Option<PathBuf>,
}

impl FileSaveTarget {
    /// Save to `path`, or behave as a cancelled dialog when `None`.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl SaveTarget for FileSaveTarget {
    async fn request_save_path(&self, request: &SaveRequest) -> Result<Option<PathBuf>> {
        debug!(
            "Save requested ('{}', suggested {}), destination {:?}",
            request.title, request.default_path, self.path
        );
        Ok(self.path.clone())
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| IntrospectError::persistence("Failed to write schema export", path, e))
    }
}
