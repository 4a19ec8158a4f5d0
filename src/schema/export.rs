//! Schema export.
//!
//! Renders every table of a [`SchemaSource`] as a SurrealQL definition script:
//!
//! ```text
//! -- Export generated by surql-introspect on 2026-01-01T00:00:00.000Z
//!
//! -- ------------------------------
//! -- OPTION
//! -- ------------------------------
//!
//! OPTION IMPORT;
//!
//! -- ------------------------------
//! -- TABLE: user
//! -- ------------------------------
//!
//! DEFINE TABLE user SCHEMAFULL;
//!
//! DEFINE FIELD name ON user TYPE string;
//! ```

use std::path::PathBuf;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use crate::core::config::ExportConfig;
use crate::core::errors::Result;
use crate::schema::persistence::{SaveRequest, SaveTarget};
use crate::schema::source::{fetch_table_schemas, SchemaSource, TableSchema};

/// Divider line framing section titles.
pub const SECTION_DIVIDER: &str = "-- ------------------------------";

/// Directive enabling import mode for the rest of the script.
pub const IMPORT_DIRECTIVE: &str = "OPTION IMPORT";

/// Line-oriented builder for a definition script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    lines: Vec<String>,
}

impl ExportDocument {
    /// Start a document with its banner comment.
    pub fn new(banner: &str, generated_at: DateTime<Utc>) -> Self {
        let timestamp = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            lines: vec![format!("-- {banner} {timestamp}")],
        }
    }

    /// Open a titled section.
    pub fn push_section(&mut self, title: &str) {
        self.lines.extend([
            String::new(),
            SECTION_DIVIDER.to_string(),
            format!("-- {title}"),
            SECTION_DIVIDER.to_string(),
            String::new(),
        ]);
    }

    /// Append one statement, terminated by a single `;`.
    pub fn push_statement(&mut self, statement: &str) {
        let statement = statement.trim_end().trim_end_matches(';');
        self.lines.push(format!("{statement};"));
    }

    /// Append a blank-line separated group of statements. Empty groups add nothing.
    pub fn push_group<'a, I>(&mut self, statements: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut statements = statements.into_iter().peekable();
        if statements.peek().is_none() {
            return;
        }

        self.lines.push(String::new());
        for statement in statements {
            self.push_statement(statement);
        }
    }

    /// Append a table section with its fields, indexes and events.
    pub fn push_table(&mut self, table: &TableSchema) {
        self.push_section(&format!("TABLE: {}", table.name));
        self.push_statement(&table.definition);
        self.push_group(table.info.fields.values());
        self.push_group(table.info.indexes.values());
        self.push_group(table.info.events.values());
    }

    /// Lines assembled so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The newline-joined script.
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

/// Render the schema as of `generated_at`.
///
/// Tables appear in source order. Any metadata failure aborts the export.
pub async fn build_schema_export_document_at<S>(
    source: &S,
    config: &ExportConfig,
    generated_at: DateTime<Utc>,
) -> Result<String>
where
    S: SchemaSource + ?Sized,
{
    let tables = fetch_table_schemas(source, config.max_concurrent_table_queries).await?;

    let mut document = ExportDocument::new(&config.banner, generated_at);
    document.push_section("OPTION");
    document.push_statement(IMPORT_DIRECTIVE);

    for table in &tables {
        document.push_table(table);
    }

    Ok(document.into_text())
}

/// Render the schema, stamped with the current time.
pub async fn build_schema_export_document<S>(source: &S, config: &ExportConfig) -> Result<String>
where
    S: SchemaSource + ?Sized,
{
    build_schema_export_document_at(source, config, Utc::now()).await
}

/// How a save attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The script was written
    Saved {
        /// Destination
        path: PathBuf,
        /// Bytes written
        bytes: usize,
    },
    /// No destination was chosen; nothing was written
    Cancelled,
}

/// Render the schema and hand it to the save target.
pub async fn save_schema_export<S, T>(
    source: &S,
    target: &T,
    config: &ExportConfig,
) -> Result<ExportOutcome>
where
    S: SchemaSource + ?Sized,
    T: SaveTarget + ?Sized,
{
    let script = build_schema_export_document(source, config).await?;
    let request = SaveRequest::from_config(config);

    let Some(path) = target.request_save_path(&request).await? else {
        info!("Schema export cancelled, nothing written");
        return Ok(ExportOutcome::Cancelled);
    };

    target.write_text(&path, &script).await?;
    info!("Schema exported to {} ({} bytes)", path.display(), script.len());

    Ok(ExportOutcome::Saved {
        path,
        bytes: script.len(),
    })
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod export_tests;
