//! Schema metadata sources.
//!
//! [`SchemaSource`] is what the exporter and table discovery read from. The
//! live implementation, [`InfoSchemaSource`], issues `INFO FOR DB` and
//! `INFO FOR TABLE` through a [`QueryExecutor`]; [`SnapshotSchemaSource`]
//! serves the same data from a recorded JSON snapshot.

use std::path::Path;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::errors::{IntrospectError, Result, ResultExt};
use crate::lang::parser::QueryParser;
use crate::lang::surrealql::field_kind_tables;
use crate::schema::relation::{FieldDefinition, TableDefinition};

/// Status reported by a successful result set.
pub const STATUS_OK: &str = "OK";

/// One result set returned by the query executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// `OK` or `ERR`
    pub status: String,
    /// Result value, or the error message for failed statements
    #[serde(default)]
    pub result: Value,
    /// Execution time as reported by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl QueryResponse {
    /// A successful result set.
    pub fn ok(result: Value) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            result,
            time: None,
        }
    }

    /// A failed result set carrying an error message.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            status: "ERR".to_string(),
            result: Value::String(message.into()),
            time: None,
        }
    }

    /// Whether the statement succeeded.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case(STATUS_OK)
    }
}

/// Connection able to run SurrealQL statements.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a query and return one result set per statement.
    async fn query(&self, sql: &str) -> Result<Vec<QueryResponse>>;
}

/// Field, index and event definitions of one table, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Field name to `DEFINE FIELD` text
    #[serde(default, rename = "fd", deserialize_with = "null_as_empty")]
    pub fields: IndexMap<String, String>,
    /// Index name to `DEFINE INDEX` text
    #[serde(default, rename = "ix", deserialize_with = "null_as_empty")]
    pub indexes: IndexMap<String, String>,
    /// Event name to `DEFINE EVENT` text
    #[serde(default, rename = "ev", deserialize_with = "null_as_empty")]
    pub events: IndexMap<String, String>,
}

/// Definition maps may be absent or `null`; both mean no definitions.
fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IndexMap<String, String>>::deserialize(deserializer)
        .map(Option::unwrap_or_default)
}

/// A table's own definition together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// `DEFINE TABLE` text
    pub definition: String,
    /// Field, index and event definitions
    pub info: TableInfo,
}

/// Provider of schema metadata.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Every table name with its definition text, in source order.
    async fn tables(&self) -> Result<IndexMap<String, String>>;

    /// Field, index and event definitions of one table.
    async fn table_info(&self, table: &str) -> Result<TableInfo>;
}

/// [`SchemaSource`] backed by `INFO FOR` statements.
#[derive(Debug, Clone)]
pub struct InfoSchemaSource<E> {
    executor: E,
}

impl<E: QueryExecutor> InfoSchemaSource<E> {
    /// Wrap a query executor.
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Run an `INFO` statement and return its object result.
    async fn info(&self, statement: &str) -> Result<Value> {
        let responses = self.executor.query(statement).await?;
        let response = responses
            .into_iter()
            .next()
            .ok_or_else(|| IntrospectError::query(statement, "no result set returned"))?;

        if !response.is_ok() {
            let message = match response.result {
                Value::String(message) => message,
                other => other.to_string(),
            };
            return Err(IntrospectError::query(statement, message));
        }

        if !response.result.is_object() {
            return Err(IntrospectError::query(statement, "result is not an object"));
        }

        Ok(response.result)
    }
}

#[async_trait]
impl<E: QueryExecutor> SchemaSource for InfoSchemaSource<E> {
    async fn tables(&self) -> Result<IndexMap<String, String>> {
        let statement = "INFO FOR DB";
        let info = self.info(statement).await?;

        match info.get("tb") {
            None | Some(Value::Null) => Ok(IndexMap::new()),
            Some(tables) => serde_json::from_value(tables.clone())
                .map_err(|e| IntrospectError::query(statement, format!("invalid table map: {e}"))),
        }
    }

    async fn table_info(&self, table: &str) -> Result<TableInfo> {
        let statement = format!("INFO FOR TABLE {}", escape_ident(table));
        let info = self.info(&statement).await?;

        serde_json::from_value(info)
            .map_err(|e| IntrospectError::query(&statement, format!("invalid table info: {e}")))
    }
}

/// Quote a table name unless it is a plain identifier.
pub fn escape_ident(name: &str) -> String {
    let plain = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    if plain {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "\\`"))
    }
}

/// Recorded schema metadata, usable offline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSchemaSource {
    /// Table name to `DEFINE TABLE` text
    #[serde(default)]
    pub tables: IndexMap<String, String>,
    /// Table name to its metadata
    #[serde(default)]
    pub table_info: IndexMap<String, TableInfo>,
}

impl SnapshotSchemaSource {
    /// Load a snapshot from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            IntrospectError::io(format!("Failed to read snapshot: {}", path.display()), e)
        })?;

        serde_json::from_str(&content)
            .with_context(|| format!("Invalid snapshot {}", path.display()))
    }

    /// Add a table with its metadata.
    pub fn with_table(
        mut self,
        name: impl Into<String>,
        definition: impl Into<String>,
        info: TableInfo,
    ) -> Self {
        let name = name.into();
        self.tables.insert(name.clone(), definition.into());
        self.table_info.insert(name, info);
        self
    }
}

#[async_trait]
impl SchemaSource for SnapshotSchemaSource {
    async fn tables(&self) -> Result<IndexMap<String, String>> {
        Ok(self.tables.clone())
    }

    async fn table_info(&self, table: &str) -> Result<TableInfo> {
        self.table_info.get(table).cloned().ok_or_else(|| {
            IntrospectError::query(
                format!("INFO FOR TABLE {}", escape_ident(table)),
                "no metadata recorded for table",
            )
        })
    }
}

/// Fetch every table together with its metadata, in source order.
///
/// Up to `max_in_flight` table queries run at once. The first failure aborts
/// the whole fetch.
pub async fn fetch_table_schemas<S>(source: &S, max_in_flight: usize) -> Result<Vec<TableSchema>>
where
    S: SchemaSource + ?Sized,
{
    let tables = source.tables().await?;
    debug!("Fetching metadata for {} tables", tables.len());

    stream::iter(tables)
        .map(|(name, definition)| async move {
            debug!("Fetching metadata for table {}", name);
            let info = source.table_info(&name).await?;
            Ok::<TableSchema, IntrospectError>(TableSchema {
                name,
                definition,
                info,
            })
        })
        .buffered(max_in_flight.max(1))
        .try_collect()
        .await
}

/// Build [`TableDefinition`]s with record-link targets for every field.
///
/// Field names come from the table metadata. Targets are read by parsing each
/// field definition; a definition the parser rejects yields no targets.
pub async fn fetch_table_definitions<S, P>(
    source: &S,
    parser: &P,
    max_in_flight: usize,
) -> Result<Vec<TableDefinition>>
where
    S: SchemaSource + ?Sized,
    P: QueryParser + ?Sized,
{
    let schemas = fetch_table_schemas(source, max_in_flight).await?;

    Ok(schemas
        .into_iter()
        .map(|schema| {
            let fields = schema
                .info
                .fields
                .iter()
                .map(|(name, definition)| FieldDefinition {
                    name: name.clone(),
                    kind_tables: definition_kind_tables(parser, definition),
                })
                .collect();
            TableDefinition::new(schema.name, fields)
        })
        .collect())
}

fn definition_kind_tables<P: QueryParser + ?Sized>(parser: &P, definition: &str) -> Vec<String> {
    match parser.parse(definition) {
        Ok(statements) => statements.first().map(field_kind_tables).unwrap_or_default(),
        Err(err) => {
            debug!("Ignoring unparsable field definition '{}': {}", definition, err);
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;
