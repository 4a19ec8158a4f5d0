//! Schema introspection and export.
//!
//! This module provides:
//! - Table definitions and edge-table classification
//! - Schema metadata sources (`INFO FOR` queries, recorded snapshots)
//! - The definition-script exporter and its save targets

pub mod export;
pub mod persistence;
pub mod relation;
pub mod source;

pub use export::{
    build_schema_export_document, build_schema_export_document_at, save_schema_export,
    ExportDocument, ExportOutcome,
};
pub use persistence::{FileFilter, FileSaveTarget, SaveRequest, SaveTarget};
pub use relation::{
    classify_edge_table, is_edge_table, EdgeClassification, FieldDefinition, TableDefinition,
};
pub use source::{
    fetch_table_definitions, fetch_table_schemas, InfoSchemaSource, QueryExecutor, QueryResponse,
    SchemaSource, SnapshotSchemaSource, TableInfo, TableSchema,
};
