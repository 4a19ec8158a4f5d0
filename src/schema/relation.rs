//! Table definitions and edge-table classification.
//!
//! A table is a graph edge when it declares both an `in` and an `out` field.
//! The targets of those fields are whatever record links their types name,
//! which may be none at all.

use serde::{Deserialize, Serialize};

/// Name of the field holding an edge's source record.
pub const IN_FIELD: &str = "in";
/// Name of the field holding an edge's target record.
pub const OUT_FIELD: &str = "out";

/// A field of a table definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name
    pub name: String,
    /// Tables the field's type links to; empty when it is not a record link
    #[serde(default)]
    pub kind_tables: Vec<String>,
}

impl FieldDefinition {
    /// Create a field without record links.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind_tables: Vec::new(),
        }
    }

    /// Set the tables the field links to.
    pub fn with_kind_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kind_tables = tables.into_iter().map(Into::into).collect();
        self
    }
}

/// A named table and its fields in declaration order.
///
/// Field names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name
    pub name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl TableDefinition {
    /// Create a table with the given fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Result of classifying a table as a graph edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeClassification {
    /// Whether both `in` and `out` fields are present
    pub is_edge: bool,
    /// Tables the `in` field links to
    pub in_targets: Vec<String>,
    /// Tables the `out` field links to
    pub out_targets: Vec<String>,
}

/// Classify a table as a graph edge.
///
/// Field names match exactly and case-sensitively. When a name repeats, the
/// last field in declaration order supplies the targets. Untyped endpoints
/// still make an edge.
pub fn classify_edge_table(table: &TableDefinition) -> EdgeClassification {
    let mut has_in = false;
    let mut has_out = false;
    let mut in_targets: &[String] = &[];
    let mut out_targets: &[String] = &[];

    for field in &table.fields {
        match field.name.as_str() {
            IN_FIELD => {
                has_in = true;
                in_targets = &field.kind_tables;
            }
            OUT_FIELD => {
                has_out = true;
                out_targets = &field.kind_tables;
            }
            _ => {}
        }
    }

    EdgeClassification {
        is_edge: has_in && has_out,
        in_targets: in_targets.to_vec(),
        out_targets: out_targets.to_vec(),
    }
}

/// Whether the table is a graph edge.
pub fn is_edge_table(table: &TableDefinition) -> bool {
    classify_edge_table(table).is_edge
}
