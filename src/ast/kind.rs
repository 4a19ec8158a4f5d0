//! Kind trees and the record-link walker.
//!
//! The parser emits a field's type expression as an externally tagged tree:
//! `record<user | post>` arrives as `{"Record": ["user", "post"]}`, and
//! wrappers such as `option<..>`, `array<..>` or unions nest further objects
//! and arrays around it. [`KindNode`] closes that tree over the four shapes
//! that can occur, and [`extract_referenced_tables`] collects every table a
//! kind can link to, whatever the nesting.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

/// Tag the parser uses for record-link kinds.
pub const RECORD_TAG: &str = "Record";

/// One node of a parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindNode {
    /// Terminal node without structure (`string`, `int`, null, ...)
    Leaf,
    /// Record link carrying its target table names
    Record(Vec<String>),
    /// Ordered children (union branches, tuple members, ...)
    Sequence(Vec<KindNode>),
    /// Named children (`Option`, `Array`, `Set` wrappers, ...)
    Keyed(IndexMap<String, KindNode>),
}

impl KindNode {
    /// Build a kind tree from the parser's JSON representation.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => match map.get(RECORD_TAG) {
                Some(tables) => Self::Record(record_tables(tables)),
                None => Self::Keyed(
                    map.iter()
                        .map(|(key, child)| (key.clone(), Self::from_json(child)))
                        .collect(),
                ),
            },
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Leaf,
        }
    }

    /// Shorthand for a record link to the given tables.
    pub fn record<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Record(tables.into_iter().map(Into::into).collect())
    }

    fn collect_tables(&self, tables: &mut BTreeSet<String>) {
        match self {
            Self::Leaf => {}
            Self::Record(names) => tables.extend(names.iter().cloned()),
            Self::Sequence(children) => {
                for child in children {
                    child.collect_tables(tables);
                }
            }
            Self::Keyed(children) => {
                for child in children.values() {
                    child.collect_tables(tables);
                }
            }
        }
    }
}

impl From<&Value> for KindNode {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

/// Table names carried by a record tag. `record` without targets has none.
fn record_tables(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item.as_str() {
            Some(name) => Some(name.to_string()),
            None => {
                debug!("Skipping non-string record target: {}", item);
                None
            }
        })
        .collect()
}

/// Collect every table referenced by record links anywhere in `root`.
///
/// Record nodes are not descended into. Duplicates collapse and the result
/// does not depend on sibling order.
pub fn extract_referenced_tables(root: &KindNode) -> BTreeSet<String> {
    let mut tables = BTreeSet::new();
    root.collect_tables(&mut tables);
    tables
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod kind_tests;
