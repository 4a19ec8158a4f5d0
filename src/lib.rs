//! # surql-introspect: SurrealQL AST and Schema Introspection
//!
//! Reads facts out of SurrealQL parse trees and database schema metadata that
//! the parser does not expose directly:
//!
//! - **Edge tables**: tables declaring both an `in` and an `out` field, and the
//!   tables those endpoints link to
//! - **Record links**: every table a field type such as
//!   `option<array<record<user | team>>>` can point at
//! - **Live queries**: which statements of a query open subscriptions
//! - **Schema export**: a complete `DEFINE ...` script for a database
//!
//! Parsing, value encoding and query execution belong to external
//! collaborators, reached through the [`lang::parser::QueryParser`],
//! [`lang::codec::ValueCodec`] and [`schema::source::QueryExecutor`] traits.
//!
//! ## Quick Start
//!
//! ```rust
//! use surql_introspect::schema::{classify_edge_table, FieldDefinition, TableDefinition};
//!
//! let likes = TableDefinition::new(
//!     "likes",
//!     vec![
//!         FieldDefinition::new("in").with_kind_tables(["user"]),
//!         FieldDefinition::new("out").with_kind_tables(["post"]),
//!     ],
//! );
//!
//! let edge = classify_edge_table(&likes);
//! assert!(edge.is_edge);
//! assert_eq!(edge.out_targets, vec!["post"]);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Ambient infrastructure
pub mod core {
    //! Errors and configuration.

    pub mod config;
    pub mod errors;
}

// Parse tree introspection
pub mod ast;

// External SurrealQL collaborators and helpers over them
pub mod lang {
    //! SurrealQL parser and codec collaborators.

    pub mod codec;
    pub mod parser;
    pub mod surrealql;

    #[cfg(test)]
    pub(crate) mod testing;
}

// Schema discovery, classification and export
pub mod schema;

// Re-export primary types for convenience
pub use ast::{extract_referenced_tables, find_live_query_indices, KindNode, ParsedStatement};
pub use crate::core::config::{ExportConfig, IntrospectConfig};
pub use crate::core::errors::{IntrospectError, Result, ResultExt};
pub use schema::{classify_edge_table, is_edge_table, EdgeClassification, TableDefinition};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
