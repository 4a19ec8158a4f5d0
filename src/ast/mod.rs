//! Parse tree introspection.
//!
//! This module provides:
//! - Kind trees and the record-link walker
//! - Parsed statements and live-query detection

pub mod kind;
pub mod statement;

pub use kind::{extract_referenced_tables, KindNode, RECORD_TAG};
pub use statement::{find_live_query_indices, ParsedStatement, LIVE_TAG};
