//! Parser collaborator.
//!
//! Parsing, formatting and validation of query text are provided by an
//! external SurrealQL implementation. This crate only consumes its output.

use crate::ast::ParsedStatement;
use crate::core::errors::{IntrospectError, Result};

/// External SurrealQL parser, formatter and validator.
///
/// Rejections are reported as [`IntrospectError::Parse`] carrying the
/// parser's own message.
pub trait QueryParser: Send + Sync {
    /// Parse query text into its top-level statements.
    fn parse(&self, text: &str) -> Result<Vec<ParsedStatement>>;

    /// Reformat query text.
    fn format(&self, text: &str, pretty: bool) -> Result<String>;

    /// Check that query text is syntactically valid.
    fn validate(&self, text: &str) -> Result<()>;

    /// Check that text is a valid record id (`table:id`).
    fn validate_record_id(&self, text: &str) -> Result<()>;

    /// Check that text is a valid `WHERE` clause body.
    fn validate_where(&self, text: &str) -> Result<()>;
}

/// The human-readable message behind a parser rejection.
pub fn rejection_message(err: &IntrospectError) -> String {
    match err {
        IntrospectError::Parse { message, .. } | IntrospectError::Validation { message, .. } => {
            message.clone()
        }
        other => other.to_string(),
    }
}
