//! SurrealQL syntax helpers.
//!
//! Thin wrappers over a [`QueryParser`] used by editors and schema views:
//! validation that reports a message instead of failing, statement counting,
//! live-query lookup, formatting, and best-effort record-link extraction from
//! a type expression.

use tracing::debug;

use crate::ast::{extract_referenced_tables, find_live_query_indices, KindNode, ParsedStatement};
use crate::core::errors::{IntrospectError, Result};
use crate::lang::parser::{rejection_message, QueryParser};

/// Path of the type expression inside a parsed `DEFINE FIELD` statement.
pub const FIELD_KIND_PATH: [&str; 3] = ["Define", "Field", "kind"];

/// Validate a query. Returns the parser's message when invalid.
pub fn validate_query<P: QueryParser + ?Sized>(parser: &P, sql: &str) -> Option<String> {
    parser.validate(sql).err().map(|err| rejection_message(&err))
}

/// Validate a record id. Returns the parser's message when invalid.
pub fn validate_record_id<P: QueryParser + ?Sized>(parser: &P, thing: &str) -> Option<String> {
    parser
        .validate_record_id(thing)
        .err()
        .map(|err| rejection_message(&err))
}

/// Validate a where clause. Returns the parser's message when invalid.
pub fn validate_where<P: QueryParser + ?Sized>(parser: &P, clause: &str) -> Option<String> {
    parser
        .validate_where(clause)
        .err()
        .map(|err| rejection_message(&err))
}

/// Number of top-level statements in a query.
pub fn statement_count<P: QueryParser + ?Sized>(parser: &P, sql: &str) -> Result<usize> {
    Ok(parser.parse(sql)?.len())
}

/// Positions of the live query statements in a query.
pub fn live_query_indices<P: QueryParser + ?Sized>(parser: &P, sql: &str) -> Result<Vec<usize>> {
    let statements = parser.parse(sql)?;
    Ok(find_live_query_indices(&statements))
}

/// Pretty-print a query.
pub fn format_query<P: QueryParser + ?Sized>(parser: &P, sql: &str) -> Result<String> {
    parser.format(sql, true)
}

/// Tables referenced by the type of a parsed `DEFINE FIELD` statement.
///
/// A statement without a type expression references nothing.
pub fn field_kind_tables(statement: &ParsedStatement) -> Vec<String> {
    statement
        .pointer(&FIELD_KIND_PATH)
        .map(|kind| extract_referenced_tables(&KindNode::from_json(kind)))
        .map(|tables| tables.into_iter().collect())
        .unwrap_or_default()
}

/// Tables a type expression such as `option<record<user | post>>` links to.
///
/// This is advisory: text the parser rejects yields an empty list.
pub fn extract_record_targets<P: QueryParser + ?Sized>(parser: &P, kind: &str) -> Vec<String> {
    match try_extract_record_targets(parser, kind) {
        Ok(tables) => tables,
        Err(err) => {
            debug!("Ignoring unparsable kind '{}': {}", kind, err);
            Vec::new()
        }
    }
}

fn try_extract_record_targets<P: QueryParser + ?Sized>(
    parser: &P,
    kind: &str,
) -> Result<Vec<String>> {
    let probe = format!("DEFINE FIELD dummy ON dummy TYPE {kind}");
    let statements = parser.parse(&probe)?;
    let statement = statements
        .first()
        .ok_or_else(|| IntrospectError::parse_input("no statement produced", probe.clone()))?;

    Ok(field_kind_tables(statement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::testing::ScriptedParser;
    use serde_json::json;

    fn field_with_kind(kind: serde_json::Value) -> serde_json::Value {
        json!({ "Define": { "Field": { "name": [{ "Field": "dummy" }], "kind": kind } } })
    }

    #[test]
    fn extracts_targets_from_nested_kind() {
        let parser = ScriptedParser::new().with_parse(
            "DEFINE FIELD dummy ON dummy TYPE option<record<user | post>>",
            vec![field_with_kind(json!({ "Option": { "Record": ["user", "post"] } }))],
        );

        assert_eq!(
            extract_record_targets(&parser, "option<record<user | post>>"),
            vec!["post".to_string(), "user".to_string()]
        );
    }

    #[test]
    fn invalid_kind_yields_empty_list() {
        let parser = ScriptedParser::new();
        assert!(extract_record_targets(&parser, "record<").is_empty());
    }

    #[test]
    fn missing_kind_yields_empty_list() {
        let parser = ScriptedParser::new()
            .with_parse("DEFINE FIELD dummy ON dummy TYPE any", vec![json!({ "Define": {} })])
            .with_parse("DEFINE FIELD dummy ON dummy TYPE none", vec![]);

        assert!(extract_record_targets(&parser, "any").is_empty());
        assert!(extract_record_targets(&parser, "none").is_empty());
    }

    #[test]
    fn validation_reports_parser_message() {
        let parser = ScriptedParser::new()
            .with_valid("SELECT * FROM user")
            .with_valid("user:tobie")
            .with_valid("age > 18");

        assert_eq!(validate_query(&parser, "SELECT * FROM user"), None);
        assert_eq!(validate_record_id(&parser, "user:tobie"), None);
        assert_eq!(validate_where(&parser, "age > 18"), None);

        assert_eq!(
            validate_query(&parser, "SELEC"),
            Some("Unexpected input: SELEC".to_string())
        );
        assert_eq!(
            validate_record_id(&parser, "user"),
            Some("Unexpected input: user".to_string())
        );
        assert!(validate_where(&parser, "age >").is_some());
    }

    #[test]
    fn counts_statements_and_finds_live_queries() {
        let sql = "LIVE SELECT * FROM user; SELECT * FROM user; LIVE SELECT * FROM post";
        let parser = ScriptedParser::new().with_parse(
            sql,
            vec![
                json!({ "Live": { "what": "user" } }),
                json!({ "Select": {} }),
                json!({ "Live": { "what": "post" } }),
            ],
        );

        assert_eq!(statement_count(&parser, sql).unwrap(), 3);
        assert_eq!(live_query_indices(&parser, sql).unwrap(), vec![0, 2]);
    }

    #[test]
    fn live_query_lookup_propagates_parse_errors() {
        let parser = ScriptedParser::new();
        let err = live_query_indices(&parser, "LIVE SELEC").unwrap_err();
        assert!(matches!(err, IntrospectError::Parse { .. }));
    }

    #[test]
    fn format_query_requests_pretty_output() {
        let parser = ScriptedParser::new();
        assert_eq!(
            format_query(&parser, "select * from user").unwrap(),
            "pretty:select * from user"
        );
    }
}
