//! Parsed statements and live-query detection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Variant tag of live (subscription) statements.
pub const LIVE_TAG: &str = "Live";

/// One top-level statement as emitted by the parser.
///
/// Statements are externally tagged: `{"Live": {...}}`, `{"Define": {...}}`,
/// or a bare string for variants without payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedStatement(Value);

impl ParsedStatement {
    /// Wrap a raw parse tree node.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The variant tag, if the node carries one.
    pub fn variant(&self) -> Option<&str> {
        match &self.0 {
            Value::Object(map) => map.keys().next().map(String::as_str),
            Value::String(tag) => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Whether the statement opens a live query subscription.
    ///
    /// Presence of the `Live` tag decides, whatever its payload, so
    /// `{"Live": null}` counts as live.
    pub fn is_live(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.contains_key(LIVE_TAG),
            _ => false,
        }
    }

    /// Follow a path of object keys into the statement tree.
    pub fn pointer(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.0, |node, key| node.as_object()?.get(*key))
    }

    /// The raw parse tree node.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ParsedStatement {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Positions of every live statement, ascending.
pub fn find_live_query_indices(statements: &[ParsedStatement]) -> Vec<usize> {
    statements
        .iter()
        .enumerate()
        .filter(|(_, statement)| statement.is_live())
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statement(value: Value) -> ParsedStatement {
        ParsedStatement::new(value)
    }

    #[test]
    fn finds_live_statements_in_order() {
        let statements = vec![
            statement(json!({ "Select": { "what": ["user"] } })),
            statement(json!({ "Live": { "what": "user" } })),
            statement(json!({ "Create": {} })),
            statement(json!({ "Live": { "what": "post" } })),
            statement(json!("Commit")),
        ];

        assert_eq!(find_live_query_indices(&statements), vec![1, 3]);
    }

    #[test]
    fn empty_input_has_no_live_statements() {
        assert!(find_live_query_indices(&[]).is_empty());
    }

    #[test]
    fn non_live_input_has_no_live_statements() {
        let statements = vec![statement(json!({ "Select": {} })), statement(json!("Begin"))];
        assert!(find_live_query_indices(&statements).is_empty());
    }

    #[test]
    fn bare_live_string_is_not_a_subscription() {
        assert!(!statement(json!("Live")).is_live());
        assert_eq!(statement(json!("Live")).variant(), Some("Live"));
    }

    #[test]
    fn live_tag_with_null_payload_counts_as_live() {
        assert!(statement(json!({ "Live": null })).is_live());
        assert_eq!(find_live_query_indices(&[statement(json!({ "Live": null }))]), vec![0]);
    }

    #[test]
    fn variant_reads_external_tag() {
        assert_eq!(statement(json!({ "Define": {} })).variant(), Some("Define"));
        assert_eq!(statement(json!(null)).variant(), None);
    }

    #[test]
    fn pointer_walks_object_keys() {
        let stmt = statement(json!({
            "Define": { "Field": { "kind": { "Record": ["user"] } } }
        }));
        assert_eq!(
            stmt.pointer(&["Define", "Field", "kind"]),
            Some(&json!({ "Record": ["user"] }))
        );
        assert_eq!(stmt.pointer(&["Define", "Table"]), None);
    }

    #[test]
    fn classification_does_not_mutate_input() {
        let statements = vec![statement(json!({ "Live": {} }))];
        let before = statements.clone();
        let _ = find_live_query_indices(&statements);
        assert_eq!(statements, before);
    }
}
