use super::*;
use crate::lang::testing::ScriptedParser;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

/// Executor answering from a fixed table of statements.
#[derive(Default)]
struct ScriptedExecutor {
    responses: HashMap<String, Vec<QueryResponse>>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    fn respond(mut self, sql: &str, response: QueryResponse) -> Self {
        self.responses.insert(sql.to_string(), vec![response]);
        self
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn query(&self, sql: &str) -> Result<Vec<QueryResponse>> {
        self.seen.lock().unwrap().push(sql.to_string());
        Ok(self.responses.get(sql).cloned().unwrap_or_default())
    }
}

fn db_info() -> QueryResponse {
    QueryResponse::ok(json!({
        "tb": {
            "user": "DEFINE TABLE user SCHEMAFULL",
            "likes": "DEFINE TABLE likes SCHEMALESS"
        }
    }))
}

#[tokio::test]
async fn info_source_reads_tables_in_source_order() {
    let executor = ScriptedExecutor::default().respond("INFO FOR DB", db_info());
    let source = InfoSchemaSource::new(executor);

    let tables = source.tables().await.unwrap();
    let names: Vec<&str> = tables.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["user", "likes"]);
    assert_eq!(tables["user"], "DEFINE TABLE user SCHEMAFULL");
}

#[tokio::test]
async fn info_source_treats_missing_maps_as_empty() {
    let executor = ScriptedExecutor::default()
        .respond("INFO FOR DB", QueryResponse::ok(json!({})))
        .respond(
            "INFO FOR TABLE user",
            QueryResponse::ok(json!({ "fd": { "name": "DEFINE FIELD name ON user TYPE string" } })),
        );
    let source = InfoSchemaSource::new(executor);

    assert!(source.tables().await.unwrap().is_empty());

    let info = source.table_info("user").await.unwrap();
    assert_eq!(info.fields.len(), 1);
    assert!(info.indexes.is_empty());
    assert!(info.events.is_empty());
}

#[tokio::test]
async fn info_source_treats_null_maps_as_empty() {
    let executor = ScriptedExecutor::default()
        .respond("INFO FOR DB", QueryResponse::ok(json!({ "tb": null })))
        .respond(
            "INFO FOR TABLE user",
            QueryResponse::ok(json!({ "fd": null, "ix": null, "ev": null })),
        );
    let source = InfoSchemaSource::new(executor);

    assert!(source.tables().await.unwrap().is_empty());
    assert_eq!(source.table_info("user").await.unwrap(), TableInfo::default());
}

#[tokio::test]
async fn info_source_surfaces_error_status() {
    let executor = ScriptedExecutor::default()
        .respond("INFO FOR TABLE ghost", QueryResponse::err("The table 'ghost' does not exist"));
    let source = InfoSchemaSource::new(executor);

    let err = source.table_info("ghost").await.unwrap_err();
    match err {
        IntrospectError::Query { statement, message } => {
            assert_eq!(statement, "INFO FOR TABLE ghost");
            assert_eq!(message, "The table 'ghost' does not exist");
        }
        other => panic!("Expected Query error, got {other:?}"),
    }
}

#[tokio::test]
async fn info_source_rejects_empty_and_non_object_results() {
    let executor = ScriptedExecutor::default()
        .respond("INFO FOR TABLE odd", QueryResponse::ok(json!([1, 2])));
    let source = InfoSchemaSource::new(executor);

    assert!(matches!(
        source.table_info("odd").await,
        Err(IntrospectError::Query { .. })
    ));
    assert!(matches!(
        source.tables().await,
        Err(IntrospectError::Query { .. })
    ));
}

#[tokio::test]
async fn info_source_escapes_unusual_table_names() {
    let executor = ScriptedExecutor::default().respond(
        "INFO FOR TABLE `user-log`",
        QueryResponse::ok(json!({ "fd": {}, "ix": {}, "ev": {} })),
    );
    let source = InfoSchemaSource::new(executor);

    assert_eq!(source.table_info("user-log").await.unwrap(), TableInfo::default());
}

#[test]
fn escape_ident_leaves_plain_names() {
    assert_eq!(escape_ident("user_2"), "user_2");
    assert_eq!(escape_ident("2fa"), "`2fa`");
    assert_eq!(escape_ident("a`b"), "`a\\`b`");
}

#[tokio::test]
async fn fetch_preserves_order_with_concurrency() {
    let source = SnapshotSchemaSource::default()
        .with_table("a", "DEFINE TABLE a", TableInfo::default())
        .with_table("b", "DEFINE TABLE b", TableInfo::default())
        .with_table("c", "DEFINE TABLE c", TableInfo::default());

    let schemas = fetch_table_schemas(&source, 8).await.unwrap();
    let names: Vec<&str> = schemas.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn fetch_aborts_when_one_table_fails() {
    let mut source = SnapshotSchemaSource::default()
        .with_table("a", "DEFINE TABLE a", TableInfo::default());
    source.tables.insert("b".to_string(), "DEFINE TABLE b".to_string());

    let err = fetch_table_schemas(&source, 1).await.unwrap_err();
    assert!(matches!(err, IntrospectError::Query { .. }));
}

#[tokio::test]
async fn table_definitions_carry_record_targets() {
    let mut fields = IndexMap::new();
    fields.insert("in".to_string(), "DEFINE FIELD in ON likes TYPE record<user>".to_string());
    fields.insert("out".to_string(), "DEFINE FIELD out ON likes TYPE record<post>".to_string());
    fields.insert("note".to_string(), "DEFINE FIELD note ON likes TYPE strin".to_string());

    let source = SnapshotSchemaSource::default().with_table(
        "likes",
        "DEFINE TABLE likes",
        TableInfo {
            fields,
            ..TableInfo::default()
        },
    );
    let parser = ScriptedParser::new()
        .with_parse(
            "DEFINE FIELD in ON likes TYPE record<user>",
            vec![json!({ "Define": { "Field": { "kind": { "Record": ["user"] } } } })],
        )
        .with_parse(
            "DEFINE FIELD out ON likes TYPE record<post>",
            vec![json!({ "Define": { "Field": { "kind": { "Record": ["post"] } } } })],
        );

    let tables = fetch_table_definitions(&source, &parser, 2).await.unwrap();
    assert_eq!(tables.len(), 1);

    let likes = &tables[0];
    assert_eq!(likes.name, "likes");
    assert_eq!(
        likes.fields,
        vec![
            FieldDefinition::new("in").with_kind_tables(["user"]),
            FieldDefinition::new("out").with_kind_tables(["post"]),
            FieldDefinition::new("note"),
        ]
    );
}

#[test]
fn snapshot_loads_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(
        &path,
        r#"{
            "tables": { "user": "DEFINE TABLE user" },
            "table_info": { "user": { "fd": { "name": "DEFINE FIELD name ON user" } } }
        }"#,
    )
    .unwrap();

    let snapshot = SnapshotSchemaSource::from_json_file(&path).unwrap();
    assert_eq!(snapshot.tables.len(), 1);
    assert_eq!(snapshot.table_info["user"].fields.len(), 1);
}
