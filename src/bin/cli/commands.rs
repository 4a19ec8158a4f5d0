//! Command Execution Logic

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::cli::args::*;
use crate::cli::config_layer::ApplyCliArgs;
use surql_introspect::ast::{
    extract_referenced_tables, find_live_query_indices, KindNode, ParsedStatement,
};
use surql_introspect::core::config::IntrospectConfig;
use surql_introspect::schema::{
    build_schema_export_document, classify_edge_table, save_schema_export, ExportOutcome,
    FileSaveTarget, SnapshotSchemaSource, TableDefinition,
};

/// One line of the `edges` report
#[derive(Serialize)]
struct EdgeReport<'a> {
    table: &'a str,
    is_edge: bool,
    in_targets: Vec<String>,
    out_targets: Vec<String>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {}", path.display(), e))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Export a schema snapshot as a definition script
pub async fn export_command(args: ExportArgs, config: &IntrospectConfig) -> anyhow::Result<()> {
    let mut export_config = config.export.clone();
    export_config.apply_cli_args(&args);
    export_config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid export options: {}", e))?;

    let source = SnapshotSchemaSource::from_json_file(&args.snapshot)?;

    match args.out {
        Some(path) => {
            let target = FileSaveTarget::new(Some(path));
            match save_schema_export(&source, &target, &export_config).await? {
                ExportOutcome::Saved { path, bytes } => {
                    info!("Wrote {} bytes to {}", bytes, path.display());
                }
                ExportOutcome::Cancelled => info!("Export cancelled"),
            }
        }
        None => {
            let script = build_schema_export_document(&source, &export_config).await?;
            println!("{script}");
        }
    }

    Ok(())
}

/// Classify every table of a definition list
pub fn edges_command(args: EdgesArgs) -> anyhow::Result<()> {
    let tables: Vec<TableDefinition> = read_json(&args.tables)?;

    let reports: Vec<EdgeReport<'_>> = tables
        .iter()
        .map(|table| {
            let edge = classify_edge_table(table);
            EdgeReport {
                table: &table.name,
                is_edge: edge.is_edge,
                in_targets: edge.in_targets,
                out_targets: edge.out_targets,
            }
        })
        .filter(|report| report.is_edge || !args.only_edges)
        .collect();

    match args.format {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Text => {
            for report in &reports {
                if report.is_edge {
                    println!(
                        "{}: edge (in: {} | out: {})",
                        report.table,
                        display_targets(&report.in_targets),
                        display_targets(&report.out_targets)
                    );
                } else {
                    println!("{}: table", report.table);
                }
            }
        }
    }

    Ok(())
}

fn display_targets(targets: &[String]) -> String {
    if targets.is_empty() {
        "any".to_string()
    } else {
        targets.join(", ")
    }
}

/// Print live statement positions of a parsed query
pub fn live_command(args: AstArgs) -> anyhow::Result<()> {
    let statements: Vec<ParsedStatement> = read_json(&args.ast)?;
    let indices = find_live_query_indices(&statements);

    match args.format {
        OutputFormat::Json => print_json(&indices)?,
        OutputFormat::Text => {
            for idx in indices {
                println!("{idx}");
            }
        }
    }

    Ok(())
}

/// Print tables referenced anywhere in a parsed kind
pub fn kinds_command(args: AstArgs) -> anyhow::Result<()> {
    let tree: Value = read_json(&args.ast)?;
    let tables = extract_referenced_tables(&KindNode::from_json(&tree));

    match args.format {
        OutputFormat::Json => print_json(&tables)?,
        OutputFormat::Text => {
            for table in tables {
                println!("{table}");
            }
        }
    }

    Ok(())
}

/// Print the default configuration as YAML
pub fn print_default_config() -> anyhow::Result<()> {
    let yaml = serde_yaml::to_string(&IntrospectConfig::default())?;
    print!("{yaml}");
    Ok(())
}
