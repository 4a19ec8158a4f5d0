//! CLI Argument Structures

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Offline SurrealQL schema and AST inspection
#[derive(Parser)]
#[command(name = "surql-introspect")]
#[command(version = VERSION)]
#[command(about = "Inspect SurrealQL parse trees and export database schemas")]
#[command(long_about = "
Inspect SurrealQL parse trees and database schema metadata.

Inputs are JSON dumps: parse trees as emitted by the SurrealQL parser and
schema snapshots built from INFO FOR DB / INFO FOR TABLE responses.

Common Usage:

  # Write a definition script for a recorded schema
  surql-introspect export --snapshot schema.json --out schema.surql

  # List edge tables and their endpoints
  surql-introspect edges --tables tables.json

  # Find live statements in a parsed query
  surql-introspect live --ast query.json
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to .surql-introspect.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a schema snapshot as a SurrealQL definition script
    Export(ExportArgs),

    /// Classify tables as graph edges
    Edges(EdgesArgs),

    /// Print the positions of live statements in a parsed query
    Live(AstArgs),

    /// Print the tables referenced by a parsed kind
    Kinds(AstArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,
}

/// Output format for inspection results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// JSON document
    Json,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Schema snapshot JSON ({"tables": {...}, "table_info": {...}})
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Destination file; prints to stdout when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Override the number of table queries run concurrently
    #[arg(long)]
    pub max_concurrent: Option<usize>,
}

#[derive(Args)]
pub struct EdgesArgs {
    /// JSON list of table definitions
    #[arg(long)]
    pub tables: PathBuf,

    /// Only print tables classified as edges
    #[arg(long)]
    pub only_edges: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct AstArgs {
    /// Parse tree JSON
    #[arg(long)]
    pub ast: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
