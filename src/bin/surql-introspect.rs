//! surql-introspect CLI - offline SurrealQL schema and AST inspection
//!
//! Works on JSON dumps of parser output and `INFO FOR` responses, so it can
//! run without a database connection.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli::load_configuration(cli.config.as_deref())?;

    match cli.command {
        Commands::Export(args) => {
            cli::export_command(args, &config).await?;
        }
        Commands::Edges(args) => {
            cli::edges_command(args)?;
        }
        Commands::Live(args) => {
            cli::live_command(args)?;
        }
        Commands::Kinds(args) => {
            cli::kinds_command(args)?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config()?;
        }
    }

    Ok(())
}
