//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: command execution
//! - config_layer: configuration file discovery and CLI overrides

pub mod args;
pub mod commands;
pub mod config_layer;

pub use args::*;
pub use commands::*;
pub use config_layer::load_configuration;
