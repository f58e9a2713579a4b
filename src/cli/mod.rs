//! CLI entry point for roc-bridge.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// roc-bridge debugging CLI
#[derive(Parser, Debug)]
#[command(name = "roc-bridge", version, about = "Inspect return-of-control events offline")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Coerce a JSON list of parameter descriptors and print the arguments
    Coerce(CoerceArgs),
    /// Summarize the invocation inputs of a return-of-control event
    Inspect(InspectArgs),
}

/// Arguments for `roc-bridge coerce`.
#[derive(Parser, Debug)]
pub struct CoerceArgs {
    /// File holding `[{"name": .., "type": .., "value": ..}, ...]`
    pub path: PathBuf,

    /// Read booleans strictly (`true`/`false`) instead of by truthiness
    #[arg(long)]
    pub strict_booleans: bool,
}

/// Arguments for `roc-bridge inspect`.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// File holding the event (`{"invocationId": .., "invocationInputs": [..]}`)
    pub path: PathBuf,
}
