//! roc-bridge CLI binary entry point.

use clap::Parser;
use roc_bridge::cli::{commands, Cli, Commands};
use roc_bridge::config::RocConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RocConfig::global();

    let result = match cli.command {
        Commands::Coerce(args) => commands::handle_coerce(&args.path, args.strict_booleans, config),
        Commands::Inspect(args) => commands::handle_inspect(&args.path),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
