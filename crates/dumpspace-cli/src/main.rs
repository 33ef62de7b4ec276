//! Dumpspace CLI application
//!
//! Loads a directory of reflection dump documents and answers one query
//! against it.
//!
//! ```bash
//! dumpspace --dir ./dump search Health
//! dumpspace --dir ./dump scoped AActor flags --direction up
//! dumpspace --dir ./dump path APawn UObject
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) for build diagnostics.

mod args;
mod commands;
mod console;
mod loader;
mod router;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use console::CliConsole;
use dumpspace_core::{LoggingConfig, load_from_file};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let console = CliConsole::new(cli.verbose);
    if let Err(err) = run(cli).await {
        console.error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_from_file(&cli.config_path())?;
    init_logging(&config.logging, cli.verbose);
    router::route(cli, config).await
}

/// Install the global subscriber; `RUST_LOG` wins over the config file
fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}
