//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use crate::loader::load_dump_dir;
use anyhow::Result;
use dumpspace_core::{Dataset, EngineConfig, ReflectionEngine};
use std::sync::Arc;
use tracing::info;

/// Load the dump directory, then run the requested command against it
pub async fn route(cli: Cli, config: EngineConfig) -> Result<()> {
    let console = CliConsole::new(cli.verbose);
    let dataset = load_dataset(&cli, config, &console).await?;

    match &cli.command {
        Commands::Search(args) => commands::search::run(&dataset, args, cli.json),
        Commands::Scoped(args) => commands::scoped::run(&dataset, args, cli.json).await,
        Commands::Ancestors { name } => commands::hierarchy::ancestors(&dataset, name, cli.json),
        Commands::Descendants { name } => {
            commands::hierarchy::descendants(&dataset, name, cli.json)
        }
        Commands::Path { from, to } => commands::hierarchy::path(&dataset, from, to, cli.json),
        Commands::Chain { name } => commands::hierarchy::chain(&dataset, name, cli.json),
        Commands::Members { name } => commands::types::members(&dataset, name, cli.json),
        Commands::Functions { class } => commands::types::functions(&dataset, class, cli.json),
        Commands::Stats => commands::stats::run(&dataset, &console, cli.json),
    }
}

async fn load_dataset(
    cli: &Cli,
    config: EngineConfig,
    console: &CliConsole,
) -> Result<Arc<Dataset>> {
    console.info(&format!("Loading dump from {}", cli.dir.display()));
    let raw = load_dump_dir(&cli.dir)?;

    let engine = ReflectionEngine::new(config);
    let progress = console.build_progress();
    let loaded = engine.load(raw, &progress).await;
    progress.finish();
    let dataset = loaded?;

    let report = dataset.report();
    info!(
        entities = dataset.store().len(),
        skipped = report.total_skipped(),
        "Dataset ready"
    );
    if report.total_skipped() > 0 {
        console.warn(&format!(
            "{} malformed records were skipped (see `dumpspace stats`)",
            report.total_skipped()
        ));
    }
    Ok(dataset)
}
