use anyhow::{bail, Context, Result};
use clap::Parser;
use sorter_core::config;
use sorter_core::extractor::FormatExtractor;
use sorter_core::pipeline;
use sorter_core::placer::PlacementMode;
use sorter_core::subjects::SubjectTable;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "note-sorter")]
#[command(about = "Sorts scanned notes into subject folders by content", long_about = None)]
struct Cli {
    /// Folder containing unsorted notes
    input: PathBuf,

    /// Folder where sorted notes will be stored
    output: PathBuf,

    /// Copy files instead of moving them
    #[arg(long)]
    copy: bool,

    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Output JSON summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    if !cli.input.is_dir() {
        bail!(
            "Input directory '{}' does not exist or is not a directory",
            cli.input.display()
        );
    }
    if !cli.output.exists() {
        info!("Creating output directory: {}", cli.output.display());
        fs::create_dir_all(&cli.output)
            .with_context(|| format!("Failed to create output directory: {}", cli.output.display()))?;
    }

    let table = SubjectTable::load(cfg.subjects.path.as_ref())?;
    // Fails here, before any file is touched, if an engine is missing.
    let extractor = FormatExtractor::new(&cfg.scan.extensions)?;

    let mode = if cli.copy || cfg.placement.copy {
        PlacementMode::Copy
    } else {
        PlacementMode::Move
    };

    let summary = pipeline::run(
        &cli.input,
        &cli.output,
        &cfg.scan.extensions,
        &cfg.scan.exclude,
        table,
        &extractor,
        mode,
    )?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Sorted {} of {} files ({} unclassified, {} failed)",
            summary.placed, summary.discovered, summary.unclassified, summary.failed
        );
    }

    info!("Notes sorting completed successfully!");
    Ok(())
}
