//! Command-line entry point.
//!
//! Diffs two schema changelog files and writes the generated migration
//! changelog to a file or stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use changediff::counter::{ChangesetIds, FsCounterStore};
use changediff::generator::MigrationGenerator;

#[derive(Parser)]
#[command(name = "changediff")]
#[command(about = "Generate a migration changelog from two schema changelog versions", long_about = None)]
struct Cli {
    /// Changelog describing the previous schema version
    previous: PathBuf,

    /// Changelog describing the current schema version
    current: PathBuf,

    /// Write the migration changelog here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File persisting the changeset identifier counter across runs
    #[arg(long, env = "CHANGEDIFF_COUNTER_FILE", default_value = "changediff.counter")]
    counter_file: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for the generated document.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ids = ChangesetIds::new(FsCounterStore::new(&cli.counter_file));
    let mut generator = MigrationGenerator::new(ids);
    let migration = generator.generate_from_paths(&cli.previous, &cli.current)?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &migration)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!(path = %path.display(), "Wrote migration changelog");
        }
        None => print!("{migration}"),
    }

    Ok(())
}
