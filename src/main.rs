use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use rootshard::config::{Settings, DEFAULT_CONFIG_FILE};
use rootshard::consolidate::consolidate;
use rootshard::error::{EXIT_SUCCESS, EXIT_USAGE};
use rootshard::partition::partition_canonical;
use rootshard::Result;

#[derive(Parser, Debug)]
#[command(name = "rootshard", version, about = "Century sharding for genealogical person records")]
struct Cli {
    /// JSON settings file. Must exist when given; otherwise `rootshard.json`
    /// is read if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split the canonical file into one shard per birth century.
    Partition,
    /// Merge all shards back into the canonical file, sorted by birth year.
    Consolidate,
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(file) => Settings::load(file, true)?,
        None => Settings::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
    };
    match cli.command {
        Command::Partition => {
            partition_canonical(&settings.canonical(), &settings.store(), &settings.partition_options())?;
        }
        Command::Consolidate => {
            consolidate(&settings.store(), &settings.canonical(), settings.indent)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_USAGE);
        }
    };
    match run(&cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            error!(error=%e, command=?cli.command, "run failed");
            ExitCode::from(e.exit_code())
        }
    }
}
