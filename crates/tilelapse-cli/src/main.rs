mod commands;
mod progress;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilelapse", about = "Tile map capture and daily timelapse tool")]
#[command(version)]
struct Cli {
    /// Config file (TOML); built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the tile grid once and save a snapshot
    Capture(commands::capture::CaptureArgs),
    /// Encode one day of snapshots into a video
    Timelapse(commands::timelapse::TimelapseArgs),
    /// List the snapshots of a day in encode order
    List(commands::list::ListArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Capture(args) => commands::capture::run(args, config_path),
        Commands::Timelapse(args) => commands::timelapse::run(args, config_path),
        Commands::List(args) => commands::list::run(args, config_path),
        Commands::Config(args) => commands::config::run(args),
    }
}
