//! `SkinStudio` CLI - Command-line interface for building skin mods

pub mod commands;
pub mod progress;

use std::path::PathBuf;

use clap::Parser;
use commands::Commands;

use crate::{Studio, StudioConfig};

#[derive(Parser)]
#[command(name = "skinstudio")]
#[command(about = "SkinStudio: BeamNG.drive skin mod builder", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to <config dir>/skinstudio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory holding vehicle templates (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `SkinStudio` CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(StudioConfig::config_path);
    let mut config = match &config_path {
        Some(path) => StudioConfig::load_from(path)?,
        None => StudioConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir.clone_from(data_dir);
    }

    let mut studio = Studio::new(config);
    cli.command.execute(&mut studio, config_path.as_deref())?;

    Ok(())
}
