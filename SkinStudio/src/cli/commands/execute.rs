//! Command execution implementations

use std::path::Path;

use super::Commands;
use super::definitions::VehicleCommands;
use super::{build, config, normalize, vehicle};
use crate::Studio;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, studio: &mut Studio, config_path: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Commands::Vehicle { command } => command.execute(studio),
            Commands::Normalize {
                path,
                vehicle,
                output,
            } => normalize::execute(path, vehicle, output.as_deref()),
            Commands::Build {
                vehicle,
                skin_name,
                texture,
                preview,
                config_json,
                mod_name,
                author,
                output,
                quiet,
            } => build::single(
                studio,
                &build::SingleArgs {
                    vehicle,
                    skin_name,
                    texture,
                    preview: preview.as_deref(),
                    config_json: config_json.as_deref(),
                },
                &build::ModArgs {
                    mod_name,
                    author: author.as_deref(),
                    output: output.as_deref(),
                    show_progress: !*quiet,
                },
            ),
            Commands::Batch {
                requests,
                mod_name,
                author,
                output,
                quiet,
            } => build::batch(
                studio,
                requests,
                &build::ModArgs {
                    mod_name,
                    author: author.as_deref(),
                    output: output.as_deref(),
                    show_progress: !*quiet,
                },
            ),
            Commands::Config { save } => config::show(studio, config_path, *save),
        }
    }
}

impl VehicleCommands {
    /// Execute the selected vehicle command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, studio: &mut Studio) -> anyhow::Result<()> {
        match self {
            VehicleCommands::Add {
                carid,
                name,
                materials,
                jbeam,
                info,
            } => vehicle::add(studio, carid, name, materials, jbeam, info),
            VehicleCommands::Remove { carid } => vehicle::remove(studio, carid),
            VehicleCommands::List => vehicle::list(studio),
        }
    }
}
