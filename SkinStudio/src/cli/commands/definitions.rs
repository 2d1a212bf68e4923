//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

/// Vehicle template commands
#[derive(Subcommand)]
pub enum VehicleCommands {
    /// Register a vehicle from its material JSON, jbeam and info files
    Add {
        /// Vehicle id (folder name in the game, e.g. "pickup")
        carid: String,

        /// Display name
        name: String,

        /// The vehicle's skin material JSON
        #[arg(long)]
        materials: PathBuf,

        /// The vehicle's skin jbeam
        #[arg(long)]
        jbeam: PathBuf,

        /// The skin's info JSON
        #[arg(long)]
        info: PathBuf,
    },

    /// Remove a vehicle and its template
    Remove {
        /// Vehicle id
        carid: String,
    },

    /// List registered vehicles
    List,
}
