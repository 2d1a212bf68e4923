use clap::Subcommand;
use std::path::PathBuf;

pub mod build;
pub mod config;
pub mod definitions;
mod execute;
pub mod normalize;
pub mod vehicle;

use definitions::VehicleCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Manage registered vehicle templates
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommands,
    },

    /// Normalize a vehicle's material JSON into a skin template
    Normalize {
        /// Material JSON file
        path: PathBuf,

        /// Vehicle id the skin entries are keyed by (e.g. "pickup")
        #[arg(short, long)]
        vehicle: String,

        /// Output directory (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a mod containing one skin
    Build {
        /// Vehicle id
        #[arg(short, long)]
        vehicle: String,

        /// Skin display name
        #[arg(short, long)]
        skin_name: String,

        /// DDS texture
        #[arg(short, long)]
        texture: PathBuf,

        /// Preview image shown in the vehicle selector
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Vehicle config JSON to ship with the skin
        #[arg(long)]
        config_json: Option<PathBuf>,

        /// Mod name
        #[arg(short, long)]
        mod_name: String,

        /// Author (defaults to the configured author)
        #[arg(short, long)]
        author: Option<String>,

        /// Output directory (defaults to the game's mods folder)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Build a mod containing several skins from a JSON list of skin requests
    Batch {
        /// JSON file: `[{"vehicle_id", "skin_name", "texture_path", ...}]`
        requests: PathBuf,

        /// Mod name
        #[arg(short, long)]
        mod_name: String,

        /// Author (defaults to the configured author)
        #[arg(short, long)]
        author: Option<String>,

        /// Output directory (defaults to the game's mods folder)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the resolved configuration
    Config {
        /// Write the resolved configuration to the config file
        #[arg(long)]
        save: bool,
    },
}
