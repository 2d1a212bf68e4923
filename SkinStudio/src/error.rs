//! Error types for `SkinStudio`

use std::path::PathBuf;

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("SkinCore error: {0}")]
    SkinCore(#[from] skincore::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    // ==================== Configuration ====================
    #[error("Invalid configuration: {0}")]
    ConfigRead(#[from] toml::de::Error),

    #[error("Could not serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    // ==================== Build ====================
    /// The vehicle has no registered skin template.
    #[error("No template found for vehicle '{vehicle_id}' (expected {})", .path.display())]
    MissingTemplate { vehicle_id: String, path: PathBuf },

    /// The target archive already exists; nothing was written.
    #[error("A mod archive already exists at {}", .0.display())]
    OutputCollision(PathBuf),

    #[error("Vehicle '{0}' is not registered")]
    UnknownVehicle(String),

    #[error("No mods directory configured and none could be detected")]
    NoModsDirectory,

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, Error>;
