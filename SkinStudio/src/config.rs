//! Studio configuration (`config.toml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skincore::formats::info::DEFAULT_MOD_VERSION;

use crate::error::Result;

fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from("skinstudio"), |p| p.join("SkinStudio"))
}

fn default_author() -> String {
    "Unknown".to_string()
}

fn default_mod_version() -> String {
    DEFAULT_MOD_VERSION.to_string()
}

/// Persisted studio settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudioConfig {
    /// Root holding `vehicles/` (templates and registry) and `imagesforgui/`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Where built archives go; the game's mods folder when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mods_dir: Option<PathBuf>,
    #[serde(default = "default_author")]
    pub default_author: String,
    #[serde(default = "default_mod_version")]
    pub mod_version: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            mods_dir: None,
            default_author: default_author(),
            mod_version: default_mod_version(),
        }
    }
}

impl StudioConfig {
    /// Default location of the config file
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("skinstudio").join("config.toml"))
    }

    /// Load from the default location, or return defaults when there is no file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write to `path`, creating parent directories
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Output directory for archives: the configured one, else the game's mods folder
    #[must_use]
    pub fn resolved_mods_dir(&self) -> Option<PathBuf> {
        self.mods_dir.clone().or_else(default_mods_dir)
    }
}

/// The game's user mods folder
///
/// `<local data dir>/BeamNG/BeamNG.drive/current/mods`; `None` when the
/// platform has no local data directory.
#[must_use]
pub fn default_mods_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| {
        p.join("BeamNG")
            .join("BeamNG.drive")
            .join("current")
            .join("mods")
    })
}
