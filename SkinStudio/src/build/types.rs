//! Types for mod build requests, progress and reports

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Progress callback type for mod builds
pub type BuildProgressCallback<'a> = &'a (dyn Fn(&BuildProgress) + Sync + Send);

/// One skin to include in a mod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinRequest {
    pub vehicle_id: String,
    /// Display name; the skin identifier is derived from it
    pub skin_name: String,
    /// The skin's DDS texture
    #[serde(alias = "dds_path")]
    pub texture_path: PathBuf,
    /// Image shown in the game's vehicle selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image_path: Option<PathBuf>,
    /// Vehicle configuration written to `configs/<skin>_config.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_data: Option<serde_json::Value>,
}

impl SkinRequest {
    pub fn new(vehicle_id: &str, skin_name: &str, texture_path: impl Into<PathBuf>) -> Self {
        Self {
            vehicle_id: vehicle_id.to_string(),
            skin_name: skin_name.to_string(),
            texture_path: texture_path.into(),
            preview_image_path: None,
            config_data: None,
        }
    }

    #[must_use]
    pub fn with_preview(mut self, path: impl Into<PathBuf>) -> Self {
        self.preview_image_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config_data = Some(config);
        self
    }
}

/// Mod-level settings shared by every skin in a build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Mod name as written to `info.json`; the archive name is derived from it
    pub mod_name: String,
    pub author: String,
    pub version: String,
    /// Directory the archive is written to
    pub output_dir: PathBuf,
}

/// Progress information during a build
#[derive(Debug, Clone)]
pub struct BuildProgress {
    pub phase: BuildPhase,
    /// Steps completed so far
    pub current: usize,
    pub total: usize,
    /// Skin currently being staged (if applicable)
    pub current_skin: Option<String>,
}

impl BuildProgress {
    #[must_use]
    pub fn new(phase: BuildPhase, current: usize, total: usize) -> Self {
        Self {
            phase,
            current,
            total,
            current_skin: None,
        }
    }

    #[must_use]
    pub fn with_skin(phase: BuildPhase, current: usize, total: usize, skin: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            current_skin: Some(skin.into()),
        }
    }

    /// Get the progress fraction (0.0 - 1.0)
    #[must_use]
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.current as f32 / self.total as f32
        }
    }
}

/// Phase of a mod build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Copying template files and texture into the staging folder
    CopyingTemplate,
    /// Rewriting jbeam and material files for the skin
    RewritingDescriptors,
    /// Copying the preview image and writing the vehicle config
    CopyingExtras,
    /// Writing the mod's info.json
    WritingInfo,
    /// Writing the ZIP archive
    Packaging,
    Complete,
}

impl BuildPhase {
    /// Get a human-readable description of this phase
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CopyingTemplate => "Copying template",
            Self::RewritingDescriptors => "Rewriting descriptors",
            Self::CopyingExtras => "Copying preview and config",
            Self::WritingInfo => "Writing info.json",
            Self::Packaging => "Packaging archive",
            Self::Complete => "Complete",
        }
    }
}

/// Outcome of a build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub archive_path: PathBuf,
    /// `<vehicle>/<skin id>` of every skin that made it into the archive
    pub skins_built: Vec<String>,
    /// `<vehicle>/<skin id>` of every skin left out
    pub skins_skipped: Vec<String>,
    /// Non-fatal problems, one line each
    pub warnings: Vec<String>,
    /// Number of files in the archive
    pub file_count: usize,
}

impl BuildReport {
    pub(crate) fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}
