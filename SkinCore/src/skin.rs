//! Identifiers derived from a skin request

use std::path::Path;

use crate::utils::{file_name_string, sanitize_skin_id};

/// Everything a build needs to know to point template files at one skin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkinTarget {
    pub vehicle_id: String,
    /// Folder the skin's files live in, below `vehicles/<vehicle_id>/`
    pub skin_folder: String,
    /// File name of the skin's texture as copied into the skin folder
    pub texture_file: String,
    /// Identifier substituted for the template placeholder
    pub skin_id: String,
}

impl SkinTarget {
    /// Derive the target for a skin display name and its texture
    ///
    /// Both the skin identifier and the folder name are the sanitized
    /// display name.
    #[must_use]
    pub fn new<P: AsRef<Path>>(vehicle_id: &str, skin_name: &str, texture: P) -> Self {
        let skin_id = sanitize_skin_id(skin_name);
        let texture_file = file_name_string(texture).unwrap_or_default();

        Self {
            vehicle_id: vehicle_id.to_string(),
            skin_folder: skin_id.clone(),
            texture_file,
            skin_id,
        }
    }

    /// Game path of the skin's color map, as referenced from Stage 2
    #[must_use]
    pub fn texture_path(&self) -> String {
        format!(
            "vehicles/{vid}/{}/{vid}_skin_{}.dds",
            self.skin_folder,
            self.skin_id,
            vid = self.vehicle_id
        )
    }

    /// Archive-relative folder of the skin's files
    #[must_use]
    pub fn skin_dir(&self) -> String {
        format!("vehicles/{}/{}", self.vehicle_id, self.skin_folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_target_identifiers() {
        let target = SkinTarget::new("etk800", "Night Rider", "/tmp/textures/etk800_skin_night.dds");
        assert_eq!(target.skin_id, "night_rider");
        assert_eq!(target.skin_folder, "night_rider");
        assert_eq!(target.texture_file, "etk800_skin_night.dds");
        assert_eq!(target.skin_dir(), "vehicles/etk800/night_rider");
        assert_eq!(
            target.texture_path(),
            "vehicles/etk800/night_rider/etk800_skin_night_rider.dds"
        );
    }
}
