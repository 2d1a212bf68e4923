//! Vehicle skin templates stored under the data directory
//!
//! Layout:
//! ```text
//! <data>/vehicles/added_vehicles.json
//! <data>/vehicles/<carid>/SKINNAME/   material template, jbeam template, info template
//! <data>/imagesforgui/vehicles/<carid>/
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use skincore::formats::info::TemplateInfo;
use skincore::formats::jbeam::jbeam_template;
use skincore::formats::material::{MaterialTransform, ParseTier, normalize_material_file};
use skincore::utils::file_name_string;

use crate::error::{Error, Result};
use crate::registry::{REGISTRY_FILE_NAME, VehicleRegistry};

/// Name of the per-vehicle template folder
pub const TEMPLATE_FOLDER: &str = "SKINNAME";

/// Files uploaded when registering a vehicle
#[derive(Debug, Clone)]
pub struct TemplateSources {
    /// The vehicle's material JSON (normalized into the template)
    pub material_json: PathBuf,
    /// Any jbeam of the vehicle's skin slot; only its file name is kept
    pub jbeam: PathBuf,
    /// The skin's info JSON; only its file name is kept
    pub info_json: PathBuf,
}

/// Result of registering a vehicle
#[derive(Debug, Clone)]
pub struct RegistrationReport {
    pub template_dir: PathBuf,
    pub material_file: PathBuf,
    pub material_tier: ParseTier,
    /// Skin label the template was built from, if any group was found
    pub skin_label: Option<String>,
}

/// Template storage rooted at a data directory
#[derive(Debug, Clone)]
pub struct TemplateStore {
    data_dir: PathBuf,
}

impl TemplateStore {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn vehicles_dir(&self) -> PathBuf {
        self.data_dir.join("vehicles")
    }

    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.vehicles_dir().join(REGISTRY_FILE_NAME)
    }

    /// Load the registry stored with these templates
    #[must_use]
    pub fn load_registry(&self) -> VehicleRegistry {
        VehicleRegistry::load(self.registry_path())
    }

    #[must_use]
    pub fn vehicle_dir(&self, vehicle_id: &str) -> PathBuf {
        self.vehicles_dir().join(vehicle_id)
    }

    #[must_use]
    pub fn template_dir(&self, vehicle_id: &str) -> PathBuf {
        self.vehicle_dir(vehicle_id).join(TEMPLATE_FOLDER)
    }

    #[must_use]
    pub fn preview_dir(&self, vehicle_id: &str) -> PathBuf {
        self.data_dir.join("imagesforgui").join("vehicles").join(vehicle_id)
    }

    #[must_use]
    pub fn has_template(&self, vehicle_id: &str) -> bool {
        self.template_dir(vehicle_id).is_dir()
    }

    /// Create `<data>/vehicles/<carid>/SKINNAME`
    pub fn create_vehicle_folders(&self, vehicle_id: &str) -> Result<PathBuf> {
        validate_vehicle_id(vehicle_id)?;
        let path = self.template_dir(vehicle_id);
        fs::create_dir_all(&path)?;
        tracing::debug!("Created vehicle folders: {}", path.display());
        Ok(path)
    }

    /// Remove the vehicle's template and preview folders, where present
    pub fn delete_vehicle_folders(&self, vehicle_id: &str) -> Result<()> {
        validate_vehicle_id(vehicle_id)?;
        for path in [self.vehicle_dir(vehicle_id), self.preview_dir(vehicle_id)] {
            if path.exists() {
                fs::remove_dir_all(&path)?;
                tracing::debug!("Deleted folder: {}", path.display());
            }
        }
        Ok(())
    }

    /// Build a vehicle's template from its uploaded files and record it
    ///
    /// Any template from an earlier registration is removed first.
    /// The material JSON is normalized into `skin.materials.json` or
    /// `materials.json`; the jbeam and info files are replaced by their
    /// placeholder templates under their original names.
    pub fn register_vehicle(
        &self,
        registry: &mut VehicleRegistry,
        vehicle_id: &str,
        name: &str,
        sources: &TemplateSources,
    ) -> Result<RegistrationReport> {
        tracing::info!("Registering vehicle {vehicle_id} ({name})");
        validate_vehicle_id(vehicle_id)?;
        let previous = self.template_dir(vehicle_id);
        if previous.exists() {
            fs::remove_dir_all(&previous)?;
            tracing::debug!("Cleared previous template: {}", previous.display());
        }
        let template_dir = self.create_vehicle_folders(vehicle_id)?;

        let (material_file, transform) =
            normalize_material_file(&sources.material_json, &template_dir, vehicle_id)?;
        let skin_label = match &transform {
            MaterialTransform::Normalized { label, dropped, .. } => {
                tracing::info!("Template built from skin '{label}' ({dropped} entries dropped)");
                Some(label.clone())
            }
            MaterialTransform::Unchanged { .. } => None,
            MaterialTransform::PassThrough { .. } => {
                tracing::warn!("Material JSON copied unmodified; check it by hand");
                None
            }
        };

        let jbeam_name = source_file_name(&sources.jbeam)?;
        fs::write(template_dir.join(&jbeam_name), jbeam_template(vehicle_id)?)?;
        tracing::debug!("Wrote jbeam template: {jbeam_name}");

        let info_name = source_file_name(&sources.info_json)?;
        fs::write(template_dir.join(&info_name), TemplateInfo::default().to_json()?)?;
        tracing::debug!("Wrote info template: {info_name}");

        registry.add(vehicle_id, name);
        registry.save()?;

        Ok(RegistrationReport {
            template_dir,
            material_file,
            material_tier: transform.tier(),
            skin_label,
        })
    }

    /// Delete a vehicle's folders and registry entry
    pub fn unregister_vehicle(&self, registry: &mut VehicleRegistry, vehicle_id: &str) -> Result<()> {
        if !registry.contains(vehicle_id) && !self.vehicle_dir(vehicle_id).exists() {
            return Err(Error::UnknownVehicle(vehicle_id.to_string()));
        }
        self.delete_vehicle_folders(vehicle_id)?;
        if registry.remove(vehicle_id) {
            registry.save()?;
        }
        tracing::info!("Removed vehicle {vehicle_id}");
        Ok(())
    }
}

/// Vehicle ids become directory names; reject anything that is not a plain name
fn validate_vehicle_id(vehicle_id: &str) -> Result<()> {
    let plain = !vehicle_id.is_empty()
        && vehicle_id != "."
        && vehicle_id != ".."
        && !vehicle_id.contains(['/', '\\']);
    if plain {
        Ok(())
    } else {
        Err(Error::InvalidPath(format!("invalid vehicle id '{vehicle_id}'")))
    }
}

fn source_file_name(path: &Path) -> Result<String> {
    file_name_string(path).ok_or_else(|| Error::InvalidPath(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    fn sources(dir: &Path) -> TemplateSources {
        let material_json = dir.join("skin.materials.json");
        fs::write(
            &material_json,
            r#"{
                "van.skin.fleet": {"name": "van.skin.fleet", "mapTo": "van.skin.fleet", "Stages": [{}, {}, {}]},
                "van_body.skin.fleet": {"name": "van_body.skin.fleet"},
                "van.skin.plain": {"name": "van.skin.plain"}
            }"#,
        )
        .unwrap();
        let jbeam = dir.join("van_skin_fleet.jbeam");
        fs::write(&jbeam, "{}").unwrap();
        let info_json = dir.join("info_fleet.json");
        fs::write(&info_json, "{}").unwrap();
        TemplateSources {
            material_json,
            jbeam,
            info_json,
        }
    }

    #[test]
    fn test_register_writes_templates() {
        let uploads = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let store = TemplateStore::new(data.path());
        let mut registry = store.load_registry();

        let report = store
            .register_vehicle(&mut registry, "van", "Gavril H-Series", &sources(uploads.path()))
            .unwrap();

        assert_eq!(report.template_dir, data.path().join("vehicles/van/SKINNAME"));
        assert_eq!(report.skin_label.as_deref(), Some("fleet"));
        assert_eq!(report.material_tier, ParseTier::Strict);

        let material: Value =
            serde_json::from_str(&fs::read_to_string(&report.material_file).unwrap()).unwrap();
        let keys: Vec<&String> = material.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["van.skin.skinname", "van_body.skin.skinname"]);

        let jbeam = fs::read_to_string(report.template_dir.join("van_skin_fleet.jbeam")).unwrap();
        assert!(jbeam.contains("\"van_skin_SKINNAME\""));

        let info = fs::read_to_string(report.template_dir.join("info_fleet.json")).unwrap();
        assert_eq!(info, TemplateInfo::default().to_json().unwrap());

        assert_eq!(store.load_registry().get("van"), Some("Gavril H-Series"));
        assert!(store.has_template("van"));
    }

    #[test]
    fn test_reregister_replaces_previous_template() {
        let uploads = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let store = TemplateStore::new(data.path());
        let mut registry = store.load_registry();

        let mut first = sources(uploads.path());
        let plain = uploads.path().join("van_materials.json");
        fs::copy(&first.material_json, &plain).unwrap();
        first.material_json = plain;
        let report = store
            .register_vehicle(&mut registry, "van", "Van", &first)
            .unwrap();
        assert_eq!(report.material_file, report.template_dir.join("materials.json"));

        let report = store
            .register_vehicle(&mut registry, "van", "Van", &sources(uploads.path()))
            .unwrap();
        let mut names: Vec<String> = fs::read_dir(&report.template_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["info_fleet.json", "skin.materials.json", "van_skin_fleet.jbeam"]
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unregister_removes_folders_and_entry() {
        let uploads = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        let store = TemplateStore::new(data.path());
        let mut registry = store.load_registry();
        store
            .register_vehicle(&mut registry, "van", "Van", &sources(uploads.path()))
            .unwrap();
        fs::create_dir_all(store.preview_dir("van")).unwrap();

        store.unregister_vehicle(&mut registry, "van").unwrap();
        assert!(!store.vehicle_dir("van").exists());
        assert!(!store.preview_dir("van").exists());
        assert!(store.load_registry().is_empty());

        assert!(matches!(
            store.unregister_vehicle(&mut registry, "van"),
            Err(Error::UnknownVehicle(_))
        ));
    }

    #[test]
    fn test_rejects_path_like_ids() {
        let data = TempDir::new().unwrap();
        let store = TemplateStore::new(data.path());
        for id in ["", "..", "a/b", r"a\b"] {
            assert!(matches!(store.create_vehicle_folders(id), Err(Error::InvalidPath(_))));
        }
    }
}
