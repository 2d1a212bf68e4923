//! Registered vehicles (`added_vehicles.json`)

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::Result;

/// File name of the registry inside the vehicles directory
pub const REGISTRY_FILE_NAME: &str = "added_vehicles.json";

/// Vehicle id to display name, persisted as one pretty-printed JSON object
#[derive(Debug, Clone)]
pub struct VehicleRegistry {
    path: PathBuf,
    vehicles: IndexMap<String, String>,
}

impl VehicleRegistry {
    /// Empty registry bound to `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            vehicles: IndexMap::new(),
        }
    }

    /// Load the registry at `path`
    ///
    /// A missing file gives an empty registry. So does an unreadable or
    /// invalid one, with a warning; the next save replaces it.
    pub fn load<P: Into<PathBuf>>(path: P) -> Self {
        let mut registry = Self::new(path);
        if !registry.path.exists() {
            tracing::debug!("{} not found, starting empty", registry.path.display());
            return registry;
        }

        let parsed: Result<IndexMap<String, String>> = fs::read_to_string(&registry.path)
            .map_err(crate::Error::from)
            .and_then(|content| Ok(serde_json::from_str(&content)?));
        match parsed {
            Ok(vehicles) => registry.vehicles = vehicles,
            Err(e) => tracing::warn!("Failed to load {}: {e}", registry.path.display()),
        }
        tracing::debug!("Loaded {} vehicles", registry.vehicles.len());
        registry
    }

    /// Write the registry, creating its directory
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.vehicles)?)?;
        tracing::debug!("Saved {} vehicles to {}", self.vehicles.len(), self.path.display());
        Ok(())
    }

    /// Add or rename a vehicle; returns the previous name
    pub fn add(&mut self, vehicle_id: &str, name: &str) -> Option<String> {
        self.vehicles.insert(vehicle_id.to_string(), name.to_string())
    }

    /// Remove a vehicle; `false` when it was not registered
    pub fn remove(&mut self, vehicle_id: &str) -> bool {
        self.vehicles.shift_remove(vehicle_id).is_some()
    }

    #[must_use]
    pub fn get(&self, vehicle_id: &str) -> Option<&str> {
        self.vehicles.get(vehicle_id).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, vehicle_id: &str) -> bool {
        self.vehicles.contains_key(vehicle_id)
    }

    /// Registered vehicles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vehicles.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let registry = VehicleRegistry::load(temp.path().join(REGISTRY_FILE_NAME));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(REGISTRY_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(VehicleRegistry::load(&path).is_empty());
    }

    #[test]
    fn test_save_and_reload_keeps_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vehicles").join(REGISTRY_FILE_NAME);

        let mut registry = VehicleRegistry::load(&path);
        registry.add("pickup", "Gavril D-Series");
        registry.add("etk800", "ETK 800");
        registry.add("van", "Gavril H-Series");
        assert!(registry.remove("etk800"));
        assert!(!registry.remove("etk800"));
        assert_eq!(registry.add("pickup", "D-Series"), Some("Gavril D-Series".to_string()));
        registry.save().unwrap();

        let reloaded = VehicleRegistry::load(&path);
        assert_eq!(
            reloaded.iter().collect::<Vec<_>>(),
            vec![("pickup", "D-Series"), ("van", "Gavril H-Series")]
        );
        assert_eq!(reloaded.get("van"), Some("Gavril H-Series"));
        assert!(reloaded.contains("pickup"));
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"pickup\": \"D-Series\",\n  \"van\": \"Gavril H-Series\"\n}"
        );
    }
}
