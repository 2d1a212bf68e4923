//! `SkinStudio` - `BeamNG.drive` skin mod toolkit
//!
//! Register vehicles as skin templates, then build distributable mod
//! archives from a texture and a few names. Descriptor rewriting lives in
//! [`skincore`]; this crate owns the data directory, the registry and
//! packaging.
use std::path::{Path, PathBuf};

// Re-export skincore
pub use skincore;

pub mod build;
pub mod config;
pub mod error;
pub mod package;
pub mod registry;
pub mod template;

#[cfg(feature = "cli")]
pub mod cli;

pub use build::{BuildOptions, BuildReport, SkinRequest};
pub use config::StudioConfig;
pub use error::{Error, Result};
pub use registry::VehicleRegistry;
pub use template::{TemplateSources, TemplateStore};

/// Main toolkit interface
pub struct Studio {
    config: StudioConfig,
    store: TemplateStore,
    registry: VehicleRegistry,
}

impl Studio {
    /// Open the data directory named by `config`
    #[must_use]
    pub fn new(config: StudioConfig) -> Self {
        let store = TemplateStore::new(&config.data_dir);
        let registry = store.load_registry();
        Self {
            config,
            store,
            registry,
        }
    }

    #[must_use]
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    #[must_use]
    pub fn registry(&self) -> &VehicleRegistry {
        &self.registry
    }

    // Vehicle templates

    pub fn register_vehicle(
        &mut self,
        vehicle_id: &str,
        name: &str,
        sources: &TemplateSources,
    ) -> Result<template::RegistrationReport> {
        self.store
            .register_vehicle(&mut self.registry, vehicle_id, name, sources)
    }

    pub fn unregister_vehicle(&mut self, vehicle_id: &str) -> Result<()> {
        self.store.unregister_vehicle(&mut self.registry, vehicle_id)
    }

    // Builds

    /// Output directory for archives: `explicit`, else the configured or detected mods folder
    pub fn output_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.resolved_mods_dir())
            .ok_or(Error::NoModsDirectory)
    }

    /// Build options for a mod, filling the author and version from the config
    pub fn build_options(
        &self,
        mod_name: &str,
        author: Option<&str>,
        output_dir: Option<&Path>,
    ) -> Result<BuildOptions> {
        Ok(BuildOptions {
            mod_name: mod_name.to_string(),
            author: author.unwrap_or(&self.config.default_author).to_string(),
            version: self.config.mod_version.clone(),
            output_dir: self.output_dir(output_dir)?,
        })
    }

    pub fn build_single(
        &self,
        request: &SkinRequest,
        options: &BuildOptions,
        progress: build::BuildProgressCallback,
    ) -> Result<BuildReport> {
        build::build_single_skin_mod_with_progress(&self.store, request, options, progress)
    }

    pub fn build_multi(
        &self,
        requests: &[SkinRequest],
        options: &BuildOptions,
        progress: build::BuildProgressCallback,
    ) -> Result<BuildReport> {
        build::build_multi_skin_mod_with_progress(&self.store, requests, options, progress)
    }
}
