//! CLI commands for vehicle templates

use std::path::Path;

use crate::Studio;
use crate::cli::progress::{CAR, DISK, GEAR, print_step};
use crate::template::TemplateSources;

/// Register a vehicle
pub fn add(
    studio: &mut Studio,
    carid: &str,
    name: &str,
    materials: &Path,
    jbeam: &Path,
    info: &Path,
) -> anyhow::Result<()> {
    if let Some(existing) = studio.registry().get(carid) {
        println!("Replacing existing template for {carid} ({existing})");
    }

    print_step(1, 2, GEAR, &format!("Normalizing {}...", materials.display()));
    let sources = TemplateSources {
        material_json: materials.to_path_buf(),
        jbeam: jbeam.to_path_buf(),
        info_json: info.to_path_buf(),
    };
    let report = studio.register_vehicle(carid, name, &sources)?;

    print_step(2, 2, DISK, &format!("Template written to {}", report.template_dir.display()));
    match &report.skin_label {
        Some(label) => println!(
            "  Built from skin '{label}' ({} parse)",
            report.material_tier.as_str()
        ),
        None => println!(
            "  No skin entries for '{carid}' found; material file kept as-is ({} parse)",
            report.material_tier.as_str()
        ),
    }
    println!("{CAR}Registered {carid} ({name})");
    Ok(())
}

/// Remove a vehicle
pub fn remove(studio: &mut Studio, carid: &str) -> anyhow::Result<()> {
    studio.unregister_vehicle(carid)?;
    println!("Removed {carid}");
    Ok(())
}

/// List registered vehicles
pub fn list(studio: &Studio) -> anyhow::Result<()> {
    let registry = studio.registry();
    if registry.is_empty() {
        println!("No vehicles registered ({})", registry.path().display());
        return Ok(());
    }

    for (carid, name) in registry.iter() {
        let marker = if studio.store().has_template(carid) {
            ""
        } else {
            " (template missing)"
        };
        println!("  {carid:<20} {name}{marker}");
    }
    println!("\n{} vehicle(s)", registry.len());
    Ok(())
}
