//! CLI command for material template normalization

use std::path::Path;

use skincore::formats::material::{MaterialTransform, normalize_material_file, transform_material_text};

/// Normalize a material JSON file, printing or writing the template
pub fn execute(path: &Path, vehicle: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let transform = match output {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let (written, transform) = normalize_material_file(path, dir, vehicle)?;
            println!("Wrote {}", written.display());
            transform
        }
        None => {
            let text = std::fs::read_to_string(path)?;
            let transform = transform_material_text(&text, vehicle);
            println!("{}", transform.render()?);
            transform
        }
    };

    match &transform {
        MaterialTransform::Normalized { label, dropped, tier, .. } => eprintln!(
            "Selected skin '{label}', dropped {dropped} entries ({} parse)",
            tier.as_str()
        ),
        MaterialTransform::Unchanged { .. } => {
            eprintln!("No skin entries for '{vehicle}'; output equals input");
        }
        MaterialTransform::PassThrough { .. } => {
            eprintln!("Could not parse the material file; output is the source text");
        }
    }
    Ok(())
}
