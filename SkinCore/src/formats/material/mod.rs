//! Material descriptor (`*.materials.json`) handling
//!
//! - [`parser`] - tiered strict/lenient parsing
//! - [`skin_groups`] - skin entry discovery and group selection
//! - [`normalize`] - template normalization of an upstream material file
//! - [`specialize`] - post-copy specialization for one skin
//! - [`fallback`] - textual specialization for unparseable files

pub mod fallback;
pub mod normalize;
pub mod parser;
pub mod skin_groups;
pub mod specialize;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub use fallback::{FallbackOutcome, FallbackRule, specialize_text_fallback};
pub use normalize::{MaterialTransform, normalize_stage_two, transform_material_text};
pub use parser::{ParseTier, ParsedMaterials, parse_material_text};
pub use skin_groups::{SkinEntry, SkinGroup, find_skin_groups, select_skin_group};
pub use specialize::{Specialized, specialize_document, specialize_file, specialize_text};

/// A parsed material file: material name to material definition, in file order
pub type MaterialDocument = Map<String, Value>;

/// Placeholder standing in for the skin identifier inside templates
pub const SKIN_PLACEHOLDER: &str = "skinname";

/// Stage 2 color map written into every template
pub const TEMPLATE_BASE_COLOR_MAP: &str = "vehicles/carid/skinname/carid_skin_skinname.dds";

/// Output file name for a normalized material file
///
/// Sources named `skin.*` become `skin.materials.json`, everything else
/// `materials.json`.
#[must_use]
pub fn material_output_name(source_file_name: &str) -> &'static str {
    if source_file_name.starts_with("skin.") {
        "skin.materials.json"
    } else {
        "materials.json"
    }
}

/// Normalize a material file into `target_dir`
///
/// Returns the written path and the transform that produced it.
///
/// # Errors
/// Returns an error if the source cannot be read or the output cannot be written.
pub fn normalize_material_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    target_dir: Q,
    vehicle_id: &str,
) -> Result<(PathBuf, MaterialTransform)> {
    let source = source.as_ref();
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;

    let text = fs::read_to_string(source)?;
    let transform = transform_material_text(&text, vehicle_id);

    let target = target_dir.as_ref().join(material_output_name(file_name));
    fs::write(&target, transform.render()?)?;

    tracing::info!(
        "Wrote material template {} ({} tier)",
        target.display(),
        transform.tier().as_str()
    );
    Ok((target, transform))
}
