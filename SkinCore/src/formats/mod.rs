//! Descriptor formats rewritten when building skins
//!
//! - [`material`] - `*.materials.json` parsing, normalization and specialization
//! - [`jbeam`] - flat-text jbeam rewriting
//! - [`info`] - template and mod info files

pub mod info;
pub mod jbeam;
pub mod material;

pub use info::{ModInfo, TemplateInfo};
pub use jbeam::{JbeamValues, jbeam_template, rewrite_jbeam, rewrite_jbeam_file};
pub use material::{
    MaterialDocument, MaterialTransform, ParseTier, Specialized, material_output_name,
    normalize_material_file, parse_material_text, specialize_file, specialize_text,
    transform_material_text,
};
