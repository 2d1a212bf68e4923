//! # SkinCore
//!
//! Descriptor engine for `BeamNG.drive` vehicle skin mods.
//!
//! A skin mod is a copy of a vehicle's skin template with every placeholder
//! pointed at the new skin. This crate owns the descriptor rewriting:
//!
//! - **Material JSON** - tiered strict/lenient parsing, reduction of an
//!   upstream material file to one canonical template, and post-copy
//!   specialization with a textual fallback for files no parser accepts
//! - **Jbeam** - flat-text rewriting of the skin slot definition
//! - **Info files** - template placeholders and the mod's `info.json`
//!
//! ## Quick Start
//!
//! ### Normalizing a material file
//!
//! ```
//! use skincore::formats::material::{MaterialTransform, transform_material_text};
//!
//! let source = r#"{
//!     "pickup.skin.desert": {"name": "pickup.skin.desert", "Stages": [{}, {}]},
//!     "pickup_body.skin.desert": {"name": "pickup_body.skin.desert"},
//! }"#;
//! let transform = transform_material_text(source, "pickup");
//! assert!(matches!(transform, MaterialTransform::Normalized { .. }));
//! ```
//!
//! ### Specializing a copied template
//!
//! ```
//! use skincore::prelude::*;
//!
//! let target = SkinTarget::new("pickup", "Red Racer", "pickup_skin_red.dds");
//! let out = specialize_text(r#"{"m": {"name": "pickup.skin.skinname"}}"#, &target);
//! assert_eq!(out.tier(), ParseTier::Strict);
//! ```

pub mod error;
pub mod formats;
pub mod skin;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};
pub use skin::SkinTarget;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::info::{ModInfo, TemplateInfo};
    pub use crate::formats::jbeam::{JbeamValues, jbeam_template, rewrite_jbeam, rewrite_jbeam_file};
    pub use crate::formats::material::{
        MaterialDocument, MaterialTransform, ParseTier, Specialized, material_output_name,
        normalize_material_file, specialize_file, specialize_text, transform_material_text,
    };
    pub use crate::skin::SkinTarget;
    pub use crate::utils::{sanitize_mod_name, sanitize_skin_id};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
