//! Post-copy specialization of template material files
//!
//! Once a template has been copied into a skin's folder, its `skinname`
//! placeholders are pointed at the concrete skin: material names and
//! `mapTo` targets get the skin identifier, and the second stage's
//! `baseColorMap` gets the skin's texture path.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::MaterialDocument;
use super::fallback::{FallbackOutcome, specialize_text_fallback};
use super::parser::{ParseTier, json_tier, parse_material_text};
use crate::error::{Error, Result};
use crate::skin::SkinTarget;

/// Marker after which a material name carries the skin identifier
pub const SKIN_SEGMENT: &str = ".skin.";

/// Result of specializing one material text
#[derive(Debug, Clone)]
pub enum Specialized {
    /// Parsed and rewritten as a document
    Structured {
        document: MaterialDocument,
        tier: ParseTier,
        /// Number of material entries visited
        materials: usize,
    },
    /// Valid JSON without a top-level object; nothing to rewrite
    Skipped { text: String, tier: ParseTier },
    /// Rewritten textually
    FallbackText(FallbackOutcome),
}

impl Specialized {
    #[must_use]
    pub fn tier(&self) -> ParseTier {
        match self {
            Self::Structured { tier, .. } | Self::Skipped { tier, .. } => *tier,
            Self::FallbackText(_) => ParseTier::FallbackText,
        }
    }

    /// Render the rewritten file content
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Structured { document, .. } => Ok(serde_json::to_string_pretty(document)?),
            Self::Skipped { text, .. } => Ok(text.clone()),
            Self::FallbackText(outcome) => Ok(outcome.text.clone()),
        }
    }
}

/// Point every material entry of `document` at the target skin
///
/// Returns the number of material (object-valued) entries visited.
pub fn specialize_document(document: &mut MaterialDocument, target: &SkinTarget) -> usize {
    let texture_path = target.texture_path();
    let mut materials = 0;

    for (key, value) in document.iter_mut() {
        let Some(material) = value.as_object_mut() else {
            continue;
        };
        materials += 1;
        tracing::debug!("Processing material: {key}");

        retarget_skin_field(material, "name", &target.skin_id);
        retarget_skin_field(material, "mapTo", &target.skin_id);

        if let Some(Value::Array(stages)) = material.get_mut("Stages")
            && let Some(Value::Object(stage_two)) = stages.get_mut(1)
        {
            let previous = stage_two.insert(
                "baseColorMap".to_string(),
                Value::String(texture_path.clone()),
            );
            match previous {
                Some(old) => tracing::debug!("Stage 2 baseColorMap: {old} -> {texture_path}"),
                None => tracing::debug!("Added Stage 2 baseColorMap: {texture_path}"),
            }
        }
    }

    materials
}

/// Specialize material text, falling back to textual rewrites when no
/// structured tier can parse it
#[must_use]
pub fn specialize_text(text: &str, target: &SkinTarget) -> Specialized {
    match parse_material_text(text) {
        Ok(mut parsed) => {
            let materials = specialize_document(&mut parsed.document, target);
            Specialized::Structured {
                document: parsed.document,
                tier: parsed.tier,
                materials,
            }
        }
        Err(e) => {
            if let Some(tier) = json_tier(text) {
                tracing::debug!("Top level is not an object ({} parse); leaving as-is", tier.as_str());
                return Specialized::Skipped {
                    text: text.to_string(),
                    tier,
                };
            }
            tracing::warn!("{e}; falling back to textual rewrites");
            Specialized::FallbackText(specialize_text_fallback(text, &target.skin_id))
        }
    }
}

/// Specialize a material file in place
///
/// The file is written back unless it was skipped. When the text fallback
/// could not find all of its expected patterns the partially rewritten file
/// stays on disk and [`Error::PartialFieldFailure`] is returned.
pub fn specialize_file<P: AsRef<Path>>(path: P, target: &SkinTarget) -> Result<ParseTier> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let specialized = specialize_text(&text, target);
    if !matches!(specialized, Specialized::Skipped { .. }) {
        fs::write(path, specialized.render()?)?;
    }

    if let Specialized::FallbackText(outcome) = &specialized
        && !outcome.is_complete()
    {
        return Err(Error::PartialFieldFailure {
            file: path.display().to_string(),
            rules: outcome.missed_summary(),
        });
    }

    Ok(specialized.tier())
}

/// Replace everything after the last `.skin.` in a string field
fn retarget_skin_field(material: &mut Map<String, Value>, field: &str, skin_id: &str) {
    let Some(Value::String(current)) = material.get_mut(field) else {
        return;
    };
    let Some(pos) = current.rfind(SKIN_SEGMENT) else {
        return;
    };
    let old = current.clone();
    current.truncate(pos + SKIN_SEGMENT.len());
    current.push_str(skin_id);
    tracing::debug!("Updated {field}: {old} -> {current}");
}
