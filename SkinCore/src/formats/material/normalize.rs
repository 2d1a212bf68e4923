//! Template normalization of a vehicle's material JSON
//!
//! Reduces an upstream material file to one canonical skin template: the
//! largest skin group is kept, its keys collapse to `<prefix>.skin.skinname`,
//! and the second stage is forced into the property set skins rely on.

use serde_json::{Map, Value, json};

use super::parser::{ParseTier, parse_material_text};
use super::skin_groups::{SkinGroup, find_skin_groups, select_skin_group};
use super::{MaterialDocument, SKIN_PLACEHOLDER, TEMPLATE_BASE_COLOR_MAP};
use crate::error::Result;

/// Properties removed from the second stage
pub const STAGE_TWO_FORBIDDEN: [&str; 6] = [
    "instanceDiffuse",
    "baseColorFactor",
    "colorPaletteMap",
    "colorPaletteMapUseUV",
    "metallicMap",
    "metallicMapUseUV",
];

/// Properties removed from the top level of every template entry
pub const ENTRY_FORBIDDEN: [&str; 6] = [
    "colorPaletteMap",
    "colorPaletteMapUseUV",
    "clearCoatFactor",
    "clearCoatRoughnessFactor",
    "instanceDiffuse",
    "metallicFactor",
];

/// Palette properties removed from every retained stage
pub const STAGE_PALETTE_FIELDS: [&str; 2] = ["colorPaletteMap", "colorPaletteMapUseUV"];

/// Number of stages kept per material
pub const RETAINED_STAGES: usize = 2;

/// Properties the second stage must carry, with their defaults
fn stage_two_required() -> [(&'static str, Value); 4] {
    [
        ("baseColorMap", json!(TEMPLATE_BASE_COLOR_MAP)),
        ("diffuseMapUseUV", json!(1)),
        ("metallicFactor", json!(0.5)),
        ("roughnessFactor", json!(0.5)),
    ]
}

/// Result of normalizing one material file
#[derive(Debug, Clone)]
pub enum MaterialTransform {
    /// The largest skin group, rewritten into template form
    Normalized {
        document: MaterialDocument,
        tier: ParseTier,
        /// Label of the selected skin group
        label: String,
        /// Number of source keys that did not make it into the output
        dropped: usize,
    },
    /// No skin entries matched the vehicle; the parsed document is kept as-is
    Unchanged {
        document: MaterialDocument,
        tier: ParseTier,
    },
    /// Neither structured tier could parse the text; it is copied verbatim
    PassThrough { source: String },
}

impl MaterialTransform {
    /// The tier that handled the source text
    #[must_use]
    pub fn tier(&self) -> ParseTier {
        match self {
            Self::Normalized { tier, .. } | Self::Unchanged { tier, .. } => *tier,
            Self::PassThrough { .. } => ParseTier::FallbackText,
        }
    }

    /// The output document, unless the text was passed through
    #[must_use]
    pub fn document(&self) -> Option<&MaterialDocument> {
        match self {
            Self::Normalized { document, .. } | Self::Unchanged { document, .. } => Some(document),
            Self::PassThrough { .. } => None,
        }
    }

    /// Render the output file content (2-space indented JSON, or the verbatim source)
    pub fn render(&self) -> Result<String> {
        match self {
            Self::Normalized { document, .. } | Self::Unchanged { document, .. } => {
                Ok(serde_json::to_string_pretty(document)?)
            }
            Self::PassThrough { source } => Ok(source.clone()),
        }
    }
}

/// Normalize a vehicle's material JSON text into the skin template
#[must_use]
pub fn transform_material_text(source: &str, vehicle_id: &str) -> MaterialTransform {
    let parsed = match parse_material_text(source) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("{e}; copying material file without changes");
            return MaterialTransform::PassThrough {
                source: source.to_string(),
            };
        }
    };

    let Some((document, label)) = normalize_largest_group(&parsed.document, vehicle_id) else {
        tracing::warn!("No skin entries found matching vehicle id: {vehicle_id}");
        return MaterialTransform::Unchanged {
            document: parsed.document,
            tier: parsed.tier,
        };
    };

    let dropped = parsed.document.len() - document.len();
    MaterialTransform::Normalized {
        document,
        tier: parsed.tier,
        label,
        dropped,
    }
}

/// Select the largest skin group of `document` and normalize it
///
/// Returns the template document and the selected label, or `None` when the
/// document has no skin entries for the vehicle.
#[must_use]
pub fn normalize_largest_group(
    document: &MaterialDocument,
    vehicle_id: &str,
) -> Option<(MaterialDocument, String)> {
    let groups = find_skin_groups(document, vehicle_id);
    let selected = select_skin_group(&groups)?;

    tracing::debug!(
        "Selected skin label: {} ({} entries) from {:?}",
        selected.label,
        selected.len(),
        groups.iter().map(|g| g.label).collect::<Vec<_>>()
    );

    Some((normalize_skin_group(selected), selected.label.to_string()))
}

/// Build the template document from the selected group
///
/// When several entries collapse onto the same normalized key the first
/// one in document order is kept.
#[must_use]
pub fn normalize_skin_group(group: &SkinGroup<'_>) -> MaterialDocument {
    let mut output = MaterialDocument::new();

    for entry in &group.entries {
        let key = entry.normalized_key();
        if output.contains_key(&key) {
            tracing::warn!("Dropping {}: {key} already taken by an earlier entry", entry.key);
            continue;
        }

        let mut value = entry.value.clone();
        if let Value::Object(material) = &mut value {
            normalize_material(material, group.label);
        }

        tracing::debug!("Transformed: {} -> {key}", entry.key);
        output.insert(key, value);
    }

    output
}

/// Rewrite one material entry of the selected group into template form
pub fn normalize_material(material: &mut Map<String, Value>, label: &str) {
    replace_label(material, "name", label);
    replace_label(material, "mapTo", label);

    if let Some(Value::Array(stages)) = material.get_mut("Stages") {
        // Only the color map follows the skin; normal/metallic maps are shared textures
        for stage in stages.iter_mut().filter_map(Value::as_object_mut) {
            replace_label(stage, "baseColorMap", label);
        }
        if let Some(Value::Object(stage_two)) = stages.get_mut(1) {
            normalize_stage_two(stage_two);
        }
    }

    for field in ENTRY_FORBIDDEN {
        if material.shift_remove(field).is_some() {
            tracing::debug!("Removed field: {field}");
        }
    }

    if let Some(Value::Array(stages)) = material.get_mut("Stages") {
        let original_len = stages.len();
        stages.truncate(RETAINED_STAGES);
        for stage in stages.iter_mut().filter_map(Value::as_object_mut) {
            for field in STAGE_PALETTE_FIELDS {
                stage.shift_remove(field);
            }
        }
        tracing::debug!("Trimmed Stages: {original_len} -> {}", stages.len());
    }
}

/// Force the second stage into the canonical property set
///
/// Forbidden properties are removed, missing required ones are added with
/// their defaults, and `baseColorMap` is always reset to the template path.
/// Applying this twice is the same as applying it once.
pub fn normalize_stage_two(stage: &mut Map<String, Value>) {
    for prop in STAGE_TWO_FORBIDDEN {
        if stage.shift_remove(prop).is_some() {
            tracing::debug!("Removed Stage 2 property: {prop}");
        }
    }

    for (prop, default) in stage_two_required() {
        if prop == "baseColorMap" {
            if let Some(old) = stage.insert(prop.to_string(), default) {
                tracing::debug!("Replaced Stage 2 baseColorMap: {old}");
            }
        } else if !stage.contains_key(prop) {
            tracing::debug!("Added Stage 2 property: {prop} = {default}");
            stage.insert(prop.to_string(), default);
        }
    }
}

/// Substring-replace the skin label with the placeholder in a string field
fn replace_label(material: &mut Map<String, Value>, field: &str, label: &str) {
    if let Some(Value::String(text)) = material.get_mut(field) {
        *text = text.replace(label, SKIN_PLACEHOLDER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test values are objects"),
        }
    }

    #[test]
    fn test_no_groups_is_identity() {
        let source = r#"{"wheel": {"name": "wheel", "Stages": [{}, {}, {}, {}]}, "glass": {"mapTo": "glass"}}"#;
        let transform = transform_material_text(source, "car");
        assert!(matches!(transform, MaterialTransform::Unchanged { .. }));
        assert_eq!(
            transform.document().unwrap(),
            &object(serde_json::from_str(source).unwrap())
        );
        assert_eq!(
            transform.document().unwrap().keys().collect::<Vec<_>>(),
            vec!["wheel", "glass"]
        );
    }

    #[test]
    fn test_collapse_of_suffix_variant() {
        let source = r#"{
            "car.skin.red": {"name": "car.skin.red", "Stages": [{}, {"baseColorMap": "x"}, {}, {}]},
            "car.skin_lbe.red": {"name": "x"}
        }"#;
        let transform = transform_material_text(source, "car");
        let MaterialTransform::Normalized { document, label, .. } = &transform else {
            panic!("expected a normalized template");
        };
        assert_eq!(label, "red");
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["car.skin.skinname"]);

        let entry = &document["car.skin.skinname"];
        assert_eq!(entry["name"], json!("car.skin.skinname"));
        let stages = entry["Stages"].as_array().unwrap();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[1]["baseColorMap"], json!(TEMPLATE_BASE_COLOR_MAP));
    }

    #[test]
    fn test_largest_group_wins() {
        let source = r#"{
            "car.skin.small": {"name": "car.skin.small"},
            "car.skin.big": {"name": "car.skin.big", "mapTo": "car.skin.big"},
            "car_body.skin_lbe.big": {"name": "car_body.skin_lbe.big"},
            "headlight": {"name": "headlight"}
        }"#;
        let MaterialTransform::Normalized { document, label, dropped, .. } =
            transform_material_text(source, "car")
        else {
            panic!("expected a normalized template");
        };
        assert_eq!(label, "big");
        assert_eq!(dropped, 2);
        assert_eq!(
            document.keys().collect::<Vec<_>>(),
            vec!["car.skin.skinname", "car_body.skin.skinname"]
        );
        assert_eq!(document["car.skin.skinname"]["mapTo"], json!("car.skin.skinname"));
        assert_eq!(
            document["car_body.skin.skinname"]["name"],
            json!("car_body.skin_lbe.skinname")
        );
    }

    #[test]
    fn test_label_replaced_only_in_color_maps() {
        let mut material = object(json!({
            "name": "pickup.skin.desert_camo",
            "Stages": [
                {
                    "baseColorMap": "vehicles/pickup/desert_camo/pickup_skin_desert_camo.dds",
                    "normalMap": "vehicles/pickup/desert_camo/pickup_nm.dds"
                },
                {"baseColorMap": "whatever", "metallicMap": "vehicles/pickup/desert_camo/m.dds"}
            ]
        }));
        normalize_material(&mut material, "desert_camo");

        let stages = material["Stages"].as_array().unwrap();
        assert_eq!(
            stages[0]["baseColorMap"],
            json!("vehicles/pickup/skinname/pickup_skin_skinname.dds")
        );
        assert_eq!(stages[0]["normalMap"], json!("vehicles/pickup/desert_camo/pickup_nm.dds"));
        assert!(stages[1].get("metallicMap").is_none());
    }

    #[test]
    fn test_forbidden_fields_removed() {
        let mut material = object(json!({
            "name": "car.skin.red",
            "colorPaletteMap": "p.dds",
            "colorPaletteMapUseUV": 1,
            "clearCoatFactor": 1,
            "clearCoatRoughnessFactor": 0.1,
            "instanceDiffuse": true,
            "metallicFactor": 1,
            "version": 1.5,
            "Stages": [
                {"colorPaletteMap": "p.dds", "colorPaletteMapUseUV": 1, "normalMap": "n.dds"},
                {"colorPaletteMap": "p.dds"},
                {"colorPaletteMap": "p.dds"}
            ]
        }));
        normalize_material(&mut material, "red");

        assert_eq!(
            material.keys().collect::<Vec<_>>(),
            vec!["name", "version", "Stages"]
        );
        assert_eq!(material["Stages"][0], json!({"normalMap": "n.dds"}));
        assert_eq!(
            material["Stages"][1],
            json!({
                "baseColorMap": TEMPLATE_BASE_COLOR_MAP,
                "diffuseMapUseUV": 1,
                "metallicFactor": 0.5,
                "roughnessFactor": 0.5
            })
        );
    }

    #[test]
    fn test_stage_two_keeps_existing_factors() {
        let mut stage = object(json!({
            "baseColorFactor": [1, 1, 1, 1],
            "metallicFactor": 0.9,
            "baseColorMap": "old.dds",
            "roughnessFactor": 0.2
        }));
        normalize_stage_two(&mut stage);
        assert_eq!(
            stage.keys().collect::<Vec<_>>(),
            vec!["metallicFactor", "baseColorMap", "roughnessFactor", "diffuseMapUseUV"]
        );
        assert_eq!(stage["metallicFactor"], json!(0.9));
        assert_eq!(stage["roughnessFactor"], json!(0.2));
        assert_eq!(stage["baseColorMap"], json!(TEMPLATE_BASE_COLOR_MAP));
    }

    #[test]
    fn test_stage_two_idempotent() {
        let mut once = object(json!({
            "metallicMap": "m.dds",
            "instanceDiffuse": true,
            "baseColorMap": "b.dds",
            "opacity": 1
        }));
        normalize_stage_two(&mut once);
        let mut twice = once.clone();
        normalize_stage_two(&mut twice);
        assert_eq!(once, twice);
        assert_eq!(
            once.keys().collect::<Vec<_>>(),
            twice.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_single_stage_left_alone() {
        let mut material = object(json!({"Stages": [{"baseColorMap": "a_red.dds"}]}));
        normalize_material(&mut material, "red");
        assert_eq!(material["Stages"], json!([{"baseColorMap": "a_skinname.dds"}]));
    }

    #[test]
    fn test_non_object_entry_kept() {
        let source = r#"{"car.skin.red": "car.skin.red"}"#;
        let transform = transform_material_text(source, "car");
        assert_eq!(
            transform.document().unwrap()["car.skin.skinname"],
            json!("car.skin.red")
        );
    }

    #[test]
    fn test_unparseable_passes_through() {
        let source = "{ \"car.skin.red\": { broken";
        let transform = transform_material_text(source, "car");
        assert_eq!(transform.tier(), ParseTier::FallbackText);
        assert_eq!(transform.render().unwrap(), source);
    }

    #[test]
    fn test_lenient_source_normalized() {
        let source = "{\n  // exported by hand\n  \"car.skin.red\": {\"name\": \"car.skin.red\",},\n}";
        let transform = transform_material_text(source, "car");
        assert_eq!(transform.tier(), ParseTier::Lenient);
        assert_eq!(
            transform.render().unwrap(),
            "{\n  \"car.skin.skinname\": {\n    \"name\": \"car.skin.skinname\"\n  }\n}"
        );
    }
}
