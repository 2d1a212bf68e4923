//! Skin entry discovery and group selection
//!
//! Vehicle material files name their paintable materials
//! `<prefix>.skin<suffix>.<label>`, e.g. `pickup.skin.default` or
//! `pickup_body.skin_lbe.factory`. Entries that share a label came from the
//! same upstream skin; the most complete group becomes the template.

use serde_json::Value;

use super::MaterialDocument;

/// Suffixes appended to the vehicle id to form the recognized prefixes,
/// in priority order (bare id first)
pub const PREFIX_SUFFIXES: [&str; 6] = ["", "_body", "_extra", "_aftermarket", "_main", "_mechanical"];

/// The key prefixes recognized for a vehicle, in priority order
#[must_use]
pub fn skin_prefixes(vehicle_id: &str) -> Vec<String> {
    PREFIX_SUFFIXES
        .iter()
        .map(|suffix| format!("{vehicle_id}{suffix}"))
        .collect()
}

/// Match `key` against `<prefix>.skin<anything but '.'>.<label>`
///
/// Returns the label (everything after the first dot that follows `.skin`).
#[must_use]
pub fn match_skin_key<'k>(key: &'k str, prefix: &str) -> Option<&'k str> {
    let rest = key.strip_prefix(prefix)?.strip_prefix(".skin")?;
    let dot = rest.find('.')?;
    let label = &rest[dot + 1..];
    (!label.is_empty()).then_some(label)
}

/// One top-level material entry that belongs to a skin
#[derive(Debug, Clone)]
pub struct SkinEntry<'a> {
    /// The key as it appears in the source document
    pub key: &'a str,
    /// The prefix that matched (vehicle id plus optional part suffix)
    pub prefix: String,
    pub value: &'a Value,
}

impl SkinEntry<'_> {
    /// Suffix-free key this entry is written under in the template
    #[must_use]
    pub fn normalized_key(&self) -> String {
        format!("{}.skin.{}", self.prefix, super::SKIN_PLACEHOLDER)
    }
}

/// All entries sharing one skin label, in document order
#[derive(Debug, Clone)]
pub struct SkinGroup<'a> {
    pub label: &'a str,
    pub entries: Vec<SkinEntry<'a>>,
}

impl SkinGroup<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group the document's skin entries by label
///
/// Keys are visited in document order and each key is tested against the
/// prefixes in priority order; the first matching prefix claims it. Groups
/// are returned in the order their label was first seen.
#[must_use]
pub fn find_skin_groups<'a>(document: &'a MaterialDocument, vehicle_id: &str) -> Vec<SkinGroup<'a>> {
    let prefixes = skin_prefixes(vehicle_id);
    let mut groups: Vec<SkinGroup<'a>> = Vec::new();

    for (key, value) in document {
        let Some((prefix, label)) = prefixes
            .iter()
            .find_map(|prefix| match_skin_key(key, prefix).map(|label| (prefix, label)))
        else {
            continue;
        };

        tracing::debug!("Found skin entry: {key} (label: {label})");

        let entry = SkinEntry {
            key: key.as_str(),
            prefix: prefix.clone(),
            value,
        };

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.entries.push(entry),
            None => groups.push(SkinGroup {
                label,
                entries: vec![entry],
            }),
        }
    }

    groups
}

/// Pick the group with the most entries; ties go to the first seen
#[must_use]
pub fn select_skin_group<'g, 'a>(groups: &'g [SkinGroup<'a>]) -> Option<&'g SkinGroup<'a>> {
    let mut selected: Option<&SkinGroup<'a>> = None;
    for group in groups {
        if selected.is_none_or(|best| group.len() > best.len()) {
            selected = Some(group);
        }
    }
    selected
}
