//! Jbeam skin descriptor rewriting
//!
//! Jbeam files are JSON-like but routinely not valid JSON, so they are never
//! parsed. Skins only need a handful of values changed, which is done with
//! targeted substitutions over the raw text.

use std::fs;
use std::path::Path;

use regex::{Captures, Regex};
use serde_json::json;

use crate::error::Result;

lazy_static::lazy_static! {
    static ref AUTHORS_VALUE: Regex = Regex::new(r#"("authors"\s*:\s*")[^"]*(")"#).expect("valid authors pattern");

    static ref NAME_VALUE: Regex = Regex::new(r#"("name"\s*:\s*")[^"]*(")"#).expect("valid name pattern");

    static ref SUFFIXED_KEY: Regex = Regex::new(r#""([^"]*_)[^"]+":"#).expect("valid suffixed key pattern");

    static ref GLOBAL_SKIN_VALUE: Regex = Regex::new(r#"("globalSkin"\s*:\s*")[^"]*(")"#).expect("valid globalSkin pattern");

    static ref EXTRA_SKIN_KEY: Regex = Regex::new(r#""([^"]*_extra\.skin\.)[^"]+"(\s*:)"#).expect("valid extra key pattern");

    static ref EXTRA_SKIN_VALUE: Regex = Regex::new(r#"("(?:name|mapTo)"\s*:\s*"[^"]*_extra\.skin\.)[^"]+""#).expect("valid extra value pattern");
}

/// Values written into a skin's jbeam files
#[derive(Debug, Clone, Copy)]
pub struct JbeamValues<'a> {
    /// Replaces the key suffix, `globalSkin` and `_extra.skin.` suffixes
    pub texture_id: &'a str,
    /// Display name shown in the game's paint selector
    pub display_name: &'a str,
    pub author: &'a str,
}

/// Rewrite jbeam text for one skin
///
/// Substitutions, in order:
/// 1. first `authors` value
/// 2. first `name` value
/// 3. suffix after the last `_` of the first quoted key containing `_`
/// 4. every `globalSkin` value
/// 5. suffix of every `"…_extra.skin.<x>"` key
/// 6. suffix of every `name`/`mapTo` value containing `_extra.skin.`
#[must_use]
pub fn rewrite_jbeam(text: &str, values: &JbeamValues<'_>) -> String {
    let JbeamValues {
        texture_id,
        display_name,
        author,
    } = *values;

    let text = AUTHORS_VALUE.replacen(text, 1, |caps: &Captures<'_>| {
        format!("{}{author}{}", &caps[1], &caps[2])
    });
    let text = NAME_VALUE.replacen(&text, 1, |caps: &Captures<'_>| {
        format!("{}{display_name}{}", &caps[1], &caps[2])
    });
    let text = SUFFIXED_KEY.replacen(&text, 1, |caps: &Captures<'_>| {
        format!("\"{}{texture_id}\":", &caps[1])
    });
    let text = GLOBAL_SKIN_VALUE.replace_all(&text, |caps: &Captures<'_>| {
        format!("{}{texture_id}{}", &caps[1], &caps[2])
    });
    let text = EXTRA_SKIN_KEY.replace_all(&text, |caps: &Captures<'_>| {
        format!("\"{}{texture_id}\"{}", &caps[1], &caps[2])
    });
    let text = EXTRA_SKIN_VALUE.replace_all(&text, |caps: &Captures<'_>| {
        format!("{}{texture_id}\"", &caps[1])
    });

    text.into_owned()
}

/// Rewrite a jbeam file in place
///
/// # Errors
/// Returns an error if the file cannot be read or written.
pub fn rewrite_jbeam_file<P: AsRef<Path>>(path: P, values: &JbeamValues<'_>) -> Result<()> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    fs::write(path, rewrite_jbeam(&text, values))?;
    tracing::debug!("Rewrote jbeam: {}", path.display());
    Ok(())
}

/// Placeholder jbeam written when a vehicle is registered
///
/// # Errors
/// Returns an error if serialization fails.
pub fn jbeam_template(vehicle_id: &str) -> Result<String> {
    let template = json!({
        format!("{vehicle_id}_skin_SKINNAME"): {
            "information": {
                "authors": "author",
                "name": "SKIN NAME",
                "value": 200
            },
            "slotType": "paint_design",
            "globalSkin": "SKINNAME"
        }
    });
    Ok(serde_json::to_string_pretty(&template)?)
}
