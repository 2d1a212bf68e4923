//! Tiered parsing of material JSON
//!
//! Material files shipped with vehicles are not always strict JSON. Parsing
//! is attempted in tiers, each only when the previous one failed:
//!
//! 1. [`ParseTier::Strict`] - plain `serde_json`
//! 2. [`ParseTier::Lenient`] - comments and trailing commas stripped first
//! 3. [`ParseTier::FallbackText`] - no tree at all; callers handle the raw text

use std::borrow::Cow;

use regex::Regex;

use super::MaterialDocument;
use crate::error::{Error, Result};

lazy_static::lazy_static! {
    static ref LINE_COMMENT: Regex = Regex::new(r"//[^\n]*").expect("valid line comment pattern");

    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment pattern");

    static ref TRAILING_COMMA: Regex = Regex::new(r",(\s*[}\]])").expect("valid trailing comma pattern");
}

/// Which parsing tier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    /// Parsed as strict JSON
    Strict,
    /// Parsed after stripping comments and trailing commas
    Lenient,
    /// Not parsed; handled as raw text
    FallbackText,
}

impl ParseTier {
    /// Get a human-readable name for this tier
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
            Self::FallbackText => "fallback-text",
        }
    }
}

/// A material document together with the tier that parsed it
#[derive(Debug, Clone)]
pub struct ParsedMaterials {
    pub document: MaterialDocument,
    pub tier: ParseTier,
}

/// Parse material text, trying the strict tier and then the lenient tier
///
/// The top level must be a JSON object; anything else counts as a failure
/// of that tier.
///
/// # Errors
/// Returns [`Error::ParseFailure`] when neither structured tier succeeds.
pub fn parse_material_text(text: &str) -> Result<ParsedMaterials> {
    let strict_err = match parse_strict(text) {
        Ok(document) => {
            return Ok(ParsedMaterials {
                document,
                tier: ParseTier::Strict,
            });
        }
        Err(e) => e,
    };
    tracing::debug!("Strict JSON parse failed: {strict_err}");

    match parse_lenient(text) {
        Ok(document) => {
            tracing::debug!("Parsed after stripping comments and trailing commas");
            Ok(ParsedMaterials {
                document,
                tier: ParseTier::Lenient,
            })
        }
        Err(lenient_err) => Err(Error::ParseFailure {
            strict: strict_err.to_string(),
            lenient: lenient_err.to_string(),
        }),
    }
}

/// Strict tier: the text must be a JSON object as-is
pub fn parse_strict(text: &str) -> serde_json::Result<MaterialDocument> {
    serde_json::from_str(text)
}

/// Lenient tier: strip comments and trailing commas, then parse strictly
pub fn parse_lenient(text: &str) -> serde_json::Result<MaterialDocument> {
    parse_strict(&relax(text))
}

/// The first structured tier at which `text` is valid JSON of any shape
///
/// Lets callers tell a non-object document apart from broken text.
#[must_use]
pub fn json_tier(text: &str) -> Option<ParseTier> {
    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        Some(ParseTier::Strict)
    } else if serde_json::from_str::<serde_json::Value>(&relax(text)).is_ok() {
        Some(ParseTier::Lenient)
    } else {
        None
    }
}

/// Remove `//` and `/* */` comments and commas directly before `}` or `]`
///
/// Purely textual: comment markers inside string values are stripped too.
#[must_use]
pub fn relax(text: &str) -> String {
    let text = LINE_COMMENT.replace_all(text, "");
    let text = BLOCK_COMMENT.replace_all(&text, "");
    let text: Cow<'_, str> = TRAILING_COMMA.replace_all(&text, "$1");
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_strict_tier() {
        let parsed = parse_material_text(r#"{"a": 1, "b": {"c": [1, 2]}}"#).unwrap();
        assert_eq!(parsed.tier, ParseTier::Strict);
        assert_eq!(parsed.document["b"]["c"], json!([1, 2]));
    }

    #[test]
    fn test_lenient_comment_and_trailing_comma() {
        let parsed = parse_material_text(r#"{"a": 1, /* c */ "b": 2,}"#).unwrap();
        assert_eq!(parsed.tier, ParseTier::Lenient);
        assert_eq!(
            serde_json::to_string(&parsed.document).unwrap(),
            r#"{"a":1,"b":2}"#
        );
    }

    #[test]
    fn test_lenient_multiline_comments() {
        let text = "{\n  // header\n  \"a\": [1, 2,],\n  /* multi\n     line */\n  \"b\": {\"x\": true,},\n}";
        let parsed = parse_material_text(text).unwrap();
        assert_eq!(parsed.tier, ParseTier::Lenient);
        assert_eq!(parsed.document["a"], json!([1, 2]));
        assert_eq!(parsed.document["b"], json!({"x": true}));
    }

    #[test]
    fn test_block_comment_is_not_greedy() {
        let text = r#"{"a": /* one */ 1, "keep": 2, /* two */ "b": 3}"#;
        let document = parse_lenient(text).unwrap();
        assert_eq!(document.len(), 3);
        assert_eq!(document["keep"], json!(2));
    }

    #[test]
    fn test_strict_input_parses_identically_in_both_tiers() {
        let text = r#"{"car.skin.red": {"name": "car.skin.red", "Stages": [{}, {"metallicFactor": 0.5}]}, "z": null}"#;
        let strict = parse_strict(text).unwrap();
        let lenient = parse_lenient(text).unwrap();
        assert_eq!(strict, lenient);
        assert_eq!(
            strict.keys().collect::<Vec<_>>(),
            lenient.keys().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_unparseable_text_reports_both_tiers() {
        let err = parse_material_text("{ this is: not json").unwrap_err();
        assert!(matches!(err, Error::ParseFailure { .. }));
    }

    #[test]
    fn test_non_object_top_level_fails() {
        assert!(parse_material_text("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_json_tier_of_any_value() {
        assert_eq!(json_tier("[1, 2, 3]"), Some(ParseTier::Strict));
        assert_eq!(json_tier("[1, 2, 3,]"), Some(ParseTier::Lenient));
        assert_eq!(json_tier("{ broken"), None);
    }
}
