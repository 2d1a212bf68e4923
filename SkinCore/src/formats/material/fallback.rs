//! Textual specialization for material files no structured tier can parse
//!
//! A bounded set of regex substitutions covering the same fields as the
//! structured path. The generic `.skin.` rules apply to the first match only;
//! the `_extra.skin.` rules apply to every match.

use regex::{Captures, Regex};

lazy_static::lazy_static! {
    static ref SKIN_REFERENCE: Regex = Regex::new(r#""([^"]+\.skin\.)[^"]+""#).expect("valid skin reference pattern");

    static ref SKIN_NAME: Regex = Regex::new(r#"("name"\s*:\s*"[^"]+\.skin\.)[^"]+""#).expect("valid skin name pattern");

    static ref SKIN_MAP_TO: Regex = Regex::new(r#"("mapTo"\s*:\s*"[^"]+\.skin\.)[^"]+""#).expect("valid skin mapTo pattern");

    static ref EXTRA_REFERENCE: Regex = Regex::new(r#""([^"]*_extra\.skin\.)[^"]+""#).expect("valid extra reference pattern");

    static ref EXTRA_NAME: Regex = Regex::new(r#"("name"\s*:\s*"[^"]*_extra\.skin\.)[^"]+""#).expect("valid extra name pattern");

    static ref EXTRA_MAP_TO: Regex = Regex::new(r#"("mapTo"\s*:\s*"[^"]*_extra\.skin\.)[^"]+""#).expect("valid extra mapTo pattern");
}

/// One textual substitution rule, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackRule {
    /// First quoted string containing `.skin.`
    SkinReference,
    /// First `name` value containing `.skin.`
    Name,
    /// First `mapTo` value containing `.skin.`
    MapTo,
    /// Every quoted string containing `_extra.skin.`
    ExtraReference,
    /// Every `name` value containing `_extra.skin.`
    ExtraName,
    /// Every `mapTo` value containing `_extra.skin.`
    ExtraMapTo,
}

impl FallbackRule {
    pub const ALL: [Self; 6] = [
        Self::SkinReference,
        Self::Name,
        Self::MapTo,
        Self::ExtraReference,
        Self::ExtraName,
        Self::ExtraMapTo,
    ];

    /// Get a human-readable name for this rule
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SkinReference => "skin reference",
            Self::Name => "name",
            Self::MapTo => "mapTo",
            Self::ExtraReference => "_extra.skin reference",
            Self::ExtraName => "_extra.skin name",
            Self::ExtraMapTo => "_extra.skin mapTo",
        }
    }

    /// Whether a file is expected to match this rule at all
    ///
    /// Most vehicles have no `_extra` part, so only the generic rules count.
    #[must_use]
    pub fn is_expected(self) -> bool {
        matches!(self, Self::SkinReference | Self::Name | Self::MapTo)
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::SkinReference => &*SKIN_REFERENCE,
            Self::Name => &*SKIN_NAME,
            Self::MapTo => &*SKIN_MAP_TO,
            Self::ExtraReference => &*EXTRA_REFERENCE,
            Self::ExtraName => &*EXTRA_NAME,
            Self::ExtraMapTo => &*EXTRA_MAP_TO,
        }
    }

    /// Maximum number of substitutions (0 = all)
    fn limit(self) -> usize {
        if self.is_expected() { 1 } else { 0 }
    }

    /// Whether the capture group starts inside the opening quote
    fn captures_inside_quote(self) -> bool {
        matches!(self, Self::SkinReference | Self::ExtraReference)
    }
}

/// Result of the text fallback
#[derive(Debug, Clone)]
pub struct FallbackOutcome {
    pub text: String,
    /// Expected rules that found nothing to rewrite
    pub missed: Vec<FallbackRule>,
}

impl FallbackOutcome {
    /// Whether every expected rule matched
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missed.is_empty()
    }

    /// Comma-separated names of the missed rules
    #[must_use]
    pub fn missed_summary(&self) -> String {
        self.missed
            .iter()
            .map(|rule| rule.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Rewrite skin references in unparseable material text
#[must_use]
pub fn specialize_text_fallback(text: &str, skin_id: &str) -> FallbackOutcome {
    let mut text = text.to_string();
    let mut missed = Vec::new();

    for rule in FallbackRule::ALL {
        let (rewritten, count) = apply_rule(&text, rule, skin_id);
        if count == 0 {
            if rule.is_expected() {
                missed.push(rule);
            }
            continue;
        }
        tracing::debug!("Fallback rule '{}' rewrote {count} reference(s)", rule.as_str());
        text = rewritten;
    }

    FallbackOutcome { text, missed }
}

fn apply_rule(text: &str, rule: FallbackRule, skin_id: &str) -> (String, usize) {
    let pattern = rule.pattern();
    let limit = rule.limit();
    let count = match limit {
        0 => pattern.find_iter(text).count(),
        n => pattern.find_iter(text).take(n).count(),
    };
    if count == 0 {
        return (text.to_string(), 0);
    }

    let rewritten = pattern.replacen(text, limit, |caps: &Captures<'_>| {
        if rule.captures_inside_quote() {
            format!("\"{}{skin_id}\"", &caps[1])
        } else {
            format!("{}{skin_id}\"", &caps[1])
        }
    });
    (rewritten.into_owned(), count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generic_rules_first_match_only() {
        let text = r#"{
  "car.skin.skinname": {
    "name": "car.skin.skinname",
    "mapTo": "car.skin.skinname",
  },
  "car_body.skin.skinname": {
    "name": "car_body.skin.skinname",
    "mapTo": "car_body.skin.skinname",
  },
}"#;
        let outcome = specialize_text_fallback(text, "red_racer");
        assert!(outcome.is_complete());
        assert_eq!(
            outcome.text,
            r#"{
  "car.skin.red_racer": {
    "name": "car.skin.red_racer",
    "mapTo": "car.skin.red_racer",
  },
  "car_body.skin.skinname": {
    "name": "car_body.skin.skinname",
    "mapTo": "car_body.skin.skinname",
  },
}"#
        );
    }

    #[test]
    fn test_extra_rules_all_matches() {
        let text = r#"{"a_extra.skin.x": {"name": "a_extra.skin.x"}, "b_extra.skin.y": {"mapTo": "b_extra.skin.y"},"#;
        let outcome = specialize_text_fallback(text, "red");
        assert!(!outcome.text.contains(".skin.x"));
        assert!(!outcome.text.contains(".skin.y"));
        assert_eq!(outcome.text.matches("_extra.skin.red").count(), 4);
    }

    #[test]
    fn test_missed_rules_reported() {
        let outcome = specialize_text_fallback(r#"{"glass": {"name": "glass",}"#, "red");
        assert_eq!(
            outcome.missed,
            vec![FallbackRule::SkinReference, FallbackRule::Name, FallbackRule::MapTo]
        );
        assert_eq!(outcome.missed_summary(), "skin reference, name, mapTo");
        assert_eq!(outcome.text, r#"{"glass": {"name": "glass",}"#);
    }

    #[test]
    fn test_replacement_is_literal() {
        let outcome = specialize_text_fallback(r#"{"name": "car.skin.old"}"#, "cash$1");
        assert_eq!(outcome.text, r#"{"name": "car.skin.cash$1"}"#);
    }
}
