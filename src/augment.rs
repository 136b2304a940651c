//! Post-processing of matches and raw segments.
//!
//! Everything a matched item or raw segment can turn into besides a
//! ranked hit lives here: the organic PLU transform, round-up change
//! math, the no-cheat barcode lockout, embedded-code extraction, and
//! spoken-transcript cleanup.

use crate::catalog::ItemRecord;
use regex::Regex;

/// Organization whose produce barcodes are disabled under the no-cheat
/// preference.
pub const NO_CHEAT_ORGANIZATION: &str = "GIANT_EAGLE";

/// Tag that marks an item as produce.
pub const PRODUCE_TAG: &str = "produce";

/// Display-name marker for organically coded items.
pub const ORGANIC_NAME_PREFIX: &str = "[Organic] ";

/// Display name and code for an item after the organic transform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub name: String,
    pub code: String,
    pub organic: bool,
}

/// Apply the organic transform to a matched item when every condition
/// holds:
///
/// - an organic modifier is configured,
/// - the query segment ends with it,
/// - the item's stringified code is exactly 4 characters (PLU range),
/// - the item name does not already mention "organic".
///
/// The name gets the organic marker and the code gets the standard `9`
/// organic-PLU prefix. Otherwise the item is presented as-is.
pub fn present_item(item: &ItemRecord, segment: &str, organic_modifier: &str) -> Presentation {
    let name = item.name.clone().unwrap_or_default();
    let code = item.value_string();

    let wants_organic = !organic_modifier.is_empty() && segment.ends_with(organic_modifier);
    let already_organic = name.to_lowercase().contains("organic");
    if wants_organic && code.len() == 4 && !already_organic {
        return Presentation {
            name: format!("{}{}", ORGANIC_NAME_PREFIX, name),
            code: format!("9{}", code),
            organic: true,
        };
    }
    Presentation {
        name,
        code,
        organic: false,
    }
}

/// Whether the derived barcode for an item must be rendered non-scannable.
///
/// The code is still computed and displayed textually; only the scannable
/// symbol is disabled.
pub fn barcode_disabled(organization: &str, no_cheat: bool, item: &ItemRecord) -> bool {
    organization == NO_CHEAT_ORGANIZATION && no_cheat && item.has_tag(PRODUCE_TAG)
}

/// Interpret a 1-2 digit segment as a cents amount and compute the change
/// back to the next whole dollar. `1..=99` yields `100 - n`; zero and
/// anything longer than two digits are suppressed.
pub fn try_round_up(query: &str) -> Option<u32> {
    if query.len() != 1 && query.len() != 2 {
        return None;
    }
    if !query.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = query.parse().ok()?;
    if (1..=99).contains(&n) {
        Some(100 - n)
    } else {
        None
    }
}

/// Find an embedded numeric code in a segment: the first run of 4 to 24
/// digits. Feeds the "user entered code" card.
pub fn extract_embedded_code(regex: &Regex, segment: &str) -> Option<String> {
    regex.find(segment).map(|m| m.as_str().to_string())
}

/// Compiled pattern for [`extract_embedded_code`].
pub fn embedded_code_regex() -> Regex {
    // Cannot fail: the pattern is a literal.
    Regex::new(r"\d{4,24}").unwrap()
}

/// Normalize a finished speech transcript before it enters the query
/// pipeline. A transcript consisting only of digits, whitespace, and the
/// `-+/` characters the recognizer inserts between spoken digit groups is
/// collapsed to bare digits; anything else passes through untouched.
pub fn normalize_transcript(transcript: &str) -> String {
    let numeric_ish = transcript
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '+' | '/'));
    if numeric_ish {
        transcript.chars().filter(|c| c.is_ascii_digit()).collect()
    } else {
        transcript.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemValue;

    fn apple(value: &str) -> ItemRecord {
        ItemRecord {
            name: Some("Apple".to_string()),
            value: Some(ItemValue::Text(value.to_string())),
            ..ItemRecord::default()
        }
    }

    #[test]
    fn organic_transform_applies() {
        let item = apple("4011");
        let p = present_item(&item, "apple!", "!");
        assert_eq!(p.name, "[Organic] Apple");
        assert_eq!(p.code, "94011");
        assert!(p.organic);
    }

    #[test]
    fn organic_skipped_for_five_digit_codes() {
        let item = apple("40111");
        let p = present_item(&item, "apple!", "!");
        assert_eq!(p.name, "Apple");
        assert_eq!(p.code, "40111");
        assert!(!p.organic);
    }

    #[test]
    fn organic_requires_modifier_suffix() {
        let item = apple("4011");
        let p = present_item(&item, "apple", "!");
        assert!(!p.organic);
        let p = present_item(&item, "apple!", "");
        assert!(!p.organic);
    }

    #[test]
    fn organic_skipped_when_name_already_organic() {
        let mut item = apple("4011");
        item.name = Some("Organic Apple".to_string());
        let p = present_item(&item, "apple!", "!");
        assert_eq!(p.name, "Organic Apple");
        assert_eq!(p.code, "4011");
    }

    #[test]
    fn numeric_value_participates_in_organic() {
        let item = ItemRecord {
            name: Some("Banana".to_string()),
            value: Some(ItemValue::Number(4011.0)),
            ..ItemRecord::default()
        };
        let p = present_item(&item, "banana!", "!");
        assert_eq!(p.code, "94011");
    }

    #[test]
    fn no_cheat_disables_produce_barcodes() {
        let mut item = apple("4011");
        item.tags = vec!["produce".to_string()];
        assert!(barcode_disabled("GIANT_EAGLE", true, &item));
        assert!(!barcode_disabled("GIANT_EAGLE", false, &item));
        assert!(!barcode_disabled("TARGET", true, &item));
        item.tags.clear();
        assert!(!barcode_disabled("GIANT_EAGLE", true, &item));
    }

    #[test]
    fn round_up_basic() {
        assert_eq!(try_round_up("1"), Some(99));
        assert_eq!(try_round_up("37"), Some(63));
        assert_eq!(try_round_up("99"), Some(1));
    }

    #[test]
    fn round_up_suppressed() {
        assert_eq!(try_round_up("0"), None);
        assert_eq!(try_round_up("00"), None);
        assert_eq!(try_round_up("100"), None);
        assert_eq!(try_round_up(""), None);
        assert_eq!(try_round_up("4x"), None);
    }

    #[test]
    fn embedded_code_extraction() {
        let re = embedded_code_regex();
        assert_eq!(
            extract_embedded_code(&re, "check 4011 please").as_deref(),
            Some("4011")
        );
        assert_eq!(extract_embedded_code(&re, "123"), None);
        // Runs longer than 24 digits still yield the leading 24.
        let long = "1".repeat(30);
        assert_eq!(
            extract_embedded_code(&re, &long).map(|s| s.len()),
            Some(24)
        );
    }

    #[test]
    fn transcript_digit_runs_collapse() {
        assert_eq!(normalize_transcript("4 0 1 1"), "4011");
        assert_eq!(normalize_transcript("40-11"), "4011");
        assert_eq!(normalize_transcript("4+0/1 1"), "4011");
    }

    #[test]
    fn transcript_words_pass_through() {
        assert_eq!(normalize_transcript("ripe bananas"), "ripe bananas");
        assert_eq!(normalize_transcript(""), "");
    }
}
