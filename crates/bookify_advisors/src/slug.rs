// --- File: crates/bookify_advisors/src/slug.rs ---
//! Advisor id derivation.
//!
//! The id is a stable slug computed from the display name: lowercase, with
//! anything outside ASCII alphanumerics and the Hebrew block replaced by a
//! hyphen, runs collapsed and edges trimmed. Names that normalize to nothing
//! get a synthetic time-based id from the caller.

use chrono::{DateTime, Utc};

const HEBREW_BLOCK: std::ops::RangeInclusive<char> = '\u{0590}'..='\u{05FF}';

/// Derive a slug id from an advisor name. Returns `None` when the name
/// contains no usable characters.
pub fn derive_advisor_id(name: &str) -> Option<String> {
    let normalized: String = name
        .to_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || HEBREW_BLOCK.contains(&ch) {
                ch
            } else {
                '-'
            }
        })
        .collect();

    let id = normalized
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Fallback id for names that normalize to nothing.
pub fn synthetic_advisor_id(now: DateTime<Utc>) -> String {
    format!("advisor-{}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn plain_names_become_hyphenated_slugs() {
        assert_eq!(derive_advisor_id("Jane Doe"), Some("jane-doe".to_string()));
        assert_eq!(derive_advisor_id("O'Brien"), Some("o-brien".to_string()));
    }

    #[test]
    fn separator_runs_collapse_and_edges_trim() {
        assert_eq!(
            derive_advisor_id("  Jane -- Doe!  "),
            Some("jane-doe".to_string())
        );
        assert_eq!(derive_advisor_id("--x--"), Some("x".to_string()));
    }

    #[test]
    fn hebrew_letters_are_kept() {
        assert_eq!(
            derive_advisor_id("דנה כהן"),
            Some("דנה-כהן".to_string())
        );
    }

    #[test]
    fn unusable_names_yield_none() {
        assert_eq!(derive_advisor_id(""), None);
        assert_eq!(derive_advisor_id("!!! ???"), None);
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(
            derive_advisor_id("Jane Doe"),
            derive_advisor_id("Jane Doe")
        );
    }

    #[test]
    fn synthetic_id_is_time_based() {
        let t = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(
            synthetic_advisor_id(t),
            format!("advisor-{}", t.timestamp_millis())
        );
    }
}
