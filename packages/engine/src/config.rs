//! Heuristic tables and validation helpers for the engine.
//!
//! The strip and stem tables below were tuned against observed titles from
//! the supported gazettes. They are configuration, not a complete grammar:
//! extend the lists rather than the matching code when new boilerplate
//! shows up.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{EngineError, Result};

/// Amendment/correction boilerplate stripped from the front of a folded
/// title. At most one prefix is removed; the longest match wins.
///
/// All entries are in folded form (see [`crate::scriptfold::fold`]), so a
/// Cyrillic "ЗАКОН О ИЗМЈЕНАМА..." matches the same entry as its Latin
/// spelling.
pub const AMENDMENT_PREFIXES: &[&str] = &[
    "zakon o izmjenama i dopunama",
    "zakon o izmenama i dopunama",
    "zakon o izmjeni i dopuni",
    "zakon o izmeni i dopuni",
    "zakon o izmjenama",
    "zakon o izmenama",
    "zakon o izmjeni",
    "zakon o izmeni",
    "zakon o dopunama",
    "zakon o dopuni",
    "odluka o proglasenju",
    "odluka o",
    "ispravka",
    "zakon o",
];

/// Connective left behind after an amendment prefix is removed
/// ("... i dopunama **zakona o** radu").
pub const CONNECTIVE_INFIX: &str = "zakona o";

/// Generic nouns stripped from the end of a folded title ("krivicni
/// zakonik" and "krivicnog zakonika" both root to "krivicn").
pub const GENERIC_TITLE_SUFFIXES: &[&str] = &[
    "zakonika",
    "zakonik",
    "zakona",
    "zakon",
    "kodeksa",
    "kodeks",
];

/// Case endings stripped from the final word of a root title, first match
/// wins. Applied once, and only to words longer than
/// [`STEM_MIN_WORD_LEN`] characters, so short tokens are never mangled.
pub const STEM_SUFFIXES: &[&str] = &[
    "og", "om", "em", "im", "ih", "ma", "a", "e", "i", "u",
];

/// Words shorter than this are never stemmed.
pub const STEM_MIN_WORD_LEN: usize = 5;

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 64;

/// Separator used between slug words.
pub const SLUG_SEPARATOR: char = '_';

/// Maximum length in characters of the fallback whole-document excerpt.
pub const FALLBACK_EXCERPT_CHARS: usize = 8000;

/// Label of the fallback segment emitted when no heading is detected.
pub const FALLBACK_SEGMENT_LABEL: &str = "Cijeli tekst";

/// Gazette key pattern: issue number, underscore, 2-digit year.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GAZETTE_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}_\d{2}$").expect("valid regex"));

/// Validate a composite gazette key.
///
/// # Examples
/// ```
/// use zakonik_engine::config::validate_gazette_key;
///
/// assert!(validate_gazette_key("30_98").is_ok());
/// assert!(validate_gazette_key("110_07").is_ok());
/// assert!(validate_gazette_key("30/98").is_err());
/// ```
pub fn validate_gazette_key(key: &str) -> Result<()> {
    if GAZETTE_KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(EngineError::InvalidGazetteKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_gazette_key_valid() {
        assert!(validate_gazette_key("1_98").is_ok());
        assert!(validate_gazette_key("30_98").is_ok());
        assert!(validate_gazette_key("110_07").is_ok());
    }

    #[test]
    fn test_validate_gazette_key_invalid() {
        assert!(validate_gazette_key("").is_err());
        assert!(validate_gazette_key("30/98").is_err());
        assert!(validate_gazette_key("30_1998").is_err()); // 4-digit year
        assert!(validate_gazette_key("_98").is_err());
        assert!(validate_gazette_key("30_").is_err());
        assert!(validate_gazette_key("1234_98").is_err()); // issue too long
    }

    #[test]
    fn test_amendment_prefixes_are_folded() {
        // Every table entry must already be in folded form, otherwise it
        // can never match a folded title.
        for prefix in AMENDMENT_PREFIXES {
            assert_eq!(crate::scriptfold::fold(prefix), **prefix);
        }
        for suffix in GENERIC_TITLE_SUFFIXES {
            assert_eq!(crate::scriptfold::fold(suffix), **suffix);
        }
        assert_eq!(crate::scriptfold::fold(CONNECTIVE_INFIX), CONNECTIVE_INFIX);
    }
}
