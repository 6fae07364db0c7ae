//! Official-gazette citation parsing.
//!
//! Laws cite their publication as free text in either script ("Službeni
//! glasnik RS", br. 30/98 / "Службени гласник РС", бр. 30/98). The only
//! load-bearing part is the issue/year pair; this module extracts it and
//! produces the composite gazette key used as a dedup grouping component.

use regex::Regex;
use std::sync::LazyLock;

/// Issue/year pattern: 1-3 digit issue, slash, 2- or 4-digit year.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ISSUE_YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3})\s*/\s*(\d{4}|\d{2})").expect("valid regex"));

/// One gazette issue reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GazetteRef {
    /// Issue number within the year.
    pub issue: u32,

    /// Two-digit publication year (four-digit years fold to two).
    pub year: u8,
}

impl GazetteRef {
    /// Parse the first issue/year pair out of a free-text citation.
    ///
    /// Returns `None` when no pair is present; never fails on malformed
    /// text.
    ///
    /// # Examples
    /// ```
    /// use zakonik_engine::GazetteRef;
    ///
    /// let r = GazetteRef::parse("\u{201e}Službeni glasnik RS\u{201c}, br. 30/98").unwrap();
    /// assert_eq!(r.key(), "30_98");
    ///
    /// let r = GazetteRef::parse("Сл. гласник РС, бр. 110/2007").unwrap();
    /// assert_eq!(r.key(), "110_07");
    /// ```
    #[must_use]
    pub fn parse(citation: &str) -> Option<Self> {
        let caps = ISSUE_YEAR_PATTERN.captures(citation)?;
        let issue: u32 = caps.get(1)?.as_str().parse().ok()?;
        let year_raw: u32 = caps.get(2)?.as_str().parse().ok()?;
        Some(Self {
            issue,
            year: (year_raw % 100) as u8,
        })
    }

    /// Gazette number as printed, e.g. "30/98".
    #[must_use]
    pub fn number(&self) -> String {
        format!("{}/{:02}", self.issue, self.year)
    }

    /// Composite gazette key, e.g. "30_98".
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}_{:02}", self.issue, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latin_citation() {
        let r = GazetteRef::parse("\u{201e}Službeni glasnik RS\u{201c}, br. 30/98");
        assert_eq!(r, Some(GazetteRef { issue: 30, year: 98 }));
    }

    #[test]
    fn test_parse_cyrillic_citation_same_key() {
        let latin = GazetteRef::parse("\u{201e}Službeni glasnik RS\u{201c}, br. 30/98");
        let cyrillic = GazetteRef::parse("\u{201e}Службени гласник РС\u{201c}, бр. 30/98");
        assert_eq!(latin, cyrillic);
    }

    #[test]
    fn test_parse_four_digit_year_folds() {
        let r = GazetteRef::parse("Službene novine FBiH, broj 110/2007").expect("parses");
        assert_eq!(r.key(), "110_07");
        assert_eq!(r.number(), "110/07");
    }

    #[test]
    fn test_parse_year_with_leading_zero() {
        let r = GazetteRef::parse("br. 7/02").expect("parses");
        assert_eq!(r.key(), "7_02");
    }

    #[test]
    fn test_parse_no_pair() {
        assert_eq!(GazetteRef::parse("Službeni glasnik RS"), None);
        assert_eq!(GazetteRef::parse(""), None);
    }

    #[test]
    fn test_key_is_valid_gazette_key() {
        let r = GazetteRef::parse("br. 30/98").expect("parses");
        assert!(crate::config::validate_gazette_key(&r.key()).is_ok());
    }
}
