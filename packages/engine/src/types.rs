//! Core data types for the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::profile::{self, ScriptProfile};

/// Jurisdictions whose gazettes the system ingests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// Federation of Bosnia and Herzegovina.
    #[serde(rename = "FBIH")]
    FederacijaBih,

    /// Republika Srpska.
    #[serde(rename = "RS")]
    RepublikaSrpska,

    /// Brčko District.
    #[serde(rename = "BD")]
    BrckoDistrikt,

    /// Montenegro.
    #[serde(rename = "ME")]
    CrnaGora,

    /// Serbia.
    #[serde(rename = "SR")]
    Srbija,
}

impl Jurisdiction {
    /// All supported jurisdictions.
    pub const ALL: &'static [Jurisdiction] = &[
        Self::FederacijaBih,
        Self::RepublikaSrpska,
        Self::BrckoDistrikt,
        Self::CrnaGora,
        Self::Srbija,
    ];

    /// Get the jurisdiction code used in storage and reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FederacijaBih => "FBIH",
            Self::RepublikaSrpska => "RS",
            Self::BrckoDistrikt => "BD",
            Self::CrnaGora => "ME",
            Self::Srbija => "SR",
        }
    }

    /// The script profile driving folding and heading recognition.
    #[must_use]
    pub fn profile(&self) -> &'static ScriptProfile {
        profile::for_jurisdiction(*self)
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FBIH" => Ok(Self::FederacijaBih),
            "RS" => Ok(Self::RepublikaSrpska),
            "BD" => Ok(Self::BrckoDistrikt),
            "ME" => Ok(Self::CrnaGora),
            "SR" => Ok(Self::Srbija),
            _ => Err(EngineError::UnknownJurisdiction(s.to_string())),
        }
    }
}

/// One page of extracted text, as supplied by the document-to-pages
/// extractor. Page numbers are 1-based and in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,

    /// Raw extracted text of the page.
    pub text: String,
}

impl Page {
    /// Create a new page.
    #[must_use]
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Kind of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// A numbered article detected from a heading.
    Article,

    /// Whole-document fallback emitted when no heading was detected.
    /// Flagged downstream as likely incomplete.
    Fulltext,
}

impl SegmentKind {
    /// Get the string value used in storage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Fulltext => "fulltext",
        }
    }
}

/// A segment produced by the segmenter, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentDraft {
    /// Kind of segment.
    pub kind: SegmentKind,

    /// Human-readable heading (e.g. "Član 6").
    pub label: String,

    /// Ordinal extracted from the heading; `None` for the fallback segment.
    pub number: Option<u32>,

    /// Segment body text, trimmed.
    pub text: String,

    /// 1-based page where the segment's heading occurred.
    pub page_hint: u32,
}

impl SegmentDraft {
    /// Whether this is the whole-document fallback segment.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.kind == SegmentKind::Fulltext
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jurisdiction_round_trip() {
        for j in Jurisdiction::ALL {
            assert_eq!(j.as_str().parse::<Jurisdiction>().ok(), Some(*j));
        }
    }

    #[test]
    fn test_jurisdiction_parse_case_insensitive() {
        assert_eq!("rs".parse::<Jurisdiction>().ok(), Some(Jurisdiction::RepublikaSrpska));
        assert_eq!("fbih".parse::<Jurisdiction>().ok(), Some(Jurisdiction::FederacijaBih));
    }

    #[test]
    fn test_jurisdiction_parse_unknown() {
        assert!("XX".parse::<Jurisdiction>().is_err());
        assert!("".parse::<Jurisdiction>().is_err());
    }

    #[test]
    fn test_jurisdiction_serialization() {
        assert_eq!(
            serde_json::to_string(&Jurisdiction::RepublikaSrpska).unwrap(),
            "\"RS\""
        );
        assert_eq!(
            serde_json::from_str::<Jurisdiction>("\"ME\"").unwrap(),
            Jurisdiction::CrnaGora
        );
    }

    #[test]
    fn test_segment_kind_as_str() {
        assert_eq!(SegmentKind::Article.as_str(), "article");
        assert_eq!(SegmentKind::Fulltext.as_str(), "fulltext");
    }

    #[test]
    fn test_segment_draft_is_fallback() {
        let draft = SegmentDraft {
            kind: SegmentKind::Fulltext,
            label: "Cijeli tekst".to_string(),
            number: None,
            text: String::new(),
            page_hint: 1,
        };
        assert!(draft.is_fallback());
    }
}
