//! Stored records and repository data-transfer types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use zakonik_engine::{Jurisdiction, SegmentDraft, SegmentKind};

/// Repository-assigned law identity.
///
/// Ids are monotonically increasing at insertion time, so the lowest id in
/// a duplicate group is the oldest record; canonical-selection ties break
/// on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LawId(pub i64);

impl fmt::Display for LawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Repository-assigned segment identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub Uuid);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One statute/regulation as known to the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawRecord {
    pub id: LawId,
    pub jurisdiction: Jurisdiction,

    /// Title as extracted.
    pub title: String,

    /// Folded title (see `zakonik_engine::scriptfold`).
    pub title_normalized: String,

    /// Root title with amendment boilerplate stripped; may equal the
    /// normalized title when no boilerplate was present.
    pub root_title: String,

    /// Bounded slug of the root title.
    pub slug: String,

    /// Composite "issue_year" key of the publishing gazette issue.
    pub gazette_key: Option<String>,

    /// Gazette number as printed, e.g. "30/98".
    pub gazette_number: Option<String>,

    /// Publication date; null until enriched.
    pub gazette_date: Option<NaiveDate>,

    /// Resolved source file path or URL.
    pub source_path: Option<String>,

    /// Fingerprint derived from the resolved source (see
    /// `zakonik_engine::fingerprint`).
    pub document_fingerprint: Option<String>,

    /// Set when ingest detected conversion residue; consumed by the
    /// external re-extraction pipeline.
    pub needs_reprocess: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LawRecord {
    /// The title component of the dedup grouping key: the root title when
    /// available, the normalized title otherwise.
    #[must_use]
    pub fn title_key(&self) -> &str {
        if self.root_title.is_empty() {
            &self.title_normalized
        } else {
            &self.root_title
        }
    }
}

/// Fields for creating a law. The repository assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewLaw {
    pub jurisdiction: Jurisdiction,
    pub title: String,
    pub title_normalized: String,
    pub root_title: String,
    pub slug: String,
    pub gazette_key: Option<String>,
    pub gazette_number: Option<String>,
    pub gazette_date: Option<NaiveDate>,
    pub source_path: Option<String>,
    pub document_fingerprint: Option<String>,
}

/// Partial law update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LawUpdate {
    pub source_path: Option<String>,
    pub document_fingerprint: Option<String>,
    pub gazette_date: Option<NaiveDate>,
    pub needs_reprocess: Option<bool>,
}

/// Filter for listing laws.
#[derive(Debug, Clone, Copy, Default)]
pub struct LawFilter {
    pub jurisdiction: Option<Jurisdiction>,
    pub needs_reprocess: Option<bool>,
}

/// One addressable unit of a law's text, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub id: SegmentId,

    /// Owning law; a segment never outlives it.
    pub law_id: LawId,

    pub kind: SegmentKind,

    /// Human-readable heading, e.g. "Član 6".
    pub label: String,

    /// Ordinal from the heading; `None` for the fallback segment.
    pub number: Option<u32>,

    pub text: String,

    /// 1-based page where the heading occurred.
    pub page_hint: u32,

    /// Excluded from consumer indexes (conversion residue).
    pub excluded: bool,
}

impl SegmentRecord {
    /// Identity used to detect exact duplicates during merge: unique per
    /// law over `(number, kind)`.
    #[must_use]
    pub fn identity(&self) -> (Option<u32>, SegmentKind) {
        (self.number, self.kind)
    }
}

/// Fields for creating a segment. The repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewSegment {
    pub law_id: LawId,
    pub kind: SegmentKind,
    pub label: String,
    pub number: Option<u32>,
    pub text: String,
    pub page_hint: u32,
    pub excluded: bool,
}

impl NewSegment {
    /// Build a storable segment from a segmenter draft.
    #[must_use]
    pub fn from_draft(law_id: LawId, draft: SegmentDraft, excluded: bool) -> Self {
        Self {
            law_id,
            kind: draft.kind,
            label: draft.label,
            number: draft.number,
            text: draft.text,
            page_hint: draft.page_hint,
            excluded,
        }
    }
}

/// Signal consumed by the external pipeline that re-triggers extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReprocessEvent {
    pub law_id: LawId,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_law_id_ordering_and_display() {
        assert!(LawId(1) < LawId(2));
        assert_eq!(LawId(42).to_string(), "42");
    }

    #[test]
    fn test_law_id_serializes_transparently() {
        assert_eq!(serde_json::to_string(&LawId(7)).unwrap(), "7");
    }

    #[test]
    fn test_title_key_falls_back_to_normalized() {
        let mut law = LawRecord {
            id: LawId(1),
            jurisdiction: Jurisdiction::RepublikaSrpska,
            title: "Zakon o radu".to_string(),
            title_normalized: "zakon o radu".to_string(),
            root_title: "radu".to_string(),
            slug: "radu".to_string(),
            gazette_key: None,
            gazette_number: None,
            gazette_date: None,
            source_path: None,
            document_fingerprint: None,
            needs_reprocess: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(law.title_key(), "radu");

        law.root_title = String::new();
        assert_eq!(law.title_key(), "zakon o radu");
    }

    #[test]
    fn test_segment_identity() {
        let segment = SegmentRecord {
            id: SegmentId(Uuid::new_v4()),
            law_id: LawId(1),
            kind: SegmentKind::Article,
            label: "Član 6".to_string(),
            number: Some(6),
            text: "tekst".to_string(),
            page_hint: 1,
            excluded: false,
        };
        assert_eq!(segment.identity(), (Some(6), SegmentKind::Article));
    }

    #[test]
    fn test_reprocess_event_serializes() {
        let event = ReprocessEvent {
            law_id: LawId(3),
            reason: "control_word_run".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"law_id":3,"reason":"control_word_run"}"#);
    }
}
