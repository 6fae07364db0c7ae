//! Law intake and page ingest.
//!
//! `register_law` derives every comparison key from raw extracted metadata
//! and inserts the record; `ingest_pages` turns extracted pages into the
//! law's stored segment set, screening each segment for conversion residue
//! and flagging the law for reprocessing when any is found.

use chrono::NaiveDate;
use zakonik_engine::{
    artifact, document_fingerprint, GazetteRef, Jurisdiction, Page, Segmenter, TitleKey,
};

use crate::error::Result;
use crate::models::{LawId, LawRecord, LawUpdate, NewLaw, NewSegment, ReprocessEvent};
use crate::repository::LawRepository;

/// Raw metadata for one law, as delivered by the extraction collaborator.
#[derive(Debug, Clone)]
pub struct LawIntake {
    pub jurisdiction: Jurisdiction,

    /// Title as extracted, any script.
    pub title: String,

    /// Free-text gazette citation, if the extractor found one.
    pub gazette_citation: Option<String>,

    pub gazette_date: Option<NaiveDate>,

    /// Resolved source file path or URL.
    pub source: Option<String>,
}

impl LawIntake {
    /// Create an intake with just jurisdiction and title.
    #[must_use]
    pub fn new(jurisdiction: Jurisdiction, title: impl Into<String>) -> Self {
        Self {
            jurisdiction,
            title: title.into(),
            gazette_citation: None,
            gazette_date: None,
            source: None,
        }
    }

    /// Attach a gazette citation.
    #[must_use]
    pub fn with_gazette_citation(mut self, citation: impl Into<String>) -> Self {
        self.gazette_citation = Some(citation.into());
        self
    }

    /// Attach a resolved source path or URL.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Derive comparison keys from an intake and insert the law.
pub async fn register_law(repo: &dyn LawRepository, intake: LawIntake) -> Result<LawRecord> {
    let keys = TitleKey::derive(&intake.title);
    let gazette = intake
        .gazette_citation
        .as_deref()
        .and_then(GazetteRef::parse);
    if let Some(gazette) = gazette {
        debug_assert!(
            zakonik_engine::config::validate_gazette_key(&gazette.key()).is_ok(),
            "gazette key should be valid by construction"
        );
    }
    let fingerprint = intake
        .source
        .as_deref()
        .map(document_fingerprint)
        .filter(|fp| !fp.is_empty());

    let law = repo
        .insert_law(NewLaw {
            jurisdiction: intake.jurisdiction,
            title: intake.title,
            title_normalized: keys.normalized,
            root_title: keys.root,
            slug: keys.slug,
            gazette_key: gazette.map(|g| g.key()),
            gazette_number: gazette.map(|g| g.number()),
            gazette_date: intake.gazette_date,
            source_path: intake.source,
            document_fingerprint: fingerprint,
        })
        .await?;

    tracing::info!(
        law_id = %law.id,
        jurisdiction = %law.jurisdiction,
        root_title = %law.root_title,
        gazette_key = law.gazette_key.as_deref().unwrap_or("-"),
        "registered law"
    );
    Ok(law)
}

/// Result of one page ingest.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub law_id: LawId,

    /// Segments stored, including excluded ones.
    pub segments_inserted: usize,

    /// Segments stored but excluded as conversion residue.
    pub segments_excluded: usize,

    /// Whether the whole-document fallback segment was used.
    pub fallback_used: bool,

    /// Set when residue was found; forward to the re-extraction pipeline.
    pub reprocess: Option<ReprocessEvent>,
}

/// Segment extracted pages and store them as the law's segment set.
///
/// Replaces any segments from a previous extraction, so re-ingest after
/// reprocessing does not accumulate stale copies. A clean ingest clears
/// the law's reprocess flag; one that finds residue sets it and returns
/// the event for the external pipeline.
pub async fn ingest_pages(
    repo: &dyn LawRepository,
    law_id: LawId,
    pages: &[Page],
) -> Result<IngestOutcome> {
    let law = repo.get_law(law_id).await?;
    let drafts = Segmenter::new(law.jurisdiction).segment(pages);

    let previous = repo.get_segments(law_id).await?;
    for segment in &previous {
        repo.delete_segment(segment.id).await?;
    }
    if !previous.is_empty() {
        tracing::debug!(
            law_id = %law_id,
            replaced = previous.len(),
            "replacing segments from previous extraction"
        );
    }

    let mut outcome = IngestOutcome {
        law_id,
        segments_inserted: 0,
        segments_excluded: 0,
        fallback_used: false,
        reprocess: None,
    };

    for draft in drafts {
        outcome.fallback_used |= draft.is_fallback();
        let residue = artifact::detect_markup_residue(&draft.text);
        if let Some(reason) = residue {
            outcome.segments_excluded += 1;
            outcome.reprocess.get_or_insert_with(|| ReprocessEvent {
                law_id,
                reason: reason.as_str().to_string(),
            });
        }
        repo.insert_segment(NewSegment::from_draft(law_id, draft, residue.is_some()))
            .await?;
        outcome.segments_inserted += 1;
    }

    repo.update_law(
        law_id,
        LawUpdate {
            needs_reprocess: Some(outcome.reprocess.is_some()),
            ..LawUpdate::default()
        },
    )
    .await?;

    tracing::info!(
        law_id = %law_id,
        segments = outcome.segments_inserted,
        excluded = outcome.segments_excluded,
        fallback = outcome.fallback_used,
        "ingest completed"
    );
    Ok(outcome)
}
