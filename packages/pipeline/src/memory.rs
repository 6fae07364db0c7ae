//! In-memory reference implementation of the repository.
//!
//! Backs the test suite and in-process enrichment runs. Every call locks
//! one mutex for its full duration, which gives the same single-row
//! atomicity a database row write would.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use async_trait::async_trait;

use crate::error::{PipelineError, Result};
use crate::models::{
    LawFilter, LawId, LawRecord, LawUpdate, NewLaw, NewSegment, SegmentId, SegmentRecord,
};
use crate::repository::LawRepository;

#[derive(Default)]
struct State {
    laws: BTreeMap<i64, LawRecord>,
    segments: Vec<SegmentRecord>,
    next_law_id: i64,
}

/// Mutex-backed repository holding everything in process memory.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::expect_used)] // A poisoned lock means a test already panicked
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("repository lock poisoned")
    }
}

#[async_trait]
impl LawRepository for InMemoryRepository {
    async fn insert_law(&self, law: NewLaw) -> Result<LawRecord> {
        let mut state = self.state();
        state.next_law_id += 1;
        let now = Utc::now();
        let record = LawRecord {
            id: LawId(state.next_law_id),
            jurisdiction: law.jurisdiction,
            title: law.title,
            title_normalized: law.title_normalized,
            root_title: law.root_title,
            slug: law.slug,
            gazette_key: law.gazette_key,
            gazette_number: law.gazette_number,
            gazette_date: law.gazette_date,
            source_path: law.source_path,
            document_fingerprint: law.document_fingerprint,
            needs_reprocess: false,
            created_at: now,
            updated_at: now,
        };
        state.laws.insert(record.id.0, record.clone());
        Ok(record)
    }

    async fn get_law(&self, id: LawId) -> Result<LawRecord> {
        self.state()
            .laws
            .get(&id.0)
            .cloned()
            .ok_or(PipelineError::LawNotFound(id))
    }

    async fn list_laws(&self, filter: &LawFilter) -> Result<Vec<LawRecord>> {
        let state = self.state();
        Ok(state
            .laws
            .values()
            .filter(|law| {
                filter
                    .jurisdiction
                    .is_none_or(|j| law.jurisdiction == j)
                    && filter
                        .needs_reprocess
                        .is_none_or(|flag| law.needs_reprocess == flag)
            })
            .cloned()
            .collect())
    }

    async fn update_law(&self, id: LawId, fields: LawUpdate) -> Result<LawRecord> {
        let mut state = self.state();
        let law = state
            .laws
            .get_mut(&id.0)
            .ok_or(PipelineError::LawNotFound(id))?;

        if let Some(source_path) = fields.source_path {
            law.source_path = Some(source_path);
        }
        if let Some(fingerprint) = fields.document_fingerprint {
            law.document_fingerprint = Some(fingerprint);
        }
        if let Some(gazette_date) = fields.gazette_date {
            law.gazette_date = Some(gazette_date);
        }
        if let Some(needs_reprocess) = fields.needs_reprocess {
            law.needs_reprocess = needs_reprocess;
        }
        law.updated_at = Utc::now();
        Ok(law.clone())
    }

    async fn delete_law(&self, id: LawId) -> Result<()> {
        let mut state = self.state();
        if state.laws.remove(&id.0).is_none() {
            return Err(PipelineError::LawNotFound(id));
        }
        state.segments.retain(|segment| segment.law_id != id);
        Ok(())
    }

    async fn insert_segment(&self, segment: NewSegment) -> Result<SegmentRecord> {
        let mut state = self.state();
        if !state.laws.contains_key(&segment.law_id.0) {
            return Err(PipelineError::LawNotFound(segment.law_id));
        }
        let record = SegmentRecord {
            id: SegmentId(Uuid::new_v4()),
            law_id: segment.law_id,
            kind: segment.kind,
            label: segment.label,
            number: segment.number,
            text: segment.text,
            page_hint: segment.page_hint,
            excluded: segment.excluded,
        };
        state.segments.push(record.clone());
        Ok(record)
    }

    async fn get_segments(&self, law_id: LawId) -> Result<Vec<SegmentRecord>> {
        Ok(self
            .state()
            .segments
            .iter()
            .filter(|segment| segment.law_id == law_id)
            .cloned()
            .collect())
    }

    async fn reassign_segment(&self, id: SegmentId, new_law_id: LawId) -> Result<()> {
        let mut state = self.state();
        if !state.laws.contains_key(&new_law_id.0) {
            return Err(PipelineError::LawNotFound(new_law_id));
        }
        let segment = state
            .segments
            .iter_mut()
            .find(|segment| segment.id == id)
            .ok_or(PipelineError::SegmentNotFound(id))?;
        segment.law_id = new_law_id;
        Ok(())
    }

    async fn delete_segment(&self, id: SegmentId) -> Result<()> {
        let mut state = self.state();
        let before = state.segments.len();
        state.segments.retain(|segment| segment.id != id);
        if state.segments.len() == before {
            return Err(PipelineError::SegmentNotFound(id));
        }
        Ok(())
    }

    async fn set_segment_excluded(&self, id: SegmentId, excluded: bool) -> Result<()> {
        let mut state = self.state();
        let segment = state
            .segments
            .iter_mut()
            .find(|segment| segment.id == id)
            .ok_or(PipelineError::SegmentNotFound(id))?;
        segment.excluded = excluded;
        Ok(())
    }
}
