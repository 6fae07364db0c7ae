//! The repository boundary.
//!
//! The engine is storage-agnostic: everything stateful goes through this
//! trait. Implementations guarantee single-row atomicity per call; callers
//! performing multi-row sequences (a duplicate-group merge, a segment
//! replacement) are responsible for wrapping them transactionally when the
//! backing store supports it. Repository failures propagate unchanged; no
//! retries happen at this layer.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    LawFilter, LawId, LawRecord, LawUpdate, NewLaw, NewSegment, SegmentId, SegmentRecord,
};

/// Storage operations for laws and their segments.
#[async_trait]
pub trait LawRepository: Send + Sync {
    /// Insert a law, assigning its id and timestamps.
    async fn insert_law(&self, law: NewLaw) -> Result<LawRecord>;

    /// Get a law by id.
    async fn get_law(&self, id: LawId) -> Result<LawRecord>;

    /// List laws matching the filter, ordered by id.
    async fn list_laws(&self, filter: &LawFilter) -> Result<Vec<LawRecord>>;

    /// Apply a partial update to a law.
    async fn update_law(&self, id: LawId, fields: LawUpdate) -> Result<LawRecord>;

    /// Delete a law and, in cascade, its segments.
    async fn delete_law(&self, id: LawId) -> Result<()>;

    /// Insert a segment, assigning its id.
    async fn insert_segment(&self, segment: NewSegment) -> Result<SegmentRecord>;

    /// List a law's segments in insertion order.
    async fn get_segments(&self, law_id: LawId) -> Result<Vec<SegmentRecord>>;

    /// Move a segment to another law.
    async fn reassign_segment(&self, id: SegmentId, new_law_id: LawId) -> Result<()>;

    /// Delete a single segment.
    async fn delete_segment(&self, id: SegmentId) -> Result<()>;

    /// Mark a segment as excluded from (or restored to) consumer indexes.
    async fn set_segment_excluded(&self, id: SegmentId, excluded: bool) -> Result<()>;
}
