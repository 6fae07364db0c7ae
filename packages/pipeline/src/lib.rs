//! Zakonik Pipeline - Repository boundary and stateful operations.
//!
//! Sits on top of [`zakonik_engine`]: registers laws with derived
//! comparison keys, ingests extracted pages into segment sets, and
//! resolves duplicate law records through a two-phase propose/commit
//! protocol. All storage goes through the [`repository::LawRepository`]
//! trait; the concrete backend is the caller's business.

pub mod config;
pub mod dedup;
pub mod error;
pub mod ingest;
pub mod memory;
pub mod models;
pub mod repository;
pub mod worker;

pub use config::{DedupConfig, PassConfig};
pub use dedup::{DedupReport, DedupResolver, DuplicateGroup, MergeStats};
pub use error::{PipelineError, Result};
pub use ingest::{ingest_pages, register_law, IngestOutcome, LawIntake};
pub use memory::InMemoryRepository;
pub use models::{
    LawFilter, LawId, LawRecord, LawUpdate, NewLaw, NewSegment, ReprocessEvent, SegmentId,
    SegmentRecord,
};
pub use repository::LawRepository;
pub use worker::{run_dedup_passes, PassSummary};
