use thiserror::Error;

use crate::models::{LawId, SegmentId};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("law not found: {0}")]
    LawNotFound(LawId),

    #[error("segment not found: {0}")]
    SegmentNotFound(SegmentId),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("worker error: {0}")]
    Worker(String),

    #[error(transparent)]
    Engine(#[from] zakonik_engine::EngineError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
