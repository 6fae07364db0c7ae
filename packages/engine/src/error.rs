//! Error types for the engine.
//!
//! Malformed input *text* never produces an error: the segmenter falls back
//! to a whole-document segment and the classifiers return `Option`. Errors
//! are reserved for invalid identifiers supplied by callers.

use thiserror::Error;

/// Main error type for the engine library.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unknown jurisdiction code.
    #[error("Unknown jurisdiction: '{0}'. Expected one of FBIH, RS, BD, ME, SR")]
    UnknownJurisdiction(String),

    /// Invalid gazette key format.
    #[error("Invalid gazette key: '{0}'. Expected <issue>_<2-digit year> (e.g. 30_98)")]
    InvalidGazetteKey(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
