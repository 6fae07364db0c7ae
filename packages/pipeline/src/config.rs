//! Pipeline configuration.

use zakonik_engine::Jurisdiction;

use crate::error::{PipelineError, Result};

/// Canonical-selection weights for duplicate resolution.
///
/// The defaults were reverse-engineered from the heuristics this resolver
/// replaced; treat them as a starting point to tune against real duplicate
/// corpora, which is why they are configuration rather than literals.
#[derive(Debug, Clone, Copy)]
pub struct DedupConfig {
    /// Score for a non-empty slug.
    pub weight_slug: i32,

    /// Score for a non-empty gazette number.
    pub weight_gazette_number: i32,

    /// Score for a resolved source path.
    pub weight_source_path: i32,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            weight_slug: 2,
            weight_gazette_number: 2,
            weight_source_path: 1,
        }
    }
}

impl DedupConfig {
    /// Read weights from the environment, falling back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            weight_slug: env_i32("ZAKONIK_DEDUP_WEIGHT_SLUG", defaults.weight_slug),
            weight_gazette_number: env_i32(
                "ZAKONIK_DEDUP_WEIGHT_GAZETTE_NUMBER",
                defaults.weight_gazette_number,
            ),
            weight_source_path: env_i32(
                "ZAKONIK_DEDUP_WEIGHT_SOURCE_PATH",
                defaults.weight_source_path,
            ),
        }
    }
}

fn env_i32(name: &str, default: i32) -> i32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration for one multi-jurisdiction dedup pass.
#[derive(Debug, Clone)]
pub struct PassConfig {
    /// Jurisdictions to resolve, each in its own task.
    pub jurisdictions: Vec<Jurisdiction>,

    /// Perform merges. Without this the pass is a dry run that only
    /// produces reports.
    pub apply: bool,
}

impl PassConfig {
    /// Dry-run pass over the given jurisdictions.
    #[must_use]
    pub fn new(jurisdictions: impl IntoIterator<Item = Jurisdiction>) -> Self {
        Self {
            jurisdictions: jurisdictions.into_iter().collect(),
            apply: false,
        }
    }

    /// Enable or disable merging.
    #[must_use]
    pub fn with_apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    /// Read the pass configuration from the environment.
    ///
    /// `ZAKONIK_DEDUP_JURISDICTIONS` is a comma-separated code list
    /// (defaults to all); `ZAKONIK_DEDUP_APPLY` enables merging.
    pub fn from_env() -> Result<Self> {
        let jurisdictions = match std::env::var("ZAKONIK_DEDUP_JURISDICTIONS") {
            Ok(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(|code| code.parse::<Jurisdiction>().map_err(PipelineError::from))
                .collect::<Result<Vec<_>>>()?,
            Err(_) => Jurisdiction::ALL.to_vec(),
        };

        let apply = std::env::var("ZAKONIK_DEDUP_APPLY")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(false);

        Ok(Self {
            jurisdictions,
            apply,
        })
    }
}
