//! Multi-jurisdiction dedup passes.
//!
//! One jurisdiction's pass never touches another's records, so passes run
//! as independent tasks with the repository as the only shared resource.

use std::sync::Arc;
use tokio::task::JoinSet;
use zakonik_engine::Jurisdiction;

use crate::config::{DedupConfig, PassConfig};
use crate::dedup::{DedupReport, DedupResolver, MergeStats};
use crate::error::{PipelineError, Result};
use crate::repository::LawRepository;

/// Outcome of one jurisdiction's pass.
#[derive(Debug, Clone)]
pub struct PassSummary {
    pub jurisdiction: Jurisdiction,
    pub report: DedupReport,
    pub stats: MergeStats,
}

/// Run a dedup pass per configured jurisdiction, in parallel.
///
/// Summaries come back in the configured jurisdiction order regardless of
/// task completion order. The first failing pass fails the whole run.
pub async fn run_dedup_passes(
    repo: Arc<dyn LawRepository>,
    pass: &PassConfig,
    dedup: DedupConfig,
) -> Result<Vec<PassSummary>> {
    tracing::info!(
        jurisdictions = pass.jurisdictions.len(),
        apply = pass.apply,
        "starting dedup passes"
    );

    let mut tasks = JoinSet::new();
    for (index, jurisdiction) in pass.jurisdictions.iter().copied().enumerate() {
        let repo = Arc::clone(&repo);
        let apply = pass.apply;
        tasks.spawn(async move {
            let resolver = DedupResolver::with_config(repo.as_ref(), dedup);
            let (report, stats) = resolver.execute(jurisdiction, apply).await?;
            Ok::<_, PipelineError>((
                index,
                PassSummary {
                    jurisdiction,
                    report,
                    stats,
                },
            ))
        });
    }

    let mut summaries: Vec<(usize, PassSummary)> = Vec::with_capacity(pass.jurisdictions.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, summary) =
            joined.map_err(|e| PipelineError::Worker(format!("dedup task panicked: {e}")))??;
        summaries.push((index, summary));
    }
    summaries.sort_by_key(|(index, _)| *index);

    Ok(summaries.into_iter().map(|(_, summary)| summary).collect())
}
