//! Duplicate-law resolution.
//!
//! Records arriving from different scrapes, re-extractions or manual
//! imports accumulate as separate laws; this module groups them by
//! composite key, proposes one canonical record per group and, only under
//! an explicit confirmation flag, folds the duplicates' segments into the
//! canonical record and deletes them.
//!
//! Callers must treat each group merge as one transactional unit against
//! the repository; running two apply passes concurrently over the same
//! jurisdiction is not supported.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use zakonik_engine::Jurisdiction;

use crate::config::DedupConfig;
use crate::error::Result;
use crate::models::{LawFilter, LawId, LawRecord, LawUpdate};
use crate::repository::LawRepository;

/// Laws sharing a composite dedup key.
///
/// `ambiguous` groups carry members whose present fingerprints actively
/// disagree; no canonical is proposed and they are never merged.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub jurisdiction: Jurisdiction,
    pub root_title: String,
    pub gazette_key: Option<String>,
    pub document_fingerprint: Option<String>,
    pub member_ids: Vec<LawId>,
    pub proposed_keep: Option<LawId>,
    pub proposed_delete: Vec<LawId>,
    pub ambiguous: bool,
}

/// Serializable dry-run report for one jurisdiction.
#[derive(Debug, Clone, Serialize)]
pub struct DedupReport {
    pub jurisdiction: Jurisdiction,
    pub groups: Vec<DuplicateGroup>,
}

impl DedupReport {
    /// Whether the pass found nothing to merge.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Counters from an apply pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MergeStats {
    pub groups_merged: usize,
    pub groups_skipped_ambiguous: usize,
    pub laws_deleted: usize,
    pub segments_reassigned: usize,

    /// Exact `(number, kind)` collisions discarded; informational, not an
    /// error.
    pub segments_discarded: usize,
}

/// Groups duplicate laws and merges them under caller confirmation.
pub struct DedupResolver<'a> {
    repo: &'a dyn LawRepository,
    config: DedupConfig,
}

impl<'a> DedupResolver<'a> {
    /// Create a resolver with default canonical-selection weights.
    #[must_use]
    pub fn new(repo: &'a dyn LawRepository) -> Self {
        Self::with_config(repo, DedupConfig::default())
    }

    /// Create a resolver with explicit weights.
    #[must_use]
    pub fn with_config(repo: &'a dyn LawRepository, config: DedupConfig) -> Self {
        Self { repo, config }
    }

    /// Propose duplicate groups for one jurisdiction. Read-only.
    pub async fn propose(&self, jurisdiction: Jurisdiction) -> Result<DedupReport> {
        let filter = LawFilter {
            jurisdiction: Some(jurisdiction),
            ..LawFilter::default()
        };
        let laws = self.repo.list_laws(&filter).await?;
        let groups = self.group(jurisdiction, &laws);

        tracing::info!(
            jurisdiction = %jurisdiction,
            laws = laws.len(),
            groups = groups.len(),
            "duplicate grouping completed"
        );
        Ok(DedupReport {
            jurisdiction,
            groups,
        })
    }

    /// Propose and, only when `confirm` is set, merge.
    ///
    /// Without confirmation this is identical to [`propose`] plus zeroed
    /// stats, so unattended callers can never mutate by accident.
    ///
    /// [`propose`]: DedupResolver::propose
    pub async fn execute(
        &self,
        jurisdiction: Jurisdiction,
        confirm: bool,
    ) -> Result<(DedupReport, MergeStats)> {
        let report = self.propose(jurisdiction).await?;
        let mut stats = MergeStats::default();

        if !confirm {
            tracing::info!(
                jurisdiction = %jurisdiction,
                groups = report.groups.len(),
                "dry run, no merges performed"
            );
            return Ok((report, stats));
        }

        for group in &report.groups {
            if group.ambiguous {
                stats.groups_skipped_ambiguous += 1;
                tracing::warn!(
                    jurisdiction = %jurisdiction,
                    root_title = %group.root_title,
                    members = group.member_ids.len(),
                    "skipping group with conflicting fingerprints"
                );
                continue;
            }
            self.merge_group(group, &mut stats).await?;
        }

        tracing::info!(
            jurisdiction = %jurisdiction,
            groups_merged = stats.groups_merged,
            laws_deleted = stats.laws_deleted,
            segments_reassigned = stats.segments_reassigned,
            segments_discarded = stats.segments_discarded,
            "dedup apply completed"
        );
        Ok((report, stats))
    }

    /// Score a member for canonical selection.
    fn score(&self, law: &LawRecord) -> i32 {
        let mut score = 0;
        if !law.slug.is_empty() {
            score += self.config.weight_slug;
        }
        if law.gazette_number.as_deref().is_some_and(|n| !n.is_empty()) {
            score += self.config.weight_gazette_number;
        }
        if law.source_path.as_deref().is_some_and(|p| !p.is_empty()) {
            score += self.config.weight_source_path;
        }
        score
    }

    /// Partition laws into duplicate groups.
    ///
    /// Laws first bucket on (title key, gazette key). Within a bucket,
    /// fully fingerprinted members split into strict per-fingerprint
    /// groups; a bucket with unfingerprinted members forms one loose group
    /// unless its present fingerprints disagree, which makes it ambiguous.
    fn group(&self, jurisdiction: Jurisdiction, laws: &[LawRecord]) -> Vec<DuplicateGroup> {
        let mut buckets: BTreeMap<(String, Option<String>), Vec<&LawRecord>> = BTreeMap::new();
        for law in laws {
            buckets
                .entry((law.title_key().to_string(), law.gazette_key.clone()))
                .or_default()
                .push(law);
        }

        let mut groups = Vec::new();
        for ((title_key, gazette_key), members) in buckets {
            if members.len() < 2 {
                continue;
            }

            let mut fingerprints: Vec<&str> = members
                .iter()
                .filter_map(|law| law.document_fingerprint.as_deref())
                .collect();
            fingerprints.sort_unstable();
            fingerprints.dedup();
            let has_unfingerprinted = members
                .iter()
                .any(|law| law.document_fingerprint.is_none());

            if fingerprints.len() > 1 && has_unfingerprinted {
                groups.push(self.build_group(
                    jurisdiction,
                    &title_key,
                    gazette_key.clone(),
                    None,
                    members,
                    true,
                ));
            } else if fingerprints.len() > 1 {
                for fingerprint in fingerprints {
                    let subset: Vec<&LawRecord> = members
                        .iter()
                        .copied()
                        .filter(|law| law.document_fingerprint.as_deref() == Some(fingerprint))
                        .collect();
                    if subset.len() < 2 {
                        continue;
                    }
                    groups.push(self.build_group(
                        jurisdiction,
                        &title_key,
                        gazette_key.clone(),
                        Some(fingerprint.to_string()),
                        subset,
                        false,
                    ));
                }
            } else {
                let fingerprint = fingerprints.first().map(|fp| (*fp).to_string());
                groups.push(self.build_group(
                    jurisdiction,
                    &title_key,
                    gazette_key.clone(),
                    fingerprint,
                    members,
                    false,
                ));
            }
        }
        groups
    }

    /// Assemble one group, picking the canonical member unless ambiguous.
    ///
    /// Highest score wins; ties break on the lowest id, so reruns always
    /// pick the same record.
    fn build_group(
        &self,
        jurisdiction: Jurisdiction,
        title_key: &str,
        gazette_key: Option<String>,
        document_fingerprint: Option<String>,
        mut members: Vec<&LawRecord>,
        ambiguous: bool,
    ) -> DuplicateGroup {
        members.sort_by_key(|law| law.id);
        let member_ids: Vec<LawId> = members.iter().map(|law| law.id).collect();

        let (proposed_keep, proposed_delete) = if ambiguous {
            (None, Vec::new())
        } else {
            let mut ranked = members.clone();
            ranked.sort_by(|a, b| {
                self.score(b)
                    .cmp(&self.score(a))
                    .then_with(|| a.id.cmp(&b.id))
            });
            let keep = ranked[0].id;
            let delete = member_ids
                .iter()
                .copied()
                .filter(|id| *id != keep)
                .collect();
            (Some(keep), delete)
        };

        DuplicateGroup {
            jurisdiction,
            root_title: title_key.to_string(),
            gazette_key,
            document_fingerprint,
            member_ids,
            proposed_keep,
            proposed_delete,
            ambiguous,
        }
    }

    /// Fold one group's duplicates into its canonical record.
    async fn merge_group(&self, group: &DuplicateGroup, stats: &mut MergeStats) -> Result<()> {
        let Some(keep_id) = group.proposed_keep else {
            return Ok(());
        };

        let canonical = self.repo.get_law(keep_id).await?;
        let mut identities: HashSet<_> = self
            .repo
            .get_segments(keep_id)
            .await?
            .iter()
            .map(|segment| segment.identity())
            .collect();
        let mut has_source_path = canonical.source_path.is_some();

        for duplicate_id in &group.proposed_delete {
            let duplicate = self.repo.get_law(*duplicate_id).await?;

            if !has_source_path && duplicate.source_path.is_some() {
                self.repo
                    .update_law(
                        keep_id,
                        LawUpdate {
                            source_path: duplicate.source_path.clone(),
                            document_fingerprint: duplicate.document_fingerprint.clone(),
                            ..LawUpdate::default()
                        },
                    )
                    .await?;
                has_source_path = true;
            }

            for segment in self.repo.get_segments(*duplicate_id).await? {
                if identities.contains(&segment.identity()) {
                    self.repo.delete_segment(segment.id).await?;
                    stats.segments_discarded += 1;
                } else {
                    self.repo.reassign_segment(segment.id, keep_id).await?;
                    identities.insert(segment.identity());
                    stats.segments_reassigned += 1;
                }
            }

            self.repo.delete_law(*duplicate_id).await?;
            stats.laws_deleted += 1;
        }

        stats.groups_merged += 1;
        tracing::info!(
            keep = %keep_id,
            deleted = group.proposed_delete.len(),
            root_title = %group.root_title,
            "merged duplicate group"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn law(id: i64, slug: &str, gazette_number: Option<&str>, source: Option<&str>) -> LawRecord {
        LawRecord {
            id: LawId(id),
            jurisdiction: Jurisdiction::RepublikaSrpska,
            title: "Zakon o radu".to_string(),
            title_normalized: "zakon o radu".to_string(),
            root_title: "radu".to_string(),
            slug: slug.to_string(),
            gazette_key: Some("30_98".to_string()),
            gazette_number: gazette_number.map(String::from),
            gazette_date: None,
            source_path: source.map(String::from),
            document_fingerprint: source.map(String::from),
            needs_reprocess: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn resolver_over(repo: &crate::memory::InMemoryRepository) -> DedupResolver<'_> {
        DedupResolver::new(repo)
    }

    #[test]
    fn test_score_weights() {
        let repo = crate::memory::InMemoryRepository::new();
        let resolver = resolver_over(&repo);

        assert_eq!(resolver.score(&law(1, "", None, None)), 0);
        assert_eq!(resolver.score(&law(1, "radu", None, None)), 2);
        assert_eq!(resolver.score(&law(1, "radu", Some("30/98"), None)), 4);
        assert_eq!(
            resolver.score(&law(1, "radu", Some("30/98"), Some("scans/a.pdf"))),
            5
        );
    }

    #[test]
    fn test_grouping_splits_on_fingerprint() {
        // Two laws share a fingerprint, the third differs only there:
        // one group of two, the third ungrouped.
        let repo = crate::memory::InMemoryRepository::new();
        let resolver = resolver_over(&repo);
        let laws = vec![
            law(1, "radu", Some("30/98"), Some("scans/a.pdf")),
            law(2, "radu", Some("30/98"), Some("scans/a.pdf")),
            law(3, "radu", Some("30/98"), Some("scans/b.pdf")),
        ];

        let groups = resolver.group(Jurisdiction::RepublikaSrpska, &laws);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].member_ids, vec![LawId(1), LawId(2)]);
        assert!(!groups[0].ambiguous);
        assert_eq!(
            groups[0].document_fingerprint.as_deref(),
            Some("scans/a.pdf")
        );
    }

    #[test]
    fn test_loose_group_without_fingerprints() {
        let repo = crate::memory::InMemoryRepository::new();
        let resolver = resolver_over(&repo);
        let laws = vec![
            law(1, "radu", Some("30/98"), None),
            law(2, "radu", Some("30/98"), None),
        ];

        let groups = resolver.group(Jurisdiction::RepublikaSrpska, &laws);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].document_fingerprint, None);
        assert_eq!(groups[0].proposed_keep, Some(LawId(1)));
    }

    #[test]
    fn test_conflicting_fingerprints_with_gap_are_ambiguous() {
        let repo = crate::memory::InMemoryRepository::new();
        let resolver = resolver_over(&repo);
        let laws = vec![
            law(1, "radu", Some("30/98"), Some("scans/a.pdf")),
            law(2, "radu", Some("30/98"), Some("scans/b.pdf")),
            law(3, "radu", Some("30/98"), None),
        ];

        let groups = resolver.group(Jurisdiction::RepublikaSrpska, &laws);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].ambiguous);
        assert_eq!(groups[0].proposed_keep, None);
        assert!(groups[0].proposed_delete.is_empty());
        assert_eq!(
            groups[0].member_ids,
            vec![LawId(1), LawId(2), LawId(3)]
        );
    }

    #[test]
    fn test_different_gazette_keys_never_group() {
        // An amending act and its base act share a root title; the gazette
        // key keeps them apart.
        let repo = crate::memory::InMemoryRepository::new();
        let resolver = resolver_over(&repo);
        let mut amending = law(2, "radu", Some("7/02"), None);
        amending.gazette_key = Some("7_02".to_string());
        let laws = vec![law(1, "radu", Some("30/98"), None), amending];

        assert!(resolver.group(Jurisdiction::RepublikaSrpska, &laws).is_empty());
    }

    #[test]
    fn test_canonical_prefers_score_then_lowest_id() {
        let repo = crate::memory::InMemoryRepository::new();
        let resolver = resolver_over(&repo);

        // Higher score wins despite higher id.
        let laws = vec![
            law(1, "", None, None),
            law(2, "radu", Some("30/98"), None),
        ];
        let groups = resolver.group(Jurisdiction::RepublikaSrpska, &laws);
        assert_eq!(groups[0].proposed_keep, Some(LawId(2)));
        assert_eq!(groups[0].proposed_delete, vec![LawId(1)]);

        // Equal scores: oldest (lowest id) wins.
        let laws = vec![
            law(2, "radu", Some("30/98"), None),
            law(1, "radu", Some("30/98"), None),
        ];
        let groups = resolver.group(Jurisdiction::RepublikaSrpska, &laws);
        assert_eq!(groups[0].proposed_keep, Some(LawId(1)));
    }

    #[test]
    fn test_report_serializes() {
        let repo = crate::memory::InMemoryRepository::new();
        let resolver = resolver_over(&repo);
        let laws = vec![
            law(1, "radu", Some("30/98"), None),
            law(2, "radu", Some("30/98"), None),
        ];

        let report = DedupReport {
            jurisdiction: Jurisdiction::RepublikaSrpska,
            groups: resolver.group(Jurisdiction::RepublikaSrpska, &laws),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["jurisdiction"], "RS");
        assert_eq!(json["groups"][0]["proposed_keep"], 1);
        assert_eq!(json["groups"][0]["member_ids"], serde_json::json!([1, 2]));
    }
}
