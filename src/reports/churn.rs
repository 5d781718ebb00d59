//! Code churn report from git history.
//!
//! Parses `git log --no-merges --numstat` output, keeps stat lines under the
//! configured source subtree that don't look like tests or migrations, and
//! aggregates added/removed line counts per file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::ChurnConfig;
use crate::core::{Report as ReportTrait, ReportContext, Result};
use crate::git::{parse_numstat, GitRepo, StatLine};
use crate::output::write_csv;

/// Artifact file name under the reports directory.
pub const ARTIFACT: &str = "code_churn.csv";

/// CSV header of the churn artifact.
pub const CSV_HEADER: &str = "file,commits,lines_added,lines_removed";

/// Aggregated churn for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChurnRecord {
    pub file: String,
    /// Qualifying stat lines for this file. Increments once per stat line,
    /// not once per distinct commit hash, so a commit touching a file via
    /// multiple stat lines over-counts (known, flagged, intentionally kept).
    pub commits: u64,
    pub lines_added: u64,
    pub lines_removed: u64,
}

/// Churn report generator.
#[derive(Default)]
pub struct Report;

impl Report {
    pub fn new() -> Self {
        Self
    }
}

impl ReportTrait for Report {
    type Output = Summary;

    fn name(&self) -> &'static str {
        "churn"
    }

    fn description(&self) -> &'static str {
        "Aggregate per-file added/removed lines from git history"
    }

    fn requires_git(&self) -> bool {
        true
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<Self::Output> {
        let repo = GitRepo::open(&ctx.repo_root)?;
        let raw = repo.log_numstat()?;
        let log = parse_numstat(&raw);

        let records = aggregate(&log.stats, &ctx.config.churn);

        let output = ctx.artifact_path(ARTIFACT)?;
        write_csv(&output, CSV_HEADER, records.iter().map(csv_row))?;

        let summary = Summary {
            commits_seen: log.commits,
            stat_lines: log.stats.len(),
            files: records.len(),
            lines_added: records.iter().map(|r| r.lines_added).sum(),
            lines_removed: records.iter().map(|r| r.lines_removed).sum(),
            output,
        };

        tracing::info!(
            "churn: {} files from {} commits -> {}",
            summary.files,
            summary.commits_seen,
            summary.output.display()
        );

        Ok(summary)
    }
}

/// Summary of a churn run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Commit delimiters seen in the log.
    pub commits_seen: usize,
    /// Raw stat lines seen (before filtering).
    pub stat_lines: usize,
    /// Files in the aggregated output.
    pub files: usize,
    pub lines_added: u64,
    pub lines_removed: u64,
    /// Path of the CSV artifact.
    pub output: PathBuf,
}

/// Whether a stat line's path counts toward churn.
pub fn qualifies(path: &str, config: &ChurnConfig) -> bool {
    path.starts_with(&config.include_prefix)
        && !config.exclude_markers.iter().any(|m| path.contains(m.as_str()))
}

/// Group qualifying stat lines by exact path, summing additions and
/// deletions. Output is sorted by file name.
pub fn aggregate(stats: &[StatLine], config: &ChurnConfig) -> Vec<ChurnRecord> {
    let mut by_file: BTreeMap<&str, ChurnRecord> = BTreeMap::new();

    for stat in stats {
        if !qualifies(&stat.path, config) {
            continue;
        }

        let record = by_file
            .entry(stat.path.as_str())
            .or_insert_with(|| ChurnRecord {
                file: stat.path.clone(),
                commits: 0,
                lines_added: 0,
                lines_removed: 0,
            });

        record.commits += 1;
        record.lines_added += stat.additions;
        record.lines_removed += stat.deletions;
    }

    by_file.into_values().collect()
}

fn csv_row(record: &ChurnRecord) -> Vec<String> {
    vec![
        record.file.clone(),
        record.commits.to_string(),
        record.lines_added.to_string(),
        record.lines_removed.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(additions: u64, deletions: u64, path: &str) -> StatLine {
        StatLine {
            additions,
            deletions,
            path: path.to_string(),
        }
    }

    #[test]
    fn test_qualifies_src_only() {
        let config = ChurnConfig::default();
        assert!(qualifies("src/a.py", &config));
        assert!(!qualifies("docs/a.py", &config));
        assert!(!qualifies("setup.py", &config));
    }

    #[test]
    fn test_qualifies_excludes_tests_and_migrations() {
        let config = ChurnConfig::default();
        assert!(!qualifies("src/tests/a.py", &config));
        assert!(!qualifies("src/test_a.py", &config));
        assert!(!qualifies("src/a_test.py", &config));
        assert!(!qualifies("src/migrations/0001.py", &config));
        assert!(!qualifies("src/db_migration.py", &config));
        assert!(!qualifies("src/db_migration_tool.py", &config));
    }

    #[test]
    fn test_aggregate_sums_per_file() {
        let config = ChurnConfig::default();
        let stats = vec![
            stat(10, 2, "src/a.py"),
            stat(5, 1, "src/b.py"),
            stat(3, 4, "src/a.py"),
        ];

        let records = aggregate(&stats, &config);
        assert_eq!(records.len(), 2);

        // Sorted by file name.
        assert_eq!(records[0].file, "src/a.py");
        assert_eq!(records[0].commits, 2);
        assert_eq!(records[0].lines_added, 13);
        assert_eq!(records[0].lines_removed, 6);

        assert_eq!(records[1].file, "src/b.py");
        assert_eq!(records[1].commits, 1);
    }

    #[test]
    fn test_aggregate_filters_before_summing() {
        let config = ChurnConfig::default();
        let stats = vec![
            stat(10, 0, "src/a.py"),
            stat(99, 99, "src/tests/a.py"),
            stat(99, 99, "README.md"),
        ];

        let records = aggregate(&stats, &config);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, "src/a.py");
        assert_eq!(records[0].lines_added, 10);
    }

    #[test]
    fn test_aggregate_sum_matches_qualifying_raw_lines() {
        let config = ChurnConfig::default();
        let stats = vec![
            stat(1, 0, "src/a.py"),
            stat(2, 1, "src/a.py"),
            stat(4, 3, "src/a.py"),
            stat(100, 100, "src/test_a.py"),
        ];

        let records = aggregate(&stats, &config);
        let expected_added: u64 = stats
            .iter()
            .filter(|s| qualifies(&s.path, &config))
            .map(|s| s.additions)
            .sum();

        assert_eq!(records[0].lines_added, expected_added);
        assert_eq!(records[0].lines_added, 7);
        assert_eq!(records[0].commits, 3);
    }

    #[test]
    fn test_aggregate_empty() {
        let records = aggregate(&[], &ChurnConfig::default());
        assert!(records.is_empty());
    }
}
