//! Report trait and shared context.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::Result;
use crate::config::Config;

/// Trait implemented by all report generators.
pub trait Report: Send + Sync {
    /// The summary type produced by this report.
    type Output: Serialize + Send;

    /// Unique identifier for this report.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Whether this report requires git history.
    fn requires_git(&self) -> bool {
        false
    }

    /// Generate the report artifacts and return a summary.
    fn generate(&self, ctx: &ReportContext<'_>) -> Result<Self::Output>;
}

/// Context shared by all reports during a run.
pub struct ReportContext<'a> {
    /// Root of the repository being analyzed.
    pub repo_root: PathBuf,
    /// Directory report artifacts are written to.
    pub reports_dir: PathBuf,
    /// Configuration.
    pub config: &'a Config,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context.
    pub fn new(
        repo_root: impl Into<PathBuf>,
        reports_dir: impl Into<PathBuf>,
        config: &'a Config,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            reports_dir: reports_dir.into(),
            config,
        }
    }

    /// The source subtree under the repository root.
    pub fn src_root(&self) -> PathBuf {
        self.repo_root.join(&self.config.src_dir)
    }

    /// The absolute-path prefix stripped from tool output, with trailing slash.
    pub fn path_prefix(&self) -> String {
        format!("{}/", self.repo_root.display())
    }

    /// Resolve an artifact name under the reports directory, creating it on demand.
    pub fn artifact_path(&self, name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.reports_dir)?;
        Ok(self.reports_dir.join(name))
    }

    /// Resolve a path from a report record back to a file on disk.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        Path::new(relative)
            .is_absolute()
            .then(|| PathBuf::from(relative))
            .unwrap_or_else(|| self.repo_root.join(relative))
    }
}
