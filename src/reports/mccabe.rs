//! Cyclomatic complexity report via `radon cc`.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::{Report as ReportTrait, ReportContext, Result};

use super::radon;

/// Artifact file name under the reports directory.
pub const ARTIFACT: &str = "mccabe.json";

/// McCabe complexity report generator.
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
        "mccabe"
    }

    fn description(&self) -> &'static str {
        "Cyclomatic complexity per file via radon cc"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<Self::Output> {
        let (output, entries) = radon::run_metric(ctx, "cc", ARTIFACT)?;
        tracing::info!("mccabe: {} entries -> {}", entries, output.display());
        Ok(Summary { entries, output })
    }
}

/// Summary of a mccabe run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Top-level entries in the JSON report.
    pub entries: usize,
    pub output: PathBuf,
}
