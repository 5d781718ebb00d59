//! Halstead metrics report via `radon hal`.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::{Report as ReportTrait, ReportContext, Result};

use super::radon;

/// Artifact file name under the reports directory.
pub const ARTIFACT: &str = "halstead.json";

/// Halstead metrics report generator.
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
        "halstead"
    }

    fn description(&self) -> &'static str {
        "Halstead metrics per file via radon hal"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<Self::Output> {
        let (output, entries) = radon::run_metric(ctx, "hal", ARTIFACT)?;
        tracing::info!("halstead: {} entries -> {}", entries, output.display());
        Ok(Summary { entries, output })
    }
}

/// Summary of a halstead run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Top-level entries in the JSON report.
    pub entries: usize,
    pub output: PathBuf,
}
