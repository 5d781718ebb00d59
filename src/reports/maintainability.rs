//! Maintainability index report via `radon mi`.
//!
//! Produces the prettified JSON artifact plus a flat `file,mi,rank` CSV.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::core::{Report as ReportTrait, ReportContext, Result};
use crate::output::write_csv;

use super::radon;

/// JSON artifact file name under the reports directory.
pub const ARTIFACT_JSON: &str = "maintainability_index.json";

/// CSV artifact file name under the reports directory.
pub const ARTIFACT_CSV: &str = "maintainability_index.csv";

/// CSV header of the flattened artifact.
pub const CSV_HEADER: &str = "file,mi,rank";

/// Maintainability report generator.
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
        "maintainability"
    }

    fn description(&self) -> &'static str {
        "Maintainability index per file via radon mi"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<Self::Output> {
        let (json_output, entries) = radon::run_metric(ctx, "mi", ARTIFACT_JSON)?;

        let text = std::fs::read_to_string(&json_output)?;
        let value: Value = serde_json::from_str(&text)?;
        let rows = flatten(&value);

        let csv_output = ctx.artifact_path(ARTIFACT_CSV)?;
        write_csv(&csv_output, CSV_HEADER, rows.clone())?;

        tracing::info!(
            "maintainability: {} entries -> {} / {}",
            entries,
            json_output.display(),
            csv_output.display()
        );

        Ok(Summary {
            entries,
            csv_rows: rows.len(),
            json_output,
            csv_output,
        })
    }
}

/// Summary of a maintainability run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Top-level entries in the JSON report.
    pub entries: usize,
    /// Rows written to the CSV (error entries are skipped).
    pub csv_rows: usize,
    pub json_output: PathBuf,
    pub csv_output: PathBuf,
}

/// Flatten radon's `{file: {"mi": .., "rank": ..}}` mapping into CSV rows.
///
/// radon emits `{"error": ...}` for files it cannot parse; those entries are
/// skipped here but kept verbatim in the JSON artifact.
fn flatten(value: &Value) -> Vec<Vec<String>> {
    let Value::Object(map) = value else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for (file, entry) in map {
        let (Some(mi), Some(rank)) = (entry.get("mi"), entry.get("rank")) else {
            continue;
        };
        let (Some(mi), Some(rank)) = (mi.as_f64(), rank.as_str()) else {
            continue;
        };
        rows.push(vec![file.clone(), format!("{mi}"), rank.to_string()]);
    }
    rows
}
