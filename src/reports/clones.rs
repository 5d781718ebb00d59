//! Duplicate-code report driven by PMD CPD.
//!
//! CPD's `csv_with_linecount_per_file` format is a flat CSV in which each
//! data row describes one clone block: a token count, an occurrence count,
//! and then one `(start_line, line_count, path)` triple per occurrence. The
//! normalizer flattens each row into one record per occurrence, all sharing a
//! block id, with the absolute repository prefix stripped from paths.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::core::{Error, FileSet, Report as ReportTrait, ReportContext, Result};
use crate::output::{strip_repo_prefix, write_csv};
use crate::process::ToolInvocation;

/// Artifact file name under the reports directory.
pub const ARTIFACT: &str = "cpd_results.csv";

/// CSV header of the normalized artifact.
pub const CSV_HEADER: &str = "token_count,occurrence_id,start_line,line_count,path";

/// Exit codes CPD uses for a successful run; 4 means duplicates were found.
const CPD_SUCCESS_CODES: &[i32] = &[0, 4];

/// One occurrence of a clone block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneRecord {
    /// Size of the duplicated block in tokens, shared by the whole block.
    pub token_count: u64,
    /// Block id; every occurrence of one block shares it.
    pub occurrence_id: u64,
    /// 1-based first line of the occurrence.
    pub start_line: u64,
    /// Number of duplicated lines.
    pub line_count: u64,
    /// Repository-relative path.
    pub path: String,
}

/// Clones report: runs CPD and writes the normalized CSV.
pub struct Report {
    min_tokens: usize,
    /// Normalize an already-captured raw CPD CSV instead of invoking CPD.
    from: Option<PathBuf>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Create a clones report with the default minimum token count.
    pub fn new() -> Self {
        Self {
            min_tokens: 50,
            from: None,
        }
    }

    /// Set the minimum duplicate size in tokens.
    pub fn with_min_tokens(mut self, min_tokens: usize) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    /// Normalize a raw CPD CSV from disk instead of invoking CPD.
    pub fn from_raw(mut self, path: impl Into<PathBuf>) -> Self {
        self.from = Some(path.into());
        self
    }

    fn raw_output(&self, ctx: &ReportContext<'_>) -> Result<(String, usize)> {
        if let Some(raw_path) = &self.from {
            let text = std::fs::read_to_string(raw_path)?;
            return Ok((text, 0));
        }

        let files = FileSet::from_path(ctx.src_root(), ctx.config)?;
        if files.is_empty() {
            return Err(Error::report(format!(
                "no source files under {}",
                ctx.src_root().display()
            )));
        }

        let invocation = ToolInvocation::new(&ctx.config.cpd.binary)
            .args([
                "cpd",
                "--language",
                &ctx.config.cpd.language,
                "--minimum-tokens",
                &self.min_tokens.to_string(),
                "--format",
                "csv_with_linecount_per_file",
                "-d",
            ])
            .args(files.iter().map(|p| p.to_string_lossy().into_owned()))
            .expect_codes(CPD_SUCCESS_CODES);

        let out = invocation.run()?;
        Ok((out.stdout, files.len()))
    }
}

impl ReportTrait for Report {
    type Output = Summary;

    fn name(&self) -> &'static str {
        "clones"
    }

    fn description(&self) -> &'static str {
        "Detect duplicated code via PMD CPD and normalize its CSV output"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<Self::Output> {
        let (raw, files_scanned) = self.raw_output(ctx)?;
        let records = normalize(&raw, &ctx.path_prefix());

        let output = ctx.artifact_path(ARTIFACT)?;
        write_csv(&output, CSV_HEADER, records.iter().map(csv_row))?;

        let blocks = records
            .last()
            .map(|r| r.occurrence_id as usize)
            .unwrap_or(0);

        tracing::info!(
            "clones: {} records across {} blocks -> {}",
            records.len(),
            blocks,
            output.display()
        );

        Ok(Summary {
            files_scanned,
            blocks,
            records: records.len(),
            output,
        })
    }
}

/// Summary of a clones run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Files handed to CPD (0 when normalizing a pre-captured CSV).
    pub files_scanned: usize,
    /// Clone blocks emitted.
    pub blocks: usize,
    /// Occurrence records emitted.
    pub records: usize,
    /// Path of the normalized CSV artifact.
    pub output: PathBuf,
}

/// Flatten raw CPD CSV text into one record per occurrence.
///
/// The first line is CPD's header. Block ids are assigned monotonically from
/// 1 per parsed row. Malformed rows (too few fields, non-integer fields) are
/// skipped without advancing the id; the loss is by design.
pub fn normalize(raw: &str, prefix: &str) -> Vec<CloneRecord> {
    let mut records = Vec::new();
    let mut next_id = 1u64;

    for line in raw.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line, prefix, next_id) {
            Some(mut row) => {
                records.append(&mut row);
                next_id += 1;
            }
            None => {
                tracing::debug!("skipping malformed CPD row: {line}");
            }
        }
    }

    records
}

/// Parse one raw row into its occurrence records, or None if malformed.
fn parse_row(line: &str, prefix: &str, id: u64) -> Option<Vec<CloneRecord>> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    let token_count: u64 = parts.first()?.parse().ok()?;
    let occurrences: usize = parts.get(1)?.parse().ok()?;
    if occurrences == 0 || parts.len() < 2 + occurrences * 3 {
        return None;
    }

    let mut records = Vec::with_capacity(occurrences);
    for i in 1..=occurrences {
        let start_line: u64 = parts[i * 3 - 1].parse().ok()?;
        let line_count: u64 = parts[i * 3].parse().ok()?;
        let path = strip_repo_prefix(parts[i * 3 + 1], prefix).to_string();
        records.push(CloneRecord {
            token_count,
            occurrence_id: id,
            start_line,
            line_count,
            path,
        });
    }
    Some(records)
}

fn csv_row(record: &CloneRecord) -> Vec<String> {
    vec![
        record.token_count.to_string(),
        record.occurrence_id.to_string(),
        record.start_line.to_string(),
        record.line_count.to_string(),
        record.path.clone(),
    ]
}

/// Re-read a normalized clones CSV back into records.
pub fn load_records(path: &std::path::Path) -> Result<Vec<CloneRecord>> {
    let text = std::fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in text.lines().skip(1) {
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() != 5 {
            continue;
        }
        let (Ok(token_count), Ok(occurrence_id), Ok(start_line), Ok(line_count)) = (
            parts[0].parse(),
            parts[1].parse(),
            parts[2].parse(),
            parts[3].parse(),
        ) else {
            continue;
        };
        records.push(CloneRecord {
            token_count,
            occurrence_id,
            start_line,
            line_count,
            path: parts[4].to_string(),
        });
    }
    Ok(records)
}

/// Select the block with the most occurrences.
///
/// Ties break toward the lowest block id, which makes the winner
/// deterministic.
pub fn top_clone(records: &[CloneRecord]) -> Option<Vec<&CloneRecord>> {
    let mut blocks: BTreeMap<u64, Vec<&CloneRecord>> = BTreeMap::new();
    for record in records {
        blocks.entry(record.occurrence_id).or_default().push(record);
    }

    let mut winner: Option<Vec<&CloneRecord>> = None;
    for members in blocks.into_values() {
        if winner.as_ref().map_or(true, |w| members.len() > w.len()) {
            winner = Some(members);
        }
    }
    winner
}

/// Print the most-duplicated block's snippets.
///
/// Each occurrence re-reads its source file and slices the line range. A
/// per-file read failure is reported and the loop continues.
pub fn report_top_clone<W: Write>(
    ctx: &ReportContext<'_>,
    records: &[CloneRecord],
    out: &mut W,
) -> Result<()> {
    let Some(members) = top_clone(records) else {
        writeln!(out, "{}", "No duplicated blocks found.".dimmed())?;
        return Ok(());
    };

    writeln!(
        out,
        "{} block {} ({} occurrences, {} tokens)",
        "Most duplicated:".bold(),
        members[0].occurrence_id,
        members.len(),
        members[0].token_count,
    )?;

    for record in members {
        writeln!(
            out,
            "\n{} (line {}, {} lines)",
            record.path.cyan(),
            record.start_line,
            record.line_count
        )?;
        match snippet(ctx, record) {
            Ok(text) => writeln!(out, "{text}")?,
            Err(e) => writeln!(out, "{}", format!("  could not read source: {e}").yellow())?,
        }
    }

    Ok(())
}

fn snippet(ctx: &ReportContext<'_>, record: &CloneRecord) -> Result<String> {
    let path = ctx.resolve(&record.path);
    let content = std::fs::read_to_string(&path)?;
    let start = record.start_line.saturating_sub(1) as usize;
    let lines: Vec<&str> = content
        .lines()
        .skip(start)
        .take(record.line_count as usize)
        .collect();
    Ok(lines.join("\n"))
}
