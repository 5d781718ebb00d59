//! Shared plumbing for the radon-backed reports (mi, cc, hal).

use std::path::PathBuf;

use crate::core::{ReportContext, Result};
use crate::output::prettify_json;
use crate::process::ToolInvocation;

/// Run one radon metric and prettify the JSON it wrote.
///
/// radon writes the report file itself via `--output-file`; the file is then
/// rewritten in place with repository-relative top-level keys and 4-space
/// indentation. An off-allow-list exit code has already been logged by the
/// runner; prettification still runs against whatever radon left behind, and
/// an unreadable or empty file surfaces as the error here.
///
/// Returns the artifact path and its number of top-level entries.
pub(crate) fn run_metric(
    ctx: &ReportContext<'_>,
    metric: &str,
    artifact: &str,
) -> Result<(PathBuf, usize)> {
    let output = ctx.artifact_path(artifact)?;

    let mut invocation = ToolInvocation::new(&ctx.config.radon.binary).arg(metric);
    if !ctx.config.radon.ignore.is_empty() {
        invocation = invocation
            .arg("--ignore")
            .arg(ctx.config.radon.ignore.join(","));
    }
    invocation = invocation
        .args(["--json", "--output-file"])
        .arg(output.to_string_lossy())
        .arg(ctx.repo_root.to_string_lossy());

    invocation.run()?;

    let entries = prettify_json(&output, &ctx.path_prefix())?;
    Ok((output, entries))
}
