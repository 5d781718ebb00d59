//! Parsing of `git log --numstat` text output.

/// A single per-file stat line from `git log --numstat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    /// Lines added. Binary files (`-`) coerce to 0.
    pub additions: u64,
    /// Lines deleted. Binary files (`-`) coerce to 0.
    pub deletions: u64,
    /// Repository-relative path.
    pub path: String,
}

/// Parsed numstat log: stat lines plus a count of commit delimiters seen.
#[derive(Debug, Default)]
pub struct NumstatLog {
    /// Distinct commit delimiter lines observed.
    pub commits: usize,
    /// All stat lines, in log order.
    pub stats: Vec<StatLine>,
}

/// Parse the output of `git log --no-merges --numstat --pretty=format:%H`.
///
/// Lines come in two shapes: a bare 40-hex-digit commit hash delimiting each
/// commit, and tab-separated `additions\tdeletions\tpath` stat lines. The
/// hash itself is not carried past detection. Anything else (blank separator
/// lines, malformed rows) is skipped.
pub fn parse_numstat(output: &str) -> NumstatLog {
    let mut log = NumstatLog::default();

    for line in output.lines() {
        if is_commit_hash(line) {
            log.commits += 1;
            continue;
        }

        if !line.contains('\t') {
            continue;
        }

        let mut parts = line.splitn(3, '\t');
        let (Some(added), Some(deleted), Some(path)) =
            (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        if path.is_empty() {
            continue;
        }

        log.stats.push(StatLine {
            additions: added.parse().unwrap_or(0),
            deletions: deleted.parse().unwrap_or(0),
            path: path.to_string(),
        });
    }

    log
}

fn is_commit_hash(line: &str) -> bool {
    line.len() == 40 && line.bytes().all(|b| b.is_ascii_hexdigit())
}
