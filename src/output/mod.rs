//! Artifact writers: CSV rows and prettified JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::core::{Error, Result};

/// Strip the repository prefix from a path emitted by an external tool.
///
/// Idempotent: stripping an already-stripped path is a no-op.
pub fn strip_repo_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    path.strip_prefix(prefix).unwrap_or(path)
}

/// Write a CSV artifact with a fixed header.
///
/// Fields are joined verbatim; the callers only ever emit integers and
/// repository-relative paths, neither of which needs quoting.
pub fn write_csv<P, I>(path: P, header: &str, rows: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{header}")?;
    for row in rows {
        writeln!(writer, "{}", row.join(","))?;
    }
    writer.flush()?;
    Ok(())
}

/// Rewrite a JSON report in place: strip the repository prefix from every
/// top-level key and re-serialize with 4-space indentation. Returns the
/// number of top-level entries.
///
/// Key order is preserved; stripping is a no-op for keys already relative.
pub fn prettify_json(path: &Path, prefix: &str) -> Result<usize> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;

    let Value::Object(map) = value else {
        return Err(Error::report(format!(
            "expected a JSON object at top level in {}",
            path.display()
        )));
    };

    let mut rewritten = Map::with_capacity(map.len());
    for (key, val) in map {
        rewritten.insert(strip_repo_prefix(&key, prefix).to_string(), val);
    }

    let entries = rewritten.len();
    let file = BufWriter::new(File::create(path)?);
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(file, formatter);
    Value::Object(rewritten).serialize(&mut serializer)?;
    Ok(entries)
}
