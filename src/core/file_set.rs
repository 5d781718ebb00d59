//! File set for enumerating the source files handed to external tools.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use super::{Error, Result};
use crate::config::Config;

/// Path markers excluded from enumeration (matched case-insensitively as
/// substrings of the full path).
const EXCLUDE_MARKERS: &[&str] = &["test", "__pycache__", "_migration"];

/// A set of source files to analyze, respecting .gitignore.
#[derive(Debug, Clone)]
pub struct FileSet {
    /// Root directory.
    root: PathBuf,
    /// All files in the set.
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Create a file set from a directory path.
    ///
    /// Walks `path` collecting files with the configured source extension,
    /// dropping any whose lowercased path contains a test, cache, or
    /// migration marker. A missing directory is an error.
    pub fn from_path(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        Self::from_path_with_patterns(path, &config.src_extension, &config.exclude_patterns)
    }

    /// Create a file set with an explicit extension and glob exclude patterns.
    pub fn from_path_with_patterns(
        path: impl AsRef<Path>,
        extension: &str,
        exclude_patterns: &[String],
    ) -> Result<Self> {
        let root = path.as_ref();
        if !root.is_dir() {
            return Err(Error::FileNotFound {
                path: root.to_path_buf(),
            });
        }
        let root = root.canonicalize()?;

        let exclude_set = build_glob_set(exclude_patterns)?;
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker.flatten() {
            let path = entry.path();

            if path.is_dir() {
                continue;
            }

            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }

            let path_str = path.to_string_lossy();
            if is_excluded(&path_str) {
                continue;
            }

            if exclude_set.is_match(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        // Sort for deterministic ordering
        files.sort();

        Ok(Self { root, files })
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get all files in the set.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over files.
    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Case-insensitive substring exclusion over the full path.
fn is_excluded(path: &str) -> bool {
    let lower = path.to_lowercase();
    EXCLUDE_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| Error::config(format!("invalid exclude pattern '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::config(format!("invalid exclude patterns: {e}")))
}
