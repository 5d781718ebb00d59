//! Git operations for the churn report.

mod log;

use std::path::{Path, PathBuf};

use crate::core::{Error, Result};
use crate::process::ToolInvocation;

pub use log::{parse_numstat, NumstatLog, StatLine};

/// Git repository wrapper.
///
/// Shells out to the `git` binary; the churn report parses the text output of
/// `git log --numstat` rather than walking the object database.
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Open a git repository at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref();
        if !root.is_dir() {
            return Err(Error::git(format!(
                "not a directory: {}",
                root.display()
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Get the repository root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run `git log --no-merges --numstat --pretty=format:%H` and return its
    /// raw output.
    pub fn log_numstat(&self) -> Result<String> {
        let out = ToolInvocation::new("git")
            .arg("-C")
            .arg(self.root.to_string_lossy())
            .args(["log", "--no-merges", "--numstat", "--pretty=format:%H"])
            .run()?;

        if !out.expected {
            return Err(Error::git(format!(
                "git log exited with {:?} in {}",
                out.code,
                self.root.display()
            )));
        }

        Ok(out.stdout)
    }
}
