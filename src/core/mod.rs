//! Core types and traits for report generation.

mod error;
mod file_set;
mod report;

pub use error::{Error, Result};
pub use file_set::FileSet;
pub use report::{Report, ReportContext};
