//! Vitals - code-quality report generation library.
//!
//! Vitals drives external analysis tools (PMD CPD for duplicate code, radon
//! for cyclomatic complexity, Halstead metrics, and the maintainability
//! index) and git history against a Python source tree, and post-processes
//! their outputs into normalized CSV and JSON reports.
//!
//! # Example
//!
//! ```no_run
//! use vitals::config::Config;
//! use vitals::core::{Report, ReportContext};
//! use vitals::reports::churn::Report as ChurnReport;
//!
//! let config = Config::default();
//! let ctx = ReportContext::new(".", "reports", &config);
//! let report = ChurnReport::new();
//! let summary = report.generate(&ctx).unwrap();
//! println!("Aggregated churn for {} files", summary.files);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod git;
pub mod output;
pub mod process;
pub mod reports;

pub use core::{Report, ReportContext};
