//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Vitals - code-quality report generator (duplication, complexity, churn).
#[derive(Parser)]
#[command(name = "vitals")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the repository to analyze (default: config repo_root, then ".")
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Directory report artifacts are written to (default: config reports_dir)
    #[arg(short = 'o', long)]
    pub reports_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// With no subcommand, the full report sequence runs.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect duplicated code via PMD CPD and print the most duplicated block
    #[command(alias = "dup", alias = "cpd")]
    Clones(ClonesArgs),

    /// Maintainability index report via radon mi
    #[command(alias = "mi")]
    Maintainability,

    /// Cyclomatic complexity report via radon cc
    #[command(alias = "cc")]
    Mccabe,

    /// Halstead metrics report via radon hal
    #[command(alias = "hal")]
    Halstead,

    /// Aggregate per-file added/removed lines from git history
    Churn,

    /// Run the full report sequence (clones, mi, cc, hal, churn)
    All,

    /// Write a default vitals.toml into the repository
    Init,
}

#[derive(Args)]
pub struct ClonesArgs {
    /// Minimum duplicate size in tokens (default: config cpd.min_tokens)
    #[arg(long)]
    pub min_tokens: Option<usize>,

    /// Normalize an existing raw CPD CSV instead of invoking PMD
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
}
