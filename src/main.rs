//! Vitals CLI - code-quality reports from PMD CPD, radon, and git history.

use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vitals::cli::{Cli, ClonesArgs, Command};
use vitals::config::Config;
use vitals::core::{Report, ReportContext};
use vitals::reports::{churn, clones, halstead, maintainability, mccabe};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; -v raises the default level, RUST_LOG still wins.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> vitals::core::Result<()> {
    let search_dir = cli.path.clone().unwrap_or_else(|| ".".into());
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(&search_dir)?,
    };

    let repo_root = cli.path.unwrap_or_else(|| config.repo_root.clone());
    let reports_dir = cli
        .reports_dir
        .unwrap_or_else(|| config.reports_dir.clone());
    let ctx = ReportContext::new(repo_root, reports_dir, &config);

    match cli.command.unwrap_or(Command::All) {
        Command::Clones(args) => run_clones(&ctx, &args)?,
        Command::Maintainability => run_maintainability(&ctx)?,
        Command::Mccabe => {
            let summary = mccabe::Report::new().generate(&ctx)?;
            done("mccabe", &format!("{}", summary.output.display()));
        }
        Command::Halstead => {
            let summary = halstead::Report::new().generate(&ctx)?;
            done("halstead", &format!("{}", summary.output.display()));
        }
        Command::Churn => run_churn(&ctx)?,
        Command::Init => run_init(&ctx)?,
        Command::All => run_all(&ctx),
    }

    Ok(())
}

/// The full sequence: each report's failure is logged and the run continues
/// to the next report.
fn run_all(ctx: &ReportContext<'_>) {
    let default_clones = ClonesArgs {
        min_tokens: None,
        from: None,
    };

    if let Err(e) = run_clones(ctx, &default_clones) {
        tracing::error!("clones report failed: {e}");
    }
    if let Err(e) = run_maintainability(ctx) {
        tracing::error!("maintainability report failed: {e}");
    }
    if let Err(e) = mccabe::Report::new().generate(ctx) {
        tracing::error!("mccabe report failed: {e}");
    } else {
        done("mccabe", mccabe::ARTIFACT);
    }
    if let Err(e) = halstead::Report::new().generate(ctx) {
        tracing::error!("halstead report failed: {e}");
    } else {
        done("halstead", halstead::ARTIFACT);
    }
    if let Err(e) = run_churn(ctx) {
        tracing::error!("churn report failed: {e}");
    }
}

fn run_clones(ctx: &ReportContext<'_>, args: &ClonesArgs) -> vitals::core::Result<()> {
    let mut report = clones::Report::new()
        .with_min_tokens(args.min_tokens.unwrap_or(ctx.config.cpd.min_tokens));
    if let Some(from) = &args.from {
        report = report.from_raw(from);
    }

    let summary = report.generate(ctx)?;
    done(
        "clones",
        &format!(
            "{} records, {} blocks -> {}",
            summary.records,
            summary.blocks,
            summary.output.display()
        ),
    );

    let records = clones::load_records(&summary.output)?;
    clones::report_top_clone(ctx, &records, &mut stdout())?;
    Ok(())
}

fn run_maintainability(ctx: &ReportContext<'_>) -> vitals::core::Result<()> {
    let summary = maintainability::Report::new().generate(ctx)?;
    done(
        "maintainability",
        &format!(
            "{} entries -> {}, {}",
            summary.entries,
            summary.json_output.display(),
            summary.csv_output.display()
        ),
    );
    Ok(())
}

fn run_churn(ctx: &ReportContext<'_>) -> vitals::core::Result<()> {
    let summary = churn::Report::new().generate(ctx)?;
    done(
        "churn",
        &format!(
            "{} files, +{} -{} -> {}",
            summary.files,
            summary.lines_added,
            summary.lines_removed,
            summary.output.display()
        ),
    );
    Ok(())
}

fn run_init(ctx: &ReportContext<'_>) -> vitals::core::Result<()> {
    let path = ctx.repo_root.join("vitals.toml");
    if path.exists() {
        return Err(vitals::core::Error::config(format!(
            "{} already exists",
            path.display()
        )));
    }
    std::fs::write(&path, Config::default_toml())?;
    done("init", &format!("wrote {}", path.display()));
    Ok(())
}

fn done(name: &str, detail: &str) {
    println!("{} {}: {}", "✓".green(), name.bold(), detail);
}
