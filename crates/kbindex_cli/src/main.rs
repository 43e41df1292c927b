//! `kbindex` command-line entry point.
//!
//! # Responsibility
//! - Parse flags, resolve config, run scan → extract → index → report.
//! - Print a short human summary or a JSON run summary.
//!
//! # Invariants
//! - Diagnostics go through `log`; stdout carries only user-facing output.
//! - Any failure exits non-zero with a single `error:` line on stderr.

use chrono::Local;
use clap::{Parser, Subcommand};
use kbindex_core::{
    build_indexes, extract_notes, init_logging, render_reports, resolve_config, scan_repository,
    write_reports, ConfigError, IndexSet, IndexerConfig, LogTarget, LoggingConfig, LoggingError,
    ReportContext, ReportError, RunStats, ScanError,
};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "kbindex",
    about = "Generate markdown indexes of tasks, time logs and page links from a note repository",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the repository and write every report.
    Generate(GenerateArgs),
    /// Print the version.
    Version,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct GenerateArgs {
    /// Note repository root (contains `journals/` and `pages/`).
    #[arg(long, value_name = "DIR", default_value = ".")]
    repo: PathBuf,

    /// Report directory; relative paths resolve against the repository.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Config file; defaults to `<repo>/kbindex.toml` when present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Minimum inbound references for a missing page to be reported.
    #[arg(long, value_name = "N")]
    threshold: Option<usize>,

    /// Only log errors and print nothing on success.
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log per-note detail.
    #[arg(long)]
    verbose: bool,

    /// Build indexes and list the reports without writing them.
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON run summary instead of human-readable lines.
    #[arg(long)]
    json: bool,

    /// Write logs to rotating files in this directory instead of stderr.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

/// Machine-readable outcome of one `generate` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RunSummary {
    repo: String,
    output_dir: String,
    dry_run: bool,
    stats: RunStats,
    total_tasks: usize,
    pages: usize,
    hub_pages: usize,
    timeline_days: usize,
    missing_pages: usize,
    reports: Vec<String>,
}

#[derive(Debug)]
enum CliError {
    Io(std::io::Error),
    Logging(LoggingError),
    Config(ConfigError),
    Scan(ScanError),
    Report(ReportError),
    Json(serde_json::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Scan(err) => write!(f, "{err}"),
            Self::Report(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "cannot encode run summary: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Scan(err) => Some(err),
            Self::Report(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<LoggingError> for CliError {
    fn from(err: LoggingError) -> Self {
        Self::Logging(err)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ScanError> for CliError {
    fn from(err: ScanError) -> Self {
        Self::Scan(err)
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        Self::Report(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Version => {
            println!("kbindex version {}", kbindex_core::core_version());
            Ok(())
        }
        Command::Generate(args) => generate(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<(), CliError> {
    let target = match &args.log_dir {
        Some(dir) => LogTarget::Directory(absolutize(dir)?),
        None => LogTarget::Stderr,
    };
    init_logging(&LoggingConfig::from_flags(args.quiet, args.verbose, target))?;

    let summary = run_generate(args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !args.quiet {
        print_summary(&summary);
    }
    Ok(())
}

/// Runs one full generation and reports what was (or would be) written.
fn run_generate(args: &GenerateArgs) -> Result<RunSummary, CliError> {
    let repo = absolutize(&args.repo)?;
    let config = effective_config(&repo, args)?;
    info!(
        "event=generate module=cli status=start repo={} dry_run={}",
        repo.display(),
        args.dry_run
    );

    let files = scan_repository(&repo)?;
    let extraction = extract_notes(&files, &config);
    let now = Local::now().naive_local();
    let indexes = build_indexes(&extraction, &files, &config, now);
    let ctx = ReportContext::new(now, &config);
    let output_dir = config.output_path(&repo);

    let reports = if args.dry_run {
        render_reports(&indexes, &extraction.stats, &ctx)
            .into_iter()
            .map(|(file_name, _)| output_dir.join(file_name))
            .collect()
    } else {
        write_reports(&indexes, &extraction.stats, &output_dir, &ctx)?
    };

    info!(
        "event=generate module=cli status=ok reports={} read_errors={}",
        reports.len(),
        extraction.stats.read_errors
    );
    Ok(summarize(
        &repo,
        &output_dir,
        args.dry_run,
        extraction.stats,
        &indexes,
        &reports,
    ))
}

/// Config file values with CLI overrides applied.
fn effective_config(repo: &Path, args: &GenerateArgs) -> Result<IndexerConfig, CliError> {
    let mut config = resolve_config(repo, args.config.as_deref())?;
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(threshold) = args.threshold {
        config.missing_page_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn summarize(
    repo: &Path,
    output_dir: &Path,
    dry_run: bool,
    stats: RunStats,
    indexes: &IndexSet,
    reports: &[PathBuf],
) -> RunSummary {
    RunSummary {
        repo: repo.display().to_string(),
        output_dir: output_dir.display().to_string(),
        dry_run,
        stats,
        total_tasks: indexes.tasks.total_tasks,
        pages: indexes.graph.nodes.len(),
        hub_pages: indexes.graph.hub_pages.len(),
        timeline_days: indexes.timeline.days.len(),
        missing_pages: indexes.missing_pages.pages.len(),
        reports: reports
            .iter()
            .map(|path| path.display().to_string())
            .collect(),
    }
}

fn print_summary(summary: &RunSummary) {
    let stats = &summary.stats;
    println!("Scanned {}: {} notes", summary.repo, stats.files_scanned);
    println!("Extracted {} tasks and {} links", stats.tasks, stats.links);
    if stats.read_errors > 0 {
        println!("Warning: {} notes could not be read", stats.read_errors);
    }
    if summary.dry_run {
        println!("Dry run: would write {} reports", summary.reports.len());
    }
    let marker = if summary.dry_run { "-" } else { "✓" };
    for report in &summary.reports {
        println!("{marker} {report}");
    }
}

fn absolutize(path: &Path) -> Result<PathBuf, CliError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}
