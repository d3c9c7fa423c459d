//! gemsite - Convert a directory of gemtext documents into an HTML site
//!
//! Usage:
//!   gemsite ./capsule ./public
//!   gemsite ./capsule ./public --on-error continue --report report.json
//!   echo "./capsule ./public" | gemsite

use std::fs::{self, File};
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::{Parser as ClapParser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use gemsite::config;
use gemsite::site::{ErrorPolicy, SiteGenerator, SiteReport};

#[derive(ValueEnum, Clone, Debug)]
enum OnErrorArg {
    /// Stop at the first file that fails
    Abort,
    /// Keep going and report every failure at the end
    Continue,
}

#[derive(ValueEnum, Clone, Debug)]
enum ReportFormat {
    /// JSON format
    Json,
    /// Human-readable text
    Text,
}

#[derive(ClapParser)]
#[command(
    version,
    about = "Convert a directory of gemtext documents into an HTML site",
    long_about = "Mirrors INPUT into OUTPUT. Files ending in .gmi are converted to \
                  .html, every other file is copied unchanged, and the directory \
                  structure is preserved.\n\n\
                  If INPUT and OUTPUT are not given, they are read as two \
                  whitespace-separated paths from stdin."
)]
struct Cli {
    /// Source directory
    #[arg(value_name = "INPUT", requires = "output")]
    input: Option<PathBuf>,

    /// Output directory (created if missing)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Failure handling (overrides the config file)
    #[arg(long, value_enum)]
    on_error: Option<OnErrorArg>,

    /// Wrap every converted document in a complete HTML page
    #[arg(long)]
    standalone: bool,

    /// Stylesheet linked from standalone pages
    #[arg(long, value_name = "HREF")]
    stylesheet: Option<String>,

    /// Write a run report
    #[arg(long, value_name = "REPORT_FILE")]
    report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    report_format: ReportFormat,

    /// debug log file
    #[arg(short, long, value_name = "FILE")]
    debuglogfile: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn init_logger(filter_level: log::LevelFilter, logfile: Option<&Path>) -> anyhow::Result<()> {
    let mut loggers: Vec<Box<dyn simplelog::SharedLogger>> = Vec::new();
    loggers.push(simplelog::TermLogger::new(
        filter_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ));
    if let Some(filename) = logfile {
        let file = File::create(filename)
            .with_context(|| format!("cannot create log file {}", filename.display()))?;
        loggers.push(simplelog::WriteLogger::new(
            filter_level,
            simplelog::Config::default(),
            file,
        ));
    }
    simplelog::CombinedLogger::init(loggers)?;
    Ok(())
}

/// Read the input and output directories as the first two whitespace
/// separated tokens on stdin.
fn read_paths_from_stdin() -> anyhow::Result<(PathBuf, PathBuf)> {
    let mut tokens = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("cannot read paths from stdin")?;
        tokens.extend(line.split_whitespace().map(PathBuf::from));
        if tokens.len() >= 2 {
            break;
        }
    }
    let mut tokens = tokens.into_iter();
    match (tokens.next(), tokens.next()) {
        (Some(input), Some(output)) => Ok((input, output)),
        _ => bail!("expected an input and an output directory on stdin"),
    }
}

fn write_report(report: &SiteReport, path: &Path, format: &ReportFormat) -> anyhow::Result<()> {
    let content = match format {
        ReportFormat::Json => report.to_json()?,
        ReportFormat::Text => report.to_text(),
    };
    fs::write(path, content)
        .with_context(|| format!("cannot write report {}", path.display()))?;
    Ok(())
}

/// Returns whether every entry was processed.
fn run(args: Cli) -> anyhow::Result<bool> {
    let (input, output) = match (args.input, args.output) {
        (Some(input), Some(output)) => (input, output),
        _ => read_paths_from_stdin()?,
    };

    let loaded = config::load_config(args.config.as_deref())?;
    let mut options = loaded.options;
    if let Some(on_error) = args.on_error {
        options.on_error = match on_error {
            OnErrorArg::Abort => ErrorPolicy::Abort,
            OnErrorArg::Continue => ErrorPolicy::Continue,
        };
    }
    if args.standalone {
        options.page.standalone = true;
    }
    if let Some(href) = args.stylesheet {
        options.page.stylesheet = Some(href);
    }

    let generator = SiteGenerator::new(options);
    let report = generator.generate(&input, &output).with_context(|| {
        format!(
            "cannot generate site from {} into {}",
            input.display(),
            output.display()
        )
    })?;

    for failure in &report.failures {
        eprintln!("✗ {}", failure);
    }

    if let Some(report_path) = &args.report {
        write_report(&report, report_path, &args.report_format)?;
        eprintln!("✓ Report written to {}", report_path.display());
    }

    Ok(!report.has_failures())
}

fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(e) = init_logger(args.verbose.log_level_filter(), args.debuglogfile.as_deref()) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
