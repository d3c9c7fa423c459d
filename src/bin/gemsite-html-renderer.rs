//! gemsite-html-renderer - Convert a single gemtext document to HTML
//!
//! Usage:
//!   gemsite-html-renderer -f index.gmi -o index.html
//!   gemsite-html-renderer -f index.gmi --standalone > index.html
//!   cat index.gmi | gemsite-html-renderer

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser as ClapParser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use gemsite::config;
use gemsite::converter::DocumentConverter;
use gemsite::page;

#[derive(ClapParser)]
#[command(version, about = "Convert a gemtext document to HTML", long_about = None)]
struct Cli {
    /// an input file to convert (reads from stdin if not specified)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// an output html file (writes to stdout if not specified)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// wrap the output in a complete HTML page
    #[arg(long)]
    standalone: bool,

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

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose.log_level_filter(), args.debuglogfile.as_deref())?;

    let mut options = config::load_config(args.config.as_deref())?.options;
    if args.standalone {
        options.page.standalone = true;
    }

    let (bytes, title_fallback) = match &args.file {
        Some(path) => (
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))?,
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            (buffer, "stdin".to_string())
        }
    };

    let mut writer: BufWriter<Box<dyn Write>> = match &args.output {
        Some(path) => BufWriter::new(Box::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => BufWriter::new(Box::new(io::stdout().lock())),
    };

    if options.page.standalone {
        let text = String::from_utf8_lossy(&bytes);
        let title = page::document_title(&text, options.convert.fence).unwrap_or(title_fallback.as_str());
        options.page.write_header(title, &mut writer)?;
    }
    let converter = DocumentConverter::new(options.convert.clone());
    let stats = converter.convert_reader(&mut bytes.as_slice(), &mut writer)?;
    options.page.write_footer(&mut writer)?;
    writer.flush()?;

    if stats.unterminated_fence {
        log::warn!("input ends inside an unterminated preformatted block");
    }
    log::info!(
        "converted {} lines ({} list blocks, {} preformatted lines)",
        stats.total_lines,
        stats.lists,
        stats.preformatted_lines
    );
    Ok(())
}
