// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, LevelFilter};

use svb2json::app_config::{Config, LogLevel};
use svb2json::errors::SubtitleError;
use svb2json::file_utils::FileManager;
use svb2json::logging::{self, CliLogger};
use svb2json::subtitle_processor::SubtitleCollection;
use svb2json::timestamp_format::TimestampFormat;

/// Output representation of the converted subtitles
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// JSON array of {id, start, end, text}
    Json,
    /// One "[start–end] text" line per entry
    Text,
}

/// svb2json - convert YouTube SBV subtitles to JSON or text
#[derive(Parser, Debug)]
#[command(name = "svb2json")]
#[command(version)]
#[command(about = "Convert YouTube SBV subtitles to JSON or text")]
#[command(long_about = "svb2json parses SBV subtitle files and writes them as a JSON array or as timestamped text lines.

EXAMPLES:
    svb2json talk.sbv                           # JSON to stdout
    svb2json talk.sbv -o talk.json --indent 4   # JSON file, 4-space indent
    svb2json talk.sbv -o talk.txt               # Text lines (inferred from .txt)
    svb2json talk.sbv --to text -m 20 -f HH:MM  # 20s windows, hours:minutes
    svb2json talk.sbv -s                        # Timestamps in whole seconds
    svb2json --completions bash > svb2json.bash

TIMESTAMP FORMATS:
    HH:MM:SS.Mi, HH:MM:SS, HH:MM, SS, MM, Mi")]
struct CommandLineOptions {
    /// Input SBV file path
    #[arg(value_name = "INPUT", required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output mode (default: text for .txt outputs, json otherwise)
    #[arg(long, value_enum)]
    to: Option<OutputMode>,

    /// Round timestamps to whole seconds
    #[arg(short, long)]
    seconds: bool,

    /// Merge subtitles into windows of this many seconds
    #[arg(short, long, value_name = "SECONDS", allow_negative_numbers = true)]
    merge: Option<i64>,

    /// Timestamp format for text output (default: HH:MM:SS)
    #[arg(short, long)]
    format: Option<String>,

    /// JSON indentation level (default: 2)
    #[arg(long)]
    indent: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "svb2json.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<LogLevel>,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    CliLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    if let Some(shell) = options.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "svb2json", &mut std::io::stdout());
        return Ok(());
    }

    run(options)
}

fn run(options: CommandLineOptions) -> Result<()> {
    if let Some(level) = &options.log_level {
        logging::apply_level(level);
    }

    let mut config = Config::load_or_default(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(merge) = options.merge {
        if merge <= 0 {
            return Err(SubtitleError::InvalidMergeWindow(merge).into());
        }
        config.subtitle.merge_window_secs = Some(merge as u64);
    }
    if let Some(format) = &options.format {
        config.subtitle.timestamp_format = format.clone();
    }
    if let Some(indent) = options.indent {
        config.subtitle.indent = indent;
    }
    if options.seconds {
        config.subtitle.round_to_seconds = true;
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone();
    }

    config.validate().context("Configuration validation failed")?;
    logging::apply_level(&config.log_level);

    // Parse the pattern before touching any output
    let timestamp_format: TimestampFormat = config.subtitle.timestamp_format.parse()?;

    let input_path = options
        .input
        .ok_or_else(|| anyhow!("INPUT is required"))?;
    if !FileManager::file_exists(&input_path) {
        return Err(anyhow!("Input file not found: {:?}", input_path));
    }

    let content = FileManager::read_to_string(&input_path)?;
    let mut collection = SubtitleCollection::from_sbv(input_path.clone(), &content)
        .with_context(|| format!("Error parsing SBV file: {:?}", input_path))?;

    if let Some(window) = config.subtitle.merge_window_secs {
        collection = collection.merged(window);
    }

    let mode = options.to.unwrap_or_else(|| match &options.output {
        Some(path) if FileManager::extension_of(path) == ".txt" => OutputMode::Text,
        _ => OutputMode::Json,
    });
    debug!("{}Output mode: {:?}", collection, mode);

    let rendered = match mode {
        OutputMode::Json => collection
            .to_json(config.subtitle.indent, config.subtitle.round_to_seconds)
            .context("Failed to serialize subtitles to JSON")?,
        OutputMode::Text => collection.to_text(&timestamp_format, config.subtitle.round_to_seconds),
    };

    match &options.output {
        Some(output) => {
            FileManager::write_to_file(output, &format!("{}\n", rendered))?;
            info!("Wrote {} entries to {:?}", collection.entries.len(), output);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
