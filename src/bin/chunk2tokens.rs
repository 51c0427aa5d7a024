use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};

use svb2json::app_config::{Config, LogLevel};
use svb2json::chunking::{split_content, ChunkBudget, Model};
use svb2json::file_utils::FileManager;
use svb2json::logging::{self, CliLogger};

/// chunk2tokens - split files into pieces that fit an LLM token budget
#[derive(Parser, Debug)]
#[command(name = "chunk2tokens")]
#[command(version)]
#[command(about = "Chunk files based on LLM token limits while preserving structure")]
#[command(long_about = "chunk2tokens splits a JSON or text file into numbered files whose token count stays within a limit.
JSON arrays are split by element and objects by key, so every chunk is valid JSON.
Text is split by paragraph, then line, then sentence.

EXAMPLES:
    chunk2tokens input.json -t 800 -m GPT5
    chunk2tokens data.txt -t 1000 -m GPT-4
    chunk2tokens file.json -t 500 -m GPT-3.5 -o chunks/

MODELS:
    GPT-3.5, GPT-4 (cl100k_base)   GPT-4O, GPT5 (o200k_base)   GPT-3, CODEX (p50k_base)")]
struct CommandLineOptions {
    /// Path to the file to chunk
    #[arg(value_name = "FILENAME", required_unless_present = "completions")]
    filename: Option<PathBuf>,

    /// Maximum tokens per chunk (default: 800)
    #[arg(short, long)]
    tokens: Option<usize>,

    /// LLM model for token counting (default: GPT5)
    #[arg(short, long)]
    model: Option<Model>,

    /// Output directory for chunks (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

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
    CliLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    if let Some(shell) = options.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "chunk2tokens", &mut std::io::stdout());
        return Ok(());
    }

    run(options)
}

fn run(options: CommandLineOptions) -> Result<()> {
    if let Some(level) = &options.log_level {
        logging::apply_level(level);
    }

    let mut config = Config::load_or_default(&options.config_path)?;
    if let Some(tokens) = options.tokens {
        config.chunking.max_tokens = tokens;
    }
    if let Some(model) = options.model {
        config.chunking.model = model;
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone();
    }

    config.validate().context("Configuration validation failed")?;
    logging::apply_level(&config.log_level);

    let input_path = options
        .filename
        .ok_or_else(|| anyhow!("FILENAME is required"))?;
    if !input_path.exists() {
        return Err(anyhow!("File {:?} not found", input_path));
    }
    if !FileManager::file_exists(&input_path) {
        return Err(anyhow!("{:?} is not a file", input_path));
    }

    let budget = ChunkBudget::new(config.chunking.max_tokens, config.chunking.model)?;
    info!(
        "Chunking {:?} with max {} tokens ({})...",
        input_path, budget.max_tokens, budget.model
    );

    let content = FileManager::read_to_string(&input_path)?;
    let kind = FileManager::detect_content_kind(&input_path, &content);
    let chunks = split_content(&content, kind, &budget)
        .with_context(|| format!("Failed to chunk {:?}", input_path))?;

    info!("Generated {} chunk(s)", chunks.len());
    if chunks.is_empty() {
        warn!("Nothing to write: {:?} produced no chunks", input_path);
        return Ok(());
    }

    let progress = ProgressBar::new(chunks.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let saved = FileManager::write_chunks(&chunks, &input_path, options.output.as_deref(), |path| {
        progress.set_message(path.display().to_string());
        progress.inc(1);
    });
    progress.finish_and_clear();
    let saved = saved?;

    for path in &saved {
        info!("Created: {}", path.display());
    }
    info!("Successfully created {} file(s)", saved.len());

    Ok(())
}
