//! Command-line interface for timedtext.
//!
//! Reads captured timed-text payloads from a file or stdin, writes verbatim
//! transcripts, and prints integrity reports and caption track listings.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::capture::{process_capture, CaptureError, CaptureRequest};
use crate::config;
use crate::extract::report::WARNINGS_NONE;
use crate::extract::{extract_from, DEFAULT_SOURCE_NAME};
use crate::sink::{FileSink, StdoutSink, TranscriptSink};
use crate::tracks::{rank_tracks, select_track, CaptionData};

/// timedtext - verbatim transcripts from timed-text caption payloads
#[derive(Parser, Debug)]
#[command(name = "timedtext")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a transcript and save it as a text file
    Extract {
        /// Payload file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Video title used for the filename
        #[arg(short, long)]
        title: Option<String>,

        /// Track language code used for the filename
        #[arg(short, long)]
        lang: Option<String>,

        /// Output directory (overrides config)
        #[arg(short, long, env = "TIMEDTEXT_OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Also write <file>.report.json
        #[arg(long)]
        report: bool,

        /// Print the transcript to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Print the integrity report for a payload as JSON
    Report {
        /// Payload file (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List caption tracks from a `{ captionTracks, title }` JSON file
    Tracks {
        /// Caption data file
        #[arg(short, long)]
        input: PathBuf,

        /// Preferred language prefix (overrides config)
        #[arg(short, long)]
        prefer: Option<String>,

        /// Only print the track that would be picked for this language
        #[arg(long)]
        pick: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Extract {
                input,
                title,
                lang,
                output_dir,
                report,
                stdout,
            } => run_extract(input, title, lang, output_dir, report, stdout).await,
            Commands::Report { input } => show_report(input).await,
            Commands::Tracks {
                input,
                prefer,
                pick,
            } => list_tracks(&input, prefer, pick).await,
            Commands::Config => show_config(),
        }
    }
}

/// Read payload from file or stdin, returning it with a source label
async fn read_payload(input: Option<&Path>) -> Result<(String, String)> {
    match input {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read payload: {}", path.display()))?;
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_SOURCE_NAME.to_string());
            Ok((raw, source))
        }
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            Ok((raw, DEFAULT_SOURCE_NAME.to_string()))
        }
    }
}

async fn run_extract(
    input: Option<PathBuf>,
    title: Option<String>,
    lang: Option<String>,
    output_dir: Option<PathBuf>,
    write_report: bool,
    to_stdout: bool,
) -> Result<()> {
    let cfg = config::config()?;
    let (raw, source) = read_payload(input.as_deref()).await?;

    let request = CaptureRequest::new(raw)
        .with_title(title.unwrap_or_default())
        .with_language(lang.unwrap_or_default())
        .with_source_name(source);

    let sink: Box<dyn TranscriptSink> = if to_stdout {
        Box::new(StdoutSink)
    } else {
        let dir = output_dir.unwrap_or_else(|| cfg.output_dir.clone());
        Box::new(FileSink::new(dir).with_report(write_report || cfg.write_report))
    };

    let outcome = match process_capture(&request, sink.as_ref(), cfg.max_payload_bytes).await {
        Ok(outcome) => outcome,
        Err(CaptureError::Extraction(e)) => {
            eprintln!("{}", serde_json::to_string_pretty(&e.failure_report(&request.source_name))?);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let report = &outcome.report;
    if let Some(path) = &outcome.path {
        println!("Saved transcript: {}", path.display());
        println!("  Events:            {}", report.num_events);
        println!("  Events with segs:  {}", report.num_events_with_segs);
        println!("  Segments:          {}", report.num_segs_extracted);
        println!("  Missing utf8:      {}", report.num_missing_utf8);
        println!("  Bytes:             {}", outcome.transcript_len);
        for warning in report.warnings.iter().filter(|w| w.as_str() != WARNINGS_NONE) {
            println!("  Warning: {}", warning);
        }
    } else {
        // stdout carries the transcript itself
        eprintln!(
            "\n[{}] {} segments, {} missing utf8",
            report.status, report.num_segs_extracted, report.num_missing_utf8
        );
    }

    Ok(())
}

async fn show_report(input: Option<PathBuf>) -> Result<()> {
    let (raw, source) = read_payload(input.as_deref()).await?;

    match extract_from(&raw, &source) {
        Ok(extraction) => {
            println!("{}", serde_json::to_string_pretty(&extraction.report)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&e.failure_report(&source))?);
            Err(e.into())
        }
    }
}

async fn list_tracks(input: &Path, prefer: Option<String>, pick: Option<String>) -> Result<()> {
    let cfg = config::config()?;
    let content = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read caption data: {}", input.display()))?;
    let data: CaptionData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse caption data: {}", input.display()))?;

    if !data.has_tracks() {
        println!("No caption tracks for \"{}\"", data.title());
        return Ok(());
    }

    let preferred = prefer.unwrap_or_else(|| cfg.preferred_language.clone());
    let ranked = rank_tracks(&data.caption_tracks, &preferred);

    if let Some(lang) = pick {
        let track = select_track(&ranked, Some(lang.as_str()))
            .with_context(|| format!("No caption track for language: {}", lang))?;
        println!("{}", track.base_url);
        return Ok(());
    }

    println!("Caption tracks for \"{}\":", data.title());
    for (i, track) in ranked.iter().enumerate() {
        println!("  {}. {}", i + 1, track.label());
        println!("     {}", track.base_url);
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("timedtext Configuration");
    println!("=======================");
    match &cfg.config_file {
        Some(path) => println!("Config file:        {}", path.display()),
        None => println!("Config file:        (none, using defaults)"),
    }
    println!("Output dir:         {}", cfg.output_dir.display());
    println!("Write report:       {}", cfg.write_report);
    println!("Max payload bytes:  {}", cfg.max_payload_bytes);
    println!("Preferred language: {}", cfg.preferred_language);

    Ok(())
}
