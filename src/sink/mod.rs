//! Transcript delivery.
//!
//! A sink receives the finished transcript and its report. Where the text ends
//! up (a file, stdout) is the sink's business; extraction does not care.

pub mod file;
pub mod filename;

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::extract::ExtractionReport;

pub use file::{FileSink, ReportRecord, REPORT_SUFFIX};
pub use filename::{safe_filename, transcript_filename};

/// Destination for extracted transcripts
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    /// Human-readable sink name
    fn name(&self) -> &str;

    /// Persist or emit a transcript.
    ///
    /// Returns the written path for sinks that write files.
    async fn deliver(
        &self,
        filename: &str,
        transcript: &str,
        report: &ExtractionReport,
    ) -> Result<Option<PathBuf>>;
}

/// Writes the transcript to stdout, unmodified
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

#[async_trait]
impl TranscriptSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn deliver(
        &self,
        _filename: &str,
        transcript: &str,
        _report: &ExtractionReport,
    ) -> Result<Option<PathBuf>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(transcript.as_bytes()).await?;
        stdout.flush().await?;
        Ok(None)
    }
}
