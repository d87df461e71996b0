//! Filesystem sink.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use super::TranscriptSink;
use crate::extract::ExtractionReport;

/// Suffix of the report written next to a transcript
pub const REPORT_SUFFIX: &str = ".report.json";

/// Sidecar JSON stored next to a transcript file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub written_at: DateTime<Utc>,
    /// Transcript filename the report belongs to
    pub filename: String,
    pub report: ExtractionReport,
}

/// Writes transcripts into a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    write_report: bool,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_report: false,
        }
    }

    /// Also write `<filename>.report.json`
    pub fn with_report(mut self, write_report: bool) -> Self {
        self.write_report = write_report;
        self
    }

    pub fn report_path(&self, filename: &str) -> PathBuf {
        self.dir.join(format!("{}{}", filename, REPORT_SUFFIX))
    }
}

#[async_trait]
impl TranscriptSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn deliver(
        &self,
        filename: &str,
        transcript: &str,
        report: &ExtractionReport,
    ) -> Result<Option<PathBuf>> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create output directory: {}", self.dir.display()))?;

        let path = self.dir.join(filename);
        fs::write(&path, transcript.as_bytes())
            .await
            .with_context(|| format!("Failed to write transcript: {}", path.display()))?;

        if self.write_report {
            let record = ReportRecord {
                written_at: Utc::now(),
                filename: filename.to_string(),
                report: report.clone(),
            };
            let report_path = self.report_path(filename);
            let json = serde_json::to_string_pretty(&record)?;
            fs::write(&report_path, json)
                .await
                .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
        }

        info!(path = %path.display(), bytes = transcript.len(), "Transcript written");
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_writes_transcript_verbatim() {
        let temp = TempDir::new().unwrap();
        let sink = FileSink::new(temp.path().join("out"));
        let out = extract(r#"{"events":[{"segs":[{"utf8":" a \n"}]}]}"#).unwrap();

        let path = sink
            .deliver("t.en.txt", &out.transcript, &out.report)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), " a \n");
        assert!(!sink.report_path("t.en.txt").exists());
    }

    #[tokio::test]
    async fn test_writes_report_sidecar() {
        let temp = TempDir::new().unwrap();
        let sink = FileSink::new(temp.path()).with_report(true);
        let out = extract(r#"{"events":[{"segs":[{}]}]}"#).unwrap();

        sink.deliver("t.txt", &out.transcript, &out.report)
            .await
            .unwrap();

        let json = std::fs::read_to_string(sink.report_path("t.txt")).unwrap();
        let record: ReportRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.filename, "t.txt");
        assert_eq!(record.report, out.report);
        assert_eq!(record.report.num_missing_utf8, 1);
    }
}
