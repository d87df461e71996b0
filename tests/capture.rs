//! Capture Integration Tests
//!
//! End-to-end handling of a captured payload through a sink.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use tempfile::TempDir;
use timedtext::capture::{process_capture, CaptureError, CaptureRequest};
use timedtext::extract::{ErrorKind, ExtractionReport};
use timedtext::sink::{FileSink, TranscriptSink};

const LIMIT: usize = 1024 * 1024;

/// Sink that keeps delivered transcripts in memory
#[derive(Default)]
struct MemorySink {
    delivered: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl TranscriptSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn deliver(
        &self,
        filename: &str,
        transcript: &str,
        _report: &ExtractionReport,
    ) -> Result<Option<PathBuf>> {
        self.delivered
            .lock()
            .unwrap()
            .push((filename.to_string(), transcript.to_string()));
        Ok(None)
    }
}

/// Sink that always fails
struct BrokenSink;

#[async_trait]
impl TranscriptSink for BrokenSink {
    fn name(&self) -> &str {
        "broken"
    }

    async fn deliver(&self, _: &str, _: &str, _: &ExtractionReport) -> Result<Option<PathBuf>> {
        anyhow::bail!("disk full")
    }
}

#[tokio::test]
async fn test_capture_delivers_transcript() {
    let sink = MemorySink::default();
    let request = CaptureRequest::new(r#"{"events":[{"segs":[{"utf8":"hi "},{"utf8":"there"}]}]}"#)
        .with_title("Talk: Part 1/2")
        .with_language("en");

    let outcome = process_capture(&request, &sink, LIMIT).await.unwrap();

    assert_eq!(outcome.filename, "Talk_ Part 1_2.en.txt");
    assert_eq!(outcome.transcript_len, 8);
    assert!(outcome.path.is_none());

    let delivered = sink.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].1, "hi there");
}

#[tokio::test]
async fn test_capture_default_filename() {
    let sink = MemorySink::default();
    let request = CaptureRequest::new(r#"{"events":[]}"#);

    let outcome = process_capture(&request, &sink, LIMIT).await.unwrap();
    assert_eq!(outcome.filename, "youtube_transcript.lang.txt");
}

#[tokio::test]
async fn test_capture_rejects_empty_payload() {
    let sink = MemorySink::default();
    let result = process_capture(&CaptureRequest::new("   "), &sink, LIMIT).await;

    assert!(matches!(result, Err(CaptureError::EmptyPayload)));
    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_capture_rejects_oversized_payload() {
    let sink = MemorySink::default();
    let raw = format!(r#"{{"events":[{{"segs":[{{"utf8":"{}"}}]}}]}}"#, "x".repeat(200));
    let result = process_capture(&CaptureRequest::new(raw), &sink, 100).await;

    match result {
        Err(CaptureError::PayloadTooLarge { limit, .. }) => assert_eq!(limit, 100),
        other => panic!("Expected PayloadTooLarge, got {:?}", other),
    }
}

#[tokio::test]
async fn test_capture_extraction_failure_skips_sink() {
    let sink = MemorySink::default();

    let result = process_capture(&CaptureRequest::new("{not valid"), &sink, LIMIT).await;
    match result {
        Err(CaptureError::Extraction(e)) => assert_eq!(e.kind(), ErrorKind::ParseFailed),
        other => panic!("Expected extraction error, got {:?}", other),
    }

    let result = process_capture(&CaptureRequest::new(r#"{"foo":1}"#), &sink, LIMIT).await;
    match result {
        Err(CaptureError::Extraction(e)) => {
            assert_eq!(e.kind(), ErrorKind::MissingEventsArray)
        }
        other => panic!("Expected extraction error, got {:?}", other),
    }

    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_capture_delivery_failure() {
    let result = process_capture(&CaptureRequest::new(r#"{"events":[]}"#), &BrokenSink, LIMIT).await;

    match result {
        Err(CaptureError::Delivery { sink, source }) => {
            assert_eq!(sink, "broken");
            assert_eq!(source.to_string(), "disk full");
        }
        other => panic!("Expected delivery error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_capture_to_file_sink() {
    let temp = TempDir::new().unwrap();
    let sink = FileSink::new(temp.path()).with_report(true);
    let request = CaptureRequest::new(r#"{"events":[{"segs":[{"utf8":"  keep  "},{}]}]}"#)
        .with_title("clip")
        .with_language("de")
        .with_source_name("clip.json3");

    let outcome = process_capture(&request, &sink, LIMIT).await.unwrap();
    let path = outcome.path.unwrap();

    assert_eq!(path, temp.path().join("clip.de.txt"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "  keep  ⟦MISSING_UTF8 event=0 seg=1⟧"
    );
    assert_eq!(outcome.report.file_name, "clip.json3");
    assert!(sink.report_path("clip.de.txt").exists());
}
