//! Handling of one captured caption payload.
//!
//! Guards the payload, runs extraction, names the output and hands it to a
//! sink. Document-level extraction errors come back as
//! [`CaptureError::Extraction`] with the original error intact.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::extract::{extract_from, ExtractionError, ExtractionReport};
use crate::sink::{transcript_filename, TranscriptSink};

/// Errors that can occur while handling a capture
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Empty response from captions API")]
    EmptyPayload,

    #[error("Payload too large: {actual} bytes (limit: {limit})")]
    PayloadTooLarge { actual: usize, limit: usize },

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Delivery via {sink} sink failed: {source}")]
    Delivery {
        sink: String,
        #[source]
        source: anyhow::Error,
    },
}

/// A captured payload and the track it belongs to
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub raw: String,
    pub title: String,
    pub language_code: String,
    /// Label stored in the report
    pub source_name: String,
}

impl CaptureRequest {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            title: String::new(),
            language_code: String::new(),
            source_name: crate::extract::DEFAULT_SOURCE_NAME.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    pub fn with_source_name(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }
}

/// Result of a delivered capture
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub filename: String,
    /// Where the transcript was written, for file sinks
    pub path: Option<PathBuf>,
    pub report: ExtractionReport,
    /// Transcript length in bytes
    pub transcript_len: usize,
}

/// Check a payload before extraction
pub fn validate_payload(raw: &str, max_payload_bytes: usize) -> Result<(), CaptureError> {
    if raw.trim().is_empty() {
        return Err(CaptureError::EmptyPayload);
    }
    if raw.len() > max_payload_bytes {
        return Err(CaptureError::PayloadTooLarge {
            actual: raw.len(),
            limit: max_payload_bytes,
        });
    }
    Ok(())
}

/// Extract a captured payload and deliver the transcript to `sink`
pub async fn process_capture(
    request: &CaptureRequest,
    sink: &dyn TranscriptSink,
    max_payload_bytes: usize,
) -> Result<CaptureOutcome, CaptureError> {
    info!(
        source = %request.source_name,
        bytes = request.raw.len(),
        "Processing captured payload"
    );

    validate_payload(&request.raw, max_payload_bytes)?;

    let extraction = extract_from(&request.raw, &request.source_name)?;

    let filename = transcript_filename(&request.title, &request.language_code);

    let path = sink
        .deliver(&filename, &extraction.transcript, &extraction.report)
        .await
        .map_err(|source| CaptureError::Delivery {
            sink: sink.name().to_string(),
            source,
        })?;

    Ok(CaptureOutcome {
        filename,
        path,
        transcript_len: extraction.transcript.len(),
        report: extraction.report,
    })
}
