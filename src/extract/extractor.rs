//! Verbatim transcript extraction.
//!
//! Hard-fails at the document level (bad JSON, no `events` array) and
//! soft-degrades below it: a missing field on one segment never discards the
//! rest of a parsed transcript.

use serde_json::Value;
use tracing::{debug, info, warn};

use super::document::{json_type_name, Segs, SegmentText, TimedTextDocument};
use super::error::ExtractionError;
use super::placeholder::placeholder;
use super::report::{ExtractionReport, ReportBuilder, DEFAULT_SOURCE_NAME};

/// Characters of transcript included in the debug preview
const PREVIEW_CHARS: usize = 1000;

/// Transcript plus the report describing how it was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub transcript: String,
    pub report: ExtractionReport,
}

/// Extract a transcript from a raw timed-text payload.
pub fn extract(raw: &str) -> Result<Extraction, ExtractionError> {
    extract_from(raw, DEFAULT_SOURCE_NAME)
}

/// Same as [`extract`], labelling the report with `source_name`.
pub fn extract_from(raw: &str, source_name: &str) -> Result<Extraction, ExtractionError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        warn!(source = source_name, error = %e, "JSON_PARSE_FAILED");
        ExtractionError::ParseFailed(e)
    })?;

    let document = TimedTextDocument::from_value(&value).ok_or_else(|| {
        warn!(source = source_name, "NO_EVENTS_ARRAY");
        ExtractionError::MissingEventsArray
    })?;

    let extraction = extract_document(&document, source_name);
    log_report(&extraction);

    Ok(extraction)
}

/// Walk an already-validated document.
///
/// Never fails: every event and segment is either emitted or counted.
pub fn extract_document(document: &TimedTextDocument, source_name: &str) -> Extraction {
    let mut parts: Vec<String> = Vec::new();
    let mut stats = ReportBuilder::new(document.events.len());

    for (i, event) in document.events.iter().enumerate() {
        let segs = match &event.segs {
            Segs::Missing => {
                stats.no_segs(i);
                continue;
            }
            Segs::NotAnArray(kind) => {
                stats.non_array_segs(i, kind);
                continue;
            }
            Segs::List(segs) => segs,
        };

        stats.event_with_segs();

        for (j, seg) in segs.iter().enumerate() {
            match &seg.utf8 {
                None => {
                    parts.push(placeholder(i, j));
                    stats.missing_utf8(i, j);
                }
                Some(text) => {
                    parts.push(text.render());
                    match text {
                        SegmentText::Text(_) => stats.text(),
                        SegmentText::NonString(value) => {
                            stats.non_string_text(i, j, json_type_name(value))
                        }
                    }
                }
            }
        }
    }

    let transcript = parts.concat();
    let report = stats.finish(source_name, &transcript);

    Extraction { transcript, report }
}

fn log_report(extraction: &Extraction) {
    let report = &extraction.report;
    info!(
        source = %report.file_name,
        status = %report.status,
        num_events = report.num_events,
        num_events_with_segs = report.num_events_with_segs,
        num_segs_extracted = report.num_segs_extracted,
        num_missing_utf8 = report.num_missing_utf8,
        num_no_segs_events = report.num_no_segs_events,
        num_non_array_segs = report.num_non_array_segs,
        "Integrity report"
    );

    let preview: String = extraction.transcript.chars().take(PREVIEW_CHARS).collect();
    debug!(transcript_len = extraction.transcript.len(), "Transcript preview: {}", preview);
}
