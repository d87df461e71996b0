//! Integrity report for one extraction run.
//!
//! The report is serialised with the same camelCase keys the browser-side
//! tooling logs, so a report written by the CLI can be diffed against one
//! captured from the console.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Source label used when the caller does not name the payload
pub const DEFAULT_SOURCE_NAME: &str = "captured_from_network";

/// Sentinel for an empty warnings list
pub const WARNINGS_NONE: &str = "none";

/// Sentinel for an empty per-event or per-segment log
pub const LOG_NONE: &str = "None";

/// Outcome of an extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Document parsed and every event was accounted for
    Success,
    /// Payload was not valid JSON
    JsonParseFailed,
    /// Payload parsed but had no `events` array
    NoEventsArray,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::JsonParseFailed => "JSON_PARSE_FAILED",
            Status::NoEventsArray => "NO_EVENTS_ARRAY",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured diagnostic summary of one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    /// Label of the payload source
    pub file_name: String,

    /// Whether the payload decoded as JSON
    pub parsed_ok: bool,

    pub status: Status,

    /// Decoder message, only for `JSON_PARSE_FAILED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_error: Option<String>,

    pub num_events: usize,
    pub num_events_with_segs: usize,

    /// Segments that produced a token, placeholders included
    pub num_segs_extracted: usize,

    /// Segments without a `utf8` field
    pub num_missing_utf8: usize,

    pub num_no_segs_events: usize,

    /// Segments whose `utf8` field was present but not a string
    #[serde(default)]
    pub num_non_string_utf8: usize,

    /// Events whose `segs` field was truthy but not an array
    #[serde(default)]
    pub num_non_array_segs: usize,

    /// Either real warnings or `["none"]`
    pub warnings: Vec<String>,

    /// Either per-segment entries or `["None"]`
    #[serde(default)]
    pub missing_utf8_log: Vec<String>,

    /// Either per-event entries or `["None"]`
    #[serde(default)]
    pub no_segs_log: Vec<String>,

    /// Either per-segment entries or `["None"]`
    #[serde(default)]
    pub non_string_utf8_log: Vec<String>,

    /// Either per-event entries or `["None"]`
    #[serde(default)]
    pub non_array_segs_log: Vec<String>,

    /// `sha256:<hex>` digest of the transcript bytes, on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_sha256: Option<String>,
}

impl ExtractionReport {
    /// Segments whose text came through as a string or stringified value
    pub fn num_text_segments(&self) -> usize {
        self.num_segs_extracted.saturating_sub(self.num_missing_utf8)
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// Report for a payload that could not be decoded at all
    pub(crate) fn parse_failed(source_name: &str, json_error: String) -> Self {
        Self {
            file_name: source_name.to_string(),
            parsed_ok: false,
            status: Status::JsonParseFailed,
            json_error: Some(json_error),
            num_events: 0,
            num_events_with_segs: 0,
            num_segs_extracted: 0,
            num_missing_utf8: 0,
            num_no_segs_events: 0,
            num_non_string_utf8: 0,
            num_non_array_segs: 0,
            warnings: Vec::new(),
            missing_utf8_log: Vec::new(),
            no_segs_log: Vec::new(),
            non_string_utf8_log: Vec::new(),
            non_array_segs_log: Vec::new(),
            transcript_sha256: None,
        }
    }

    /// Report for a valid document without an `events` array
    pub(crate) fn no_events_array(source_name: &str) -> Self {
        Self {
            parsed_ok: true,
            status: Status::NoEventsArray,
            json_error: None,
            warnings: vec!["events array missing or not a list".to_string()],
            ..Self::parse_failed(source_name, String::new())
        }
    }
}

/// Running totals while walking the events.
///
/// Converted into an [`ExtractionReport`] once every event has been visited.
#[derive(Debug, Default)]
pub(crate) struct ReportBuilder {
    pub num_events: usize,
    pub num_events_with_segs: usize,
    pub num_segs_extracted: usize,
    pub num_missing_utf8: usize,
    pub num_no_segs_events: usize,
    pub num_non_string_utf8: usize,
    pub num_non_array_segs: usize,
    pub missing_utf8_log: Vec<String>,
    pub no_segs_log: Vec<String>,
    pub non_string_utf8_log: Vec<String>,
    pub non_array_segs_log: Vec<String>,
}

impl ReportBuilder {
    pub fn new(num_events: usize) -> Self {
        Self {
            num_events,
            ..Default::default()
        }
    }

    pub fn no_segs(&mut self, event: usize) {
        self.num_no_segs_events += 1;
        self.no_segs_log
            .push(format!("event={}: NO_SEGS (no segs array)", event));
    }

    pub fn event_with_segs(&mut self) {
        self.num_events_with_segs += 1;
    }

    /// An event-with-segs whose `segs` could not be iterated
    pub fn non_array_segs(&mut self, event: usize, kind: &str) {
        self.num_events_with_segs += 1;
        self.num_non_array_segs += 1;
        self.non_array_segs_log.push(format!(
            "event={}: segs is {}, not an array",
            event, kind
        ));
    }

    pub fn missing_utf8(&mut self, event: usize, seg: usize) {
        self.num_missing_utf8 += 1;
        self.num_segs_extracted += 1;
        self.missing_utf8_log.push(format!(
            "event={} seg={}: missing utf8 field, inserted placeholder",
            event, seg
        ));
    }

    pub fn text(&mut self) {
        self.num_segs_extracted += 1;
    }

    pub fn non_string_text(&mut self, event: usize, seg: usize, kind: &str) {
        self.num_non_string_utf8 += 1;
        self.num_segs_extracted += 1;
        self.non_string_utf8_log.push(format!(
            "event={} seg={}: utf8 field is {}, not a string",
            event, seg, kind
        ));
    }

    pub fn finish(self, source_name: &str, transcript: &str) -> ExtractionReport {
        let mut warnings = Vec::new();
        if self.num_no_segs_events > 0 {
            warnings.push(format!(
                "{} events had NO_SEGS (metadata-only)",
                self.num_no_segs_events
            ));
        }
        if self.num_non_string_utf8 > 0 {
            warnings.push(format!(
                "{} segments had a non-string utf8 field",
                self.num_non_string_utf8
            ));
        }
        if self.num_non_array_segs > 0 {
            warnings.push(format!(
                "{} events had a segs field that is not an array",
                self.num_non_array_segs
            ));
        }

        ExtractionReport {
            file_name: source_name.to_string(),
            parsed_ok: true,
            status: Status::Success,
            json_error: None,
            num_events: self.num_events,
            num_events_with_segs: self.num_events_with_segs,
            num_segs_extracted: self.num_segs_extracted,
            num_missing_utf8: self.num_missing_utf8,
            num_no_segs_events: self.num_no_segs_events,
            num_non_string_utf8: self.num_non_string_utf8,
            num_non_array_segs: self.num_non_array_segs,
            warnings: or_sentinel(warnings, WARNINGS_NONE),
            missing_utf8_log: or_sentinel(self.missing_utf8_log, LOG_NONE),
            no_segs_log: or_sentinel(self.no_segs_log, LOG_NONE),
            non_string_utf8_log: or_sentinel(self.non_string_utf8_log, LOG_NONE),
            non_array_segs_log: or_sentinel(self.non_array_segs_log, LOG_NONE),
            transcript_sha256: Some(compute_hash(transcript.as_bytes())),
        }
    }
}

fn or_sentinel(entries: Vec<String>, sentinel: &str) -> Vec<String> {
    if entries.is_empty() {
        vec![sentinel.to_string()]
    } else {
        entries
    }
}

/// SHA256 of a byte slice as `sha256:<hex>`
pub fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
