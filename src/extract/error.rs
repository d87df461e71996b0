//! Document-level extraction failures.
//!
//! Only two things abort an extraction. Anything wrong below the document
//! level is recorded in the report instead.

use thiserror::Error;

use super::report::ExtractionReport;

/// Which document-level check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseFailed,
    MissingEventsArray,
}

/// Terminal extraction error
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("JSON_PARSE_FAILED: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("NO_EVENTS_ARRAY: events array missing or not a list")]
    MissingEventsArray,
}

impl ExtractionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::ParseFailed(_) => ErrorKind::ParseFailed,
            ExtractionError::MissingEventsArray => ErrorKind::MissingEventsArray,
        }
    }

    /// Whether the payload decoded before the failure
    pub fn parsed_ok(&self) -> bool {
        matches!(self, ExtractionError::MissingEventsArray)
    }

    /// Report describing this failure, for diagnostics consumers
    pub fn failure_report(&self, source_name: &str) -> ExtractionReport {
        match self {
            ExtractionError::ParseFailed(err) => {
                ExtractionReport::parse_failed(source_name, err.to_string())
            }
            ExtractionError::MissingEventsArray => ExtractionReport::no_events_array(source_name),
        }
    }
}
