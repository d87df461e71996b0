//! Timed-text transcript extraction.
//!
//! Turns a raw caption payload (`{"events":[{"segs":[{"utf8":"..."}]}]}`) into
//! a flat, verbatim transcript plus an [`ExtractionReport`] accounting for
//! every event and segment.
//!
//! # Failure policy
//!
//! - **Document level**: invalid JSON or a missing `events` array aborts with
//!   an [`ExtractionError`].
//! - **Element level**: events without segments and segments without text are
//!   counted and logged in the report. Missing text shows up in the transcript
//!   as a `⟦MISSING_UTF8 event=i seg=j⟧` placeholder.
//!
//! Extraction is a pure function of its input. It holds no state and may be
//! called from any number of threads at once.
//!
//! # Example
//!
//! ```
//! let out = timedtext::extract::extract(r#"{"events":[{"segs":[{"utf8":"hi"}]}]}"#).unwrap();
//! assert_eq!(out.transcript, "hi");
//! assert_eq!(out.report.num_segs_extracted, 1);
//! ```

pub mod document;
pub mod error;
pub mod extractor;
pub mod placeholder;
pub mod report;

pub use document::{Event, Segment, SegmentText, Segs, TimedTextDocument};
pub use error::{ErrorKind, ExtractionError};
pub use extractor::{extract, extract_document, extract_from, Extraction};
pub use placeholder::{find_placeholders, placeholder, PlaceholderMatch};
pub use report::{compute_hash, ExtractionReport, Status, DEFAULT_SOURCE_NAME};
