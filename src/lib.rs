//! timedtext - verbatim transcripts from timed-text caption payloads
//!
//! Takes the raw JSON a video page fetches for its captions and turns it into
//! a plain text transcript, along with an integrity report that accounts for
//! every event and segment in the payload.
//!
//! # Architecture
//!
//! Extraction is a pure function; everything around it is plumbing:
//! - Invalid JSON or a missing `events` array is a hard error
//! - Malformed events and segments are counted, never fatal
//! - Segment text is emitted exactly as received, in order
//!
//! # Modules
//!
//! - `extract`: Transcript extraction and the integrity report
//! - `tracks`: Caption track listing and ranking
//! - `sink`: Filename sanitization and transcript delivery
//! - `capture`: Handling of one captured payload end to end
//! - `config`: CLI configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Save a transcript from a captured payload
//! timedtext extract --input captions.json3 --title "My Talk" --lang en
//!
//! # Inspect the integrity report only
//! cat captions.json3 | timedtext report
//! ```

pub mod capture;
pub mod cli;
pub mod config;
pub mod extract;
pub mod sink;
pub mod tracks;

// Re-export main types at crate root for convenience
pub use capture::{process_capture, CaptureError, CaptureOutcome, CaptureRequest};
pub use extract::{extract, ErrorKind, Extraction, ExtractionError, ExtractionReport, Status};
pub use sink::{FileSink, TranscriptSink};
pub use tracks::{CaptionData, CaptionTrack};
