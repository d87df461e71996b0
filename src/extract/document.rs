//! Typed view over a timed-text payload.
//!
//! The payload comes from an undocumented, unstable source, so nothing here
//! deserialises with `#[derive(Deserialize)]` directly: one unexpected type deep
//! inside an event would reject the whole document. Instead the raw
//! `serde_json::Value` is walked once and every field access is an explicit
//! presence check.

use serde_json::Value;

/// Key of the top-level event list
pub const EVENTS_KEY: &str = "events";

/// Key of the segment list inside an event
pub const SEGS_KEY: &str = "segs";

/// Key of the caption text inside a segment
pub const UTF8_KEY: &str = "utf8";

/// A parsed payload whose top-level `events` field is an array
#[derive(Debug, Clone, PartialEq)]
pub struct TimedTextDocument {
    pub events: Vec<Event>,
}

impl TimedTextDocument {
    /// Build the document from a decoded value.
    ///
    /// Returns `None` when `events` is absent or not an array.
    pub fn from_value(value: &Value) -> Option<Self> {
        let events = value.get(EVENTS_KEY)?.as_array()?;

        Some(Self {
            events: events.iter().map(Event::from_value).collect(),
        })
    }
}

/// One top-level event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub segs: Segs,
}

impl Event {
    pub fn from_value(value: &Value) -> Self {
        let segs = match value.get(SEGS_KEY) {
            None => Segs::Missing,
            Some(Value::Array(segs)) => Segs::List(segs.iter().map(Segment::from_value).collect()),
            Some(other) if !is_truthy(other) => Segs::Missing,
            Some(other) => Segs::NotAnArray(json_type_name(other)),
        };

        Self { segs }
    }
}

/// State of an event's `segs` field
#[derive(Debug, Clone, PartialEq)]
pub enum Segs {
    /// Absent or falsy (`null`, `false`, `0`, `""`): a metadata-only event
    Missing,

    List(Vec<Segment>),

    /// Present and truthy but not an array; carries the JSON type name
    NotAnArray(&'static str),
}

/// JavaScript truthiness, which the payload producer relies on
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Type name used in report entries, with its article
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Smallest unit of caption text
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// `None` when the `utf8` key is missing or the segment is not an object
    pub utf8: Option<SegmentText>,
}

impl Segment {
    pub fn from_value(value: &Value) -> Self {
        let utf8 = value
            .as_object()
            .and_then(|obj| obj.get(UTF8_KEY))
            .map(SegmentText::from_value);

        Self { utf8 }
    }
}

/// Contents of a present `utf8` field
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentText {
    /// The expected case: caption text, used verbatim
    Text(String),

    /// Present but not a string (null, number, bool, array, object)
    NonString(Value),
}

impl SegmentText {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => SegmentText::Text(s.clone()),
            other => SegmentText::NonString(other.clone()),
        }
    }

    /// Text this segment contributes to the transcript.
    ///
    /// Strings pass through untouched. `null` contributes nothing; any other
    /// value contributes its compact JSON text.
    pub fn render(&self) -> String {
        match self {
            SegmentText::Text(s) => s.clone(),
            SegmentText::NonString(Value::Null) => String::new(),
            SegmentText::NonString(other) => other.to_string(),
        }
    }
}
