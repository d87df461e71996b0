//! In-band markers for segments without text.
//!
//! A placeholder keeps the anomaly visible and searchable in the output file
//! without touching neighbouring text.

const OPEN: &str = "⟦MISSING_UTF8 event=";
const SEG: &str = " seg=";
const CLOSE: char = '⟧';

/// Marker inserted for a segment at `event`/`seg` that has no `utf8` field
pub fn placeholder(event: usize, seg: usize) -> String {
    format!("{}{}{}{}{}", OPEN, event, SEG, seg, CLOSE)
}

/// A placeholder located in a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMatch {
    pub event: usize,
    pub seg: usize,
    /// Byte offset range of the marker
    pub start: usize,
    pub end: usize,
}

/// Scan a transcript for placeholder markers, in order of appearance.
///
/// Only well-formed markers (`⟦MISSING_UTF8 event=<n> seg=<n>⟧`) are reported.
pub fn find_placeholders(transcript: &str) -> Vec<PlaceholderMatch> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(rel) = transcript[cursor..].find(OPEN) {
        let start = cursor + rel;
        let body_start = start + OPEN.len();

        match parse_body(&transcript[body_start..]) {
            Some((event, seg, body_len)) => {
                let end = body_start + body_len;
                found.push(PlaceholderMatch {
                    event,
                    seg,
                    start,
                    end,
                });
                cursor = end;
            }
            None => cursor = body_start,
        }
    }

    found
}

/// Parse `<n> seg=<n>⟧`, returning both indices and the consumed byte length
fn parse_body(rest: &str) -> Option<(usize, usize, usize)> {
    let (event, after_event) = leading_number(rest)?;
    let after_seg = after_event.strip_prefix(SEG)?;
    let (seg, tail) = leading_number(after_seg)?;
    let tail = tail.strip_prefix(CLOSE)?;

    Some((event, seg, rest.len() - tail.len()))
}

fn leading_number(s: &str) -> Option<(usize, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let n = s[..digits].parse().ok()?;
    Some((n, &s[digits..]))
}
