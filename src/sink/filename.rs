//! Download filename sanitization.

use crate::tracks::DEFAULT_TITLE;

/// Longest filename produced, in characters
pub const MAX_FILENAME_CHARS: usize = 180;

/// Used when sanitization leaves nothing
pub const FALLBACK_FILENAME: &str = "transcript.txt";

/// Language part used when no track language is known
pub const DEFAULT_LANGUAGE_PART: &str = "lang";

fn is_reserved(c: char) -> bool {
    matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// Make `name` safe to use as a filename.
///
/// Each run of path-reserved characters becomes a single `_`, the result is
/// cut to [`MAX_FILENAME_CHARS`] and trimmed.
pub fn safe_filename(name: &str) -> String {
    let mut replaced = String::with_capacity(name.len());
    let mut in_run = false;

    for c in name.chars() {
        if is_reserved(c) {
            if !in_run {
                replaced.push('_');
            }
            in_run = true;
        } else {
            replaced.push(c);
            in_run = false;
        }
    }

    let truncated: String = replaced.chars().take(MAX_FILENAME_CHARS).collect();
    let trimmed = truncated.trim();

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Filename for a transcript: `<title>.<lang>.txt`, sanitized
pub fn transcript_filename(title: &str, language_code: &str) -> String {
    let title = if title.is_empty() { DEFAULT_TITLE } else { title };
    let lang = if language_code.is_empty() {
        DEFAULT_LANGUAGE_PART
    } else {
        language_code
    };

    safe_filename(&format!("{}.{}.txt", title, lang))
}
