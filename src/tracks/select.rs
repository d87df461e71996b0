//! Track ordering.

use super::CaptionTrack;

/// Order tracks for display: human captions before ASR, then tracks whose
/// language code starts with `preferred_language` (case-insensitive).
///
/// The sort is stable, so ties keep the page's order.
pub fn rank_tracks(tracks: &[CaptionTrack], preferred_language: &str) -> Vec<CaptionTrack> {
    let preferred = preferred_language.to_lowercase();

    let mut ranked = tracks.to_vec();
    ranked.sort_by_key(|track| {
        let asr = track.is_asr();
        let other_language = !track.language_code.to_lowercase().starts_with(&preferred);
        (asr, other_language)
    });
    ranked
}

/// Pick a track: an exact language match if asked for, else the best ranked.
pub fn select_track<'a>(
    ranked: &'a [CaptionTrack],
    language_code: Option<&str>,
) -> Option<&'a CaptionTrack> {
    match language_code {
        Some(code) => ranked
            .iter()
            .find(|t| t.language_code.eq_ignore_ascii_case(code)),
        None => ranked.first(),
    }
}
