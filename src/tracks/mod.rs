//! Caption track listing and selection.
//!
//! A watch page exposes its available caption tracks as a `captionTracks`
//! list. Tracks are offered human-made first, then in the preferred language.

pub mod select;

use serde::{Deserialize, Serialize};

pub use select::{rank_tracks, select_track};

/// Title used when the page does not supply one
pub const DEFAULT_TITLE: &str = "youtube_transcript";

/// `kind` value of automatically generated captions
pub const KIND_ASR: &str = "asr";

/// One caption track as listed by the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    /// Timed-text URL for this track
    #[serde(default)]
    pub base_url: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub language_code: String,

    /// `asr` for auto-generated tracks, absent for human captions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl CaptionTrack {
    pub fn is_asr(&self) -> bool {
        self.kind.as_deref() == Some(KIND_ASR)
    }

    /// Label shown in a track picker: `name (lang, kind)`
    pub fn label(&self) -> String {
        match self.kind.as_deref().filter(|k| !k.is_empty()) {
            Some(kind) => format!("{} ({}, {})", self.name, self.language_code, kind),
            None => format!("{} ({})", self.name, self.language_code),
        }
    }
}

/// Caption metadata for one video
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionData {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,

    #[serde(default)]
    pub title: Option<String>,
}

impl CaptionData {
    /// Video title, or [`DEFAULT_TITLE`] when missing or empty
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    pub fn has_tracks(&self) -> bool {
        !self.caption_tracks.is_empty()
    }
}
