use serde::{Deserialize, Serialize};

pub mod pipeline;

use crate::provider::TranscriptTrack;

pub use pipeline::{ExtractedSubtitles, TranscriptPipeline};

/// Fallback language tried after the caller's preferred one
pub const FALLBACK_LANGUAGE: &str = "en";

/// One timed caption unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Caption text, may span several lines
    pub text: String,

    /// Start time in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl Cue {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start: start.max(0.0),
            duration: duration.max(0.0),
        }
    }

    /// End time in seconds
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Pick the track that best matches `preferred_lang`.
///
/// Manual tracks in `[preferred_lang, "en"]` are tried first, then generated
/// tracks in the same languages, and finally the first track the provider
/// listed. Returns `None` only when `tracks` is empty.
pub fn select_transcript<'a>(
    tracks: &'a [TranscriptTrack],
    preferred_lang: &str,
) -> Option<&'a TranscriptTrack> {
    let languages = [preferred_lang, FALLBACK_LANGUAGE];

    find_track(tracks, &languages, false)
        .or_else(|| find_track(tracks, &languages, true))
        .or_else(|| tracks.first())
}

fn find_track<'a>(
    tracks: &'a [TranscriptTrack],
    languages: &[&str],
    is_generated: bool,
) -> Option<&'a TranscriptTrack> {
    languages.iter().find_map(|code| {
        tracks
            .iter()
            .find(|track| track.is_generated == is_generated && track.language_code == *code)
    })
}
