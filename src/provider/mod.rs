use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

pub mod youtube;

use crate::extractors::VideoId;
use crate::transcript::Cue;

pub use youtube::YtDlpProvider;

/// One caption stream available for a video.
///
/// This is a handle only: the cues are obtained through [`TranscriptProvider::fetch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptTrack {
    /// Language display name, e.g. "English (auto-generated)"
    pub language: String,

    /// Language code, e.g. "en"
    pub language_code: String,

    /// Whether the track was machine generated rather than authored
    pub is_generated: bool,

    /// Provider-specific location of the caption data
    pub url: String,
}

/// Failures reported by a transcript provider
#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("Subtitles are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("No transcript found for video {0}")]
    NoTranscriptFound(String),

    #[error("Transcript provider timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("yt-dlp failed: {0}")]
    Command(String),

    #[error("Failed to run yt-dlp: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to download captions: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProviderError {
    /// True for the two failures that mean "this video has no captions"
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ProviderError::TranscriptsDisabled(_) | ProviderError::NoTranscriptFound(_)
        )
    }
}

/// Source of caption tracks and their cues
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// List the caption tracks available for a video, in provider order
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<TranscriptTrack>, ProviderError>;

    /// Fetch the cues of one track
    async fn fetch(&self, track: &TranscriptTrack) -> Result<Vec<Cue>, ProviderError>;

    /// Get the name of this provider
    fn provider_name(&self) -> &'static str;
}
