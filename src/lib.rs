//! YouTube Subtitle Extractor - fetch YouTube captions and render them as SRT or plain text
//!
//! This library extracts a video id from a YouTube URL, picks the best caption track
//! for a requested language, downloads its cues and renders them. It backs both the
//! `subextract` HTTP service and its command line.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod provider;
pub mod server;
pub mod transcript;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{extract_video_id, VideoId};
pub use provider::{ProviderError, TranscriptProvider, TranscriptTrack, YtDlpProvider};
pub use transcript::{select_transcript, Cue, ExtractedSubtitles, TranscriptPipeline};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Ways an extraction request can fail
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("Invalid YouTube URL")]
    InvalidUrl,

    #[error("No subtitles found for this video. Please ensure the video has CC enabled.")]
    NoCaptionsAvailable,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
