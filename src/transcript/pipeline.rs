use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::{select_transcript, Cue};
use crate::config::Config;
use crate::extractors::{extract_video_id, VideoId};
use crate::output::formatters::render;
use crate::provider::{ProviderError, TranscriptProvider, TranscriptTrack};
use crate::ExtractError;

/// Everything produced for one extraction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSubtitles {
    pub video_id: VideoId,

    /// Display name of the selected track's language
    pub language: String,

    pub language_code: String,

    pub is_generated: bool,

    /// Cues exactly as the provider returned them
    pub subtitles: Vec<Cue>,

    /// SRT rendering of `subtitles`
    pub srt: String,

    /// Plain-text rendering of `subtitles`
    pub txt: String,
}

/// URL in, rendered subtitles out.
///
/// Holds no per-request state and is shared by every request.
pub struct TranscriptPipeline {
    provider: Arc<dyn TranscriptProvider>,
    default_language: String,
    timeout: Duration,
}

impl TranscriptPipeline {
    pub fn new(provider: Arc<dyn TranscriptProvider>, config: &Config) -> Self {
        Self {
            provider,
            default_language: config.default_language.clone(),
            timeout: config.provider_timeout(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Extract the video id from `url`, pick a caption track and render it.
    ///
    /// `lang` falls back to the configured default language. The provider
    /// calls share a single deadline.
    pub async fn extract(&self, url: &str, lang: Option<&str>) -> Result<ExtractedSubtitles, ExtractError> {
        let video_id = extract_video_id(url).ok_or(ExtractError::InvalidUrl)?;
        let lang = lang.unwrap_or(self.default_language.as_str());
        tracing::debug!(%video_id, lang, "Extracted video id");

        let (track, cues) = tokio::time::timeout(self.timeout, self.fetch_transcript(&video_id, lang))
            .await
            .map_err(|_| ExtractError::Provider(ProviderError::Timeout(self.timeout)))??;

        let rendered = render(&cues);
        tracing::info!(
            %video_id,
            language_code = %track.language_code,
            is_generated = track.is_generated,
            cues = cues.len(),
            "Rendered subtitles"
        );

        Ok(ExtractedSubtitles {
            video_id,
            language: track.language,
            language_code: track.language_code,
            is_generated: track.is_generated,
            subtitles: cues,
            srt: rendered.srt,
            txt: rendered.txt,
        })
    }

    async fn fetch_transcript(
        &self,
        video_id: &VideoId,
        lang: &str,
    ) -> Result<(TranscriptTrack, Vec<Cue>), ExtractError> {
        let tracks = self.provider.list_tracks(video_id).await.map_err(|e| {
            if e.is_unavailable() {
                tracing::debug!(%video_id, "{}", e);
                ExtractError::NoCaptionsAvailable
            } else {
                ExtractError::Provider(e)
            }
        })?;
        tracing::debug!(%video_id, tracks = tracks.len(), "Listed caption tracks");

        let track = select_transcript(&tracks, lang)
            .cloned()
            .ok_or(ExtractError::NoCaptionsAvailable)?;
        tracing::debug!(
            %video_id,
            language_code = %track.language_code,
            is_generated = track.is_generated,
            "Selected caption track"
        );

        let cues = self.provider.fetch(&track).await?;
        tracing::debug!(%video_id, cues = cues.len(), "Fetched cues");

        Ok((track, cues))
    }
}
