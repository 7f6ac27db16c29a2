use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::process::Stdio;
use tokio::process::Command;
use url::Url;

use super::{ProviderError, TranscriptProvider, TranscriptTrack};
use crate::extractors::VideoId;
use crate::transcript::Cue;

/// Caption format fetched from YouTube's timed-text endpoint
const CAPTION_EXT: &str = "json3";

/// Pseudo-language yt-dlp reports for live stream chat replays
const LIVE_CHAT: &str = "live_chat";

/// Caption track listing through yt-dlp, cue download over HTTP
pub struct YtDlpProvider {
    yt_dlp_path: String,
    client: reqwest::Client,
}

/// The part of `yt-dlp --dump-json` output we care about
#[derive(Debug, Default, Deserialize)]
struct VideoInfo {
    #[serde(default)]
    subtitles: Option<BTreeMap<String, Vec<CaptionFormat>>>,
    #[serde(default)]
    automatic_captions: Option<BTreeMap<String, Vec<CaptionFormat>>>,
}

#[derive(Debug, Deserialize)]
struct CaptionFormat {
    ext: String,
    url: String,
    name: Option<String>,
}

/// YouTube timed-text document in `json3` format
#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: f64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: f64,
    segs: Option<Vec<TimedTextSegment>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

impl YtDlpProvider {
    pub fn new(yt_dlp_path: impl Into<String>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Get video information using yt-dlp
    async fn get_video_info(&self, video_id: &VideoId) -> Result<VideoInfo, ProviderError> {
        let url = video_id.watch_url();
        tracing::debug!("Listing caption tracks for: {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--dump-json",
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
                url.as_str(),
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ProviderError::Command(error.trim().to_string()));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl Default for YtDlpProvider {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

#[async_trait]
impl TranscriptProvider for YtDlpProvider {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<TranscriptTrack>, ProviderError> {
        let info = self.get_video_info(video_id).await?;
        tracks_from_info(video_id, info)
    }

    async fn fetch(&self, track: &TranscriptTrack) -> Result<Vec<Cue>, ProviderError> {
        tracing::debug!("Downloading {} captions", track.language_code);

        let body = self
            .client
            .get(&track.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        cues_from_timed_text(&body)
    }

    fn provider_name(&self) -> &'static str {
        "yt-dlp"
    }
}

/// Build the track list: manual tracks first, then generated ones, each by language code
fn tracks_from_info(video_id: &VideoId, info: VideoInfo) -> Result<Vec<TranscriptTrack>, ProviderError> {
    let manual = info.subtitles.unwrap_or_default();
    let generated = info.automatic_captions.unwrap_or_default();

    if manual.is_empty() && generated.is_empty() {
        return Err(ProviderError::TranscriptsDisabled(video_id.to_string()));
    }

    let mut tracks: Vec<TranscriptTrack> = manual
        .into_iter()
        .filter(|(code, _)| code != LIVE_CHAT)
        .filter_map(|(code, formats)| track_from_formats(code, &formats, false))
        .collect();

    let mut seen = HashSet::new();
    for (code, formats) in generated {
        // yt-dlp lists every machine-translation target alongside the real track
        let translated = formats.iter().any(|f| is_translation(&f.url));
        if translated {
            continue;
        }

        let code = code.strip_suffix("-orig").map(str::to_string).unwrap_or(code);
        if !seen.insert(code.clone()) {
            continue;
        }

        if let Some(track) = track_from_formats(code, &formats, true) {
            tracks.push(track);
        }
    }

    if tracks.is_empty() {
        return Err(ProviderError::NoTranscriptFound(video_id.to_string()));
    }

    Ok(tracks)
}

fn track_from_formats(code: String, formats: &[CaptionFormat], is_generated: bool) -> Option<TranscriptTrack> {
    let format = formats.iter().find(|f| f.ext == CAPTION_EXT)?;

    Some(TranscriptTrack {
        language: format.name.clone().unwrap_or_else(|| code.clone()),
        language_code: code,
        is_generated,
        url: format.url.clone(),
    })
}

fn is_translation(url: &str) -> bool {
    Url::parse(url)
        .map(|u| u.query_pairs().any(|(k, _)| k == "tlang"))
        .unwrap_or(false)
}

/// Convert a `json3` timed-text document into cues, in document order
fn cues_from_timed_text(body: &str) -> Result<Vec<Cue>, ProviderError> {
    let doc: TimedText = serde_json::from_str(body)?;

    let cues = doc
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|seg| seg.utf8).collect();
            if text.trim().is_empty() {
                return None;
            }

            Some(Cue::new(text, event.start_ms / 1000.0, event.duration_ms / 1000.0))
        })
        .collect();

    Ok(cues)
}
