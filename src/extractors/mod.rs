use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Length of a YouTube video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// An 11-character YouTube video identifier.
///
/// The token is opaque: it is only ever handed back to the transcript provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is built from constants only, so compilation cannot fail at runtime
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"(?:v=|/)([0-9A-Za-z_-]{{{VIDEO_ID_LEN}}})")).expect("valid video id pattern")
    })
}

/// Extract the video identifier from a YouTube URL.
///
/// Supports `watch?v=<id>`, `youtu.be/<id>` and `embed/<id>` shapes. This is a
/// heuristic, not a URL parser: scheme, host and query are not validated and the
/// leftmost 11-character run after `v=` or `/` wins.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    video_id_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}
