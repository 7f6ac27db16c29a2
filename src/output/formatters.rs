//! Subtitle renderers.
//!
//! Every renderer is a pure function of the cue sequence: the same cues always
//! produce byte-identical output.

use anyhow::Result;

use crate::transcript::{Cue, ExtractedSubtitles};

/// SRT and plain-text views of one cue sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub srt: String,
    pub txt: String,
}

/// Render the two text views carried in every extraction result
pub fn render(cues: &[Cue]) -> Rendered {
    Rendered {
        srt: generate_srt(cues),
        txt: generate_text(cues),
    }
}

/// Split seconds into (hours, minutes, seconds, milliseconds), truncating each part.
///
/// There is no carry between parts, so 59.9999s is 59s 999ms rather than 1:00.000.
fn split_timestamp(seconds: f64) -> (u64, u64, u64, u64) {
    let seconds = seconds.max(0.0);
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let millis = ((seconds - seconds.trunc()) * 1000.0) as u64;
    (hours, minutes, secs, millis)
}

/// Format seconds as SRT timestamp: HH:MM:SS,mmm
pub fn format_timestamp(seconds: f64) -> String {
    let (hours, minutes, secs, millis) = split_timestamp(seconds);
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// Format seconds as VTT timestamp: HH:MM:SS.mmm
pub fn format_vtt_timestamp(seconds: f64) -> String {
    let (hours, minutes, secs, millis) = split_timestamp(seconds);
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

/// Generate SRT subtitle content, one numbered block per cue
pub fn generate_srt(cues: &[Cue]) -> String {
    let mut output = String::new();

    for (i, cue) in cues.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_timestamp(cue.start),
            format_timestamp(cue.end()),
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

/// Generate WebVTT subtitle content
pub fn generate_vtt(cues: &[Cue]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for cue in cues {
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_timestamp(cue.start),
            format_vtt_timestamp(cue.end()),
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

/// Join cue texts with newlines, no timing information
pub fn generate_text(cues: &[Cue]) -> String {
    cues.iter()
        .map(|cue| cue.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a full extraction result as pretty JSON
pub fn format_as_json(result: &ExtractedSubtitles) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
