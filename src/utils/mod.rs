use crate::cli::OutputFormat;
use crate::extractors::VideoId;
use crate::transcript::Cue;

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Time covered by a cue sequence, from zero to the latest cue end
pub fn cues_span(cues: &[Cue]) -> f64 {
    cues.iter().map(Cue::end).fold(0.0, f64::max)
}

/// File name used when saving subtitles into a directory
pub fn default_output_filename(video_id: &VideoId, format: &OutputFormat) -> String {
    format!("youtube_subs_{}.{}", video_id, format.extension())
}

/// Check if the current environment has required tools
pub async fn check_dependencies(yt_dlp_path: &str) -> Vec<String> {
    let mut missing = Vec::new();

    if !check_command_available(yt_dlp_path).await {
        missing.push(format!("{} - required for listing YouTube caption tracks", yt_dlp_path));
    }

    missing
}

/// Check if a command is available in PATH
async fn check_command_available(command: &str) -> bool {
    use tokio::process::Command;

    Command::new(command)
        .arg("--version")
        .output()
        .await
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::extract_video_id;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.0), "30s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
    }

    #[test]
    fn test_cues_span() {
        assert_eq!(cues_span(&[]), 0.0);
        let cues = [Cue::new("a", 10.0, 5.0), Cue::new("b", 2.0, 1.0)];
        assert_eq!(cues_span(&cues), 15.0);
    }

    #[test]
    fn test_default_output_filename() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(default_output_filename(&id, &OutputFormat::Text), "youtube_subs_dQw4w9WgXcQ.txt");
        assert_eq!(default_output_filename(&id, &OutputFormat::Srt), "youtube_subs_dQw4w9WgXcQ.srt");
    }

    #[tokio::test]
    async fn test_missing_dependency_reported() {
        let missing = check_dependencies("definitely-not-yt-dlp-binary").await;
        assert_eq!(missing.len(), 1);
        assert!(missing[0].starts_with("definitely-not-yt-dlp-binary"));
    }
}
