use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::transcript::ExtractedSubtitles;
use crate::utils::default_output_filename;

pub mod formatters;

pub use formatters::*;

/// Render an extraction result in the requested format
pub fn format_result(result: &ExtractedSubtitles, format: &OutputFormat) -> Result<String> {
    let content = match format {
        OutputFormat::Text => result.txt.clone(),
        OutputFormat::Json => format_as_json(result)?,
        OutputFormat::Srt => result.srt.clone(),
        OutputFormat::Vtt => generate_vtt(&result.subtitles),
    };

    Ok(content)
}

/// Save extraction result to file.
///
/// When `path` is a directory the file is named after the video id.
pub async fn save_to_file(
    result: &ExtractedSubtitles,
    path: &Path,
    format: &OutputFormat,
) -> Result<PathBuf> {
    let content = format_result(result, format)?;

    let target = if path.is_dir() {
        path.join(default_output_filename(&result.video_id, format))
    } else {
        path.to_path_buf()
    };

    fs_err::write(&target, content)?;
    Ok(target)
}

/// Print extraction result to console
pub fn print_to_console(result: &ExtractedSubtitles, format: &OutputFormat) -> Result<()> {
    let content = format_result(result, format)?;

    println!("{}", content);
    Ok(())
}
