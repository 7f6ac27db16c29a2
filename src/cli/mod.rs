use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "subextract",
    about = "YouTube Subtitle Extractor - Fetch YouTube captions as SRT, WebVTT, text or JSON",
    version,
    long_about = "Extracts the captions of a YouTube video and renders them as subtitle files or plain text. Runs as an HTTP service (POST /api/extract) or as a one-shot command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./config.yaml or the user config directory)
    #[arg(short, long, global = true, env = "SUBEXTRACT_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service
    Serve {
        /// Address to bind (overrides the config file)
        #[arg(long, env = "SUBEXTRACT_HOST")]
        host: Option<String>,

        /// Port to bind (overrides the config file)
        #[arg(short, long, env = "SUBEXTRACT_PORT")]
        port: Option<u16>,
    },

    /// Extract subtitles for a single video
    Extract {
        /// YouTube video URL (watch, youtu.be or embed link)
        #[arg(value_name = "URL")]
        url: String,

        /// Preferred caption language code (falls back to English, then any track)
        #[arg(short, long, value_name = "LANG")]
        lang: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "srt")]
        format: OutputFormat,

        /// Output file or directory (prints to console if not specified)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show or initialize the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON with cues and all renderings
    Json,
    /// SRT subtitle format
    Srt,
    /// WebVTT format
    Vtt,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Srt => write!(f, "srt"),
            OutputFormat::Vtt => write!(f, "vtt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from([
            "subextract",
            "extract",
            "https://youtu.be/dQw4w9WgXcQ",
            "--lang",
            "de",
            "--format",
            "vtt",
        ])
        .unwrap();

        match cli.command {
            Commands::Extract { url, lang, format, output } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert_eq!(lang.as_deref(), Some("de"));
                assert_eq!(format.extension(), "vtt");
                assert!(output.is_none());
            }
            _ => panic!("expected extract command"),
        }
    }

    #[test]
    fn test_extract_defaults_to_srt() {
        let cli = Cli::try_parse_from(["subextract", "extract", "https://youtu.be/dQw4w9WgXcQ"]).unwrap();
        match cli.command {
            Commands::Extract { format, .. } => assert_eq!(format.to_string(), "srt"),
            _ => panic!("expected extract command"),
        }
    }
}
