use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_subtitle_extractor::cli::{Cli, Commands};
use yt_subtitle_extractor::config::Config;
use yt_subtitle_extractor::server::{self, AppState};
use yt_subtitle_extractor::{output, utils, TranscriptPipeline, YtDlpProvider};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_subtitle_extractor=debug,tower_http=debug"
    } else {
        "yt_subtitle_extractor=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Config { show: false } = cli.command {
        return init_config(cli.config);
    }

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            warn_missing_dependencies(&config).await;

            let provider = Arc::new(YtDlpProvider::new(config.provider.yt_dlp_path.clone()));
            let pipeline = TranscriptPipeline::new(provider, &config);
            tracing::info!(
                "{} v{} using {} provider",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                pipeline.provider_name()
            );

            server::serve(&config, Arc::new(AppState::new(pipeline))).await?;
        }
        Commands::Extract {
            url,
            lang,
            format,
            output,
        } => {
            let provider = Arc::new(YtDlpProvider::new(config.provider.yt_dlp_path.clone()));
            let pipeline = TranscriptPipeline::new(provider, &config);

            let progress = if cli.quiet {
                ProgressBar::hidden()
            } else {
                let progress = ProgressBar::new_spinner();
                progress.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
                );
                progress.enable_steady_tick(Duration::from_millis(100));
                progress
            };
            progress.set_message("Fetching captions...");

            let result = match pipeline.extract(&url, lang.as_deref()).await {
                Ok(result) => result,
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(e.into());
                }
            };

            progress.finish_and_clear();
            tracing::info!(
                "Extracted {} cues ({}) in {} [{}]",
                result.subtitles.len(),
                utils::format_duration(utils::cues_span(&result.subtitles)),
                result.language,
                if result.is_generated { "auto-generated" } else { "manual" }
            );

            match output {
                Some(path) => {
                    let written = output::save_to_file(&result, &path, &format).await?;
                    eprintln!("Subtitles saved to: {}", written.display());
                }
                None => {
                    output::print_to_console(&result, &format)?;
                }
            }
        }
        Commands::Config { .. } => {
            config.display();
        }
    }

    Ok(())
}

/// Write a default config file unless one already exists
fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::config_path()?,
    };

    if path.exists() {
        println!("Config file already exists: {}", path.display());
    } else {
        Config::default().save(&path)?;
        println!("Wrote default config to: {}", path.display());
    }

    Ok(())
}

/// Check for required external dependencies (non-fatal in Docker)
async fn warn_missing_dependencies(config: &Config) {
    let missing = utils::check_dependencies(&config.provider.yt_dlp_path).await;
    for dep in missing {
        tracing::warn!("Dependency check warning: {} (continuing anyway)", dep);
    }
}
