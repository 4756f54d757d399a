//! Bisub - Bilingual Subtitle Generation
//!
//! This is the main entry point for the bisub application, which turns
//! English audio into sentence-level SRT subtitles with optional Chinese
//! translation.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bisub::cli::{Args, Commands};
use bisub::config::Config;
use bisub::cue::OutputMode;
use bisub::error::BisubError;
use bisub::translate::Credentials;
use bisub::workflow::{FileOutcome, Workflow};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Process { input, output, mode } => {
            let mode = parse_output_mode(&mode)?;
            let output = output.unwrap_or_else(|| input.with_extension("srt"));

            let workflow = Workflow::new(config);
            match workflow.process_file(&input, &output, mode).await? {
                FileOutcome::Written => info!("Wrote {}", output.display()),
                FileOutcome::Skipped => info!("Skipped {} (already exists)", output.display()),
            }
        }
        Commands::Batch { input_dir, output_dir, mode } => {
            let mode = parse_output_mode(&mode)?;

            let workflow = Workflow::new(config);
            let summary = workflow.process_directory(&input_dir, &output_dir, mode).await?;
            info!(
                "{} written, {} skipped, {} failed",
                summary.written, summary.skipped, summary.failed
            );
            if !summary.is_success() {
                std::process::exit(1);
            }
        }
        Commands::Credentials { app_id, app_key } => {
            let credentials = Credentials { app_id, app_key };
            credentials.save_cached()?;
            if let Some(path) = Credentials::cache_path() {
                info!("Credentials cached at {}", path.display());
            }
        }
    }

    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".bisub").join("log");
    std::fs::create_dir_all(&log_dir)?;

    // Daily rotation; the guard must outlive the program.
    let file_appender = rolling::daily(&log_dir, "bisub.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Parse output mode from string
fn parse_output_mode(mode: &str) -> Result<OutputMode> {
    match mode.to_lowercase().as_str() {
        "mono" | "monolingual" => Ok(OutputMode::Monolingual),
        "bilingual" => Ok(OutputMode::Bilingual),
        _ => Err(BisubError::Config(format!(
            "Invalid output mode '{}'. Valid modes: mono, bilingual",
            mode
        ))
        .into()),
    }
}
