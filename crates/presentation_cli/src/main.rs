//! TTS gateway CLI
//!
//! Runs the synthesis pipeline locally with the gateway's configuration.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, LoggingConfig, build_synthesis_service, init_logging};

/// TTS gateway CLI
#[derive(Debug, Parser)]
#[command(name = "tts-cli")]
#[command(version, about = "Accent-aware text-to-speech CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Synthesize text into a 16 kHz mono WAV file
    ///
    /// Example: tts-cli synthesize "Good evening" --accent en_br --out evening.wav
    Synthesize {
        /// Text to speak
        text: String,

        /// Accent code (en_us, en_br, en-GB, ...)
        #[arg(short, long)]
        accent: Option<String>,

        /// Speed multiplier (1.0 = natural speed)
        #[arg(short, long)]
        rate: Option<f64>,

        /// Provider voice id overriding the accent default
        #[arg(long)]
        voice: Option<String>,

        /// Output WAV file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Report provider credentials and ffmpeg availability
    Check,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let path = path
                .to_str()
                .context("Configuration path is not valid UTF-8")?;
            AppConfig::load_from(path)?
        },
        None => AppConfig::load()?,
    };
    Ok(config)
}

const fn status_mark(ok: bool) -> &'static str {
    if ok { "ok" } else { "missing" }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    init_logging(&LoggingConfig {
        filter: log_filter_from_verbosity(cli.verbose).to_string(),
        ..config.logging.clone()
    })?;

    for warning in config.validate() {
        tracing::warn!("{warning}");
    }

    let service = build_synthesis_service(&config).context("Failed to build synthesis service")?;

    match cli.command {
        Commands::Synthesize {
            text,
            accent,
            rate,
            voice,
            out,
        } => {
            let waveform = service
                .synthesize(&text, accent.as_deref(), rate, voice.as_deref())
                .await?;

            tokio::fs::write(&out, waveform.data())
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;

            println!(
                "Wrote {} ({} ms, {} bytes, {} Hz mono)",
                out.display(),
                waveform.duration_ms(),
                waveform.size_bytes(),
                waveform.sample_rate()
            );
        },

        Commands::Check => {
            let readiness = service.readiness().await;

            println!("primary provider:   {}", status_mark(readiness.primary_configured));
            println!("secondary provider: {}", status_mark(readiness.secondary_configured));
            println!(
                "ffmpeg ({}): {}",
                config.speech.transcoder.ffmpeg_path,
                status_mark(readiness.transcoder_available)
            );

            if !readiness.is_ready() {
                anyhow::bail!("Synthesis pipeline is not ready");
            }
            println!("ready");
        },
    }

    Ok(())
}
