//! card-scanner - replay recorded OCR frames through a scan session
//!
//! Reads a JSON array of frames (each an array of `{text, confidence}` candidates,
//! or `{"error": "..."}` for a failed recognition) and prints the decided card.

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use card_scanner::capture::CapturedFrame;
use card_scanner::config::{self, ScannerConfig};
use card_scanner::vision::{load_frames, ReplayRecognizer};
use card_scanner::ImageAnalyzer;

/// Replay recorded OCR output and extract card fields
#[derive(Parser, Debug)]
#[command(name = "card-scanner")]
#[command(about = "Extract credit card fields from recorded per-frame OCR text")]
struct Args {
    /// JSON file with recorded frames
    frames: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the consensus threshold
    #[arg(long)]
    threshold: Option<u32>,

    /// Override the minimum candidate confidence
    #[arg(long)]
    min_confidence: Option<f32>,

    /// Do not reject strings containing "card"
    #[arg(long)]
    allow_card_word: bool,

    /// Write the default configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.init_config {
        let path = match &args.config {
            Some(path) => path.clone(),
            None => config::default_config_path()?,
        };
        config::save_config(&ScannerConfig::default(), &path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let Some(frames_path) = args.frames.clone() else {
        bail!("No frames file given (see --help)");
    };

    let config = resolve_config(&args)?;
    let frames = load_frames(&frames_path)?;
    let frame_count = frames.len();
    info!("Replaying {} frames from {:?}", frame_count, frames_path);

    let mut analyzer = ImageAnalyzer::with_config(ReplayRecognizer::new(frames), &config);
    let frame = CapturedFrame::empty();

    for index in 0..frame_count {
        match analyzer.analyze(&frame) {
            Ok(Some(card)) => {
                info!("Card number decided on frame {}", index + 1);
                println!("{}", serde_json::to_string_pretty(&card)?);
                return Ok(());
            }
            Ok(None) => {}
            Err(e) => warn!(
                "Frame {}: {} ({})",
                index + 1,
                e,
                e.cause_message().unwrap_or_default()
            ),
        }
    }

    eprintln!("{}", serde_json::to_string_pretty(analyzer.progress())?);
    bail!("Card number did not reach consensus after {} frames", frame_count)
}

/// Load configuration from file or use defaults, then apply command line overrides
fn resolve_config(args: &Args) -> Result<ScannerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let config = config::load_config(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => load_default_config(),
    };

    if let Some(threshold) = args.threshold {
        config.consensus.threshold = threshold;
    }
    if let Some(min_confidence) = args.min_confidence {
        config.consensus.min_confidence = min_confidence;
    }
    if args.allow_card_word {
        config.classifier.skip_words.retain(|w| w != "card");
    }

    Ok(config)
}

/// Load configuration from the user config directory, falling back to defaults
fn load_default_config() -> ScannerConfig {
    if let Ok(config_path) = config::default_config_path() {
        if config_path.exists() {
            match config::load_config(&config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return config;
                }
                Err(e) => warn!("Ignoring unreadable configuration: {:#}", e),
            }
        }
    }
    info!("Using default configuration");
    ScannerConfig::default()
}
