//! Wingman - Voice Command Assistant
//!
//! Feeds typed transcripts (one per line on stdin) or recorded audio files
//! into the turn orchestrator.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wingman::config::Config;
use wingman::core::{ToolBridge, TurnOrchestrator, TurnSettings};
use wingman::executor::KeyboardExecutor;
use wingman::input::{BackendPreference, InputBackend};
use wingman::services::{Diagnostic, OpenAiClient, Transcriber};
use wingman::speech::{AudioSink, DiscardSink, FileSink, Speaker};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Acknowledge commands without pressing any keys
    #[arg(long)]
    debug: bool,

    /// Key injection backend (overrides the config file)
    #[arg(long, value_enum)]
    backend: Option<BackendPreference>,

    /// Store synthesized speech in this directory
    #[arg(long)]
    speech_dir: Option<PathBuf>,

    /// Transcribe and process these recordings, then exit
    #[arg(long, num_args = 1..)]
    audio: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let subscriber = if std::env::var_os("RUST_LOG").is_some() {
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish()
    } else {
        let level = if args.verbose { Level::DEBUG } else { Level::INFO };
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::new(level.as_str()))
            .finish()
    };
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🛩️ Wingman v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(args.config.as_deref())?;
    if args.debug {
        config.debug_mode = true;
    }

    let registry = Arc::new(config.registry()?);
    let client = Arc::new(OpenAiClient::new(&config.openai));

    let backend = InputBackend::select(args.backend.unwrap_or(config.input_backend))?;
    let executor = KeyboardExecutor::new(backend);

    let sink: Arc<dyn AudioSink> = match &args.speech_dir {
        Some(dir) => Arc::new(FileSink::new(dir)?),
        None => Arc::new(DiscardSink),
    };
    let speaker = Speaker::new(
        client.clone(),
        sink,
        config.openai.tts_voice.clone(),
        config.effects(),
    );

    let mut orchestrator = TurnOrchestrator::new(
        config.openai.context.clone().unwrap_or_default(),
        ToolBridge::new(registry, config.debug_mode),
        client.clone(),
        Box::new(executor),
        TurnSettings::from(&config),
    )
    .with_speaker(speaker);

    if !args.audio.is_empty() {
        for path in &args.audio {
            let audio = std::fs::read(path)
                .with_context(|| format!("Failed to read recording {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "audio.wav".to_string());

            match client.transcribe(audio, &file_name).await {
                Ok(transcript) if !transcript.trim().is_empty() => {
                    respond(&mut orchestrator, &transcript).await;
                }
                Ok(_) => info!("🤫 Nothing heard in {}", path.display()),
                Err(e) => Diagnostic::from(&e).emit(),
            }
        }
        return Ok(());
    }

    info!("✅ Wingman ready - type a command");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let transcript = line.trim();
        if !transcript.is_empty() {
            respond(&mut orchestrator, transcript).await;
        }
    }

    Ok(())
}

async fn respond(orchestrator: &mut TurnOrchestrator, transcript: &str) {
    if let Some(response) = orchestrator.process(transcript).await {
        println!("{response}");
    }
}
