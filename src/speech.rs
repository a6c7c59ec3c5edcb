//! Speech output
//!
//! Synthesized audio is handed to an [`AudioSink`] together with the playback
//! effect flags. Playing audio is left to the sink; the sinks shipped here
//! store the clips on disk or drop them.

use crate::error::ServiceError;
use crate::services::SpeechSynthesizer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Effects the playback component applies to a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackEffects {
    /// Play a short beep before the response
    pub beep_on_receive: bool,
    /// Band-pass the voice like a radio transmission
    pub radio_effect: bool,
}

/// Receives synthesized speech
pub trait AudioSink: Send + Sync {
    fn play(&self, audio: Vec<u8>, effects: PlaybackEffects) -> Result<()>;
}

/// Drops every clip
#[derive(Debug, Default)]
pub struct DiscardSink;

impl AudioSink for DiscardSink {
    fn play(&self, audio: Vec<u8>, _effects: PlaybackEffects) -> Result<()> {
        debug!("🔇 Discarding {} bytes of speech", audio.len());
        Ok(())
    }
}

/// Writes each clip to a timestamped MP3 file
#[derive(Debug)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create speech directory {}", dir.display()))?;
        Ok(Self { dir })
    }
}

impl AudioSink for FileSink {
    fn play(&self, audio: Vec<u8>, effects: PlaybackEffects) -> Result<()> {
        let name = format!("speech_{}.mp3", chrono::Local::now().format("%Y%m%d_%H%M%S_%3f"));
        let path = self.dir.join(name);
        std::fs::write(&path, &audio)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(
            "💾 Saved speech to {} (beep: {}, radio: {})",
            path.display(),
            effects.beep_on_receive,
            effects.radio_effect
        );
        Ok(())
    }
}

/// Error while producing spoken output
#[derive(Debug, thiserror::Error)]
pub enum SpeakError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("audio sink failed: {0}")]
    Sink(#[from] anyhow::Error),
}

/// Synthesizer, voice, sink and effects bundled for the orchestrator
#[derive(Clone)]
pub struct Speaker {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sink: Arc<dyn AudioSink>,
    voice: String,
    effects: PlaybackEffects,
}

impl Speaker {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        sink: Arc<dyn AudioSink>,
        voice: impl Into<String>,
        effects: PlaybackEffects,
    ) -> Self {
        Self {
            synthesizer,
            sink,
            voice: voice.into(),
            effects,
        }
    }

    /// Synthesize `text` and hand it to the sink
    pub async fn speak(&self, text: &str) -> Result<(), SpeakError> {
        info!("📢 Speaking: '{}'", text);
        let audio = self.synthesizer.synthesize(text, &self.voice).await?;
        self.sink.play(audio, self.effects)?;
        Ok(())
    }
}
