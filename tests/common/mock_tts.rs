//! Mock TTS for Testing
//!
//! Records all spoken text for verification.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wingman::error::ServiceError;
use wingman::services::SpeechSynthesizer;
use wingman::speech::{AudioSink, PlaybackEffects};

/// Mock synthesizer that records spoken text
#[derive(Debug, Clone, Default)]
pub struct MockTts {
    /// All text that was "spoken"
    pub spoken: Arc<Mutex<Vec<String>>>,
    /// Simulate failure on every call
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockTts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all spoken phrases
    pub fn get_spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockTts {
    async fn synthesize(&self, text: &str, _voice: &str) -> Result<Vec<u8>, ServiceError> {
        if *self.should_fail.lock().unwrap() {
            return Err(ServiceError::Status {
                status: 500,
                kind: "server_error".into(),
                message: "Mock TTS failure".into(),
            });
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(text.as_bytes().to_vec())
    }
}

/// Sink that counts the clips it receives
#[derive(Debug, Default)]
pub struct CountingSink {
    pub clips: Mutex<Vec<PlaybackEffects>>,
}

impl AudioSink for CountingSink {
    fn play(&self, _audio: Vec<u8>, effects: PlaybackEffects) -> Result<()> {
        self.clips.lock().unwrap().push(effects);
        Ok(())
    }
}
