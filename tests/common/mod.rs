#![allow(dead_code)]

pub mod mock_executor;
pub mod mock_model;
pub mod mock_tts;

use mock_executor::MockExecutor;
use mock_model::MockModel;
use mock_tts::{CountingSink, MockTts};
use std::sync::Arc;
use wingman::commands::{ActionSpec, Command, CommandRegistry, KeyStep};
use wingman::core::{ToolBridge, TurnOrchestrator, TurnSettings};
use wingman::speech::{PlaybackEffects, Speaker};

pub const CONTEXT: &str = "You are a helpful ship computer.";

/// Orchestrator wired to mocks, with handles to inspect them afterwards
pub struct Harness {
    pub orchestrator: TurnOrchestrator,
    pub model: MockModel,
    pub executor: MockExecutor,
    pub tts: MockTts,
    pub sink: Arc<CountingSink>,
}

impl Harness {
    pub fn new(model: MockModel) -> Self {
        Self::with_options(model, false, None)
    }

    pub fn with_options(model: MockModel, debug_mode: bool, acknowledgment: Option<&str>) -> Self {
        let executor = MockExecutor::new();
        let tts = MockTts::new();
        let sink = Arc::new(CountingSink::default());

        let speaker = Speaker::new(
            Arc::new(tts.clone()),
            sink.clone(),
            "nova",
            PlaybackEffects::default(),
        );
        let orchestrator = TurnOrchestrator::new(
            CONTEXT,
            ToolBridge::new(Arc::new(sample_registry()), debug_mode),
            Arc::new(model.clone()),
            Box::new(executor.clone()),
            TurnSettings {
                conversation_model: "chat-model".to_string(),
                summarize_model: "summary-model".to_string(),
                acknowledgment: acknowledgment.map(str::to_string),
            },
        )
        .with_speaker(speaker);

        Self {
            orchestrator,
            model,
            executor,
            tts,
            sink,
        }
    }

    pub fn clips_played(&self) -> usize {
        self.sink.clips.lock().unwrap().len()
    }
}

fn press(key: &str) -> ActionSpec {
    ActionSpec::Keys(vec![KeyStep {
        key: key.to_string(),
        modifier: None,
        hold: None,
        wait: None,
    }])
}

/// One instant command and two deferred ones
pub fn sample_registry() -> CommandRegistry {
    CommandRegistry::new(vec![
        Command::new("stop", press("s")).with_phrases(["stop the timer"]),
        Command::new("open_map", press("m")),
        Command::new("fire", press("space")),
    ])
    .unwrap()
}
