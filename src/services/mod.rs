//! External AI services
//!
//! The orchestrator only talks to these traits; [`openai::OpenAiClient`]
//! implements all three against an OpenAI-compatible HTTP API.

pub mod diagnostics;
pub mod openai;

use crate::core::conversation::Message;
use crate::core::tool_bridge::ToolDeclarationSet;
use crate::error::ServiceError;
use async_trait::async_trait;

pub use diagnostics::Diagnostic;
pub use openai::OpenAiClient;

/// One chat completion request
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    /// Offered with `tool_choice = "auto"` when present
    pub tools: Option<ToolDeclarationSet>,
}

/// Conversational language model
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the assistant message of the completion
    async fn complete(&self, request: ChatRequest) -> Result<Message, ServiceError>;
}

/// Speech-to-text service
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, ServiceError>;
}

/// Text-to-speech service
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns encoded audio bytes
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, ServiceError>;
}
