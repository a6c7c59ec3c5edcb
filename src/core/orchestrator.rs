//! Turn orchestration
//!
//! **Routing per transcript:**
//! 1. Instant phrase hit → execute locally, acknowledge (no model call)
//! 2. Otherwise → model call with the `execute_command` tool
//! 3. Tool calls requested → run them, then one more model call without tools
//!
//! Tool use is limited to a single round: tool calls in the second reply are
//! not executed.

use super::conversation::{Conversation, Message};
use super::instant::match_instant;
use super::tool_bridge::ToolBridge;
use crate::config::Config;
use crate::error::ServiceError;
use crate::executor::ActionExecutor;
use crate::services::{ChatModel, ChatRequest, Diagnostic};
use crate::speech::Speaker;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Model ids and fixed texts used by the orchestrator
#[derive(Debug, Clone)]
pub struct TurnSettings {
    /// Model for the first call of a turn
    pub conversation_model: String,
    /// Model for the call that follows tool results
    pub summarize_model: String,
    /// Spoken reply for instant commands; the outcome text when `None`
    pub acknowledgment: Option<String>,
}

impl From<&Config> for TurnSettings {
    fn from(config: &Config) -> Self {
        Self {
            conversation_model: config.openai.conversation_model.clone(),
            summarize_model: config.openai.summarize_model.clone(),
            acknowledgment: config.acknowledgment.clone(),
        }
    }
}

/// Owns the conversation and drives one turn per transcript
pub struct TurnOrchestrator {
    history: Conversation,
    bridge: ToolBridge,
    model: Arc<dyn ChatModel>,
    executor: Box<dyn ActionExecutor>,
    speaker: Option<Speaker>,
    settings: TurnSettings,
}

impl TurnOrchestrator {
    pub fn new(
        context: impl Into<String>,
        bridge: ToolBridge,
        model: Arc<dyn ChatModel>,
        executor: Box<dyn ActionExecutor>,
        settings: TurnSettings,
    ) -> Self {
        Self {
            history: Conversation::new(context),
            bridge,
            model,
            executor,
            speaker: None,
            settings,
        }
    }

    /// Speak final responses through `speaker`
    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn history(&self) -> &Conversation {
        &self.history
    }

    /// Run one turn and return the text that was spoken
    ///
    /// Service failures are reported as diagnostics and yield `None`; the
    /// session carries on with the history as it stood before the failed call.
    pub async fn process(&mut self, transcript: &str) -> Option<String> {
        match self.try_process(transcript).await {
            Ok(response) => response,
            Err(e) => {
                warn!("⚠️ Turn aborted: {}", e);
                Diagnostic::from(&e).emit();
                None
            }
        }
    }

    /// Like [`process`](Self::process), but hands service failures to the caller
    pub async fn try_process(&mut self, transcript: &str) -> Result<Option<String>, ServiceError> {
        self.history.push(Message::user(transcript));

        let response = self.respond(transcript).await?;
        if let Some(text) = response.as_deref().filter(|t| !t.trim().is_empty()) {
            self.speak(text).await;
        }
        Ok(response)
    }

    async fn respond(&mut self, transcript: &str) -> Result<Option<String>, ServiceError> {
        let instant = match_instant(transcript, self.bridge.registry().instant()).map(|c| c.name.clone());
        if let Some(name) = instant {
            let outcome = self.bridge.run_command(&name, self.executor.as_mut()).await;
            let ack = self
                .settings
                .acknowledgment
                .clone()
                .unwrap_or_else(|| outcome.to_string());
            return Ok(Some(ack));
        }

        let reply = self
            .model
            .complete(ChatRequest {
                model: self.settings.conversation_model.clone(),
                messages: self.history.messages().to_vec(),
                tools: self.bridge.declare(),
            })
            .await?;
        self.history.push(reply.clone());

        let tool_calls = reply.tool_calls();
        if tool_calls.is_empty() {
            return Ok(reply.content().map(str::to_string));
        }

        info!("🛠️ Model requested {} tool call(s)", tool_calls.len());
        for call in tool_calls {
            let result = self.bridge.dispatch(call, self.executor.as_mut()).await;
            debug!("Tool result {} → {}", result.tool_call_id, result.outcome);
            self.history.push(result.into());
        }

        let second = self
            .model
            .complete(ChatRequest {
                model: self.settings.summarize_model.clone(),
                messages: self.history.messages().to_vec(),
                tools: None,
            })
            .await?;
        let content = second.content().map(str::to_string);
        if second.tool_calls().is_empty() {
            self.history.push(second);
        } else {
            // Unanswered tool calls would make the next request invalid
            warn!(
                "⚠️ Ignoring {} tool call(s) in follow-up reply; only one tool round per turn",
                second.tool_calls().len()
            );
            self.history.push(Message::Assistant {
                content: content.clone(),
                tool_calls: Vec::new(),
            });
        }
        Ok(content)
    }

    async fn speak(&self, text: &str) {
        let Some(speaker) = &self.speaker else {
            return;
        };

        if let Err(e) = speaker.speak(text).await {
            match e {
                crate::speech::SpeakError::Service(err) => Diagnostic::from(&err).emit(),
                crate::speech::SpeakError::Sink(err) => warn!("🔇 Could not play response: {}", err),
            }
        }
    }
}
