//! OpenAI-compatible HTTP client
//!
//! Implements chat completion (with tool calling), Whisper transcription and
//! speech synthesis. Error bodies are decoded into [`ServiceError::Status`].

use super::{ChatModel, ChatRequest, SpeechSynthesizer, Transcriber};
use crate::config::OpenAiConfig;
use crate::core::conversation::Message;
use crate::error::ServiceError;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Client for the chat, transcription and speech endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    transcription_model: String,
    tts_model: String,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Value]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transcription_model: config.transcription_model.clone(),
            tts_model: config.tts_model.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Bearer header; a key that is not a valid header value is a credential error
    fn auth(&self) -> Result<HeaderValue, ServiceError> {
        HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
            ServiceError::Credential("API key contains characters that cannot be sent".to_string())
        })
    }

    /// Pass successful responses through, decode error bodies otherwise
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!("❌ API error body ({}): {}", status, body);
        Err(status_error(status.as_u16(), &body))
    }
}

/// Build a structured status error from an HTTP error body
pub fn status_error(status: u16, body: &str) -> ServiceError {
    let (kind, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.kind, envelope.error.message),
        Err(_) => (None, Some(body.trim().to_string()).filter(|b| !b.is_empty())),
    };

    ServiceError::Status {
        status,
        kind: kind.unwrap_or_else(|| "unknown_error".to_string()),
        message: message.unwrap_or_default(),
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<Message, ServiceError> {
        let tools = request.tools.as_ref().map(|t| t.as_slice());
        let body = CompletionRequest {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            tools,
            tool_choice: tools.map(|_| "auto"),
        };

        debug!(
            "🧠 Chat completion: model={} messages={} tools={}",
            request.model,
            request.messages.len(),
            tools.is_some()
        );

        let response = self
            .client
            .post(self.url("chat/completions"))
            .header(AUTHORIZATION, self.auth()?)
            .json(&body)
            .send()
            .await?;

        let completion: CompletionResponse = Self::check(response).await?.json().await?;
        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| ServiceError::Decode("completion contained no choices".to_string()))?;

        match message {
            Message::Assistant { .. } => Ok(message),
            other => Err(ServiceError::Decode(format!(
                "expected an assistant message, got {:?}",
                other
            ))),
        }
    }
}

#[async_trait]
impl Transcriber for OpenAiClient {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, ServiceError> {
        debug!("🎙️ Transcribing {} ({} bytes)", file_name, audio.len());

        let form = Form::new()
            .part("file", Part::bytes(audio).file_name(file_name.to_string()))
            .text("model", self.transcription_model.clone());

        let response = self
            .client
            .post(self.url("audio/transcriptions"))
            .header(AUTHORIZATION, self.auth()?)
            .multipart(form)
            .send()
            .await?;

        let transcript: TranscriptionResponse = Self::check(response).await?.json().await?;
        info!("📝 Heard: '{}'", transcript.text);
        Ok(transcript.text)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiClient {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, ServiceError> {
        let body = SpeechRequest {
            model: &self.tts_model,
            input: text,
            voice,
        };

        let response = self
            .client
            .post(self.url("audio/speech"))
            .header(AUTHORIZATION, self.auth()?)
            .json(&body)
            .send()
            .await?;

        let audio = Self::check(response).await?.bytes().await?;
        debug!("🔊 Synthesized {} bytes of speech", audio.len());
        Ok(audio.to_vec())
    }
}
