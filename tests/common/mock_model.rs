//! Mock Language Model for Testing
//!
//! Replays scripted replies and records every request it receives.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use wingman::core::{Message, ToolCallRequest, EXECUTE_COMMAND};
use wingman::error::ServiceError;
use wingman::services::{ChatModel, ChatRequest};

/// Mock chat model returning queued replies in order
#[derive(Clone, Default)]
pub struct MockModel {
    /// Replies (or failures) to hand out
    replies: Arc<Mutex<VecDeque<Result<Message, ServiceError>>>>,
    /// All requests received
    pub requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, message: Message) -> Self {
        self.replies.lock().unwrap().push_back(Ok(message));
        self
    }

    pub fn fail(self, error: ServiceError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, idx: usize) -> ChatRequest {
        self.requests.lock().unwrap()[idx].clone()
    }
}

#[async_trait]
impl ChatModel for MockModel {
    async fn complete(&self, request: ChatRequest) -> Result<Message, ServiceError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ServiceError::Transport("no scripted reply".into())))
    }
}

/// Assistant reply asking to run the given commands
pub fn tool_reply(calls: &[(&str, &str)]) -> Message {
    Message::Assistant {
        content: None,
        tool_calls: calls
            .iter()
            .map(|(id, command)| {
                ToolCallRequest::new(
                    *id,
                    EXECUTE_COMMAND,
                    serde_json::json!({ "command_name": command }).to_string(),
                )
            })
            .collect(),
    }
}
