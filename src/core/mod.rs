//! Core processing modules
//!
//! Conversation history, instant matching, the tool bridge and the turn
//! orchestrator that ties them together.

pub mod conversation;
pub mod instant;
pub mod orchestrator;
pub mod tool_bridge;

pub use conversation::{Conversation, Message, ToolCallRequest};
pub use orchestrator::{TurnOrchestrator, TurnSettings};
pub use tool_bridge::{ToolBridge, ToolDeclarationSet, ToolResult, EXECUTE_COMMAND};
