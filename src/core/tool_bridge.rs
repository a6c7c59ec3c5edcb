//! Tool bridge between the command registry and the language model
//!
//! The model sees a single `execute_command` function whose only argument is a
//! closed enumeration of the deferred command names. Tool calls coming back
//! are resolved through the registry and answered with a tool message carrying
//! the request's id.

use crate::commands::{Command, CommandRegistry};
use crate::core::conversation::{Message, ToolCallRequest};
use crate::executor::{ActionExecutor, ActionOutcome};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Name of the single function offered to the model
pub const EXECUTE_COMMAND: &str = "execute_command";

/// Tool declarations in the chat-completions `tools` format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolDeclarationSet(Vec<Value>);

impl ToolDeclarationSet {
    /// Declare `execute_command` over the given commands, if there are any
    pub fn for_commands<'a, I>(commands: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Command>,
    {
        let names: Vec<&str> = commands.into_iter().map(|c| c.name.as_str()).collect();
        if names.is_empty() {
            return None;
        }

        Some(Self(vec![json!({
            "type": "function",
            "function": {
                "name": EXECUTE_COMMAND,
                "description": "Executes a command",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "command_name": {
                            "type": "string",
                            "description": "The command to execute",
                            "enum": names,
                        },
                    },
                    "required": ["command_name"],
                },
            },
        })]))
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }
}

#[derive(Debug, Deserialize)]
struct ExecuteCommandArgs {
    command_name: String,
}

/// Answer to one tool call
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub name: String,
    pub outcome: ActionOutcome,
}

impl From<ToolResult> for Message {
    fn from(result: ToolResult) -> Self {
        Message::Tool {
            tool_call_id: result.tool_call_id,
            name: result.name,
            content: result.outcome.as_content().to_string(),
        }
    }
}

/// Resolves commands by name and runs them, honoring debug mode
#[derive(Debug, Clone)]
pub struct ToolBridge {
    registry: Arc<CommandRegistry>,
    debug_mode: bool,
}

impl ToolBridge {
    pub fn new(registry: Arc<CommandRegistry>, debug_mode: bool) -> Self {
        if debug_mode {
            info!("🐞 Debug mode: commands are acknowledged but not executed");
        }
        Self {
            registry,
            debug_mode,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Tool declarations for the registry's deferred commands
    pub fn declare(&self) -> Option<ToolDeclarationSet> {
        ToolDeclarationSet::for_commands(self.registry.deferred())
    }

    /// Run a command by name
    pub async fn run_command(&self, name: &str, executor: &mut dyn ActionExecutor) -> ActionOutcome {
        if self.debug_mode {
            info!("🐞 Skipping execution of {} (debug mode)", name);
            return ActionOutcome::Success;
        }

        match self.registry.get(name) {
            Some(command) => executor.execute(command).await,
            None => {
                warn!("❓ Command not found: {}", name);
                ActionOutcome::NotFound
            }
        }
    }

    /// Answer one tool call from the model
    pub async fn dispatch(
        &self,
        request: &ToolCallRequest,
        executor: &mut dyn ActionExecutor,
    ) -> ToolResult {
        let outcome = if request.function.name != EXECUTE_COMMAND {
            warn!("❓ Model requested unknown tool: {}", request.function.name);
            ActionOutcome::Failed(format!("Unknown tool: {}", request.function.name))
        } else {
            match serde_json::from_str::<ExecuteCommandArgs>(&request.function.arguments) {
                Ok(args) => self.run_command(&args.command_name, executor).await,
                Err(e) => {
                    warn!(
                        "❌ Invalid tool arguments '{}': {}",
                        request.function.arguments, e
                    );
                    ActionOutcome::Failed(format!("Invalid arguments: {e}"))
                }
            }
        };

        ToolResult {
            tool_call_id: request.id.clone(),
            name: request.function.name.clone(),
            outcome,
        }
    }
}
