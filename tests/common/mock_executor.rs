//! Mock Action Executor for Testing
//!
//! Records executed command names instead of pressing keys.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use wingman::commands::Command;
use wingman::executor::{ActionExecutor, ActionOutcome};

#[derive(Clone, Default)]
pub struct MockExecutor {
    /// Names of all executed commands, in order
    pub executed: Arc<Mutex<Vec<String>>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionExecutor for MockExecutor {
    async fn execute(&mut self, command: &Command) -> ActionOutcome {
        self.executed.lock().unwrap().push(command.name.clone());
        ActionOutcome::Success
    }
}
