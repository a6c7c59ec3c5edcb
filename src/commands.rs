//! Command registry
//!
//! Holds the configured voice commands. A command with instant activation
//! phrases is matched locally; every other command is offered to the
//! language model as a tool.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

/// Rejected command configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandConfigError {
    #[error("command '{0}' defines both 'keys' and 'write'")]
    KeysAndWrite(String),

    #[error("duplicate command name '{0}'")]
    Duplicate(String),

    #[error("command name must not be empty")]
    EmptyName,
}

/// One step of a key sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyStep {
    /// Key or mouse button to press (e.g. "w", "f1", "mouse_left")
    pub key: String,
    /// Modifier held down around the key (e.g. "shift")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    /// Seconds to hold the key before releasing it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold: Option<f64>,
    /// Seconds to wait after the step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<f64>,
}

/// What a command does when executed
#[derive(Debug, Clone, PartialEq)]
pub enum ActionSpec {
    Keys(Vec<KeyStep>),
    Write { text: String, interval: f64 },
    Nothing,
}

/// A named voice command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCommand", into = "RawCommand")]
pub struct Command {
    pub name: String,
    pub instant_phrases: Vec<String>,
    pub action: ActionSpec,
}

impl Command {
    pub fn new(name: impl Into<String>, action: ActionSpec) -> Self {
        Self {
            name: name.into(),
            instant_phrases: Vec::new(),
            action,
        }
    }

    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instant_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Instant commands bypass the language model
    pub fn is_instant(&self) -> bool {
        !self.instant_phrases.is_empty()
    }
}

/// On-disk shape of a command, as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCommand {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    instant_activation: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keys: Option<Vec<KeyStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    write: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval: Option<f64>,
}

impl TryFrom<RawCommand> for Command {
    type Error = CommandConfigError;

    fn try_from(raw: RawCommand) -> Result<Self, Self::Error> {
        if raw.name.trim().is_empty() {
            return Err(CommandConfigError::EmptyName);
        }

        let action = match (raw.keys, raw.write) {
            (Some(_), Some(_)) => return Err(CommandConfigError::KeysAndWrite(raw.name)),
            (Some(keys), None) => ActionSpec::Keys(keys),
            (None, Some(text)) => ActionSpec::Write {
                text,
                interval: raw.interval.unwrap_or(0.0),
            },
            (None, None) => ActionSpec::Nothing,
        };

        Ok(Self {
            name: raw.name,
            instant_phrases: raw.instant_activation,
            action,
        })
    }
}

impl From<Command> for RawCommand {
    fn from(command: Command) -> Self {
        let (keys, write, interval) = match command.action {
            ActionSpec::Keys(keys) => (Some(keys), None, None),
            ActionSpec::Write { text, interval } => (None, Some(text), Some(interval)),
            ActionSpec::Nothing => (None, None, None),
        };
        Self {
            name: command.name,
            instant_activation: command.instant_phrases,
            keys,
            write,
            interval,
        }
    }
}

/// Immutable, ordered set of commands for one session
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Build a registry, keeping the configured order
    pub fn new(commands: Vec<Command>) -> Result<Self, CommandConfigError> {
        let mut by_name = HashMap::with_capacity(commands.len());
        for (idx, command) in commands.iter().enumerate() {
            if by_name.insert(command.name.clone(), idx).is_some() {
                return Err(CommandConfigError::Duplicate(command.name.clone()));
            }
        }

        let registry = Self { commands, by_name };
        info!(
            "📋 Loaded {} commands ({} instant, {} deferred)",
            registry.len(),
            registry.instant().count(),
            registry.deferred().count()
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.by_name.get(name).map(|&idx| &self.commands[idx])
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands with instant activation phrases, in registry order
    pub fn instant(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(|c| c.is_instant())
    }

    /// Commands exposed to the language model, in registry order
    pub fn deferred(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(|c| !c.is_instant())
    }
}
