//! Action execution
//!
//! Turns a command's key steps or text payload into key events on the
//! selected input backend. Every key name is resolved before the first event
//! is sent, so a typo in the config never leaves a modifier stuck down. Keys
//! still held when the backend fails are released before reporting.

use crate::commands::{ActionSpec, Command, KeyStep};
use crate::input::{char_to_key, parse_key, InputKey, KeySink};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

/// Time between press and release of a tapped key
const TAP_DELAY: Duration = Duration::from_millis(10);

/// Result of executing a command, reported back as tool-result content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    NotFound,
    Failed(String),
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success)
    }

    /// Text the language model sees for this outcome
    pub fn as_content(&self) -> &str {
        match self {
            ActionOutcome::Success => "OK",
            ActionOutcome::NotFound => "Command not found",
            ActionOutcome::Failed(reason) => reason,
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_content())
    }
}

/// Executes a command's OS-level side effects
#[async_trait]
pub trait ActionExecutor: Send {
    async fn execute(&mut self, command: &Command) -> ActionOutcome;
}

/// One resolved key event of a plan
#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Down(InputKey),
    Up(InputKey),
    Sleep(Duration),
}

/// Executor driving a [`KeySink`]
pub struct KeyboardExecutor<S: KeySink> {
    sink: S,
}

impl<S: KeySink> KeyboardExecutor<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Emit the events; on a backend error, release whatever is still down
    async fn run(&mut self, events: Vec<Event>) -> anyhow::Result<()> {
        let mut held: Vec<InputKey> = Vec::new();

        for event in events {
            let result = match event {
                Event::Down(key) => self.sink.key_down(key).map(|()| held.push(key)),
                Event::Up(key) => self.sink.key_up(key).map(|()| {
                    if let Some(pos) = held.iter().rposition(|&k| k == key) {
                        held.remove(pos);
                    }
                }),
                Event::Sleep(duration) => {
                    tokio::time::sleep(duration).await;
                    Ok(())
                }
            };

            if let Err(e) = result {
                self.release_all(held);
                return Err(e);
            }
        }
        Ok(())
    }

    fn release_all(&mut self, held: Vec<InputKey>) {
        for key in held.into_iter().rev() {
            if let Err(e) = self.sink.key_up(key) {
                warn!("⚠️ Could not release {:?}: {}", key, e);
            }
        }
    }
}

#[async_trait]
impl<S: KeySink> ActionExecutor for KeyboardExecutor<S> {
    async fn execute(&mut self, command: &Command) -> ActionOutcome {
        info!("❖ Executing command: {}", command.name);

        let events = match plan(&command.action) {
            Ok(events) => events,
            Err(reason) => {
                warn!("❌ Cannot execute {}: {}", command.name, reason);
                return ActionOutcome::Failed(reason);
            }
        };

        match self.run(events).await {
            Ok(()) => ActionOutcome::Success,
            Err(e) => {
                warn!("❌ Failed to execute {}: {}", command.name, e);
                ActionOutcome::Failed(format!("Input injection failed: {e}"))
            }
        }
    }
}

/// Positive durations in seconds; zero, negative and NaN mean "none"
fn seconds(value: Option<f64>) -> Result<Option<Duration>, String> {
    match value {
        Some(s) if s > 0.0 => Duration::try_from_secs_f64(s)
            .map(Some)
            .map_err(|_| format!("Invalid duration: {s} seconds")),
        _ => Ok(None),
    }
}

fn resolve(name: &str) -> Result<InputKey, String> {
    parse_key(name).ok_or_else(|| format!("Unknown key: {name}"))
}

/// Resolve an action into the exact event sequence to emit
fn plan(action: &ActionSpec) -> Result<Vec<Event>, String> {
    match action {
        ActionSpec::Keys(steps) => plan_keys(steps),
        ActionSpec::Write { text, interval } => plan_write(text, *interval),
        ActionSpec::Nothing => Ok(Vec::new()),
    }
}

fn plan_keys(steps: &[KeyStep]) -> Result<Vec<Event>, String> {
    let mut events = Vec::new();

    for step in steps {
        let key = resolve(&step.key)?;
        let modifier = step.modifier.as_deref().map(resolve).transpose()?;

        if let Some(m) = modifier {
            events.push(Event::Down(m));
        }

        events.push(Event::Down(key));
        events.push(Event::Sleep(seconds(step.hold)?.unwrap_or(TAP_DELAY)));
        events.push(Event::Up(key));

        if let Some(m) = modifier {
            events.push(Event::Up(m));
        }

        if let Some(wait) = seconds(step.wait)? {
            events.push(Event::Sleep(wait));
        }
    }

    Ok(events)
}

fn plan_write(text: &str, interval: f64) -> Result<Vec<Event>, String> {
    let interval = seconds(Some(interval))?;
    let mut events = Vec::new();

    for ch in text.chars() {
        let (key, shift) = char_to_key(ch).ok_or_else(|| format!("Cannot type character: {ch:?}"))?;

        if shift {
            events.push(Event::Down(InputKey::Shift));
        }
        events.push(Event::Down(key));
        events.push(Event::Up(key));
        if shift {
            events.push(Event::Up(InputKey::Shift));
        }

        if let Some(interval) = interval {
            events.push(Event::Sleep(interval));
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records key events instead of injecting them
    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
        fail_on: Option<InputKey>,
    }

    impl KeySink for RecordingSink {
        fn key_down(&mut self, key: InputKey) -> anyhow::Result<()> {
            if self.fail_on == Some(key) {
                anyhow::bail!("device gone");
            }
            self.events.push(format!("down {:?}", key));
            Ok(())
        }

        fn key_up(&mut self, key: InputKey) -> anyhow::Result<()> {
            self.events.push(format!("up {:?}", key));
            Ok(())
        }
    }

    fn step(key: &str, modifier: Option<&str>, hold: Option<f64>, wait: Option<f64>) -> KeyStep {
        KeyStep {
            key: key.into(),
            modifier: modifier.map(Into::into),
            hold,
            wait,
        }
    }

    #[tokio::test]
    async fn test_modifier_wraps_key_in_order() {
        let mut executor = KeyboardExecutor::new(RecordingSink::default());
        let command = Command::new(
            "save",
            ActionSpec::Keys(vec![step("s", Some("ctrl"), None, None), step("f5", None, Some(0.01), Some(0.01))]),
        );

        assert_eq!(executor.execute(&command).await, ActionOutcome::Success);
        assert_eq!(
            executor.sink().events,
            vec![
                "down Ctrl",
                "down Letter('s')",
                "up Letter('s')",
                "up Ctrl",
                "down Function(5)",
                "up Function(5)",
            ]
        );
    }

    #[test]
    fn test_hold_and_wait_are_independent() {
        let events = plan_keys(&[step("w", Some("shift"), Some(0.5), Some(1.0))]).unwrap();
        assert_eq!(
            events,
            vec![
                Event::Down(InputKey::Shift),
                Event::Down(InputKey::Letter('w')),
                Event::Sleep(Duration::from_millis(500)),
                Event::Up(InputKey::Letter('w')),
                Event::Up(InputKey::Shift),
                Event::Sleep(Duration::from_secs(1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_write_uses_shift_for_capitals() {
        let mut executor = KeyboardExecutor::new(RecordingSink::default());
        let command = Command::new(
            "greet",
            ActionSpec::Write {
                text: "Hi!".into(),
                interval: 0.0,
            },
        );

        assert!(executor.execute(&command).await.is_success());
        assert_eq!(
            executor.sink().events,
            vec![
                "down Shift",
                "down Letter('h')",
                "up Letter('h')",
                "up Shift",
                "down Letter('i')",
                "up Letter('i')",
                "down Shift",
                "down Digit(1)",
                "up Digit(1)",
                "up Shift",
            ]
        );
    }

    #[tokio::test]
    async fn test_nothing_succeeds_without_events() {
        let mut executor = KeyboardExecutor::new(RecordingSink::default());
        let command = Command::new("noop", ActionSpec::Nothing);

        assert_eq!(executor.execute(&command).await, ActionOutcome::Success);
        assert!(executor.sink().events.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_key_fails_before_any_event() {
        let mut executor = KeyboardExecutor::new(RecordingSink::default());
        let command = Command::new(
            "broken",
            ActionSpec::Keys(vec![step("a", None, None, None), step("hyperdrive", None, None, None)]),
        );

        assert_eq!(
            executor.execute(&command).await,
            ActionOutcome::Failed("Unknown key: hyperdrive".into())
        );
        assert!(executor.sink().events.is_empty());
    }

    #[tokio::test]
    async fn test_backend_error_becomes_failed_outcome() {
        let mut executor = KeyboardExecutor::new(RecordingSink {
            events: Vec::new(),
            fail_on: Some(InputKey::Letter('m')),
        });
        let command = Command::new("map", ActionSpec::Keys(vec![step("m", None, None, None)]));

        match executor.execute(&command).await {
            ActionOutcome::Failed(reason) => assert!(reason.contains("device gone")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_press_releases_held_modifier() {
        let mut executor = KeyboardExecutor::new(RecordingSink {
            events: Vec::new(),
            fail_on: Some(InputKey::Letter('m')),
        });
        let command = Command::new(
            "map",
            ActionSpec::Keys(vec![step("m", Some("ctrl"), None, None)]),
        );

        assert!(!executor.execute(&command).await.is_success());
        assert_eq!(executor.sink().events, vec!["down Ctrl", "up Ctrl"]);
    }

    #[tokio::test]
    async fn test_failure_mid_write_releases_shift() {
        let mut executor = KeyboardExecutor::new(RecordingSink {
            events: Vec::new(),
            fail_on: Some(InputKey::Letter('i')),
        });
        let command = Command::new(
            "greet",
            ActionSpec::Write {
                text: "HI".into(),
                interval: 0.0,
            },
        );

        assert!(!executor.execute(&command).await.is_success());
        assert_eq!(
            executor.sink().events,
            vec![
                "down Shift",
                "down Letter('h')",
                "up Letter('h')",
                "up Shift",
                "down Shift",
                "up Shift",
            ]
        );
    }

    #[test]
    fn test_huge_durations_are_rejected() {
        let err = plan_keys(&[step("w", None, Some(1e20), None)]).unwrap_err();
        assert!(err.starts_with("Invalid duration"));
        assert!(plan_keys(&[step("w", None, None, Some(f64::INFINITY))]).is_err());
        assert!(plan_write("ok", 1e300).is_err());

        // Non-positive and NaN values are ignored
        let events = plan_keys(&[step("w", None, Some(f64::NAN), Some(-1.0))]).unwrap();
        assert_eq!(events[1], Event::Sleep(TAP_DELAY));
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_huge_hold_fails_without_events() {
        let mut executor = KeyboardExecutor::new(RecordingSink::default());
        let command = Command::new(
            "hold",
            ActionSpec::Keys(vec![step("w", Some("shift"), Some(1e20), None)]),
        );

        match executor.execute(&command).await {
            ActionOutcome::Failed(reason) => assert!(reason.contains("Invalid duration")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(executor.sink().events.is_empty());
    }

    #[test]
    fn test_outcome_content() {
        assert_eq!(ActionOutcome::Success.as_content(), "OK");
        assert_eq!(ActionOutcome::NotFound.as_content(), "Command not found");
        assert_eq!(ActionOutcome::Failed("nope".into()).to_string(), "nope");
    }
}
