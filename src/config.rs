use crate::commands::{Command, CommandRegistry};
use crate::error::{WingmanError, WingmanResult};
use crate::input::BackendPreference;
use crate::speech::PlaybackEffects;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Model used for both chat rounds unless configured otherwise
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo-1106";

/// Playback feature switches as named in the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Features {
    #[serde(default)]
    pub play_beep_on_receiving: bool,
    #[serde(default)]
    pub enable_radio_sound_effect: bool,
}

impl From<&Features> for PlaybackEffects {
    fn from(features: &Features) -> Self {
        PlaybackEffects {
            beep_on_receive: features.play_beep_on_receiving,
            radio_effect: features.enable_radio_sound_effect,
        }
    }
}

/// OpenAI service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// System prompt seeding every conversation
    pub context: Option<String>,
    pub tts_voice: String,
    pub conversation_model: String,
    pub summarize_model: String,
    pub transcription_model: String,
    pub tts_model: String,
    pub base_url: String,
    pub features: Features,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            context: None,
            tts_voice: "nova".to_string(),
            conversation_model: DEFAULT_CHAT_MODEL.to_string(),
            summarize_model: DEFAULT_CHAT_MODEL.to_string(),
            transcription_model: "whisper-1".to_string(),
            tts_model: "tts-1".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            features: Features::default(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Acknowledge commands without executing them
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default)]
    pub input_backend: BackendPreference,
    /// Spoken reply for instant commands; the action outcome when unset
    #[serde(default)]
    pub acknowledgment: Option<String>,
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Config {
    /// Load config from the given file, or the default location
    pub fn load(path: Option<&Path>) -> WingmanResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);

        let content = std::fs::read_to_string(&path).map_err(|e| {
            WingmanError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| WingmanError::Config(format!("invalid {}: {}", path.display(), e)))?;

        if config.openai.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                config.openai.api_key = key;
            }
        }

        tracing::info!("📖 Loaded config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    /// Presence checks that make startup fail
    pub fn validate(&self) -> WingmanResult<()> {
        if self.openai.api_key.trim().is_empty() {
            return Err(WingmanError::MissingApiKey);
        }
        Ok(())
    }

    /// Build the session's command registry
    pub fn registry(&self) -> WingmanResult<CommandRegistry> {
        CommandRegistry::new(self.commands.clone()).map_err(|e| WingmanError::Config(e.to_string()))
    }

    pub fn effects(&self) -> PlaybackEffects {
        PlaybackEffects::from(&self.openai.features)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wingman")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::ActionSpec;

    const SAMPLE: &str = r#"{
        "openai": {
            "api_key": "sk-test",
            "context": "You are a ship's computer.",
            "features": {"play_beep_on_receiving": true}
        },
        "debug_mode": true,
        "input_backend": "portable",
        "commands": [
            {"name": "stop", "instant_activation": ["stop the timer"], "keys": [{"key": "s", "modifier": "ctrl"}]},
            {"name": "greet", "write": "o7", "interval": 0.05}
        ]
    }"#;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, content).expect("Failed to write config");
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = OpenAiConfig::default();
        assert_eq!(config.tts_voice, "nova");
        assert_eq!(config.conversation_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.summarize_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_load_sample() {
        let (_dir, path) = write_config(SAMPLE);
        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.openai.api_key, "sk-test");
        assert_eq!(config.openai.tts_voice, "nova");
        assert!(config.debug_mode);
        assert_eq!(config.input_backend, BackendPreference::Portable);
        assert!(config.effects().beep_on_receive);
        assert!(!config.effects().radio_effect);

        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("greet").unwrap().action,
            ActionSpec::Write {
                text: "o7".into(),
                interval: 0.05
            }
        );
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(WingmanError::MissingApiKey)));
    }

    #[test]
    fn test_duplicate_commands_rejected() {
        let (_dir, path) = write_config(
            r#"{"openai": {"api_key": "sk-test"}, "commands": [{"name": "a"}, {"name": "a"}]}"#,
        );
        let config = Config::load(Some(&path)).unwrap();
        assert!(matches!(config.registry(), Err(WingmanError::Config(_))));
    }

    #[test]
    fn test_config_corrupt_json_handling() {
        let (_dir, path) = write_config("{ not valid json");
        assert!(matches!(Config::load(Some(&path)), Err(WingmanError::Config(_))));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Config::load(Some(Path::new("/nonexistent/wingman.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wingman.json"));
    }
}
