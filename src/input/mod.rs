//! Key and mouse injection
//!
//! Two backends exist: a native Linux uinput device and a portable rdev
//! simulator. One of them is selected at startup and used for the whole
//! session.

pub mod keys;
pub mod portable;
#[cfg(target_os = "linux")]
pub mod uinput;

pub use keys::{char_to_key, parse_key, InputKey};

use crate::error::{WingmanError, WingmanResult};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Something that can press and release keys
pub trait KeySink: Send {
    fn key_down(&mut self, key: InputKey) -> Result<()>;
    fn key_up(&mut self, key: InputKey) -> Result<()>;
}

/// Which backend the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Native when the platform offers it, portable otherwise
    #[default]
    Auto,
    Native,
    Portable,
}

/// The injection backend chosen for this session
pub enum InputBackend {
    #[cfg(target_os = "linux")]
    Native(uinput::VirtualKeyboard),
    Portable(portable::PortableInput),
}

impl InputBackend {
    /// Whether this platform has a native backend at all
    pub const fn native_supported() -> bool {
        cfg!(target_os = "linux")
    }

    /// Pick a backend once, based on preference and platform capability
    pub fn select(preference: BackendPreference) -> WingmanResult<Self> {
        let backend = match preference {
            BackendPreference::Portable => Self::Portable(portable::PortableInput::new()),
            BackendPreference::Native => Self::native()?,
            BackendPreference::Auto if Self::native_supported() => match Self::native() {
                Ok(native) => native,
                Err(e) => {
                    warn!("⚠️ Could not create virtual keyboard: {}", e);
                    warn!("   Add your user to the 'input' group for native key injection");
                    warn!("   Falling back to portable input, which some games ignore");
                    Self::Portable(portable::PortableInput::new())
                }
            },
            BackendPreference::Auto => Self::Portable(portable::PortableInput::new()),
        };

        info!("⌨️ Using {} input backend", backend.name());
        Ok(backend)
    }

    #[cfg(target_os = "linux")]
    fn native() -> WingmanResult<Self> {
        uinput::VirtualKeyboard::new()
            .map(Self::Native)
            .map_err(|e| WingmanError::Input(e.to_string()))
    }

    #[cfg(not(target_os = "linux"))]
    fn native() -> WingmanResult<Self> {
        Err(WingmanError::Input(
            "native input backend is only available on Linux".to_string(),
        ))
    }

    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(target_os = "linux")]
            InputBackend::Native(_) => "native",
            InputBackend::Portable(_) => "portable",
        }
    }
}

impl KeySink for InputBackend {
    fn key_down(&mut self, key: InputKey) -> Result<()> {
        match self {
            #[cfg(target_os = "linux")]
            InputBackend::Native(kb) => kb.key_down(key),
            InputBackend::Portable(p) => p.key_down(key),
        }
    }

    fn key_up(&mut self, key: InputKey) -> Result<()> {
        match self {
            #[cfg(target_os = "linux")]
            InputBackend::Native(kb) => kb.key_up(key),
            InputBackend::Portable(p) => p.key_up(key),
        }
    }
}
