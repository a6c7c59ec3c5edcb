//! Portable input backend using rdev
//!
//! Works wherever rdev can simulate events (X11, Windows, macOS). Some games
//! ignore synthetic events from this path, which is why the native backend is
//! preferred when available.

use super::keys::InputKey;
use super::KeySink;
use anyhow::{anyhow, Result};
use rdev::{Button, EventType, Key};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Delay the OS needs to register a simulated event
const EVENT_DELAY: Duration = Duration::from_millis(20);

/// Simulated keyboard and mouse through the windowing system
#[derive(Debug, Default)]
pub struct PortableInput;

impl PortableInput {
    pub fn new() -> Self {
        Self
    }

    fn send(&self, event: EventType) -> Result<()> {
        rdev::simulate(&event).map_err(|e| anyhow!("Failed to simulate {:?}: {:?}", event, e))?;
        thread::sleep(EVENT_DELAY);
        Ok(())
    }
}

impl KeySink for PortableInput {
    fn key_down(&mut self, key: InputKey) -> Result<()> {
        debug!("Key down: {:?}", key);
        self.send(match to_rdev(key) {
            Target::Key(k) => EventType::KeyPress(k),
            Target::Button(b) => EventType::ButtonPress(b),
        })
    }

    fn key_up(&mut self, key: InputKey) -> Result<()> {
        debug!("Key up: {:?}", key);
        self.send(match to_rdev(key) {
            Target::Key(k) => EventType::KeyRelease(k),
            Target::Button(b) => EventType::ButtonRelease(b),
        })
    }
}

#[derive(Debug, PartialEq)]
enum Target {
    Key(Key),
    Button(Button),
}

fn to_rdev(key: InputKey) -> Target {
    let k = match key {
        InputKey::MouseLeft => return Target::Button(Button::Left),
        InputKey::MouseRight => return Target::Button(Button::Right),
        InputKey::MouseMiddle => return Target::Button(Button::Middle),
        InputKey::Letter(c) => letter(c),
        InputKey::Digit(d) => match d {
            1 => Key::Num1,
            2 => Key::Num2,
            3 => Key::Num3,
            4 => Key::Num4,
            5 => Key::Num5,
            6 => Key::Num6,
            7 => Key::Num7,
            8 => Key::Num8,
            9 => Key::Num9,
            _ => Key::Num0,
        },
        InputKey::Function(n) => match n {
            1 => Key::F1,
            2 => Key::F2,
            3 => Key::F3,
            4 => Key::F4,
            5 => Key::F5,
            6 => Key::F6,
            7 => Key::F7,
            8 => Key::F8,
            9 => Key::F9,
            10 => Key::F10,
            11 => Key::F11,
            _ => Key::F12,
        },
        InputKey::Shift => Key::ShiftLeft,
        InputKey::RightShift => Key::ShiftRight,
        InputKey::Ctrl => Key::ControlLeft,
        InputKey::RightCtrl => Key::ControlRight,
        InputKey::Alt => Key::Alt,
        InputKey::RightAlt => Key::AltGr,
        InputKey::Up => Key::UpArrow,
        InputKey::Down => Key::DownArrow,
        InputKey::Left => Key::LeftArrow,
        InputKey::Right => Key::RightArrow,
        InputKey::Home => Key::Home,
        InputKey::End => Key::End,
        InputKey::PageUp => Key::PageUp,
        InputKey::PageDown => Key::PageDown,
        InputKey::Space => Key::Space,
        InputKey::Enter => Key::Return,
        InputKey::Tab => Key::Tab,
        InputKey::Escape => Key::Escape,
        InputKey::Backspace => Key::Backspace,
        InputKey::Delete => Key::Delete,
        InputKey::Insert => Key::Insert,
        InputKey::Pause => Key::Pause,
        InputKey::Minus => Key::Minus,
        InputKey::Equal => Key::Equal,
        InputKey::Comma => Key::Comma,
        InputKey::Dot => Key::Dot,
        InputKey::Slash => Key::Slash,
        InputKey::Semicolon => Key::SemiColon,
        InputKey::Quote => Key::Quote,
        InputKey::LeftBracket => Key::LeftBracket,
        InputKey::RightBracket => Key::RightBracket,
        InputKey::Backslash => Key::BackSlash,
        InputKey::Grave => Key::BackQuote,
    };
    Target::Key(k)
}

fn letter(c: char) -> Key {
    match c {
        'a' => Key::KeyA,
        'b' => Key::KeyB,
        'c' => Key::KeyC,
        'd' => Key::KeyD,
        'e' => Key::KeyE,
        'f' => Key::KeyF,
        'g' => Key::KeyG,
        'h' => Key::KeyH,
        'i' => Key::KeyI,
        'j' => Key::KeyJ,
        'k' => Key::KeyK,
        'l' => Key::KeyL,
        'm' => Key::KeyM,
        'n' => Key::KeyN,
        'o' => Key::KeyO,
        'p' => Key::KeyP,
        'q' => Key::KeyQ,
        'r' => Key::KeyR,
        's' => Key::KeyS,
        't' => Key::KeyT,
        'u' => Key::KeyU,
        'v' => Key::KeyV,
        'w' => Key::KeyW,
        'x' => Key::KeyX,
        'y' => Key::KeyY,
        _ => Key::KeyZ,
    }
}
