//! Native input backend using Linux evdev/uinput
//!
//! Creates a virtual keyboard device; works on both X11 and Wayland and is
//! seen by games like a real keyboard. Needs write access to `/dev/uinput`.

use super::keys::InputKey;
use super::KeySink;
use anyhow::{Context, Result};
use evdev::{uinput::VirtualDeviceBuilder, AttributeSet, EventType, InputEvent, Key};
use tracing::{debug, info};

/// Virtual keyboard for simulating key presses
pub struct VirtualKeyboard {
    device: evdev::uinput::VirtualDevice,
}

impl VirtualKeyboard {
    /// Create a new virtual keyboard device
    pub fn new() -> Result<Self> {
        let mut keys = AttributeSet::<Key>::new();
        for key in all_keys() {
            keys.insert(key);
        }

        let device = VirtualDeviceBuilder::new()?
            .name("Wingman Virtual Keyboard")
            .with_keys(&keys)?
            .build()
            .context("Failed to create virtual keyboard")?;

        info!("⌨️ Virtual keyboard created");
        Ok(Self { device })
    }

    fn emit(&mut self, key: Key, value: i32) -> Result<()> {
        self.device
            .emit(&[InputEvent::new(EventType::KEY, key.code(), value)])?;
        Ok(())
    }
}

impl KeySink for VirtualKeyboard {
    fn key_down(&mut self, key: InputKey) -> Result<()> {
        debug!("Key down: {:?}", key);
        self.emit(to_evdev(key), 1)
    }

    fn key_up(&mut self, key: InputKey) -> Result<()> {
        debug!("Key up: {:?}", key);
        self.emit(to_evdev(key), 0)
    }
}

fn all_keys() -> Vec<Key> {
    let mut keys: Vec<Key> = ('a'..='z').map(|c| to_evdev(InputKey::Letter(c))).collect();
    keys.extend((0..=9).map(|d| to_evdev(InputKey::Digit(d))));
    keys.extend((1..=12).map(|f| to_evdev(InputKey::Function(f))));
    keys.extend(
        [
            InputKey::Shift,
            InputKey::RightShift,
            InputKey::Ctrl,
            InputKey::RightCtrl,
            InputKey::Alt,
            InputKey::RightAlt,
            InputKey::Up,
            InputKey::Down,
            InputKey::Left,
            InputKey::Right,
            InputKey::Home,
            InputKey::End,
            InputKey::PageUp,
            InputKey::PageDown,
            InputKey::Space,
            InputKey::Enter,
            InputKey::Tab,
            InputKey::Escape,
            InputKey::Backspace,
            InputKey::Delete,
            InputKey::Insert,
            InputKey::Pause,
            InputKey::Minus,
            InputKey::Equal,
            InputKey::Comma,
            InputKey::Dot,
            InputKey::Slash,
            InputKey::Semicolon,
            InputKey::Quote,
            InputKey::LeftBracket,
            InputKey::RightBracket,
            InputKey::Backslash,
            InputKey::Grave,
            InputKey::MouseLeft,
            InputKey::MouseRight,
            InputKey::MouseMiddle,
        ]
        .into_iter()
        .map(to_evdev),
    );
    keys
}

fn to_evdev(key: InputKey) -> Key {
    match key {
        InputKey::Letter(c) => letter(c),
        InputKey::Digit(d) => match d {
            1 => Key::KEY_1,
            2 => Key::KEY_2,
            3 => Key::KEY_3,
            4 => Key::KEY_4,
            5 => Key::KEY_5,
            6 => Key::KEY_6,
            7 => Key::KEY_7,
            8 => Key::KEY_8,
            9 => Key::KEY_9,
            _ => Key::KEY_0,
        },
        InputKey::Function(n) => match n {
            1 => Key::KEY_F1,
            2 => Key::KEY_F2,
            3 => Key::KEY_F3,
            4 => Key::KEY_F4,
            5 => Key::KEY_F5,
            6 => Key::KEY_F6,
            7 => Key::KEY_F7,
            8 => Key::KEY_F8,
            9 => Key::KEY_F9,
            10 => Key::KEY_F10,
            11 => Key::KEY_F11,
            _ => Key::KEY_F12,
        },
        InputKey::Shift => Key::KEY_LEFTSHIFT,
        InputKey::RightShift => Key::KEY_RIGHTSHIFT,
        InputKey::Ctrl => Key::KEY_LEFTCTRL,
        InputKey::RightCtrl => Key::KEY_RIGHTCTRL,
        InputKey::Alt => Key::KEY_LEFTALT,
        InputKey::RightAlt => Key::KEY_RIGHTALT,
        InputKey::Up => Key::KEY_UP,
        InputKey::Down => Key::KEY_DOWN,
        InputKey::Left => Key::KEY_LEFT,
        InputKey::Right => Key::KEY_RIGHT,
        InputKey::Home => Key::KEY_HOME,
        InputKey::End => Key::KEY_END,
        InputKey::PageUp => Key::KEY_PAGEUP,
        InputKey::PageDown => Key::KEY_PAGEDOWN,
        InputKey::Space => Key::KEY_SPACE,
        InputKey::Enter => Key::KEY_ENTER,
        InputKey::Tab => Key::KEY_TAB,
        InputKey::Escape => Key::KEY_ESC,
        InputKey::Backspace => Key::KEY_BACKSPACE,
        InputKey::Delete => Key::KEY_DELETE,
        InputKey::Insert => Key::KEY_INSERT,
        InputKey::Pause => Key::KEY_PAUSE,
        InputKey::Minus => Key::KEY_MINUS,
        InputKey::Equal => Key::KEY_EQUAL,
        InputKey::Comma => Key::KEY_COMMA,
        InputKey::Dot => Key::KEY_DOT,
        InputKey::Slash => Key::KEY_SLASH,
        InputKey::Semicolon => Key::KEY_SEMICOLON,
        InputKey::Quote => Key::KEY_APOSTROPHE,
        InputKey::LeftBracket => Key::KEY_LEFTBRACE,
        InputKey::RightBracket => Key::KEY_RIGHTBRACE,
        InputKey::Backslash => Key::KEY_BACKSLASH,
        InputKey::Grave => Key::KEY_GRAVE,
        InputKey::MouseLeft => Key::BTN_LEFT,
        InputKey::MouseRight => Key::BTN_RIGHT,
        InputKey::MouseMiddle => Key::BTN_MIDDLE,
    }
}

fn letter(c: char) -> Key {
    match c {
        'a' => Key::KEY_A,
        'b' => Key::KEY_B,
        'c' => Key::KEY_C,
        'd' => Key::KEY_D,
        'e' => Key::KEY_E,
        'f' => Key::KEY_F,
        'g' => Key::KEY_G,
        'h' => Key::KEY_H,
        'i' => Key::KEY_I,
        'j' => Key::KEY_J,
        'k' => Key::KEY_K,
        'l' => Key::KEY_L,
        'm' => Key::KEY_M,
        'n' => Key::KEY_N,
        'o' => Key::KEY_O,
        'p' => Key::KEY_P,
        'q' => Key::KEY_Q,
        'r' => Key::KEY_R,
        's' => Key::KEY_S,
        't' => Key::KEY_T,
        'u' => Key::KEY_U,
        'v' => Key::KEY_V,
        'w' => Key::KEY_W,
        'x' => Key::KEY_X,
        'y' => Key::KEY_Y,
        _ => Key::KEY_Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keys::parse_key;

    #[test]
    fn test_to_evdev() {
        let key = |name| parse_key(name).map(to_evdev);
        assert_eq!(key("a"), Some(Key::KEY_A));
        assert_eq!(key("F1"), Some(Key::KEY_F1));
        assert_eq!(key("space"), Some(Key::KEY_SPACE));
        assert_eq!(key("mouse_left"), Some(Key::BTN_LEFT));
    }

    #[test]
    fn test_all_keys_are_distinct() {
        let keys = all_keys();
        let unique: std::collections::HashSet<_> = keys.iter().map(|k| k.code()).collect();
        assert_eq!(unique.len(), keys.len());
    }
}
