//! Backend-independent key names
//!
//! Config files name keys by their label ("w", "shift", "f1", "enter").
//! Names are parsed once into [`InputKey`] and each backend maps that onto
//! its own key codes.

/// A key or mouse button that can be injected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// Letter `a`..=`z` (stored lowercase)
    Letter(char),
    /// Digit `0`..=`9`
    Digit(u8),
    /// Function key `F1`..=`F12`
    Function(u8),
    Shift,
    RightShift,
    Ctrl,
    RightCtrl,
    Alt,
    RightAlt,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    Insert,
    Pause,
    Minus,
    Equal,
    Comma,
    Dot,
    Slash,
    Semicolon,
    Quote,
    LeftBracket,
    RightBracket,
    Backslash,
    Grave,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

/// Parse a configured key name
pub fn parse_key(name: &str) -> Option<InputKey> {
    let upper = name.trim().to_uppercase();

    let mut chars = upper.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(key) = char_to_key(c.to_ascii_lowercase()).map(|(key, _)| key) {
            return Some(key);
        }
    }

    if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
        return (1..=12).contains(&n).then_some(InputKey::Function(n));
    }

    let key = match upper.as_str() {
        // Modifiers
        "SHIFT" | "LSHIFT" | "SHIFTLEFT" => InputKey::Shift,
        "RSHIFT" | "SHIFTRIGHT" => InputKey::RightShift,
        "CTRL" | "LCTRL" | "CONTROL" | "CTRLLEFT" => InputKey::Ctrl,
        "RCTRL" | "CTRLRIGHT" => InputKey::RightCtrl,
        "ALT" | "LALT" | "ALTLEFT" => InputKey::Alt,
        "RALT" | "ALTRIGHT" => InputKey::RightAlt,
        // Navigation
        "UP" => InputKey::Up,
        "DOWN" => InputKey::Down,
        "LEFT" => InputKey::Left,
        "RIGHT" => InputKey::Right,
        "HOME" => InputKey::Home,
        "END" => InputKey::End,
        "PAGEUP" | "PGUP" => InputKey::PageUp,
        "PAGEDOWN" | "PGDN" => InputKey::PageDown,
        // Common
        "SPACE" => InputKey::Space,
        "ENTER" | "RETURN" => InputKey::Enter,
        "TAB" => InputKey::Tab,
        "ESC" | "ESCAPE" => InputKey::Escape,
        "BACKSPACE" => InputKey::Backspace,
        "DELETE" | "DEL" => InputKey::Delete,
        "INSERT" | "INS" => InputKey::Insert,
        "PAUSE" => InputKey::Pause,
        // Mouse
        "MOUSE_LEFT" | "LEFT_CLICK" | "MOUSE1" => InputKey::MouseLeft,
        "MOUSE_RIGHT" | "RIGHT_CLICK" | "MOUSE2" => InputKey::MouseRight,
        "MOUSE_MIDDLE" | "MIDDLE_CLICK" | "MOUSE3" => InputKey::MouseMiddle,
        _ => return None,
    };
    Some(key)
}

/// Key and shift state needed to type a character on a US layout
pub fn char_to_key(ch: char) -> Option<(InputKey, bool)> {
    let plain = |key| Some((key, false));
    let shifted = |key| Some((key, true));

    match ch {
        'a'..='z' => plain(InputKey::Letter(ch)),
        'A'..='Z' => shifted(InputKey::Letter(ch.to_ascii_lowercase())),
        '0'..='9' => plain(InputKey::Digit(ch as u8 - b'0')),
        ' ' => plain(InputKey::Space),
        '\n' => plain(InputKey::Enter),
        '\t' => plain(InputKey::Tab),
        '-' => plain(InputKey::Minus),
        '=' => plain(InputKey::Equal),
        ',' => plain(InputKey::Comma),
        '.' => plain(InputKey::Dot),
        '/' => plain(InputKey::Slash),
        ';' => plain(InputKey::Semicolon),
        '\'' => plain(InputKey::Quote),
        '[' => plain(InputKey::LeftBracket),
        ']' => plain(InputKey::RightBracket),
        '\\' => plain(InputKey::Backslash),
        '`' => plain(InputKey::Grave),
        '!' => shifted(InputKey::Digit(1)),
        '@' => shifted(InputKey::Digit(2)),
        '#' => shifted(InputKey::Digit(3)),
        '$' => shifted(InputKey::Digit(4)),
        '%' => shifted(InputKey::Digit(5)),
        '^' => shifted(InputKey::Digit(6)),
        '&' => shifted(InputKey::Digit(7)),
        '*' => shifted(InputKey::Digit(8)),
        '(' => shifted(InputKey::Digit(9)),
        ')' => shifted(InputKey::Digit(0)),
        '_' => shifted(InputKey::Minus),
        '+' => shifted(InputKey::Equal),
        '<' => shifted(InputKey::Comma),
        '>' => shifted(InputKey::Dot),
        '?' => shifted(InputKey::Slash),
        ':' => shifted(InputKey::Semicolon),
        '"' => shifted(InputKey::Quote),
        '{' => shifted(InputKey::LeftBracket),
        '}' => shifted(InputKey::RightBracket),
        '|' => shifted(InputKey::Backslash),
        '~' => shifted(InputKey::Grave),
        _ => None,
    }
}
