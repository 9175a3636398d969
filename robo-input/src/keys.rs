//! Toolkit-independent input symbols

use std::fmt;

/// A key as seen by the command table.
///
/// Terminal adapters are responsible for mapping their own key codes into
/// this type; nothing past this point knows about the UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Esc,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("[SPACE]"),
            Key::Char('\n') => f.write_str("[Enter]"),
            Key::Char('\t') => f.write_str("[Tab]"),
            Key::Char('\u{8}') => f.write_str("[Backspace]"),
            Key::Char('\u{7f}') => f.write_str("[Delete]"),
            Key::Char(c) => write!(f, "'{}'", c),
            Key::Esc => f.write_str("[Esc]"),
            Key::Up => f.write_str("[Up]"),
            Key::Down => f.write_str("[Down]"),
            Key::Left => f.write_str("[Left]"),
            Key::Right => f.write_str("[Right]"),
            Key::PageUp => f.write_str("[PgUp]"),
            Key::PageDown => f.write_str("[PgDn]"),
        }
    }
}

/// A single notification from the input surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key is down. Held keys repeat this event until released.
    Pressed(Key),
    /// A key went up
    Released,
}
