//! crossterm adapter
//!
//! Normalizes terminal key events into [`InputEvent`]s and papers over
//! terminals that never report key releases.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::keys::{InputEvent, Key};

/// Default silence before a release is assumed. Sits well above common
/// initial repeat delays (X11 defaults to 660 ms).
pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Convert a crossterm key event.
///
/// Typing keys without a printable glyph become their control character,
/// so they still reach the command table. Returns `None` for keys that have
/// no symbol (function keys, bare modifiers). Releases are always passed
/// through.
pub fn normalize(event: &KeyEvent) -> Option<InputEvent> {
    if event.kind == KeyEventKind::Release {
        return Some(InputEvent::Released);
    }

    let key = match event.code {
        // Raw mode eats SIGINT, so treat Ctrl-C like Esc
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Char('\n'),
        KeyCode::Tab => Key::Char('\t'),
        KeyCode::Backspace => Key::Char('\u{8}'),
        KeyCode::Delete => Key::Char('\u{7f}'),
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => return None,
    };

    Some(InputEvent::Pressed(key))
}

/// Synthesizes releases for terminals without release reporting.
///
/// Without the kitty keyboard protocol a held key shows up as a burst of
/// presses and nothing at all when it goes up. Once the presses stop for
/// `timeout`, a release is assumed. The timeout has to outlast the OS
/// initial repeat delay or a held key will stutter.
///
/// As soon as the terminal delivers a genuine release the fallback turns
/// itself off.
#[derive(Debug)]
pub struct ReleaseFallback {
    timeout: Duration,
    last_press: Option<Instant>,
    native_releases: bool,
}

impl ReleaseFallback {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            last_press: None,
            native_releases: false,
        }
    }

    /// Whether the terminal has been seen reporting releases
    pub fn native_releases(&self) -> bool {
        self.native_releases
    }

    /// Record an event that came from the terminal
    pub fn observe(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Pressed(_) => self.last_press = Some(now),
            InputEvent::Released => {
                self.native_releases = true;
                self.last_press = None;
            }
        }
    }

    /// Returns a synthetic release if the key has gone quiet
    pub fn poll(&mut self, now: Instant) -> Option<InputEvent> {
        if self.native_releases {
            return None;
        }
        let last = self.last_press?;
        if now.saturating_duration_since(last) >= self.timeout {
            self.last_press = None;
            Some(InputEvent::Released)
        } else {
            None
        }
    }
}
