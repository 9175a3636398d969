//! Command definitions and the key table for Robo

use crate::keys::Key;

/// Help screen, also shown at startup.
///
/// Control keys are laid out for touch typists so either hand can drive.
pub const HELP_TEXT: &str = "\
Control keys are chosen to be convenient for a touch typist,
using either the left hand or right hand.

Help:  '?'

Stop:        [SPACE] bar
Forward:     'i'  or  'e'  or  [Up]
Backward:    'k'  or  'd'  or  [Down]
Turn Right:  'l'  or  'f'  or  [Right]
Turn Left:   'j'  or  's'  or  [Left]

Rotate Right:  ';'  or  'g'
Rotate Left:   'h'  or  'a'
Speed up:      '8'  or  '4'  or  [PgUp]
Slow down:     ','  or  'x'  or  [PgDn]

Toggle left LED:  'q'
Toggle right LED: '['

Quit:             [Esc], 'X', or 'Q'";

/// Actions that can be dispatched to the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Motion
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    RotateLeft,
    RotateRight,
    Stop,

    // Speed
    SpeedUp,
    SlowDown,

    // LEDs
    ToggleLeftLed,
    ToggleRightLed,

    // Application
    ShowHelp,
    Quit,

    /// Key with no binding. Still halts the robot.
    Unrecognized(Key),
}

impl Command {
    /// Short label for logs and the status line
    pub fn label(&self) -> &'static str {
        match self {
            Command::Forward => "Move forward",
            Command::Backward => "back up",
            Command::TurnLeft => "turn left",
            Command::TurnRight => "turn right",
            Command::RotateLeft => "rotate left",
            Command::RotateRight => "rotate right",
            Command::Stop => "stop",
            Command::SpeedUp => "speed up",
            Command::SlowDown => "slow down",
            Command::ToggleLeftLed => "left LED",
            Command::ToggleRightLed => "right LED",
            Command::ShowHelp => "help",
            Command::Quit => "quit",
            Command::Unrecognized(_) => "Unrecognized key",
        }
    }

    /// True for the commands that end the session
    pub fn is_quit(&self) -> bool {
        matches!(self, Command::Quit)
    }
}

/// Map a key to its command.
///
/// Most commands have a right-hand key, a left-hand key, and sometimes a
/// cursor key. Anything not listed is `Unrecognized`.
pub fn lookup(key: Key) -> Command {
    match key {
        Key::Char('?') => Command::ShowHelp,

        Key::Esc | Key::Char('X') | Key::Char('Q') => Command::Quit,

        Key::Char('i') | Key::Char('e') | Key::Up => Command::Forward,
        Key::Char('j') | Key::Char('s') | Key::Left => Command::TurnLeft,
        Key::Char('l') | Key::Char('f') | Key::Right => Command::TurnRight,
        Key::Char('k') | Key::Char('d') | Key::Down => Command::Backward,

        Key::Char(' ') => Command::Stop,

        Key::Char('h') | Key::Char('a') => Command::RotateLeft,
        Key::Char(';') | Key::Char('g') => Command::RotateRight,

        Key::Char('8') | Key::Char('4') | Key::PageUp => Command::SpeedUp,
        Key::Char(',') | Key::Char('x') | Key::PageDown => Command::SlowDown,

        Key::Char('q') => Command::ToggleLeftLed,
        Key::Char('[') => Command::ToggleRightLed,

        other => Command::Unrecognized(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(keys: &str) -> impl Iterator<Item = Key> + '_ {
        keys.chars().map(Key::Char)
    }

    #[test]
    fn test_motion_aliases() {
        for key in chars("ie").chain([Key::Up]) {
            assert_eq!(lookup(key), Command::Forward);
        }
        for key in chars("kd").chain([Key::Down]) {
            assert_eq!(lookup(key), Command::Backward);
        }
        for key in chars("js").chain([Key::Left]) {
            assert_eq!(lookup(key), Command::TurnLeft);
        }
        for key in chars("lf").chain([Key::Right]) {
            assert_eq!(lookup(key), Command::TurnRight);
        }
        for key in chars("ha") {
            assert_eq!(lookup(key), Command::RotateLeft);
        }
        for key in chars(";g") {
            assert_eq!(lookup(key), Command::RotateRight);
        }
        assert_eq!(lookup(Key::Char(' ')), Command::Stop);
    }

    #[test]
    fn test_speed_aliases() {
        for key in chars("84").chain([Key::PageUp]) {
            assert_eq!(lookup(key), Command::SpeedUp);
        }
        for key in chars(",x").chain([Key::PageDown]) {
            assert_eq!(lookup(key), Command::SlowDown);
        }
    }

    #[test]
    fn test_led_help_and_quit() {
        assert_eq!(lookup(Key::Char('q')), Command::ToggleLeftLed);
        assert_eq!(lookup(Key::Char('[')), Command::ToggleRightLed);
        assert_eq!(lookup(Key::Char('?')), Command::ShowHelp);
        for key in [Key::Esc, Key::Char('X'), Key::Char('Q')] {
            assert!(lookup(key).is_quit());
        }
    }

    #[test]
    fn test_unlisted_keys_are_unrecognized() {
        for key in chars("zZI]0!") {
            assert_eq!(lookup(key), Command::Unrecognized(key));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // lowercase x slows down, uppercase quits
        assert_eq!(lookup(Key::Char('x')), Command::SlowDown);
        assert_eq!(lookup(Key::Char('X')), Command::Quit);
        assert_eq!(lookup(Key::Char('q')), Command::ToggleLeftLed);
        assert_eq!(lookup(Key::Char('Q')), Command::Quit);
    }
}
