//! Key-repeat suppression
//!
//! Terminals (and most windowing toolkits) report a held key as a stream of
//! press events. The robot should act once per physical press, so the first
//! press is dispatched and the rest are swallowed until the key is released.

use crate::commands::{lookup, Command};
use crate::keys::InputEvent;

/// Debouncer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// Ready to accept a new press
    #[default]
    Armed,
    /// A press was dispatched; repeats are ignored until release
    Suppressed,
}

/// What the dispatcher should do for one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// First press of a key
    Dispatch(Command),
    /// Key released; halt motion
    Release,
    /// Repeat of a held key, nothing to do
    Swallowed,
    /// Quit key, acted on regardless of state
    Quit,
}

/// Edge-triggered filter between the input surface and the dispatcher
#[derive(Debug, Default)]
pub struct Debouncer {
    state: DebounceState,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Feed one input event through the state machine
    pub fn step(&mut self, event: InputEvent) -> Step {
        match event {
            InputEvent::Pressed(key) => {
                let command = lookup(key);

                // Quit must work even while a key is held down
                if command.is_quit() {
                    self.state = DebounceState::Armed;
                    return Step::Quit;
                }

                match self.state {
                    DebounceState::Armed => {
                        self.state = DebounceState::Suppressed;
                        Step::Dispatch(command)
                    }
                    DebounceState::Suppressed => Step::Swallowed,
                }
            }
            // Release is never suppressed, even when already armed.
            InputEvent::Released => {
                self.state = DebounceState::Armed;
                Step::Release
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Key;

    fn run(debouncer: &mut Debouncer, events: &[InputEvent]) -> Vec<Step> {
        events
            .iter()
            .map(|e| debouncer.step(*e))
            .filter(|s| *s != Step::Swallowed)
            .collect()
    }

    #[test]
    fn test_starts_armed() {
        assert_eq!(Debouncer::new().state(), DebounceState::Armed);
    }

    #[test]
    fn test_repeats_are_swallowed() {
        let mut d = Debouncer::new();
        let press = InputEvent::Pressed(Key::Char('i'));

        assert_eq!(d.step(press), Step::Dispatch(Command::Forward));
        assert_eq!(d.state(), DebounceState::Suppressed);
        assert_eq!(d.step(press), Step::Swallowed);
        assert_eq!(d.step(press), Step::Swallowed);
        assert_eq!(d.step(InputEvent::Released), Step::Release);
        assert_eq!(d.state(), DebounceState::Armed);
    }

    #[test]
    fn test_one_dispatch_per_press_for_any_repeat_count() {
        for n in 1..=20 {
            let mut d = Debouncer::new();
            let mut events = vec![InputEvent::Pressed(Key::Char('k')); n];
            events.push(InputEvent::Released);

            let steps = run(&mut d, &events);
            assert_eq!(steps, vec![Step::Dispatch(Command::Backward), Step::Release]);
        }
    }

    #[test]
    fn test_other_key_while_suppressed_is_swallowed() {
        let mut d = Debouncer::new();
        d.step(InputEvent::Pressed(Key::Char('i')));
        assert_eq!(d.step(InputEvent::Pressed(Key::Char('k'))), Step::Swallowed);
    }

    #[test]
    fn test_spurious_release_still_stops() {
        let mut d = Debouncer::new();
        assert_eq!(d.step(InputEvent::Released), Step::Release);
        assert_eq!(d.step(InputEvent::Released), Step::Release);
        assert_eq!(d.state(), DebounceState::Armed);
    }

    #[test]
    fn test_quit_from_either_state() {
        for key in [Key::Esc, Key::Char('X'), Key::Char('Q')] {
            let mut d = Debouncer::new();
            assert_eq!(d.step(InputEvent::Pressed(key)), Step::Quit);
            assert_eq!(d.state(), DebounceState::Armed);

            d.step(InputEvent::Pressed(Key::Char('e')));
            assert_eq!(d.state(), DebounceState::Suppressed);
            assert_eq!(d.step(InputEvent::Pressed(key)), Step::Quit);
            assert_eq!(d.state(), DebounceState::Armed);
        }
    }

    #[test]
    fn test_unrecognized_key_is_debounced_too() {
        let mut d = Debouncer::new();
        let press = InputEvent::Pressed(Key::Char('z'));
        assert_eq!(
            d.step(press),
            Step::Dispatch(Command::Unrecognized(Key::Char('z')))
        );
        assert_eq!(d.step(press), Step::Swallowed);
    }
}
