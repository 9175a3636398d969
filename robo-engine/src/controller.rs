//! Command dispatcher
//!
//! Runs every input event through the [`Debouncer`] and executes the result
//! against the injected [`RobotHardware`]. Hardware errors are returned as
//! is; the caller is expected to treat them as fatal.

use robo_input::{Command, DebounceState, Debouncer, InputEvent, Step, HELP_TEXT};
use tracing::{debug, warn};

use crate::error::HardwareError;
use crate::hardware::{LedSide, RobotHardware};

/// On/off state of the two LEDs as last commanded by toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedState {
    pub left: bool,
    pub right: bool,
}

impl LedState {
    /// Flip one side and return the new value
    fn toggle(&mut self, side: LedSide) -> bool {
        let flag = match side {
            LedSide::Left => &mut self.left,
            LedSide::Right => &mut self.right,
        };
        *flag = !*flag;
        *flag
    }

    fn set(&mut self, side: LedSide, on: bool) {
        match side {
            LedSide::Left => self.left = on,
            LedSide::Right => self.right = on,
        }
    }
}

/// Result of one dispatched command, for the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub command: Command,
    pub message: String,
    /// Status code returned by the board
    pub result: i32,
}

impl Report {
    fn new(command: Command, message: impl Into<String>, result: i32) -> Self {
        Self {
            command,
            message: message.into(),
            result,
        }
    }
}

/// What happened to an input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command reached the board
    Dispatched(Report),
    /// Key repeat, nothing sent
    Swallowed,
    /// User asked to quit
    Quit,
}

/// Keyboard-to-robot controller
pub struct Controller<H: RobotHardware> {
    hardware: H,
    debouncer: Debouncer,
    leds: LedState,
    /// What the board was last told, which a full stop can darken
    lit: LedState,
}

impl<H: RobotHardware> Controller<H> {
    pub fn new(hardware: H) -> Self {
        Self {
            hardware,
            debouncer: Debouncer::new(),
            leds: LedState::default(),
            lit: LedState::default(),
        }
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hardware
    }

    pub fn leds(&self) -> LedState {
        self.leds
    }

    /// LEDs as last driven on the board
    pub fn lit_leds(&self) -> LedState {
        self.lit
    }

    pub fn debounce_state(&self) -> DebounceState {
        self.debouncer.state()
    }

    /// Handle one input event
    pub fn handle(&mut self, event: InputEvent) -> Result<Outcome, HardwareError> {
        match self.debouncer.step(event) {
            Step::Dispatch(command) => self.execute(command).map(Outcome::Dispatched),
            Step::Release => {
                let result = self.hardware.stop()?;
                debug!(result, "release -> stop");
                Ok(Outcome::Dispatched(Report::new(Command::Stop, "stop", result)))
            }
            Step::Swallowed => Ok(Outcome::Swallowed),
            Step::Quit => Ok(Outcome::Quit),
        }
    }

    /// Execute a command on the board
    pub fn execute(&mut self, command: Command) -> Result<Report, HardwareError> {
        let report = match command {
            Command::Forward => self.drive(command, H::forward)?,
            Command::Backward => self.drive(command, H::backward)?,
            Command::TurnLeft => self.drive(command, H::left)?,
            Command::TurnRight => self.drive(command, H::right)?,
            Command::RotateLeft => self.drive(command, H::left_with_rotation)?,
            Command::RotateRight => self.drive(command, H::right_with_rotation)?,
            Command::SpeedUp => self.drive(command, H::increase_speed)?,
            Command::SlowDown => self.drive(command, H::decrease_speed)?,

            // Full stop: wheels and both LEDs. The toggle flags are left alone.
            Command::Stop => {
                let result = self.hardware.stop()?;
                self.hardware.led_off(LedSide::Left)?;
                self.hardware.led_off(LedSide::Right)?;
                self.lit = LedState::default();
                Report::new(command, command.label(), result)
            }

            Command::ToggleLeftLed => {
                let result = self.toggle_led(LedSide::Left)?;
                Report::new(command, command.label(), result)
            }
            Command::ToggleRightLed => {
                let result = self.toggle_led(LedSide::Right)?;
                Report::new(command, command.label(), result)
            }

            // Stop first, then show help
            Command::ShowHelp => {
                let result = self.hardware.stop()?;
                Report::new(command, HELP_TEXT, result)
            }

            Command::Unrecognized(key) => {
                warn!(%key, "unrecognized key");
                let result = self.hardware.stop()?;
                Report::new(command, format!("Unrecognized key {}", key), result)
            }

            // Never reaches the board
            Command::Quit => Report::new(command, command.label(), 0),
        };

        debug!(command = ?report.command, result = report.result, "dispatched");
        Ok(report)
    }

    fn drive(
        &mut self,
        command: Command,
        op: impl FnOnce(&mut H) -> Result<i32, HardwareError>,
    ) -> Result<Report, HardwareError> {
        let result = op(&mut self.hardware)?;
        Ok(Report::new(command, command.label(), result))
    }

    fn toggle_led(&mut self, side: LedSide) -> Result<i32, HardwareError> {
        let on = self.leds.toggle(side);
        let result = if on {
            self.hardware.led_on(side)?
        } else {
            self.hardware.led_off(side)?
        };
        self.lit.set(side, on);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::create_channels;
    use crate::simulated::{Call, Journal, SimulatedRobot, SimulatorConfig};
    use robo_input::Key;

    fn controller() -> (Controller<SimulatedRobot>, Journal) {
        let (tx, _rx) = create_channels();
        let mut bot = SimulatedRobot::new(SimulatorConfig::default(), tx);
        bot.init().unwrap();
        let journal = bot.journal();
        journal.clear();
        (Controller::new(bot), journal)
    }

    fn press(c: char) -> InputEvent {
        InputEvent::Pressed(Key::Char(c))
    }

    fn dispatched(outcomes: &[Outcome]) -> Vec<Command> {
        outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Dispatched(r) => Some(r.command),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_held_key_moves_once() {
        let (mut ctl, journal) = controller();
        let outcomes: Vec<_> = [press('i'), press('i'), press('i'), InputEvent::Released]
            .into_iter()
            .map(|e| ctl.handle(e).unwrap())
            .collect();

        assert_eq!(dispatched(&outcomes), vec![Command::Forward, Command::Stop]);
        assert_eq!(journal.calls(), vec![Call::Forward, Call::Stop]);
    }

    #[test]
    fn test_left_led_toggles_on_then_off() {
        let (mut ctl, journal) = controller();
        for event in [press('q'), InputEvent::Released] {
            ctl.handle(event).unwrap();
        }
        assert!(ctl.leds().left);
        for event in [press('q'), InputEvent::Released] {
            ctl.handle(event).unwrap();
        }
        assert!(!ctl.leds().left);
        assert!(!ctl.leds().right);

        assert_eq!(
            journal.calls(),
            vec![
                Call::LedOn(LedSide::Left),
                Call::Stop,
                Call::LedOff(LedSide::Left),
                Call::Stop
            ]
        );
    }

    #[test]
    fn test_right_led_uses_new_value() {
        let (mut ctl, journal) = controller();
        let report = ctl.execute(Command::ToggleRightLed).unwrap();
        assert_eq!(report.message, "right LED");
        assert!(ctl.leds().right);
        assert!(ctl.hardware().led(LedSide::Right));
        assert_eq!(journal.calls(), vec![Call::LedOn(LedSide::Right)]);
    }

    #[test]
    fn test_help_stops_before_showing_text() {
        let (mut ctl, journal) = controller();
        ctl.handle(press('e')).unwrap();
        ctl.handle(InputEvent::Released).unwrap();
        journal.clear();

        let outcome = ctl.handle(press('?')).unwrap();
        let Outcome::Dispatched(report) = outcome else {
            panic!("help was not dispatched");
        };
        assert_eq!(report.command, Command::ShowHelp);
        assert_eq!(report.message, HELP_TEXT);
        assert_eq!(journal.calls(), vec![Call::Stop]);
    }

    #[test]
    fn test_space_stops_and_darkens_leds() {
        let (mut ctl, journal) = controller();
        ctl.execute(Command::ToggleLeftLed).unwrap();
        journal.clear();

        let report = ctl.execute(Command::Stop).unwrap();
        assert_eq!(report.message, "stop");
        assert_eq!(
            journal.calls(),
            vec![
                Call::Stop,
                Call::LedOff(LedSide::Left),
                Call::LedOff(LedSide::Right)
            ]
        );
        // flags only change through toggles
        assert!(ctl.leds().left);
        assert_eq!(ctl.lit_leds(), LedState::default());
        assert!(!ctl.hardware().led(LedSide::Left));

        // next toggle flips the flag, so the dark LED is sent off again
        ctl.execute(Command::ToggleLeftLed).unwrap();
        assert!(!ctl.lit_leds().left);
    }

    #[test]
    fn test_lit_leds_follow_toggles() {
        let (mut ctl, _journal) = controller();
        ctl.execute(Command::ToggleRightLed).unwrap();
        assert_eq!(
            ctl.lit_leds(),
            LedState {
                left: false,
                right: true
            }
        );
    }

    #[test]
    fn test_enter_key_stops() {
        let (mut ctl, journal) = controller();
        ctl.handle(press('i')).unwrap();
        ctl.handle(InputEvent::Released).unwrap();
        journal.clear();

        let outcome = ctl.handle(press('\n')).unwrap();
        let Outcome::Dispatched(report) = outcome else {
            panic!("enter was not dispatched");
        };
        assert_eq!(report.command, Command::Unrecognized(Key::Char('\n')));
        assert_eq!(report.message, "Unrecognized key [Enter]");
        assert_eq!(journal.calls(), vec![Call::Stop]);
        assert!(!ctl.hardware().is_moving());
    }

    #[test]
    fn test_unrecognized_key_stops() {
        let (mut ctl, journal) = controller();
        let outcome = ctl.handle(press('z')).unwrap();
        let Outcome::Dispatched(report) = outcome else {
            panic!("unrecognized key was not dispatched");
        };
        assert_eq!(report.message, "Unrecognized key 'z'");
        assert_eq!(report.result, 1);
        assert_eq!(journal.calls(), vec![Call::Stop]);
    }

    #[test]
    fn test_quit_from_any_state_touches_nothing() {
        let (mut ctl, journal) = controller();
        assert_eq!(ctl.handle(InputEvent::Pressed(Key::Esc)).unwrap(), Outcome::Quit);

        ctl.handle(press('l')).unwrap();
        assert_eq!(ctl.debounce_state(), DebounceState::Suppressed);
        assert_eq!(ctl.handle(press('Q')).unwrap(), Outcome::Quit);
        assert_eq!(ctl.debounce_state(), DebounceState::Armed);
        assert_eq!(ctl.handle(press('X')).unwrap(), Outcome::Quit);

        assert_eq!(journal.calls(), vec![Call::Right]);
    }

    #[test]
    fn test_swallowed_repeat() {
        let (mut ctl, _journal) = controller();
        ctl.handle(press('8')).unwrap();
        assert_eq!(ctl.handle(press('8')).unwrap(), Outcome::Swallowed);
        assert_eq!(ctl.hardware().speed(), 210);
    }

    #[test]
    fn test_hardware_failure_propagates() {
        let (tx, _rx) = create_channels();
        let mut bot = SimulatedRobot::new(SimulatorConfig::default(), tx).with_failure_after(1);
        bot.init().unwrap();
        let mut ctl = Controller::new(bot);

        let err = ctl.handle(press('k')).unwrap_err();
        assert!(matches!(err, HardwareError::Io { op: "backward", .. }));
    }
}
