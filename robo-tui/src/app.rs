//! Application state

use robo_engine::{LedState, Report, RobotEvent, StatusEvent};
use robo_input::{Command, DebounceState, HELP_TEXT};

use crate::theme::Theme;

/// Message type for colored status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Info,
    Success,
    Warning,
}

/// Application state
pub struct AppState {
    /// Last output message (label of the last command, or help text)
    pub output_message: String,
    /// Board status code of the last command, if any has run yet
    pub result_value: Option<i32>,
    pub message_type: MessageType,
    pub show_help: bool,

    // Controller mirror
    /// LEDs as the board has them, not the toggle flags
    pub leds: LedState,
    pub debounce: DebounceState,
    /// Whether the terminal reports key releases itself
    pub native_releases: bool,

    // Telemetry
    pub voltage: Option<f64>,
    pub min_voltage: f64,
    pub board_status: Option<StatusEvent>,

    pub theme: Theme,
    pub dispatch_count: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            output_message: HELP_TEXT.to_string(),
            result_value: None,
            message_type: MessageType::Info,
            show_help: true,
            leds: LedState::default(),
            debounce: DebounceState::Armed,
            native_releases: false,
            voltage: None,
            min_voltage: 5.5,
            board_status: None,
            theme: Theme::default(),
            dispatch_count: 0,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the outcome of a dispatched command
    pub fn apply_report(&mut self, report: &Report) {
        self.output_message = report.message.clone();
        self.result_value = Some(report.result);
        self.dispatch_count += 1;

        self.show_help = report.command == Command::ShowHelp;
        self.message_type = match report.command {
            Command::Unrecognized(_) => MessageType::Warning,
            Command::Stop => MessageType::Info,
            _ => MessageType::Success,
        };
    }

    /// Record a sensor notification
    pub fn handle_robot_event(&mut self, event: RobotEvent) {
        match event {
            RobotEvent::Status(status) => self.board_status = Some(status),
            RobotEvent::Voltage(volts) => self.voltage = Some(volts),
        }
    }

    /// The one-line `message -> result` shown in the status line
    pub fn status_text(&self) -> String {
        let message = if self.show_help {
            "help"
        } else {
            self.output_message.as_str()
        };
        match self.result_value {
            Some(result) => format!("{} -> {}", message, result),
            None => format!("{} -> -", message),
        }
    }
}

/// Top-level UI state
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
