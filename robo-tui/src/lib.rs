//! Terminal UI for Robo - status line, help overlay, and telemetry

mod app;
mod theme;
pub mod widgets;

pub use app::{App, AppState, MessageType};
pub use theme::{Theme, CRT_AMBER, CRT_GREEN};
pub use widgets::{HelpWidget, StatusLineWidget, TelemetryWidget};
