//! UI Widgets for Robo

mod help;
mod status_line;
mod telemetry;

pub use help::HelpWidget;
pub use status_line::StatusLineWidget;
pub use telemetry::TelemetryWidget;
