//! Board telemetry: battery, status, LEDs

use crate::app::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use robo_engine::StatusEvent;

/// One-line board summary
pub struct TelemetryWidget<'a> {
    state: &'a AppState,
}

impl<'a> TelemetryWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for TelemetryWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.state.theme;

        let voltage = match self.state.voltage {
            Some(v) => Span::styled(
                format!("{:.2}V", v),
                theme.voltage_style(v, self.state.min_voltage),
            ),
            None => Span::styled("--.--V", theme.dim()),
        };

        let status = match self.state.board_status {
            Some(StatusEvent::Init) => Span::styled("OK", theme.indicator(true)),
            Some(StatusEvent::Halt) => {
                Span::styled("HALT", ratatui::style::Style::default().fg(theme.danger))
            }
            None => Span::styled("--", theme.dim()),
        };

        let releases = if self.state.native_releases {
            "key-up"
        } else {
            "timer"
        };

        let line = Line::from(vec![
            Span::styled("BAT ", theme.dim()),
            voltage,
            Span::styled("  BOARD ", theme.dim()),
            status,
            Span::styled("  LED ", theme.dim()),
            Span::styled("L", theme.indicator(self.state.leds.left)),
            Span::raw(" "),
            Span::styled("R", theme.indicator(self.state.leds.right)),
            Span::styled(format!("  release:{}", releases), theme.dim()),
            Span::styled(format!("  cmds:{}", self.state.dispatch_count), theme.dim()),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}
