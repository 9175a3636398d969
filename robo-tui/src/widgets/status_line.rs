//! Status line widget - last command and its result

use crate::app::MessageType;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use robo_input::DebounceState;

/// Widget for the `message -> result` line
pub struct StatusLineWidget<'a> {
    text: &'a str,
    message_type: MessageType,
    debounce: DebounceState,
    theme: &'a Theme,
}

impl<'a> StatusLineWidget<'a> {
    pub fn new(text: &'a str, theme: &'a Theme) -> Self {
        Self {
            text,
            message_type: MessageType::Info,
            debounce: DebounceState::Armed,
            theme,
        }
    }

    pub fn message_type(mut self, message_type: MessageType) -> Self {
        self.message_type = message_type;
        self
    }

    pub fn debounce(mut self, state: DebounceState) -> Self {
        self.debounce = state;
        self
    }

    fn state_string(&self) -> (&'static str, Style) {
        match self.debounce {
            DebounceState::Armed => ("READY", self.theme.highlight()),
            DebounceState::Suppressed => ("HELD", Style::default().fg(self.theme.warning)),
        }
    }
}

impl Widget for StatusLineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let chunks = Layout::horizontal([
            Constraint::Length(9),  // Debounce indicator
            Constraint::Min(20),    // Message -> result
            Constraint::Length(18), // Help hint
        ])
        .split(area);

        let (state_text, state_style) = self.state_string();
        let state_line = Line::from(vec![
            Span::raw("["),
            Span::styled(state_text, state_style),
            Span::raw("]"),
        ]);
        Paragraph::new(state_line).render(chunks[0], buf);

        let msg_style = match self.message_type {
            MessageType::Info => self.theme.normal(),
            MessageType::Success => Style::from(self.theme.accent),
            MessageType::Warning => Style::default().fg(self.theme.warning),
        };
        Paragraph::new(Line::from(Span::styled(self.text, msg_style))).render(chunks[1], buf);

        let hint = Line::from(Span::styled("?:help  Esc:quit", self.theme.dim()));
        Paragraph::new(hint).render(chunks[2], buf);
    }
}
