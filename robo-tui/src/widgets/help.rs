//! Help overlay

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use robo_input::HELP_TEXT;

/// Key reference, drawn over the main area
pub struct HelpWidget<'a> {
    theme: &'a Theme,
}

impl<'a> HelpWidget<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(" ROBO - keys ", self.theme.title()))
            .style(self.theme.normal());

        let lines: Vec<Line> = HELP_TEXT
            .lines()
            .map(|l| Line::from(Span::styled(l, self.theme.normal())))
            .collect();

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
