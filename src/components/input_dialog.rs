// ABOUTME: Input dialog shown while the state machine awaits a name or y/n answer

use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{help::centered_rect, Theme};
use crate::app::InteractionState;

pub struct InputDialogComponent {
    theme: Theme,
}

impl InputDialogComponent {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, interaction: &InteractionState) {
        let dialog_area = centered_rect(80, 60, area);
        frame.render_widget(Clear, dialog_area);

        let color = self.theme.action_color(interaction.pending_action);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let input_line = if interaction.input.is_empty() {
            Line::from(Span::styled(interaction.placeholder(), self.theme.dim()))
        } else {
            Line::from(Span::styled(
                interaction.input.value().to_string(),
                Style::default().fg(color),
            ))
        };

        let lines = vec![
            Line::from(Span::styled(
                interaction.prompt.clone(),
                Style::default().fg(color),
            )),
            input_line,
            Line::from(Span::styled("esc - cancel", self.theme.dim())),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        if inner.height > 1 {
            let offset = u16::try_from(interaction.input.cursor()).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
            frame.set_cursor(x, inner.y + 1);
        }
    }
}
