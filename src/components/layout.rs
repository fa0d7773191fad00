// ABOUTME: Main layout component arranging header, session list, input dialog and footer

use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use super::{HelpComponent, InputDialogComponent, SessionListComponent, Theme};
use crate::app::state::FilterState;
use crate::app::{AppState, PendingAction};

const KEY_HINTS: &str = "s start • enter switch • a add • r rename • d kill • / filter • ? help • q quit";

pub struct LayoutComponent {
    session_list: SessionListComponent,
    input_dialog: InputDialogComponent,
    help: HelpComponent,
    theme: Theme,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            session_list: SessionListComponent::new(theme),
            input_dialog: InputDialogComponent::new(theme),
            help: HelpComponent::new(),
            theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border));
        let area = outer.inner(frame.size());
        frame.render_widget(outer, frame.size());

        let show_filter = state.filter_state != FilterState::Unfiltered;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),                              // Header
                Constraint::Min(0),                                 // Sessions / input
                Constraint::Length(u16::from(show_filter)),         // Filter line
                Constraint::Length(1),                              // Footer
            ])
            .split(area);

        self.render_header(frame, chunks[0], state);

        if state.interaction.is_awaiting_input() {
            self.input_dialog.render(frame, chunks[1], &state.interaction);
        } else {
            self.session_list.render(frame, chunks[1], state);
        }

        if show_filter {
            let cursor = if state.is_filtering() { "_" } else { "" };
            let filter = Paragraph::new(format!("Filter: {}{}", state.filter_text, cursor))
                .style(self.theme.dim());
            frame.render_widget(filter, chunks[2]);
        }

        self.render_footer(frame, chunks[3], state);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let action = state.interaction.pending_action;
        let icon = match action {
            Some(PendingAction::Add) => "+",
            Some(PendingAction::Rename) => "~",
            Some(PendingAction::Kill) => "x",
            None => " ",
        };
        let active = if state.active_session.is_empty() {
            "no active session"
        } else {
            state.active_session.as_str()
        };

        let left = Line::from(vec![
            Span::styled(icon, Style::default().fg(self.theme.action_color(action))),
            Span::styled(" • ", self.theme.dim()),
            Span::styled(active.to_string(), self.theme.title()),
        ]);
        let right = Line::from(vec![
            Span::styled("muxdeck ", self.theme.title()),
            Span::styled(env!("CARGO_PKG_VERSION"), self.theme.dim()),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(self.theme.dim());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(left), inner);
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), inner);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let footer = match state.current_status() {
            Some(status) => {
                Paragraph::new(status.text.clone()).style(self.theme.status(status.kind))
            }
            None => Paragraph::new(KEY_HINTS).style(self.theme.dim()),
        };
        frame.render_widget(footer, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
