// ABOUTME: Session list component rendering the reconciled, ordered session view

use ratatui::{
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use super::Theme;
use crate::app::AppState;
use crate::models::SessionView;

pub struct SessionListComponent {
    list_state: ListState,
    theme: Theme,
}

impl SessionListComponent {
    pub fn new(theme: Theme) -> Self {
        Self {
            list_state: ListState::default(),
            theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        self.list_state.select(state.selected_index);

        let visible = state.visible_sessions();
        let items: Vec<ListItem> = if visible.is_empty() {
            vec![ListItem::new("No sessions found").style(self.theme.dim())]
        } else {
            visible.iter().map(|s| self.build_item(s)).collect()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .title("Sessions")
                    .borders(Borders::NONE)
                    .title_style(self.theme.title()),
            )
            .highlight_style(
                Style::default()
                    .fg(self.theme.selected)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn build_item(&self, session: &SessionView) -> ListItem<'static> {
        let name_style = if session.is_active {
            Style::default()
                .fg(self.theme.active)
                .add_modifier(Modifier::BOLD)
        } else if session.is_running {
            Style::default().fg(self.theme.text)
        } else {
            self.theme.dim()
        };

        let mut spans = vec![
            Span::styled(format!("{:>2}w ", session.window_count), self.theme.dim()),
            Span::raw(format!("{} ", session.status_indicator())),
            Span::styled(session.name.clone(), name_style),
        ];
        if session.is_active {
            spans.push(Span::styled("  active", self.theme.dim()));
        }

        let mut lines = vec![Line::from(spans)];
        // Separates started sessions from config sessions not yet started
        if session.spacing_after {
            lines.push(Line::from(""));
        }
        ListItem::new(lines)
    }
}
