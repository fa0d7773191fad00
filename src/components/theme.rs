// ABOUTME: Colors and styles handed to the render components each frame

use ratatui::style::{Color, Modifier, Style};

use crate::app::PendingAction;
use crate::app::state::StatusKind;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub subtle: Color,
    pub selected: Color,
    pub active: Color,
    pub border: Color,
    pub info: Color,
    pub error: Color,
    pub add: Color,
    pub rename: Color,
    pub kill: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(0xEE, 0xEE, 0xEE),
            subtle: Color::Rgb(0x72, 0x72, 0x6F),
            selected: Color::Rgb(0x7F, 0xD1, 0xAE),
            active: Color::Rgb(0xF2, 0xCC, 0x4A),
            border: Color::Rgb(0x5A, 0x5A, 0x5A),
            info: Color::Rgb(0x04, 0xB5, 0x75),
            error: Color::Red,
            add: Color::Rgb(0x37, 0xA1, 0xC5),
            rename: Color::Rgb(0xBA, 0xC5, 0x37),
            kill: Color::Rgb(0xC5, 0x37, 0x70),
        }
    }
}

impl Theme {
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.subtle)
    }

    pub fn action_color(&self, action: Option<PendingAction>) -> Color {
        match action {
            Some(PendingAction::Add) => self.add,
            Some(PendingAction::Rename) => self.rename,
            Some(PendingAction::Kill) => self.kill,
            None => self.text,
        }
    }

    pub fn status(&self, kind: StatusKind) -> Style {
        match kind {
            StatusKind::Info => Style::default().fg(self.info),
            StatusKind::Error => Style::default().fg(self.error),
        }
    }
}
