// ABOUTME: Event handling system mapping keyboard input and backend responses to app actions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::app::state::{AppState, FilterState, StatusKind};
use crate::models::SessionSnapshot;
use crate::tmux::{Multiplexer, TmuxError};

#[derive(Debug)]
pub enum AppEvent {
    Quit,
    NextSession,
    PreviousSession,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    RefreshSessions, // Manual refresh of the session view
    // Session actions
    StartSession,
    SwitchSession,
    AddSession,
    RenameSession,
    KillSession,
    // Filter events
    FilterStart,
    FilterInputChar(char),
    FilterBackspace,
    FilterAccept,
    FilterClear,
    // Text input events
    InputChar(char),
    InputBackspace,
    InputDelete,
    InputCursorLeft,
    InputCursorRight,
    InputHome,
    InputEnd,
    InputConfirm,
    InputCancel,
    // Backend response
    SessionsLoaded {
        generation: u64,
        result: Result<SessionSnapshot, TmuxError>,
    },
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &AppState) -> Option<AppEvent> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Some(AppEvent::Quit);
        }

        // Text input owns the keyboard while a name or confirmation is pending
        if state.interaction.is_awaiting_input() {
            return Self::handle_input_keys(key_event);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if state.is_filtering() {
            return Self::handle_filter_keys(key_event);
        }

        match key_event.code {
            KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::NextSession),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::PreviousSession),
            KeyCode::Char('g') | KeyCode::Home => Some(AppEvent::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(AppEvent::GoToBottom),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('f') => Some(AppEvent::RefreshSessions),
            KeyCode::Char('/') => Some(AppEvent::FilterStart),
            KeyCode::Char('s') => Some(AppEvent::StartSession),
            KeyCode::Enter => Some(AppEvent::SwitchSession),
            KeyCode::Char('a') => Some(AppEvent::AddSession),
            KeyCode::Char('r') => Some(AppEvent::RenameSession),
            KeyCode::Char('d') => Some(AppEvent::KillSession),
            KeyCode::Esc if state.filter_state == FilterState::FilterApplied => {
                Some(AppEvent::FilterClear)
            }
            _ => None,
        }
    }

    fn handle_input_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Enter => Some(AppEvent::InputConfirm),
            KeyCode::Esc => Some(AppEvent::InputCancel),
            KeyCode::Backspace => Some(AppEvent::InputBackspace),
            KeyCode::Delete => Some(AppEvent::InputDelete),
            KeyCode::Left => Some(AppEvent::InputCursorLeft),
            KeyCode::Right => Some(AppEvent::InputCursorRight),
            KeyCode::Home => Some(AppEvent::InputHome),
            KeyCode::End => Some(AppEvent::InputEnd),
            KeyCode::Char(ch) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::InputChar(ch))
            }
            _ => None,
        }
    }

    fn handle_filter_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::FilterClear),
            KeyCode::Enter => Some(AppEvent::FilterAccept),
            KeyCode::Backspace => Some(AppEvent::FilterBackspace),
            KeyCode::Down => Some(AppEvent::NextSession),
            KeyCode::Up => Some(AppEvent::PreviousSession),
            KeyCode::Char(ch) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(AppEvent::FilterInputChar(ch))
            }
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState, backend: &dyn Multiplexer) {
        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::RefreshSessions => state.request_refresh(),
            AppEvent::NextSession => state.next_session(),
            AppEvent::PreviousSession => state.previous_session(),
            AppEvent::GoToTop => state.go_to_top(),
            AppEvent::GoToBottom => state.go_to_bottom(),
            AppEvent::StartSession => state.start_selected(backend),
            AppEvent::SwitchSession => state.switch_selected(backend),
            AppEvent::AddSession => state.begin_add(),
            AppEvent::RenameSession => state.begin_rename(),
            AppEvent::KillSession => state.begin_kill(),
            AppEvent::FilterStart => state.start_filter(),
            AppEvent::FilterInputChar(ch) => state.filter_push(ch),
            AppEvent::FilterBackspace => state.filter_pop(),
            AppEvent::FilterAccept => state.accept_filter(),
            AppEvent::FilterClear => state.clear_filter(),
            AppEvent::InputChar(ch) => state.interaction.input.insert(ch),
            AppEvent::InputBackspace => state.interaction.input.backspace(),
            AppEvent::InputDelete => state.interaction.input.delete(),
            AppEvent::InputCursorLeft => state.interaction.input.move_left(),
            AppEvent::InputCursorRight => state.interaction.input.move_right(),
            AppEvent::InputHome => state.interaction.input.home(),
            AppEvent::InputEnd => state.interaction.input.end(),
            AppEvent::InputConfirm => state.confirm_input(backend),
            AppEvent::InputCancel => state.cancel_input(),
            AppEvent::SessionsLoaded { generation, result } => {
                state.refresh_in_flight = false;
                if generation < state.generation {
                    // Listed before a mutation; the refresh queued by that mutation replaces it
                    debug!("Dropping stale session snapshot (generation {})", generation);
                    return;
                }
                match result {
                    Ok(snapshot) => state.apply_snapshot(snapshot),
                    Err(e) => {
                        // Keep the previous view rather than showing a partial one
                        warn!("Failed to refresh sessions: {}", e);
                        state.set_status("could not list sessions", StatusKind::Error);
                    }
                }
            }
        }
    }
}
