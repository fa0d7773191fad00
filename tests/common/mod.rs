// ABOUTME: Shared fixtures for integration tests: a mockall backend and session builders
#![allow(dead_code)]

use mockall::mock;
use muxdeck::app::AppState;
use muxdeck::config::{DeclaredPane, DeclaredSession, DeclaredWindow, Layout};
use muxdeck::models::{LiveSession, SessionSnapshot, SessionView};
use muxdeck::tmux::{Multiplexer, TmuxError};

mock! {
    pub Mux {}

    impl Multiplexer for Mux {
        fn list_sessions(&self) -> Result<Vec<LiveSession>, TmuxError>;
        fn active_session_name(&self) -> Result<String, TmuxError>;
        fn create_session(&self, name: &str, directory: &str) -> Result<(), TmuxError>;
        fn kill_session(&self, name: &str) -> Result<(), TmuxError>;
        fn rename_session(&self, old_name: &str, new_name: &str) -> Result<(), TmuxError>;
        fn switch_to(&self, name: &str) -> Result<(), TmuxError>;
        fn new_window(&self, session: &str, window: &str, directory: &str) -> Result<(), TmuxError>;
        fn split_window(&self, session: &str, window: &str, layout: Layout) -> Result<(), TmuxError>;
        fn send_keys(
            &self,
            session: &str,
            window: &str,
            pane_index: usize,
            keys: &str,
        ) -> Result<(), TmuxError>;
        fn kill_window(&self, session: &str, window_index: usize) -> Result<(), TmuxError>;
        fn pane_base_index(&self) -> Result<usize, TmuxError>;
        fn window_base_index(&self) -> Result<usize, TmuxError>;
    }
}

pub fn backend_failure(command: &str) -> TmuxError {
    TmuxError::CommandFailed {
        command: command.to_string(),
        status: "exit status: 1".to_string(),
        stderr: "boom".to_string(),
    }
}

pub fn declared(name: &str) -> DeclaredSession {
    DeclaredSession {
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn declared_with_windows(name: &str, directory: &str, windows: Vec<DeclaredWindow>) -> DeclaredSession {
    DeclaredSession {
        name: name.to_string(),
        directory: directory.to_string(),
        windows,
    }
}

pub fn window(name: &str, commands: &[&str]) -> DeclaredWindow {
    DeclaredWindow {
        name: name.to_string(),
        panes: commands
            .iter()
            .map(|command| DeclaredPane {
                command: (*command).to_string(),
                directory: None,
            })
            .collect(),
        ..Default::default()
    }
}

pub fn live(name: &str, window_count: usize) -> LiveSession {
    LiveSession::new(name, window_count)
}

/// State as it looks right after a reconciliation of `sessions`.
pub fn browsing_state(
    declared: Vec<DeclaredSession>,
    sessions: Vec<SessionView>,
    active: &str,
) -> AppState {
    let mut state = AppState::new(declared);
    state.apply_snapshot(SessionSnapshot {
        sessions,
        active_session: active.to_string(),
    });
    state
}

/// Move the selection onto `name`.
pub fn select(state: &mut AppState, name: &str) {
    let idx = state
        .visible_sessions()
        .iter()
        .position(|s| s.name == name)
        .unwrap_or_else(|| panic!("{name} not in view"));
    state.selected_index = Some(idx);
}
