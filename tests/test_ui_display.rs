// ABOUTME: Test UI display components including the session list, footer, dialogs and help

mod common;

use common::{browsing_state, declared, select};
use muxdeck::app::state::StatusKind;
use muxdeck::app::{AppState, PendingAction};
use muxdeck::components::LayoutComponent;
use muxdeck::models::SessionView;
use ratatui::{backend::TestBackend, Terminal};

fn render(state: &AppState) -> Vec<String> {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    let mut layout = LayoutComponent::new();

    terminal
        .draw(|frame| {
            layout.render(frame, state);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    let symbols: Vec<String> = buffer
        .content()
        .iter()
        .map(|cell| cell.symbol().to_string())
        .collect();
    symbols.chunks(width).map(|row| row.concat()).collect()
}

fn contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

fn sample_state() -> AppState {
    let mut work = SessionView::declared("Work", 3);
    work.is_running = true;
    work.is_active = true;
    work.spacing_after = false;
    let mut stray = SessionView::live("Stray", 1);
    stray.spacing_after = true;
    browsing_state(
        vec![declared("Work"), declared("Play")],
        vec![work, stray, SessionView::declared("Play", 0)],
        "Work",
    )
}

#[test]
fn test_session_rows_show_window_count_and_name() {
    let rows = render(&sample_state());

    assert!(contains(&rows, "Sessions"));
    assert!(contains(&rows, " 3w "));
    assert!(contains(&rows, "Work  active"));
    assert!(contains(&rows, "Stray"));
    assert!(contains(&rows, " 0w "));
    assert!(contains(&rows, "Play"));
}

#[test]
fn test_blank_line_separates_unstarted_group() {
    let rows = render(&sample_state());

    let stray_row = rows.iter().position(|r| r.contains("Stray")).unwrap();
    let play_row = rows.iter().position(|r| r.contains("Play")).unwrap();
    assert_eq!(play_row, stray_row + 2);
}

#[test]
fn test_header_shows_active_session_and_version() {
    let rows = render(&sample_state());
    assert!(contains(&rows, &format!("muxdeck {}", env!("CARGO_PKG_VERSION"))));

    let empty = render(&AppState::default());
    assert!(contains(&empty, "no active session"));
    assert!(contains(&empty, "No sessions found"));
}

#[test]
fn test_footer_shows_key_hints() {
    let rows = render(&sample_state());

    assert!(contains(&rows, "enter switch"));
    assert!(contains(&rows, "d kill"));
    assert!(contains(&rows, "? help"));
    assert!(contains(&rows, "q quit"));
}

#[test]
fn test_status_message_replaces_key_hints() {
    let mut state = sample_state();
    state.set_status("rename in config file", StatusKind::Error);

    let rows = render(&state);

    assert!(contains(&rows, "rename in config file"));
    assert!(!contains(&rows, "enter switch"));
}

#[test]
fn test_kill_dialog_shows_prompt_and_placeholder() {
    let mut state = sample_state();
    select(&mut state, "Stray");
    state.begin_kill();
    assert_eq!(state.interaction.pending_action, Some(PendingAction::Kill));

    let rows = render(&state);

    assert!(contains(&rows, "kill Stray ?"));
    assert!(contains(&rows, "y/n"));
    assert!(contains(&rows, "esc - cancel"));
}

#[test]
fn test_add_dialog_shows_typed_text() {
    let mut state = sample_state();
    state.begin_add();
    for ch in "scratch".chars() {
        state.interaction.input.insert(ch);
    }

    let rows = render(&state);

    assert!(contains(&rows, "Name new session"));
    assert!(contains(&rows, "scratch"));
    assert!(!contains(&rows, "type"));
}

#[test]
fn test_filter_line_visible_while_filtering() {
    let mut state = sample_state();
    state.start_filter();
    state.filter_push('p');

    let rows = render(&state);

    assert!(contains(&rows, "Filter: p_"));
    assert!(contains(&rows, "Play"));
    assert!(!contains(&rows, "Work  active"));
}

#[test]
fn test_help_overlay_lists_actions() {
    let mut state = sample_state();
    state.help_visible = true;

    let rows = render(&state);

    assert!(contains(&rows, "Help - Press ? or Esc to close"));
    assert!(contains(&rows, "Navigation:"));
    assert!(contains(&rows, "Session Actions:"));
    assert!(contains(&rows, "s          Start session from config"));
    assert!(contains(&rows, "General:"));
}
