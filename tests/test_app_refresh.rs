// ABOUTME: Tests for the async reconciliation loop driving the App's session view

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{backend_failure, declared, live, MockMux};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use muxdeck::app::App;
use muxdeck::config::AppConfig;
use muxdeck::models::LiveSession;

fn config_with(names: &[&str]) -> AppConfig {
    AppConfig {
        sessions: names.iter().map(|name| declared(name)).collect(),
        ..Default::default()
    }
}

fn names(app: &App) -> Vec<String> {
    app.state.sessions.iter().map(|s| s.name.clone()).collect()
}

async fn wait_for_refresh(app: &mut App) {
    for _ in 0..100 {
        app.tick();
        if !app.state.refresh_in_flight {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("refresh never completed");
}

#[tokio::test]
async fn test_init_loads_reconciled_view() {
    let mut mux = MockMux::new();
    mux.expect_list_sessions()
        .times(1)
        .returning(|| Ok(vec![live("Work", 2), live("scratch", 1)]));
    mux.expect_active_session_name()
        .times(1)
        .returning(|| Ok("Work".to_string()));

    let mut app = App::new(&config_with(&["Work", "Play"]), Arc::new(mux));
    app.init().await;

    assert_eq!(names(&app), vec!["Work", "scratch", "Play"]);
    assert_eq!(app.state.active_session, "Work");
    assert_eq!(app.state.selected_session().unwrap().name, "Work");
    assert!(!app.state.refresh_in_flight);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_view() {
    let mut calls = 0;
    let mut mux = MockMux::new();
    mux.expect_list_sessions().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![live("scratch", 1)])
        } else {
            Err(backend_failure("list-sessions"))
        }
    });
    mux.expect_active_session_name()
        .times(1)
        .returning(|| Ok(String::new()));

    let mut app = App::new(&config_with(&["Play"]), Arc::new(mux));
    app.init().await;
    let before = app.state.sessions.clone();

    app.refresh_now().await;

    assert_eq!(app.state.sessions, before);
    assert_eq!(
        app.state.current_status().map(|s| s.text.as_str()),
        Some("could not list sessions")
    );
}

#[tokio::test]
async fn test_refresh_key_picks_up_new_sessions() {
    let mut calls = 0;
    let mut mux = MockMux::new();
    mux.expect_list_sessions().times(2).returning(move || {
        calls += 1;
        let mut sessions: Vec<LiveSession> = vec![live("one", 1)];
        if calls > 1 {
            sessions.push(live("two", 4));
        }
        Ok(sessions)
    });
    mux.expect_active_session_name()
        .times(2)
        .returning(|| Ok("one".to_string()));

    let mut app = App::new(&AppConfig::default(), Arc::new(mux));
    app.init().await;
    assert_eq!(names(&app), vec!["one"]);

    app.handle_key_event(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE));
    assert!(app.state.refresh_in_flight);
    wait_for_refresh(&mut app).await;

    assert_eq!(names(&app), vec!["one", "two"]);
    assert_eq!(app.state.sessions[1].window_count, 4);
}

#[tokio::test]
async fn test_kill_from_app_triggers_reconciliation() {
    let mut calls = 0;
    let mut mux = MockMux::new();
    mux.expect_list_sessions().times(2).returning(move || {
        calls += 1;
        if calls == 1 {
            Ok(vec![live("keep", 1), live("doomed", 1)])
        } else {
            Ok(vec![live("keep", 1)])
        }
    });
    mux.expect_active_session_name()
        .times(2)
        .returning(|| Ok("keep".to_string()));
    mux.expect_kill_session()
        .withf(|name: &str| name == "doomed")
        .times(1)
        .returning(|_| Ok(()));

    let mut app = App::new(&AppConfig::default(), Arc::new(mux));
    app.init().await;

    for code in [
        KeyCode::Char('j'),
        KeyCode::Char('d'),
        KeyCode::Char('y'),
        KeyCode::Enter,
    ] {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }
    assert_eq!(names(&app), vec!["keep"]);

    wait_for_refresh(&mut app).await;
    assert_eq!(names(&app), vec!["keep"]);
    assert_eq!(app.state.selected_session().unwrap().name, "keep");
}

#[tokio::test]
async fn test_snapshot_listed_before_kill_is_discarded() {
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    let mut calls = 0;
    let mut mux = MockMux::new();
    mux.expect_list_sessions().times(3).returning(move || {
        calls += 1;
        match calls {
            1 => Ok(vec![live("keep", 1), live("doomed", 1)]),
            // Held until the kill below has gone through
            2 => {
                let _ = release_rx.recv();
                Ok(vec![live("keep", 1), live("doomed", 1)])
            }
            _ => Ok(vec![live("keep", 1)]),
        }
    });
    mux.expect_active_session_name()
        .returning(|| Ok("keep".to_string()));
    mux.expect_kill_session()
        .withf(|name: &str| name == "doomed")
        .times(1)
        .returning(|_| Ok(()));

    let mut app = App::new(&AppConfig::default(), Arc::new(mux));
    app.init().await;

    app.handle_key_event(KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE));
    assert!(app.state.refresh_in_flight);

    for code in [
        KeyCode::Char('j'),
        KeyCode::Char('d'),
        KeyCode::Char('y'),
        KeyCode::Enter,
    ] {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }
    assert_eq!(names(&app), vec!["keep"]);

    release_tx.send(()).unwrap();
    for _ in 0..100 {
        app.tick();
        assert_eq!(names(&app), vec!["keep"]);
        if !app.state.refresh_in_flight && app.state.pending_async_action.is_none() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(!app.state.refresh_in_flight);
    assert_eq!(names(&app), vec!["keep"]);
}
