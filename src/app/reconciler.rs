// ABOUTME: Merges declared sessions with live sessions into one ordered view
// Order is active first, then other running sessions, then unstarted declared ones

use std::collections::HashMap;

use crate::config::DeclaredSession;
use crate::models::{LiveSession, SessionView};

/// Build the ordered session list from config and backend state.
///
/// Names are matched by exact equality and each name yields at most one view.
/// Within each ordering group the input order is kept: declared sessions in
/// config order, then live-only sessions in backend order. An empty
/// `active_name` means there is no active session.
pub fn reconcile(
    declared: &[DeclaredSession],
    live: &[LiveSession],
    active_name: &str,
) -> Vec<SessionView> {
    let mut views: Vec<SessionView> = Vec::with_capacity(declared.len() + live.len());
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for session in declared {
        if by_name.contains_key(session.name.as_str()) {
            continue;
        }
        by_name.insert(&session.name, views.len());
        views.push(SessionView::declared(&session.name, session.windows.len()));
    }

    for session in live {
        match by_name.get(session.name.as_str()) {
            Some(&idx) => {
                let view = &mut views[idx];
                view.is_running = true;
                view.window_count = session.window_count;
            }
            None => {
                by_name.insert(&session.name, views.len());
                views.push(SessionView::live(&session.name, session.window_count));
            }
        }
    }

    order_sessions(views, active_name)
}

/// Partition into active / running / unstarted and mark the group boundary.
pub fn order_sessions(views: Vec<SessionView>, active_name: &str) -> Vec<SessionView> {
    let mut active = Vec::new();
    let mut running = Vec::new();
    let mut unstarted = Vec::new();

    for mut view in views {
        view.is_active = !active_name.is_empty() && view.name == active_name;
        view.spacing_after = false;
        if view.is_active {
            active.push(view);
        } else if view.is_running {
            running.push(view);
        } else {
            unstarted.push(view);
        }
    }

    let unstarted_len = unstarted.len();
    let mut ordered = active;
    ordered.append(&mut running);
    ordered.append(&mut unstarted);

    if unstarted_len > 0 && unstarted_len < ordered.len() {
        let boundary = ordered.len() - unstarted_len - 1;
        ordered[boundary].spacing_after = true;
    }

    ordered
}

/// Index of the first not-yet-started session, if any.
pub fn first_unstarted(views: &[SessionView]) -> Option<usize> {
    views.iter().position(|v| !v.is_running)
}
