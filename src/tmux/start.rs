// ABOUTME: Materializes a declared session's window/pane tree into real tmux state
// Runs in phases: session, windows, splits, pane commands, default window removal

use tracing::{debug, info};

use super::{Multiplexer, TmuxError};
use crate::config::{expand_home, DeclaredSession};

/// Build `session` on the backend.
///
/// Creates the session, every declared window, splits each window into its
/// declared pane count, sends each pane its command (prefixed with a `cd`
/// into the resolved directory) and finally kills the window tmux created
/// implicitly with the session. Pane addresses are offset by the server's
/// `pane-base-index`, the implicit window is found at `base-index`.
pub fn materialize_session<M: Multiplexer + ?Sized>(
    mux: &M,
    session: &DeclaredSession,
) -> Result<(), TmuxError> {
    info!(
        "Starting session {} with {} windows",
        session.name,
        session.windows.len()
    );
    let session_dir = expand_home(&session.directory);
    mux.create_session(&session.name, &session_dir)?;

    let pane_base = mux.pane_base_index()?;
    let window_base = mux.window_base_index()?;

    for window in &session.windows {
        let window_dir = window.resolved_directory(&session_dir);
        mux.new_window(&session.name, &window.name, &window_dir)?;
    }

    for window in &session.windows {
        for _ in 1..window.panes.len() {
            mux.split_window(&session.name, &window.name, window.layout)?;
        }
    }

    for window in &session.windows {
        let window_dir = window.resolved_directory(&session_dir);
        for (offset, pane) in window.panes.iter().enumerate() {
            let pane_dir = pane.resolved_directory(&window_dir);
            let keys = pane_keys(&pane_dir, &pane.command);
            debug!("{}:{} pane {} <- {}", session.name, window.name, offset, keys);
            mux.send_keys(&session.name, &window.name, pane_base + offset, &keys)?;
        }
    }

    // Killing the only window would kill the session.
    if !session.windows.is_empty() {
        mux.kill_window(&session.name, window_base)?;
    }

    Ok(())
}

fn pane_keys(directory: &str, command: &str) -> String {
    let mut keys = String::new();
    if !directory.is_empty() {
        keys.push_str("cd ");
        keys.push_str(&shell_quote(directory));
        keys.push_str(" && ");
    }
    keys.push_str("clear");
    if !command.trim().is_empty() {
        keys.push_str(" && ");
        keys.push_str(command);
    }
    keys
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
