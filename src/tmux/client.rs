// ABOUTME: TmuxClient, the process-backed Multiplexer implementation
// Shells out to the tmux binary for every primitive and classifies its failures

use std::io::ErrorKind;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::{Multiplexer, TmuxError};
use crate::config::Layout;
use crate::models::LiveSession;

const LIST_FORMAT: &str = "#{session_name}\t#{session_windows}";

pub struct TmuxClient {
    program: String,
    inside_tmux: bool,
}

impl TmuxClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            inside_tmux: std::env::var_os("TMUX").is_some(),
        }
    }

    /// Whether this process runs inside a tmux client (`$TMUX` is set).
    pub fn inside_tmux(&self) -> bool {
        self.inside_tmux
    }

    /// Check if tmux is installed on the host
    pub fn check_tmux_installed(&self) -> Result<(), TmuxError> {
        let status = Command::new(&self.program)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|_| TmuxError::TmuxNotInstalled)?;

        if !status.success() {
            return Err(TmuxError::TmuxNotInstalled);
        }
        Ok(())
    }

    /// Attach the controlling terminal to `name`. Blocks until the user detaches.
    pub fn attach(&self, name: &str) -> Result<(), TmuxError> {
        info!("Attaching terminal to session {}", name);
        let target = exact(name);
        let status = Command::new(&self.program)
            .args(["attach-session", "-t", &target])
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(map_spawn_error)?;

        if !status.success() {
            return Err(TmuxError::CommandFailed {
                command: format!("attach-session -t {target}"),
                status: status.to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        debug!("tmux {}", args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(map_spawn_error)?;

        if !output.status.success() {
            return Err(TmuxError::CommandFailed {
                command: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn global_index_option(&self, option: &str) -> Result<usize, TmuxError> {
        let output = self.run(&["show-options", "-g", option])?;
        parse_option_value(&output)
    }
}

impl Multiplexer for TmuxClient {
    fn list_sessions(&self) -> Result<Vec<LiveSession>, TmuxError> {
        match self.run(&["list-sessions", "-F", LIST_FORMAT]) {
            Ok(output) => parse_session_list(&output),
            Err(e) if is_no_server(&e) => {
                debug!("No tmux server running, treating as zero sessions");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn active_session_name(&self) -> Result<String, TmuxError> {
        if !self.inside_tmux {
            return Ok(String::new());
        }
        match self.run(&["display-message", "-p", "#{session_name}"]) {
            Ok(output) => Ok(output.trim().to_string()),
            Err(e) if is_no_server(&e) => Ok(String::new()),
            Err(e) => Err(e),
        }
    }

    fn create_session(&self, name: &str, directory: &str) -> Result<(), TmuxError> {
        let mut args = vec!["new-session", "-d", "-s", name];
        if !directory.is_empty() {
            args.extend(["-c", directory]);
        }
        self.run(&args).map(drop)
    }

    fn kill_session(&self, name: &str) -> Result<(), TmuxError> {
        self.run(&["kill-session", "-t", &exact(name)]).map(drop)
    }

    fn rename_session(&self, old_name: &str, new_name: &str) -> Result<(), TmuxError> {
        self.run(&["rename-session", "-t", &exact(old_name), new_name])
            .map(drop)
    }

    fn switch_to(&self, name: &str) -> Result<(), TmuxError> {
        if !self.inside_tmux {
            // No client to switch; the binary attaches after restoring the terminal.
            debug!("Not inside tmux, deferring attach to {}", name);
            return Ok(());
        }
        self.run(&["switch-client", "-t", &exact(name)]).map(drop)
    }

    fn new_window(&self, session: &str, window: &str, directory: &str) -> Result<(), TmuxError> {
        let target = format!("{}:", exact(session));
        let mut args = vec!["new-window", "-t", target.as_str(), "-n", window];
        if !directory.is_empty() {
            args.extend(["-c", directory]);
        }
        self.run(&args).map(drop)
    }

    fn split_window(&self, session: &str, window: &str, layout: Layout) -> Result<(), TmuxError> {
        let target = window_target(session, window);
        self.run(&["split-window", "-t", &target, layout.split_flag()])
            .map(drop)
    }

    fn send_keys(
        &self,
        session: &str,
        window: &str,
        pane_index: usize,
        keys: &str,
    ) -> Result<(), TmuxError> {
        let target = format!("{}.{pane_index}", window_target(session, window));
        self.run(&["send-keys", "-t", &target, keys, "C-m"]).map(drop)
    }

    fn kill_window(&self, session: &str, window_index: usize) -> Result<(), TmuxError> {
        let target = window_target(session, &window_index.to_string());
        self.run(&["kill-window", "-t", &target]).map(drop)
    }

    fn pane_base_index(&self) -> Result<usize, TmuxError> {
        self.global_index_option("pane-base-index")
    }

    fn window_base_index(&self) -> Result<usize, TmuxError> {
        self.global_index_option("base-index")
    }
}

/// Session targets use tmux's `=` prefix so `dev` never matches `dev-2`.
fn exact(name: &str) -> String {
    format!("={name}")
}

fn window_target(session: &str, window: &str) -> String {
    format!("{}:{window}", exact(session))
}

fn map_spawn_error(e: std::io::Error) -> TmuxError {
    if e.kind() == ErrorKind::NotFound {
        TmuxError::TmuxNotInstalled
    } else {
        TmuxError::IoError(e)
    }
}

fn is_no_server(e: &TmuxError) -> bool {
    match e {
        TmuxError::CommandFailed { stderr, .. } => {
            stderr.contains("no server running")
                || stderr.contains("error connecting to")
                || stderr.contains("no current client")
        }
        _ => false,
    }
}

pub(crate) fn parse_session_list(output: &str) -> Result<Vec<LiveSession>, TmuxError> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (name, windows) = line
                .rsplit_once('\t')
                .ok_or_else(|| TmuxError::InvalidOutput(line.to_string()))?;
            let window_count = windows
                .trim()
                .parse()
                .map_err(|_| TmuxError::InvalidOutput(line.to_string()))?;
            Ok(LiveSession::new(name, window_count))
        })
        .collect()
}

/// Accepts both `show-options -g opt` (`opt 1`) and `-gv` (`1`) shapes.
pub(crate) fn parse_option_value(output: &str) -> Result<usize, TmuxError> {
    output
        .split_whitespace()
        .last()
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| TmuxError::InvalidOutput(output.trim().to_string()))
}
