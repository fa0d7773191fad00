// ABOUTME: Error types for the tmux backend facade
// Every backend call either succeeds or fails with one of these

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("Tmux not installed on host")]
    TmuxNotInstalled,

    #[error("`tmux {command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected tmux output: {0}")]
    InvalidOutput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
