// ABOUTME: Host tmux backend facade
// The core talks to tmux only through the Multiplexer trait defined here

pub mod client;
pub mod error;
pub mod start;

pub use client::TmuxClient;
pub use error::TmuxError;
pub use start::materialize_session;

use crate::config::Layout;
use crate::models::LiveSession;

/// Process-level primitives the session core needs from the multiplexer.
///
/// Every call is synchronous and blocking. Implementations must be shareable
/// across threads because reconciliation queries run on a blocking worker.
pub trait Multiplexer: Send + Sync {
    /// All running sessions with their window counts, in server order.
    fn list_sessions(&self) -> Result<Vec<LiveSession>, TmuxError>;

    /// Name of the session the current client is attached to, empty if none.
    fn active_session_name(&self) -> Result<String, TmuxError>;

    /// Create a detached session. An empty directory leaves the choice to tmux.
    fn create_session(&self, name: &str, directory: &str) -> Result<(), TmuxError>;

    fn kill_session(&self, name: &str) -> Result<(), TmuxError>;

    fn rename_session(&self, old_name: &str, new_name: &str) -> Result<(), TmuxError>;

    /// Make `name` the session the user sees.
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

    /// The server's `pane-base-index` option.
    fn pane_base_index(&self) -> Result<usize, TmuxError>;

    /// The server's `base-index` option, i.e. the index of a session's first window.
    fn window_base_index(&self) -> Result<usize, TmuxError>;
}
