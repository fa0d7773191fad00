// ABOUTME: Session data models shared by the reconciler, state machine and renderer
// SessionView is the merged per-render record for one session name

/// A session the backend reports as running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveSession {
    pub name: String,
    pub window_count: usize,
}

impl LiveSession {
    pub fn new(name: impl Into<String>, window_count: usize) -> Self {
        Self {
            name: name.into(),
            window_count,
        }
    }
}

/// One row of the session list, rebuilt from scratch on every reconciliation.
///
/// A view that is not from the config file is always running: it only exists
/// because the backend reported it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub name: String,
    pub window_count: usize,
    pub is_from_config: bool,
    pub is_running: bool,
    pub is_active: bool,
    /// Render hint: last row before the not-yet-started group.
    pub spacing_after: bool,
}

impl SessionView {
    pub fn declared(name: impl Into<String>, window_count: usize) -> Self {
        Self {
            name: name.into(),
            window_count,
            is_from_config: true,
            is_running: false,
            is_active: false,
            spacing_after: false,
        }
    }

    pub fn live(name: impl Into<String>, window_count: usize) -> Self {
        Self {
            name: name.into(),
            window_count,
            is_from_config: false,
            is_running: true,
            is_active: false,
            spacing_after: false,
        }
    }

    pub fn status_indicator(&self) -> &'static str {
        match (self.is_running, self.is_from_config) {
            (false, _) => "○",
            (true, true) => "◆",
            (true, false) => "●",
        }
    }
}

/// Result of one reconciliation pass, delivered back to the event loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub sessions: Vec<SessionView>,
    pub active_session: String,
}
