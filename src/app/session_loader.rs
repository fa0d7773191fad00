// ABOUTME: Session loader that queries the tmux backend and reconciles with config
// A failed query fails the whole load so callers can keep their previous view

use std::sync::Arc;

use tracing::{debug, info};

use super::reconciler::reconcile;
use crate::config::DeclaredSession;
use crate::models::SessionSnapshot;
use crate::tmux::{Multiplexer, TmuxError};

#[derive(Clone)]
pub struct SessionLoader {
    backend: Arc<dyn Multiplexer>,
    declared: Arc<Vec<DeclaredSession>>,
}

impl SessionLoader {
    pub fn new(backend: Arc<dyn Multiplexer>, declared: Arc<Vec<DeclaredSession>>) -> Self {
        Self { backend, declared }
    }

    /// Query live sessions and the active session, then reconcile.
    pub fn load(&self) -> Result<SessionSnapshot, TmuxError> {
        let live = self.backend.list_sessions()?;
        let active_session = self.backend.active_session_name()?;
        debug!(
            "Backend reports {} live sessions, active {:?}",
            live.len(),
            active_session
        );

        let sessions = reconcile(&self.declared, &live, &active_session);
        info!("Reconciled {} sessions", sessions.len());
        Ok(SessionSnapshot {
            sessions,
            active_session,
        })
    }
}
