// ABOUTME: Session lifecycle operations driven by the interaction state machine
// Backend calls are synchronous; the refreshed world arrives via the next reconciliation

use std::sync::Arc;

use tracing::{error, info, warn};

use super::state::{AppState, Mode, PendingAction, StatusKind};
use crate::tmux::{materialize_session, Multiplexer};

impl AppState {
    /// Materialize the selected declared session and hand the terminal to it.
    pub fn start_selected(&mut self, backend: &dyn Multiplexer) {
        let Some(name) = self.selected_session().map(|s| s.name.clone()) else {
            return;
        };
        let declared = Arc::clone(&self.declared);
        let Some(session) = declared.iter().find(|s| s.name == name) else {
            warn!("Refusing to start {}: not declared in config", name);
            self.set_status("not in config file", StatusKind::Error);
            return;
        };

        self.mark_mutation();
        match materialize_session(backend, session) {
            Ok(()) => {
                info!("Started session {}", name);
                self.hand_off(backend, &name);
            }
            Err(e) => {
                error!("Error starting session {}: {}", name, e);
                self.set_status(format!("could not start {name}"), StatusKind::Error);
                self.request_refresh();
            }
        }
    }

    /// Switch to the selected session if it is running and not already active.
    pub fn switch_selected(&mut self, backend: &dyn Multiplexer) {
        let Some(selected) = self.selected_session() else {
            return;
        };
        if selected.name == self.active_session || !selected.is_running {
            self.set_status("active or not running", StatusKind::Error);
            return;
        }
        let name = selected.name.clone();
        self.hand_off(backend, &name);
    }

    pub fn begin_add(&mut self) {
        self.interaction
            .begin(PendingAction::Add, "Name new session".to_string(), None);
    }

    pub fn begin_rename(&mut self) {
        let Some(selected) = self.selected_session() else {
            return;
        };
        if selected.is_from_config {
            self.set_status("rename in config file", StatusKind::Error);
            return;
        }
        let name = selected.name.clone();
        self.interaction
            .begin(PendingAction::Rename, format!("Rename {name}"), Some(name));
    }

    pub fn begin_kill(&mut self) {
        let Some(selected) = self.selected_session() else {
            return;
        };
        if !selected.is_running {
            self.set_status("not running", StatusKind::Error);
            return;
        }
        let name = selected.name.clone();
        self.interaction
            .begin(PendingAction::Kill, format!("kill {name} ?"), Some(name));
    }

    /// Leave `AwaitingInput` without touching the backend.
    pub fn cancel_input(&mut self) {
        self.interaction.reset();
    }

    /// Run the pending action with the typed buffer.
    pub fn confirm_input(&mut self, backend: &dyn Multiplexer) {
        if self.interaction.mode != Mode::AwaitingInput {
            return;
        }
        let buffer = self.interaction.input.value().to_string();
        let target = self.interaction.selected_session_name.clone();
        let action = self.interaction.pending_action;
        self.interaction.reset();

        match (action, target) {
            (Some(PendingAction::Add), _) => self.confirm_add(backend, buffer.trim()),
            (Some(PendingAction::Kill), Some(target)) => {
                self.confirm_kill(backend, &target, &buffer);
                self.request_refresh();
            }
            (Some(PendingAction::Rename), Some(target)) => {
                self.confirm_rename(backend, &target, buffer.trim());
                self.request_refresh();
            }
            _ => {}
        }
    }

    fn confirm_add(&mut self, backend: &dyn Multiplexer, name: &str) {
        if name.is_empty() || name == self.active_session {
            return;
        }
        self.mark_mutation();
        match backend.create_session(name, "") {
            Ok(()) => {
                info!("Created session {}", name);
                self.hand_off(backend, name);
            }
            Err(e) => {
                error!("Error creating session {}: {}", name, e);
                self.set_status(format!("could not create {name}"), StatusKind::Error);
                self.request_refresh();
            }
        }
    }

    fn confirm_kill(&mut self, backend: &dyn Multiplexer, target: &str, answer: &str) {
        if answer != "y" {
            return;
        }
        self.mark_mutation();
        match backend.kill_session(target) {
            Ok(()) => {
                info!("Killed session {}", target);
                if self.find_session(target).is_some_and(|s| !s.is_from_config) {
                    self.remove_session(target);
                }
                self.set_status(format!("killed {target}"), StatusKind::Info);
            }
            Err(e) => {
                error!("Error killing session {}: {}", target, e);
                self.set_status(format!("could not kill {target}"), StatusKind::Error);
            }
        }
    }

    fn confirm_rename(&mut self, backend: &dyn Multiplexer, target: &str, new_name: &str) {
        if new_name.is_empty() || new_name == target {
            return;
        }
        if self.find_session(new_name).is_some() {
            warn!("Refusing to rename {} to {}: name taken", target, new_name);
            self.set_status(format!("{new_name} already exists"), StatusKind::Error);
            return;
        }
        self.mark_mutation();
        match backend.rename_session(target, new_name) {
            Ok(()) => {
                info!("Renamed session {} to {}", target, new_name);
                if let Some(view) = self.sessions.iter_mut().find(|s| s.name == target) {
                    view.name = new_name.to_string();
                }
                self.set_status(format!("renamed {target} to {new_name}"), StatusKind::Info);
            }
            Err(e) => {
                error!("Error renaming session {} to {}: {}", target, new_name, e);
                self.set_status(format!("could not rename {target}"), StatusKind::Error);
            }
        }
    }

    /// Point the multiplexer at `name` and end the loop, or stay put on failure.
    fn hand_off(&mut self, backend: &dyn Multiplexer, name: &str) {
        match backend.switch_to(name) {
            Ok(()) => {
                self.handoff_session = Some(name.to_string());
                self.quit();
            }
            Err(e) => {
                error!("Error switching to session {}: {}", name, e);
                self.set_status(format!("could not switch to {name}"), StatusKind::Error);
                self.request_refresh();
            }
        }
    }
}
