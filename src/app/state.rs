// ABOUTME: Application state, interaction modes and the App event loop driver
// All mutation happens on the loop; reconciliation results arrive as events

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use super::events::{AppEvent, EventHandler};
use super::input::TextInput;
use super::SessionLoader;
use crate::config::{AppConfig, DeclaredSession};
use crate::models::{SessionSnapshot, SessionView};
use crate::tmux::{Multiplexer, TmuxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    AwaitingInput,
}

/// Actions that need text from the user before they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Add,
    Rename,
    Kill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    pub mode: Mode,
    pub pending_action: Option<PendingAction>,
    pub input: TextInput,
    /// Session the pending action applies to, captured when it began.
    pub selected_session_name: Option<String>,
    pub prompt: String,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: Mode::Browsing,
            pending_action: None,
            input: TextInput::new(),
            selected_session_name: None,
            prompt: String::new(),
        }
    }
}

impl InteractionState {
    pub fn begin(&mut self, action: PendingAction, prompt: String, target: Option<String>) {
        self.mode = Mode::AwaitingInput;
        self.pending_action = Some(action);
        self.input.reset();
        self.selected_session_name = target;
        self.prompt = prompt;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.mode == Mode::AwaitingInput
    }

    pub fn placeholder(&self) -> &'static str {
        match self.pending_action {
            Some(PendingAction::Kill) => "y/n",
            _ => "type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// The user is typing the filter; action keys are suppressed.
    Filtering,
    FilterApplied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub created_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction {
    RefreshSessions,
}

#[derive(Debug)]
pub struct AppState {
    pub declared: Arc<Vec<DeclaredSession>>,
    pub sessions: Vec<SessionView>,
    pub active_session: String,
    /// Index into `visible_sessions()`.
    pub selected_index: Option<usize>,
    pub interaction: InteractionState,
    pub filter_state: FilterState,
    pub filter_text: String,
    pub status_message: Option<StatusMessage>,
    pub status_lifetime: Duration,
    pub help_visible: bool,
    pub should_quit: bool,
    /// Session the user should land in once the loop exits.
    pub handoff_session: Option<String>,
    pub pending_async_action: Option<AsyncAction>,
    pub refresh_in_flight: bool,
    /// Bumped before every mutating backend call; snapshots dispatched
    /// under an older generation are stale.
    pub generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AppState {
    pub fn new(declared: Vec<DeclaredSession>) -> Self {
        Self {
            declared: Arc::new(declared),
            sessions: Vec::new(),
            active_session: String::new(),
            selected_index: None,
            interaction: InteractionState::default(),
            filter_state: FilterState::Unfiltered,
            filter_text: String::new(),
            status_message: None,
            status_lifetime: Duration::from_secs(2),
            help_visible: false,
            should_quit: false,
            handoff_session: None,
            pending_async_action: None,
            refresh_in_flight: false,
            generation: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let mut state = Self::new(config.sessions.clone());
        state.status_lifetime = Duration::from_secs(config.status_message_secs);
        state
    }

    pub fn mode(&self) -> Mode {
        self.interaction.mode
    }

    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    /// Sessions after the name filter, in display order.
    pub fn visible_sessions(&self) -> Vec<&SessionView> {
        if self.filter_state == FilterState::Unfiltered || self.filter_text.is_empty() {
            return self.sessions.iter().collect();
        }
        let needle = self.filter_text.to_lowercase();
        self.sessions
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn selected_session(&self) -> Option<&SessionView> {
        let idx = self.selected_index?;
        self.visible_sessions().get(idx).copied()
    }

    pub fn find_session(&self, name: &str) -> Option<&SessionView> {
        self.sessions.iter().find(|s| s.name == name)
    }

    /// Replace the view with a fresh reconciliation, keeping the selection on
    /// the same session name when it still exists.
    pub fn apply_snapshot(&mut self, snapshot: SessionSnapshot) {
        let selected_name = self.selected_session().map(|s| s.name.clone());
        self.sessions = snapshot.sessions;
        self.active_session = snapshot.active_session;
        self.reselect(selected_name.as_deref());
    }

    pub(crate) fn reselect(&mut self, name: Option<&str>) {
        let visible = self.visible_sessions();
        if visible.is_empty() {
            self.selected_index = None;
            return;
        }
        let by_name = name.and_then(|n| visible.iter().position(|s| s.name == n));
        let len = visible.len();
        self.selected_index = Some(match (by_name, self.selected_index) {
            (Some(idx), _) => idx,
            (None, Some(idx)) => idx.min(len - 1),
            (None, None) => 0,
        });
    }

    /// Drop a view locally, ahead of the next reconciliation.
    pub fn remove_session(&mut self, name: &str) {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.name != name);
        if self.sessions.len() != before {
            debug!("Removed {} from the session view", name);
            self.reselect(None);
        }
    }

    pub fn next_session(&mut self) {
        let len = self.visible_sessions().len();
        if len > 0 {
            let current = self.selected_index.unwrap_or(0);
            self.selected_index = Some((current + 1) % len);
        }
    }

    pub fn previous_session(&mut self) {
        let len = self.visible_sessions().len();
        if len > 0 {
            let current = self.selected_index.unwrap_or(0);
            self.selected_index = Some(if current == 0 { len - 1 } else { current - 1 });
        }
    }

    pub fn go_to_top(&mut self) {
        if !self.visible_sessions().is_empty() {
            self.selected_index = Some(0);
        }
    }

    pub fn go_to_bottom(&mut self) {
        let len = self.visible_sessions().len();
        if len > 0 {
            self.selected_index = Some(len - 1);
        }
    }

    pub fn start_filter(&mut self) {
        self.filter_state = FilterState::Filtering;
        self.filter_text.clear();
        self.reselect(None);
    }

    pub fn filter_push(&mut self, ch: char) {
        self.filter_text.push(ch);
        self.selected_index = Some(0);
        self.reselect(None);
    }

    pub fn filter_pop(&mut self) {
        self.filter_text.pop();
        self.reselect(None);
    }

    pub fn accept_filter(&mut self) {
        self.filter_state = if self.filter_text.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::FilterApplied
        };
    }

    pub fn clear_filter(&mut self) {
        let selected_name = self.selected_session().map(|s| s.name.clone());
        self.filter_state = FilterState::Unfiltered;
        self.filter_text.clear();
        self.reselect(selected_name.as_deref());
    }

    pub fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        });
    }

    /// The status message, unless it has outlived `status_lifetime`.
    pub fn current_status(&self) -> Option<&StatusMessage> {
        self.status_message
            .as_ref()
            .filter(|m| m.created_at.elapsed() < self.status_lifetime)
    }

    pub fn clear_expired_status(&mut self) {
        if self.status_message.is_some() && self.current_status().is_none() {
            self.status_message = None;
        }
    }

    pub(crate) fn mark_mutation(&mut self) {
        self.generation += 1;
    }

    pub fn request_refresh(&mut self) {
        self.pending_async_action = Some(AsyncAction::RefreshSessions);
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

pub struct App {
    pub state: AppState,
    backend: Arc<dyn Multiplexer>,
    loader: SessionLoader,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: &AppConfig, backend: Arc<dyn Multiplexer>) -> Self {
        let state = AppState::from_config(config);
        let loader = SessionLoader::new(Arc::clone(&backend), Arc::clone(&state.declared));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state,
            backend,
            loader,
            events_tx,
            events_rx,
        }
    }

    /// Load the first view before the loop starts drawing.
    pub async fn init(&mut self) {
        self.refresh_now().await;
    }

    /// Dispatch a reconciliation and wait for its result to be applied.
    pub async fn refresh_now(&mut self) {
        self.state.request_refresh();
        self.dispatch_pending();
        if let Some(event) = self.events_rx.recv().await {
            self.process(event);
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if let Some(event) = EventHandler::handle_key_event(key_event, &self.state) {
            self.process(event);
            self.dispatch_pending();
        }
    }

    pub fn tick(&mut self) {
        self.state.clear_expired_status();
        while let Ok(event) = self.events_rx.try_recv() {
            self.process(event);
        }
        self.dispatch_pending();
    }

    fn process(&mut self, event: AppEvent) {
        EventHandler::process_event(event, &mut self.state, self.backend.as_ref());
    }

    /// Start the queued refresh unless one is already running.
    fn dispatch_pending(&mut self) {
        if self.state.refresh_in_flight {
            return;
        }
        let Some(AsyncAction::RefreshSessions) = self.state.pending_async_action.take() else {
            return;
        };

        self.state.refresh_in_flight = true;
        let generation = self.state.generation;
        let loader = self.loader.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match tokio::task::spawn_blocking(move || loader.load()).await {
                Ok(result) => result,
                Err(e) => {
                    error!("Session refresh worker failed: {}", e);
                    Err(TmuxError::IoError(std::io::Error::other(e.to_string())))
                }
            };
            if tx.send(AppEvent::SessionsLoaded { generation, result }).is_err() {
                warn!("Event loop gone before session refresh completed");
            }
        });
    }
}
