// ABOUTME: Session reconciliation and the interactive command state machine

mod actions;
pub mod events;
pub mod input;
pub mod reconciler;
pub mod session_loader;
pub mod state;

pub use events::{AppEvent, EventHandler};
pub use reconciler::reconcile;
pub use session_loader::SessionLoader;
pub use state::{App, AppState, InteractionState, Mode, PendingAction};
