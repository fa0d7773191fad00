// ABOUTME: UI components for the TUI interface including session list, input dialog, and help

pub mod help;
pub mod input_dialog;
pub mod layout;
pub mod session_list;
pub mod theme;

pub use help::HelpComponent;
pub use input_dialog::InputDialogComponent;
pub use layout::LayoutComponent;
pub use session_list::SessionListComponent;
pub use theme::Theme;
