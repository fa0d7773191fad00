// ABOUTME: Core data models for muxdeck sessions

pub mod session;

pub use session::{LiveSession, SessionSnapshot, SessionView};
