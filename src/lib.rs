// ABOUTME: Library crate for muxdeck exposing the session core for the binary and tests

pub mod app;
pub mod components;
pub mod config;
pub mod models;
pub mod tmux;
