//! Terminal front end: reads line commands, drives the core state machine
//! and prints the view whenever it changes.
mod app;
mod commands;
mod effects;
mod render;

pub use app::{run_app, AppConfig};
