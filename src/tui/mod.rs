//! TUI: App state, event loop, screens, widgets.

pub mod action;
pub mod app;
pub mod error;
pub mod screens;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{App, Screen};
pub use error::AppError;
