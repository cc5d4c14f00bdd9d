//! Actions returned by screen event handlers.

use crossterm::event::KeyEvent;

use crate::form::{Request, Ticket};
use crate::model::Appearance;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to dispatch submissions, persist preferences
/// and navigate between screens.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Hand a started submission to the submission channel.
    Submit(Ticket, Request),
    /// Apply and persist a color scheme.
    SetAppearance(Appearance),
    /// Quit the application.
    Quit,
}

/// Common behavior for all screen state types.
pub trait ScreenState {
    /// Process a key event and return an [`Action`] for the `App` to apply.
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
