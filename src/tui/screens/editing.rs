//! Key handling shared by the form pages.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::{FormStore, Request};
use crate::routes::Method;
use crate::tui::action::Action;
use crate::tui::app::Screen;

/// What a form page should do after [`edit_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    /// The store consumed the key.
    Edited,
    /// Enter was pressed.
    Submit,
    /// Esc was pressed.
    Back,
    /// Not an editing key; the page may handle it.
    Unhandled,
}

/// Applies focus movement and text editing to `store`.
///
/// Characters typed with Ctrl or Alt held are left to the page.
pub fn edit_key(store: &mut FormStore, key: KeyEvent) -> FormKey {
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            store.focus_next();
            FormKey::Edited
        }
        KeyCode::BackTab | KeyCode::Up => {
            store.focus_prev();
            FormKey::Edited
        }
        KeyCode::Backspace => {
            store.delete_char();
            FormKey::Edited
        }
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            store.insert_char(ch);
            FormKey::Edited
        }
        KeyCode::Enter => FormKey::Submit,
        KeyCode::Esc => FormKey::Back,
        _ => FormKey::Unhandled,
    }
}

/// Starts a submission of `store` to `endpoint`.
///
/// Returns [`Action::None`] while a previous submission is still in flight.
pub fn submit(store: &mut FormStore, endpoint: &str, method: Method) -> Action {
    match store.begin_submit() {
        Some(submission) => Action::Submit(
            submission.ticket,
            Request::new(endpoint, method, submission.payload),
        ),
        None => Action::None,
    }
}

/// Shared dispatch for a single-form page.
pub fn form_page_key(store: &mut FormStore, endpoint: &str, method: Method, key: KeyEvent) -> Action {
    match edit_key(store, key) {
        FormKey::Edited | FormKey::Unhandled => Action::None,
        FormKey::Submit => submit(store, endpoint, method),
        FormKey::Back => Action::Navigate(Screen::Dashboard),
    }
}
