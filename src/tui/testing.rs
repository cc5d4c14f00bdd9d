//! Helpers shared by the TUI tests.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::buffer::Buffer;

pub fn press(code: KeyCode) -> KeyEvent {
    with_modifiers(code, KeyModifiers::NONE)
}

pub fn alt(ch: char) -> KeyEvent {
    with_modifiers(KeyCode::Char(ch), KeyModifiers::ALT)
}

pub fn ctrl(ch: char) -> KeyEvent {
    with_modifiers(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

pub fn release(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    }
}

fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Types `text` one key at a time.
pub fn type_str(handler: &mut impl FnMut(KeyEvent), text: &str) {
    for ch in text.chars() {
        handler(press(KeyCode::Char(ch)));
    }
}

pub fn buffer_to_string(buf: &Buffer) -> String {
    let mut s = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
        }
        s.push('\n');
    }
    s
}
