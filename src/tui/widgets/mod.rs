//! Reusable TUI widgets.

pub mod button;
pub mod form;
pub mod shell;
pub mod style;

pub use button::{Button, ButtonSize, ButtonVariant};
pub use form::{draw_form, error_line, form_height, input_text, label_text};
pub use shell::{Breadcrumb, breadcrumb_line, draw_shell, panel, quick_links};
pub use style::{StyleLayer, compose};
