//! Form rendering: labels, inputs, inline errors and the submit row.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::button::Button;
use crate::form::{Feedback, FieldKind, FieldSpec, FormStore};
use crate::tui::theme::Palette;

/// Rows taken by one field: bordered input plus its error line.
const FIELD_HEIGHT: u16 = 4;

/// Character shown in place of each password character.
const MASK: char = '•';

/// Label text, with `*` for required fields.
pub fn label_text(field: &FieldSpec) -> String {
    if field.required {
        format!("{} *", field.label)
    } else {
        field.label.to_string()
    }
}

/// What the input shows for `value`; password fields are masked.
pub fn input_text(field: &FieldSpec, value: &str) -> String {
    match field.kind {
        FieldKind::Password => MASK.to_string().repeat(value.chars().count()),
        FieldKind::Text | FieldKind::Email => value.to_string(),
    }
}

/// One inline error line.
pub fn error_line<'a>(message: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(Span::styled(message, Style::default().fg(palette.error)))
}

/// Height needed by [`draw_form`] for `store`.
pub fn form_height(store: &FormStore, feedback: &Feedback<'_>) -> u16 {
    let fields = u16::try_from(store.fields().len()).unwrap_or(u16::MAX);
    let general = u16::try_from(feedback.general_errors.len()).unwrap_or(u16::MAX);
    fields
        .saturating_mul(FIELD_HEIGHT)
        .saturating_add(general)
        .saturating_add(2)
}

/// Renders the fields, general errors and submit row of a form.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(
    store: &FormStore,
    feedback: &Feedback<'_>,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let mut constraints: Vec<Constraint> = store
        .fields()
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.extend(feedback.general_errors.iter().map(|_| Constraint::Length(1)));
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in store.fields().iter().enumerate() {
        let is_focused = i == store.focus();
        let error = feedback.error_for(field.name);

        let border_color = if error.is_some() {
            palette.error
        } else if is_focused {
            palette.focus
        } else {
            palette.border
        };

        let [input_area, error_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(rows[i]);

        let block = Block::default()
            .title(label_text(field))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::styled(
            input_text(field, store.value(field.name)),
            Style::default().fg(palette.text),
        )];
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

        if let Some(message) = error {
            let inset = Rect {
                x: error_area.x + 1,
                width: error_area.width.saturating_sub(1),
                ..error_area
            };
            frame.render_widget(Paragraph::new(error_line(message, palette)), inset);
        }
    }

    let base = store.fields().len();
    for (j, message) in feedback.general_errors.iter().enumerate() {
        frame.render_widget(Paragraph::new(error_line(message, palette)), rows[base + j]);
    }

    let submit_row = rows[base + feedback.general_errors.len() + 1];
    let button = Button::new(feedback.submit.label, *palette).disabled(feedback.submit.disabled);
    let button_width = button.width();
    let [button_area, _gap, ack_area] = Layout::horizontal([
        Constraint::Length(button_width),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(submit_row);
    frame.render_widget(button, button_area);

    if let Some(ack) = feedback.acknowledgment {
        let line = Line::from(Span::styled(
            format!("\u{2714} {ack}"),
            Style::default().fg(palette.success),
        ));
        frame.render_widget(Paragraph::new(line), ack_area);
    }
}
