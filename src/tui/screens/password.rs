//! Password settings: current/new/confirmation form and security tips.

use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::editing::form_page_key;
use crate::form::{
    Applied, Completion, FieldKind, FieldSpec, FormStore, RecoveryPolicy, SubmitCopy, Ticket,
    feedback,
};
use crate::routes::{Method, RouteError, RouteTable};
use crate::tui::action::{Action, ScreenState};
use crate::tui::theme::Palette;
use crate::tui::widgets::{Breadcrumb, draw_form, form_height, panel, quick_links};

pub const BREADCRUMBS: &[Breadcrumb] = &[
    Breadcrumb::new("Settings", "profile.edit"),
    Breadcrumb::new("Password", "password.edit"),
];

pub const COPY: SubmitCopy = SubmitCopy {
    idle: "Update Password",
    busy: "Updating...",
    success: "Password updated successfully!",
};

pub const HINTS: &str = "Tab: next field  Enter: update  Esc: dashboard  F1: help";

const HINT: &str = "Password must be at least 8 characters long.";

const DO_TIPS: &[&str] = &[
    "Use at least 8 characters",
    "Include uppercase and lowercase letters",
    "Include numbers and special characters",
];

const DONT_TIPS: &[&str] = &[
    "Don't use personal information",
    "Don't reuse passwords from other sites",
    "Don't use common dictionary words",
];

const LINKS: &[(&str, &str)] = &[
    ("Alt+p", "Profile Settings"),
    ("Alt+a", "Appearance"),
    ("Alt+d", "Dashboard"),
];

/// Clears what the user must retype after a rejection, and everything after
/// an accepted change.
pub fn recovery_policy() -> RecoveryPolicy {
    RecoveryPolicy::inline()
        .on_error("password", &["password", "password_confirmation"], "password")
        .on_error("current_password", &["current_password"], "current_password")
        .reset_on_success()
}

/// State for the password page.
#[derive(Debug, Clone)]
pub struct PasswordState {
    form: FormStore,
    endpoint: String,
}

impl PasswordState {
    pub fn new(routes: &RouteTable) -> Result<Self, RouteError> {
        let form = FormStore::new(vec![
            FieldSpec::new("current_password", "Current password")
                .kind(FieldKind::Password)
                .required(),
            FieldSpec::new("password", "New password")
                .kind(FieldKind::Password)
                .required(),
            FieldSpec::new("password_confirmation", "Confirm password")
                .kind(FieldKind::Password)
                .required(),
        ])
        .with_recovery(recovery_policy());

        Ok(Self {
            form,
            endpoint: routes.resolve("password.update")?.to_string(),
        })
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    pub fn owns(&self, ticket: Ticket) -> bool {
        self.form.owns(ticket)
    }

    pub fn apply(&mut self, completion: Completion) -> Applied {
        self.form
            .complete(completion.ticket, completion.outcome.into_result())
    }

    pub fn expire(&mut self, now: Instant, ttl: Duration) {
        self.form.expire_acknowledgment(now, ttl);
    }
}

impl ScreenState for PasswordState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        form_page_key(&mut self.form, &self.endpoint, Method::Put, key)
    }
}

fn tip_lines(palette: &Palette) -> Vec<Line<'static>> {
    let good = DO_TIPS.iter().map(|tip| {
        Line::from(vec![
            Span::styled("\u{2714} ", Style::default().fg(palette.success)),
            Span::styled(*tip, Style::default().fg(palette.text)),
        ])
    });
    let bad = DONT_TIPS.iter().map(|tip| {
        Line::from(vec![
            Span::styled("\u{2718} ", Style::default().fg(palette.error)),
            Span::styled(*tip, Style::default().fg(palette.text)),
        ])
    });
    good.chain(bad).collect()
}

/// Renders the password page into `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_password(state: &PasswordState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let fb = feedback(&state.form, &COPY);
    let fields_height = form_height(&state.form, &fb);

    let [header_area, form_area, bottom_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(fields_height + 5),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Update your account password to keep your account secure.",
            Style::default().fg(palette.muted),
        ))
        .block(panel(" Password Settings ", palette)),
        header_area,
    );

    let block = panel(" Update Password ", palette);
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);
    let [intro_area, fields_area, hint_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(fields_height),
        Constraint::Length(1),
    ])
    .areas(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Ensure your account is using a long, random password to stay secure.",
            Style::default().fg(palette.muted),
        )),
        intro_area,
    );
    draw_form(&state.form, &fb, palette, frame, fields_area);
    frame.render_widget(
        Paragraph::new(Span::styled(HINT, Style::default().fg(palette.muted))),
        hint_area,
    );

    let [tips_area, links_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(bottom_area);
    frame.render_widget(
        Paragraph::new(tip_lines(palette)).block(panel(" Password Security Tips ", palette)),
        tips_area,
    );
    frame.render_widget(
        Paragraph::new(quick_links(LINKS, palette)).block(panel(" Quick Settings ", palette)),
        links_area,
    );
}
