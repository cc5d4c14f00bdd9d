//! Profile settings: name and email form, verification resend, account overview.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::editing::{FormKey, edit_key, submit};
use crate::form::{
    Applied, Completion, FieldKind, FieldSpec, FormStore, RecoveryPolicy, SubmitCopy, Ticket,
    feedback,
};
use crate::model::{SharedData, User, VERIFICATION_LINK_SENT};
use crate::routes::{Method, RouteError, RouteTable};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::{Breadcrumb, draw_form, form_height, panel, quick_links};

pub const BREADCRUMBS: &[Breadcrumb] = &[
    Breadcrumb::new("Settings", "profile.edit"),
    Breadcrumb::new("Profile", "profile.edit"),
];

pub const COPY: SubmitCopy = SubmitCopy {
    idle: "Save Changes",
    busy: "Saving...",
    success: "Saved successfully!",
};

const RESEND_COPY: SubmitCopy = SubmitCopy {
    idle: "Re-send verification email",
    busy: "Sending...",
    success: "Verification email queued.",
};

pub const HINTS: &str = "Tab: next field  Enter: save  Alt+r: resend verification  Esc: dashboard  F1: help";

const LINKS: &[(&str, &str)] = &[
    ("Alt+w", "Change Password"),
    ("Alt+a", "Appearance"),
    ("Alt+d", "Dashboard"),
];

/// State for the profile page.
#[derive(Debug, Clone)]
pub struct ProfileState {
    form: FormStore,
    endpoint: String,
    resend: FormStore,
    resend_endpoint: String,
    user: Option<User>,
    flash: Option<String>,
}

impl ProfileState {
    /// Mounts the page, seeding the form from the current user.
    pub fn new(shared: &SharedData, routes: &RouteTable) -> Result<Self, RouteError> {
        let user = shared.user().cloned();
        let (name, email) = user
            .as_ref()
            .map(|u| (u.name.as_str(), u.email.as_str()))
            .unwrap_or_default();
        let form = FormStore::new(vec![
            FieldSpec::new("name", "Name").required(),
            FieldSpec::new("email", "Email address")
                .kind(FieldKind::Email)
                .required(),
        ])
        .with_recovery(RecoveryPolicy::inline())
        .seeded([("name", name), ("email", email)]);

        Ok(Self {
            form,
            endpoint: routes.resolve("profile.update")?.to_string(),
            resend: FormStore::new(Vec::new()),
            resend_endpoint: routes.resolve("verification.send")?.to_string(),
            user,
            flash: shared.status.clone(),
        })
    }

    pub fn form(&self) -> &FormStore {
        &self.form
    }

    pub fn resend(&self) -> &FormStore {
        &self.resend
    }

    /// Refreshes the read-only user details. Form values are left alone.
    pub fn set_shared(&mut self, shared: &SharedData) {
        self.user = shared.user().cloned();
        self.flash = shared.status.clone();
    }

    /// Returns `true` if either of the page's forms is waiting on `ticket`.
    pub fn owns(&self, ticket: Ticket) -> bool {
        self.form.owns(ticket) || self.resend.owns(ticket)
    }

    /// Applies a completion to whichever form submitted it.
    pub fn apply(&mut self, completion: Completion) -> Applied {
        let Completion { ticket, outcome } = completion;
        if self.resend.owns(ticket) {
            self.resend.complete(ticket, outcome.into_result())
        } else {
            self.form.complete(ticket, outcome.into_result())
        }
    }

    pub fn expire(&mut self, now: Instant, ttl: Duration) {
        self.form.expire_acknowledgment(now, ttl);
        self.resend.expire_acknowledgment(now, ttl);
    }

    /// `true` when the unverified-email notice is shown.
    pub fn needs_verification(&self) -> bool {
        self.user.as_ref().is_some_and(|u| !u.is_verified())
    }

    /// `true` once the backend reported that a verification link was sent.
    pub fn verification_sent(&self) -> bool {
        self.flash.as_deref() == Some(VERIFICATION_LINK_SENT)
    }

    fn resend_verification(&mut self) -> Action {
        if !self.needs_verification() {
            return Action::None;
        }
        submit(&mut self.resend, &self.resend_endpoint, Method::Post)
    }
}

impl ScreenState for ProfileState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::ALT) {
            return self.resend_verification();
        }
        match edit_key(&mut self.form, key) {
            FormKey::Edited | FormKey::Unhandled => Action::None,
            FormKey::Submit => submit(&mut self.form, &self.endpoint, Method::Patch),
            FormKey::Back => Action::Navigate(Screen::Dashboard),
        }
    }
}

fn verification_lines(state: &ProfileState, palette: &Palette) -> Vec<Line<'static>> {
    if !state.needs_verification() {
        return Vec::new();
    }
    let mut lines = vec![Line::from(vec![
        Span::styled(
            "Your email address is unverified. ",
            Style::default().fg(palette.warning),
        ),
        Span::styled(
            format!("Alt+r: {}", feedback(&state.resend, &RESEND_COPY).submit.label),
            Style::default().fg(palette.accent),
        ),
    ])];
    if state.verification_sent() {
        lines.push(Line::from(Span::styled(
            "A new verification link has been sent to your email address.",
            Style::default().fg(palette.success),
        )));
    }
    lines
}

fn overview_lines(user: Option<&User>, palette: &Palette) -> Vec<Line<'static>> {
    let label = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.text);
    let Some(user) = user else {
        return vec![Line::from(Span::styled("N/A", label))];
    };
    let status = if user.is_verified() {
        Span::styled("\u{2714} Verified", Style::default().fg(palette.success))
    } else {
        Span::styled("\u{26a0} Unverified", Style::default().fg(palette.warning))
    };
    vec![
        Line::from(vec![
            Span::styled("Account ID    ", label),
            Span::styled(format!("#{}", user.id), value),
        ]),
        Line::from(vec![
            Span::styled("Member Since  ", label),
            Span::styled(user.created_at.format("%B %-d, %Y").to_string(), value),
        ]),
        Line::from(vec![Span::styled("Email Status  ", label), status]),
        Line::from(vec![
            Span::styled("Last Updated  ", label),
            Span::styled(user.updated_at.format("%b %-d, %Y %H:%M").to_string(), value),
        ]),
    ]
}

/// Renders the profile page into `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_profile(state: &ProfileState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let fb = feedback(&state.form, &COPY);
    let notice = verification_lines(state, palette);
    let notice_height = u16::try_from(notice.len()).unwrap_or(0);

    let [header_area, form_area, bottom_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(form_height(&state.form, &fb) + notice_height + 4),
        Constraint::Min(0),
    ])
    .areas(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Manage your account information and email preferences.",
            Style::default().fg(palette.muted),
        )),
    ])
    .block(panel(" Profile Settings ", palette))
    .wrap(Wrap { trim: true });
    frame.render_widget(header, header_area);

    let block = panel(" Profile Information ", palette);
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);
    let [intro_area, fields_area, notice_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(form_height(&state.form, &fb)),
        Constraint::Min(0),
    ])
    .areas(inner);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Update your account's profile information and email address.",
            Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
        ))),
        intro_area,
    );
    draw_form(&state.form, &fb, palette, frame, fields_area);
    frame.render_widget(Paragraph::new(notice), notice_area);

    let [overview_area, links_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(bottom_area);
    frame.render_widget(
        Paragraph::new(overview_lines(state.user.as_ref(), palette))
            .block(panel(" Account Overview ", palette)),
        overview_area,
    );
    frame.render_widget(
        Paragraph::new(quick_links(LINKS, palette)).block(panel(" Quick Settings ", palette)),
        links_area,
    );
}
