//! Landing page.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::SharedData;
use crate::routes::{RouteError, RouteTable};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::{Breadcrumb, Button, ButtonVariant, panel};

pub const BREADCRUMBS: &[Breadcrumb] = &[Breadcrumb::new("Welcome", "home")];

pub const HINTS: &str = "Enter: dashboard  q: quit  F1: help";

const FEATURES: &[&str] = &[
    "Secure Authentication",
    "Personal Dashboard",
    "User Profiles",
    "Modern UI",
];

/// State for the welcome page.
#[derive(Debug, Clone)]
pub struct WelcomeState {
    user_name: Option<String>,
    login: String,
    register: String,
}

impl WelcomeState {
    pub fn new(shared: &SharedData, routes: &RouteTable) -> Result<Self, RouteError> {
        Ok(Self {
            user_name: shared.user().map(|u| u.name.clone()),
            login: routes.resolve("login")?.to_string(),
            register: routes.resolve("register")?.to_string(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_name.is_some()
    }
}

impl ScreenState for WelcomeState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter if self.is_authenticated() => Action::Navigate(Screen::Dashboard),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

fn greeting_lines(state: &WelcomeState, palette: &Palette) -> Vec<Line<'static>> {
    match &state.user_name {
        Some(name) => vec![Line::from(vec![
            Span::styled("Welcome back, ", Style::default().fg(palette.text)),
            Span::styled(
                name.clone(),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("!", Style::default().fg(palette.text)),
        ])],
        None => vec![
            Line::from(Span::styled(
                format!("Log in at {}", state.login),
                Style::default().fg(palette.muted),
            )),
            Line::from(Span::styled(
                format!("Register at {}", state.register),
                Style::default().fg(palette.muted),
            )),
        ],
    }
}

/// Renders the welcome page into `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_welcome(state: &WelcomeState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = panel(" Your Personal Dashboard ", palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [intro_area, greeting_area, button_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(inner);

    let mut intro = vec![Line::from(Span::styled(
        "A terminal application with user authentication and a personalized dashboard.",
        Style::default().fg(palette.text),
    ))];
    intro.push(Line::from(""));
    intro.push(Line::from(Span::styled(
        FEATURES.join("  \u{2022}  "),
        Style::default().fg(palette.accent),
    )));
    frame.render_widget(
        Paragraph::new(intro).alignment(Alignment::Center),
        intro_area,
    );
    frame.render_widget(
        Paragraph::new(greeting_lines(state, palette)).alignment(Alignment::Center),
        greeting_area,
    );

    if state.is_authenticated() {
        let button = Button::new("Go to Dashboard", *palette).focused(true);
        let [centered] = Layout::horizontal([Constraint::Length(button.width())])
            .flex(Flex::Center)
            .areas(button_area);
        frame.render_widget(button, centered);
    } else {
        let start = Button::new("Get Started", *palette).disabled(true);
        let sign_in = Button::new("Sign In", *palette)
            .variant(ButtonVariant::Outline)
            .disabled(true);
        let [left, _, right] = Layout::horizontal([
            Constraint::Length(start.width()),
            Constraint::Length(2),
            Constraint::Length(sign_in.width()),
        ])
        .flex(Flex::Center)
        .areas(button_area);
        frame.render_widget(start, left);
        frame.render_widget(sign_in, right);
    }
}
