//! Appearance settings: light / dark / system tabs with a live preview.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};

use crate::model::Appearance;
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::{Breadcrumb, panel, quick_links};

pub const BREADCRUMBS: &[Breadcrumb] = &[
    Breadcrumb::new("Settings", "profile.edit"),
    Breadcrumb::new("Appearance", "appearance"),
];

pub const HINTS: &str = "\u{2190}/\u{2192}: theme  1-3: pick  Esc: dashboard  F1: help";

const FEATURES: &[(&str, &str)] = &[
    ("Light Mode", "Clean, bright interface perfect for daytime use"),
    ("Dark Mode", "Easy on the eyes for low-light environments"),
    ("Auto Switch", "Follows your system preference automatically"),
];

const LINKS: &[(&str, &str)] = &[
    ("Alt+p", "Profile Settings"),
    ("Alt+w", "Change Password"),
    ("Alt+d", "Dashboard"),
];

/// State for the appearance page.
#[derive(Debug, Clone)]
pub struct AppearanceState {
    selected: Appearance,
}

impl AppearanceState {
    pub fn new(current: Appearance) -> Self {
        Self { selected: current }
    }

    pub fn selected(&self) -> Appearance {
        self.selected
    }

    fn select(&mut self, appearance: Appearance) -> Action {
        self.selected = appearance;
        Action::SetAppearance(appearance)
    }
}

impl ScreenState for AppearanceState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.select(self.selected.next()),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                self.select(self.selected.prev())
            }
            KeyCode::Char(ch @ '1'..='3') => {
                let index = usize::from(ch as u8 - b'1');
                match Appearance::all().get(index) {
                    Some(appearance) => self.select(*appearance),
                    None => Action::None,
                }
            }
            KeyCode::Esc => Action::Navigate(Screen::Dashboard),
            _ => Action::None,
        }
    }
}

fn preview_lines(palette: &Palette) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Sample Card",
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "This is how content cards will appear with your current theme settings.",
            Style::default().fg(palette.muted),
        )),
        Line::from(vec![
            Span::styled(" Tag ", Style::default().fg(palette.background).bg(palette.accent)),
            Span::raw(" "),
            Span::styled(" Active ", Style::default().fg(palette.background).bg(palette.success)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total Users      ", Style::default().fg(palette.muted)),
            Span::styled("1,234", Style::default().fg(palette.text)),
        ]),
        Line::from(vec![
            Span::styled("Active Sessions  ", Style::default().fg(palette.muted)),
            Span::styled("89", Style::default().fg(palette.text)),
        ]),
    ]
}

/// Renders the appearance page into `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_appearance(
    state: &AppearanceState,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) {
    let [header_area, tabs_area, preview_area, bottom_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Customize the look and feel of your dashboard.",
            Style::default().fg(palette.muted),
        ))
        .block(panel(" Appearance Settings ", palette)),
        header_area,
    );

    let block = panel(" Theme Preferences ", palette);
    let inner = block.inner(tabs_area);
    frame.render_widget(block, tabs_area);
    let [intro_area, tab_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Choose your preferred color scheme for the interface.",
            Style::default().fg(palette.muted),
        )),
        intro_area,
    );
    let tabs = Tabs::new(Appearance::all().iter().map(|a| a.label()))
        .select(state.selected().index())
        .style(Style::default().fg(palette.text))
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    frame.render_widget(tabs, tab_row);

    frame.render_widget(
        Paragraph::new(preview_lines(palette)).block(panel(" Interface Preview ", palette)),
        preview_area,
    );

    let [features_area, links_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(bottom_area);
    let features: Vec<Line<'_>> = FEATURES
        .iter()
        .map(|(title, desc)| {
            Line::from(vec![
                Span::styled(
                    format!("{title:<13}"),
                    Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*desc, Style::default().fg(palette.muted)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(features).block(panel(" Theme Features ", palette)),
        features_area,
    );
    frame.render_widget(
        Paragraph::new(quick_links(LINKS, palette)).block(panel(" Quick Settings ", palette)),
        links_area,
    );
}
