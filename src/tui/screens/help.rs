//! Help screen: scrollable key reference for the page that opened it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::Breadcrumb;

pub const BREADCRUMBS: &[Breadcrumb] = &[Breadcrumb::new("Help", "home")];

pub const HINTS: &str = "\u{2191}/\u{2193}: scroll  q/Esc: back";

static GLOBAL_KEYS: &[(&str, &str)] = &[
    ("Alt+d", "dashboard"),
    ("Alt+p", "profile settings"),
    ("Alt+w", "password settings"),
    ("Alt+a", "appearance settings"),
    ("F1", "help"),
    ("Ctrl+C", "quit"),
];

static WELCOME_KEYS: &[(&str, &str)] = &[("Enter", "open dashboard"), ("q / Esc", "quit")];

static DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("\u{2191}/\u{2193}", "select quick action"),
    ("Enter", "open quick action"),
    ("Esc", "welcome page"),
    ("q", "quit"),
];

static PROFILE_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("Enter", "save changes"),
    ("Alt+r", "re-send verification email"),
    ("Esc", "back to dashboard"),
];

static PASSWORD_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("Enter", "update password"),
    ("Esc", "back to dashboard"),
];

static APPEARANCE_KEYS: &[(&str, &str)] = &[
    ("\u{2190}/\u{2192}", "previous / next theme"),
    ("1 / 2 / 3", "light / dark / system"),
    ("Esc", "back to dashboard"),
];

static HELP_KEYS: &[(&str, &str)] = &[("\u{2191}/\u{2193}", "scroll"), ("q / Esc", "back")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a [`HelpState`] scrolled to the top with origin [`Screen::Welcome`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::Welcome,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// The screen to return to when help is dismissed.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Opens help for `screen`, scrolled to the top.
    pub fn open_for(&mut self, screen: Screen) {
        self.origin = screen;
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn build_section(
    title: &'static str,
    keys: &[(&'static str, &'static str)],
    palette: &Palette,
) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(palette.focus);
    let dim_style = Style::default().fg(palette.muted);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn page_keys(origin: Screen) -> &'static [(&'static str, &'static str)] {
    match origin {
        Screen::Welcome => WELCOME_KEYS,
        Screen::Dashboard => DASHBOARD_KEYS,
        Screen::Profile => PROFILE_KEYS,
        Screen::Password => PASSWORD_KEYS,
        Screen::Appearance => APPEARANCE_KEYS,
        Screen::Help => HELP_KEYS,
    }
}

fn help_content(origin: Screen, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = build_section(origin.label(), page_keys(origin), palette);
    lines.extend(build_section("Everywhere", GLOBAL_KEYS, palette));
    lines
}

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(state: &HelpState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let title = format!(" Help \u{2013} {} ", state.origin().label());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area] = Layout::vertical([Constraint::Min(0)]).areas(inner);

    let content_lines = help_content(state.origin(), palette);
    let total = u16::try_from(content_lines.len()).unwrap_or(u16::MAX);
    let capped_scroll = state.scroll().min(total.saturating_sub(content_area.height));

    frame.render_widget(
        Paragraph::new(content_lines).scroll((capped_scroll, 0)),
        content_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::press;

    mod construction {
        use super::*;

        #[test]
        fn new_starts_at_top_of_welcome() {
            let state = HelpState::new();
            assert_eq!(state.scroll(), 0);
            assert_eq!(state.origin(), Screen::Welcome);
        }

        #[test]
        fn open_for_sets_origin_and_resets_scroll() {
            let mut state = HelpState::default();
            state.handle_key(press(KeyCode::Down));
            state.open_for(Screen::Password);
            assert_eq!(state.origin(), Screen::Password);
            assert_eq!(state.scroll(), 0);
        }
    }

    mod handle_key {
        use super::*;

        #[test]
        fn up_at_zero_saturates() {
            let mut state = HelpState::new();
            assert_eq!(state.handle_key(press(KeyCode::Up)), Action::None);
            assert_eq!(state.scroll(), 0);
        }

        #[test]
        fn down_then_up() {
            let mut state = HelpState::new();
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.scroll(), 1);
        }

        #[test]
        fn q_and_esc_return_to_origin() {
            let mut state = HelpState::new();
            state.open_for(Screen::Profile);
            assert_eq!(
                state.handle_key(press(KeyCode::Char('q'))),
                Action::Navigate(Screen::Profile)
            );
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::Profile)
            );
        }
    }

    mod help_content_fn {
        use super::*;

        fn content_text(screen: Screen) -> String {
            help_content(screen, &Palette::DARK)
                .into_iter()
                .flat_map(|l| l.spans.into_iter())
                .map(|s| s.content.into_owned())
                .collect()
        }

        #[test]
        fn includes_page_and_global_sections() {
            let text = content_text(Screen::Profile);
            assert!(text.contains("Profile"));
            assert!(text.contains("re-send verification email"));
            assert!(text.contains("Everywhere"));
        }

        #[test]
        fn excludes_other_pages() {
            let text = content_text(Screen::Password);
            assert!(!text.contains("re-send verification email"));
            assert!(text.contains("update password"));
        }
    }
}
