//! Dashboard: greeting, stats, recent activity, quick actions, account card.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use crate::model::{SharedData, User};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::theme::Palette;
use crate::tui::widgets::{Breadcrumb, panel};

pub const BREADCRUMBS: &[Breadcrumb] = &[Breadcrumb::new("Dashboard", "dashboard")];

pub const HINTS: &str = "\u{2191}/\u{2193}: select  Enter: open  Esc: welcome  q: quit  F1: help";

/// Example figures shown on the stats cards: label, value, change.
const STATS: &[(&str, &str, &str)] = &[
    ("Total Sessions", "24", "+12%"),
    ("Active Projects", "8", "+3%"),
    ("Messages", "47", "+8%"),
];

const ACTIVITY: &[(&str, &str)] = &[
    ("Logged in", "2 minutes ago"),
    ("Updated profile", "1 hour ago"),
    ("Created new project", "3 hours ago"),
    ("Sent message", "5 hours ago"),
    ("Uploaded file", "1 day ago"),
];

pub const QUICK_ACTIONS: &[(&str, Screen)] = &[
    ("View Profile", Screen::Profile),
    ("Change Password", Screen::Password),
    ("Appearance Settings", Screen::Appearance),
];

/// State for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    user: Option<User>,
    selected: usize,
}

impl DashboardState {
    pub fn new(shared: &SharedData) -> Self {
        Self {
            user: shared.user().cloned(),
            selected: 0,
        }
    }

    pub fn set_shared(&mut self, shared: &SharedData) {
        self.user = shared.user().cloned();
    }

    /// Index into [`QUICK_ACTIONS`].
    pub fn selected(&self) -> usize {
        self.selected
    }
}

impl ScreenState for DashboardState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < QUICK_ACTIONS.len() {
                    self.selected += 1;
                }
                Action::None
            }
            KeyCode::Enter => QUICK_ACTIONS
                .get(self.selected)
                .map_or(Action::None, |(_, screen)| Action::Navigate(*screen)),
            KeyCode::Esc => Action::Navigate(Screen::Welcome),
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        }
    }
}

fn account_lines(user: Option<&User>, palette: &Palette) -> Vec<Line<'static>> {
    let label = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.text);
    let row = |name: &'static str, text: String| {
        Line::from(vec![Span::styled(format!("{name:<16}"), label), Span::styled(text, value)])
    };
    let (name, email, since) = match user {
        Some(u) => (u.name.clone(), u.email.clone(), u.member_since()),
        None => (String::new(), String::new(), "N/A".to_string()),
    };
    let verification = match user {
        Some(u) if u.is_verified() => {
            Span::styled("\u{2714} Email verified", Style::default().fg(palette.success))
        }
        _ => Span::styled("\u{26a0} Email unverified", Style::default().fg(palette.warning)),
    };
    vec![
        row("Name", name),
        row("Email", email),
        row("Member Since", since),
        Line::from(vec![
            Span::styled(format!("{:<16}", "Account Status"), label),
            Span::styled("\u{2714} Active  ", Style::default().fg(palette.success)),
            verification,
        ]),
    ]
}

/// Renders the dashboard into `area`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_dashboard(state: &DashboardState, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [greeting_area, stats_area, middle_area, account_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(7),
        Constraint::Length(6),
    ])
    .areas(area);

    let name = state.user.as_ref().map_or("", |u| u.name.as_str());
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Welcome back, {name}!"),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Here's what's happening with your account today.",
                Style::default().fg(palette.muted),
            )),
        ])
        .block(panel(" Dashboard ", palette)),
        greeting_area,
    );

    let cards = Layout::horizontal(STATS.iter().map(|_| Constraint::Ratio(1, 3))).split(stats_area);
    for ((label, value, change), card) in STATS.iter().zip(cards.iter()) {
        let lines = vec![
            Line::from(Span::styled(
                *value,
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{change} from last month"),
                Style::default().fg(palette.success),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel(label, palette)), *card);
    }

    let [activity_area, actions_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(middle_area);
    let activity: Vec<Line<'_>> = ACTIVITY
        .iter()
        .map(|(what, when)| {
            Line::from(vec![
                Span::styled(format!("{what:<22}"), Style::default().fg(palette.text)),
                Span::styled(*when, Style::default().fg(palette.muted)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(activity).block(panel(" Recent Activity ", palette)),
        activity_area,
    );

    let items: Vec<ListItem<'_>> = QUICK_ACTIONS
        .iter()
        .map(|(label, _)| ListItem::new(format!("{label}  \u{2192}")))
        .collect();
    let list = List::new(items)
        .block(panel(" Quick Actions ", palette))
        .style(Style::default().fg(palette.text))
        .highlight_style(
            Style::default()
                .fg(palette.focus)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, actions_area, &mut list_state);

    frame.render_widget(
        Paragraph::new(account_lines(state.user.as_ref(), palette))
            .block(panel(" Account Information ", palette)),
        account_area,
    );
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::model::Auth;
    use crate::tui::testing::{buffer_to_string, press};

    fn shared() -> SharedData {
        let at = Utc.with_ymd_and_hms(2023, 11, 2, 8, 30, 0).unwrap();
        SharedData {
            auth: Auth {
                user: Some(User {
                    id: 1,
                    name: "Grace Hopper".into(),
                    email: "grace@example.com".into(),
                    email_verified_at: Some(at),
                    created_at: at,
                    updated_at: at,
                }),
            },
            status: None,
        }
    }

    mod handle_key {
        use super::*;

        #[test]
        fn down_moves_and_stops_at_end() {
            let mut state = DashboardState::new(&shared());
            for _ in 0..5 {
                state.handle_key(press(KeyCode::Down));
            }
            assert_eq!(state.selected(), QUICK_ACTIONS.len() - 1);
        }

        #[test]
        fn up_saturates() {
            let mut state = DashboardState::new(&shared());
            state.handle_key(press(KeyCode::Up));
            assert_eq!(state.selected(), 0);
        }

        #[test]
        fn enter_opens_selected_action() {
            let mut state = DashboardState::new(&shared());
            assert_eq!(
                state.handle_key(press(KeyCode::Enter)),
                Action::Navigate(Screen::Profile)
            );
            state.handle_key(press(KeyCode::Down));
            assert_eq!(
                state.handle_key(press(KeyCode::Enter)),
                Action::Navigate(Screen::Password)
            );
        }

        #[test]
        fn esc_goes_to_welcome() {
            let mut state = DashboardState::new(&shared());
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::Welcome)
            );
        }

        #[test]
        fn q_quits() {
            let mut state = DashboardState::new(&shared());
            assert_eq!(state.handle_key(press(KeyCode::Char('q'))), Action::Quit);
        }
    }

    mod rendering {
        use super::*;

        fn render(state: &DashboardState) -> String {
            let backend = TestBackend::new(100, 30);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| draw_dashboard(state, &Palette::DARK, frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn shows_greeting_stats_and_account() {
            let output = render(&DashboardState::new(&shared()));
            assert!(output.contains("Welcome back, Grace Hopper!"));
            assert!(output.contains("Total Sessions"));
            assert!(output.contains("+12% from last month"));
            assert!(output.contains("Recent Activity"));
            assert!(output.contains("View Profile"));
            assert!(output.contains("grace@example.com"));
            assert!(output.contains("2023-11-02"));
            assert!(output.contains("Email verified"));
        }

        #[test]
        fn missing_user_shows_na() {
            let output = render(&DashboardState::new(&SharedData::default()));
            assert!(output.contains("N/A"));
        }

        #[test]
        fn refresh_picks_up_new_name() {
            let mut state = DashboardState::new(&shared());
            let mut data = shared();
            data.auth.user.as_mut().unwrap().name = "Admiral Hopper".into();
            state.set_shared(&data);
            assert!(render(&state).contains("Welcome back, Admiral Hopper!"));
        }
    }
}
