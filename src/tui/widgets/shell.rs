//! Page shell: breadcrumb bar on top, key hints at the bottom.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::theme::Palette;

/// One entry of the breadcrumb trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breadcrumb {
    pub title: &'static str,
    /// Route name the crumb links to.
    pub route: &'static str,
}

impl Breadcrumb {
    pub const fn new(title: &'static str, route: &'static str) -> Self {
        Self { title, route }
    }
}

/// Trail such as `Settings › Profile`; the last crumb is emphasised.
pub fn breadcrumb_line(crumbs: &[Breadcrumb], palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{203a} ", Style::default().fg(palette.muted)));
        }
        let style = if i + 1 == crumbs.len() {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::styled(crumb.title, style));
    }
    Line::from(spans)
}

/// Bordered section with a bold title.
pub fn panel<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
}

/// `(key, destination)` pairs rendered as `Alt+p  Profile settings`.
pub fn quick_links(links: &[(&'static str, &'static str)], palette: &Palette) -> Vec<Line<'static>> {
    links
        .iter()
        .map(|(key, label)| {
            Line::from(vec![
                Span::styled(format!("{key:<8}"), Style::default().fg(palette.accent)),
                Span::styled(*label, Style::default().fg(palette.text)),
                Span::styled(" \u{2192}", Style::default().fg(palette.muted)),
            ])
        })
        .collect()
}

/// Draws the shell around a page and returns the content area.
///
/// `location` is the resolved path of the current page, shown right-aligned.
#[mutants::skip]
pub fn draw_shell(
    crumbs: &[Breadcrumb],
    location: &str,
    hints: &str,
    palette: &Palette,
    frame: &mut Frame,
    area: Rect,
) -> Rect {
    let [bar_area, content_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let bar = Block::default()
        .title(" acctdesk ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    let inner = bar.inner(bar_area);
    frame.render_widget(bar, bar_area);
    frame.render_widget(Paragraph::new(breadcrumb_line(crumbs, palette)), inner);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            location.to_string(),
            Style::default().fg(palette.muted),
        )))
        .alignment(Alignment::Right),
        inner,
    );

    let footer = Paragraph::new(Line::from(hints.to_string())).style(Style::default().fg(palette.muted));
    frame.render_widget(footer, footer_area);

    content_area
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::tui::testing::buffer_to_string;

    const SETTINGS_PROFILE: &[Breadcrumb] = &[
        Breadcrumb::new("Settings", "profile.edit"),
        Breadcrumb::new("Profile", "profile.edit"),
    ];

    fn render_shell(crumbs: &[Breadcrumb], width: u16, height: u16) -> (String, Rect) {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut content = Rect::default();
        terminal
            .draw(|frame| {
                content = draw_shell(
                    crumbs,
                    "/settings/profile",
                    "Esc: back",
                    &Palette::DARK,
                    frame,
                    frame.area(),
                );
            })
            .unwrap();
        (buffer_to_string(terminal.backend().buffer()), content)
    }

    #[test]
    fn trail_joins_titles() {
        let line = breadcrumb_line(SETTINGS_PROFILE, &Palette::DARK);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Settings \u{203a} Profile");
    }

    #[test]
    fn last_crumb_is_bold() {
        let line = breadcrumb_line(SETTINGS_PROFILE, &Palette::DARK);
        let last = line.spans.last().unwrap();
        assert!(last.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn empty_trail_is_empty_line() {
        assert!(breadcrumb_line(&[], &Palette::DARK).spans.is_empty());
    }

    #[test]
    fn quick_links_pad_keys() {
        let lines = quick_links(&[("Alt+p", "Profile")], &Palette::DARK);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Alt+p   Profile \u{2192}");
    }

    #[test]
    fn renders_trail_location_and_hints() {
        let (output, _) = render_shell(SETTINGS_PROFILE, 60, 10);
        assert!(output.contains("Settings"));
        assert!(output.contains("Profile"));
        assert!(output.contains("/settings/profile"));
        assert!(output.contains("Esc: back"));
    }

    #[test]
    fn content_area_excludes_bar_and_footer() {
        let (_, content) = render_shell(SETTINGS_PROFILE, 60, 10);
        assert_eq!(content, Rect::new(0, 3, 60, 6));
    }
}
