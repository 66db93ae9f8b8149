use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(64, 36, area);

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section_header("Global", theme),
        key_line("Tab / Shift+Tab", "Switch Search / Analyze", theme),
        key_line("i or /", "Start editing", theme),
        key_line("Esc", "Stop editing / close", theme),
        key_line("? / F1", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
        Line::from(""),
        section_header("Search", theme),
        key_line("Enter", "Run search (while editing)", theme),
        key_line("j / \u{2193}", "Next paper", theme),
        key_line("k / \u{2191}", "Previous paper", theme),
        key_line("Ctrl+d / PgDn", "Page down", theme),
        key_line("Ctrl+u / PgUp", "Page up", theme),
        key_line("g / G", "First / last paper", theme),
        key_line("Space / Enter", "Show more / less of abstract", theme),
        key_line("o", "Show arXiv link", theme),
        Line::from(""),
        section_header("Analyze", theme),
        key_line("Enter", "New line (while editing)", theme),
        key_line("Ctrl+s", "Analyze text", theme),
        key_line("Ctrl+l", "Clear text", theme),
        key_line("Ctrl+o", "Load a .txt / .md file", theme),
        key_line("[ / ]", "Summary / Insights", theme),
        key_line("j / k", "Scroll results", theme),
        Line::from(""),
        section_header("File picker", theme),
        key_line("Enter", "Open folder / load file", theme),
        key_line("Esc", "Cancel", theme),
        Line::from(""),
        Line::from(Span::styled(
            "  Press ? or Esc to close",
            Style::default().fg(theme.dim),
        )),
    ];

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<16}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}

/// Create a centered rectangle of the given width (columns) and height (rows).
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
