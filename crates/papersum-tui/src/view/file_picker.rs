use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::App;

/// Render the file picker screen into the given area.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let picker = &app.file_picker;

    let [header_area, dir_area, list_area, summary_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .areas(area);

    let header = Line::from(vec![
        Span::styled(" Files ", theme.header_style()),
        Span::styled(
            " > Load a text file (.txt / .md)",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(header), header_area);

    let dir_line = Line::from(vec![
        Span::styled(" \u{1F4C1} ", Style::default().fg(theme.active)),
        Span::styled(
            picker.current_dir.display().to_string(),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(dir_line), dir_area);

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            let (icon, style) = if entry.is_dir {
                ("\u{1F4C1} ", Style::default().fg(theme.active))
            } else if entry.is_text {
                ("\u{1F4C4} ", Style::default().fg(theme.text))
            } else {
                ("  ", Style::default().fg(theme.dim))
            };
            ListItem::new(Line::from(vec![
                Span::styled(icon, style),
                Span::styled(entry.name.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Files "),
        )
        .highlight_style(theme.highlight_style());

    let mut state = ListState::default();
    state.select(Some(picker.cursor));
    f.render_stateful_widget(list, list_area, &mut state);

    let count = picker.text_file_count();
    let summary = Line::from(Span::styled(
        format!(
            "  {count} text file{} here. Other types are shown dimmed and cannot be loaded.",
            if count == 1 { "" } else { "s" }
        ),
        Style::default().fg(theme.dim),
    ));
    let summary = Paragraph::new(summary).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border_style()),
    );
    f.render_widget(summary, summary_area);
}
