use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::App;

const TOAST_WIDTH: u16 = 44;
const MAX_VISIBLE: usize = 3;

/// Stack the newest notifications in the top-right corner of `area`.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = TOAST_WIDTH.min(area.width);
    if width < 10 {
        return;
    }
    let text_width = width.saturating_sub(2) as usize;

    let mut y = area.y;
    let newest: Vec<_> = app.notifier.active().collect();
    for note in newest.iter().rev().take(MAX_VISIBLE) {
        let desc_rows = note.description.chars().count().div_ceil(text_width).max(1) as u16;
        let height = desc_rows + 3;
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height,
        };
        let color = theme.severity_color(note.severity);
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                note.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                note.description.as_str(),
                Style::default().fg(theme.text),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(body, rect);
        y += height;
    }
}
