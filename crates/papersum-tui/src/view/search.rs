use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use papersum_core::present::{NO_RESULTS_MESSAGE, PaperCard, PaperListView};

use crate::app::{App, InputMode};
use crate::theme::Theme;
use crate::view::{spinner_char, truncate, wrap_text};

/// Render the search tab: query box on top, result cards below.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let [input_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    render_query(f, app, input_area);

    let view = PaperListView::build(app.search.papers(), app.search.is_loading(), &app.expansion);
    match view {
        PaperListView::Idle => render_message(
            f,
            &app.theme,
            list_area,
            "Type a query and press Enter to search arXiv.",
        ),
        PaperListView::Empty => render_message(f, &app.theme, list_area, NO_RESULTS_MESSAGE),
        PaperListView::Loading { placeholders } => {
            render_placeholders(f, app, list_area, placeholders)
        }
        PaperListView::Papers(cards) => render_cards(f, app, list_area, &cards),
    }
}

fn render_query(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::Editing;
    let border = if editing {
        theme.focus_border_style()
    } else {
        theme.border_style()
    };

    let mut spans = vec![Span::styled(
        app.search.query.as_str(),
        Style::default().fg(theme.text),
    )];
    if editing {
        spans.push(Span::styled("\u{2588}", Style::default().fg(theme.active)));
    } else if app.search.query.is_empty() {
        spans.push(Span::styled(
            "Search for papers...",
            Style::default().fg(theme.dim),
        ));
    }

    let title = if app.search.is_loading() {
        format!(" {} Searching... ", spinner_char(app.tick))
    } else {
        " Search ".to_string()
    };

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title),
    );
    f.render_widget(input, area);
}

fn render_message(f: &mut Frame, theme: &Theme, area: Rect, message: &str) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let p = Paragraph::new(Span::styled(message, Style::default().fg(theme.dim)))
        .alignment(Alignment::Center);
    f.render_widget(p, middle);
}

fn render_placeholders(f: &mut Frame, app: &App, area: Rect, count: usize) {
    let theme = &app.theme;
    let bar = Style::default().bg(theme.placeholder);
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = (0..count)
        .map(|_| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(" ".repeat(width * 3 / 4), bar)),
                Line::from(Span::styled(" ".repeat(width / 2), bar)),
                Line::from(Span::styled(" ".repeat(width), bar)),
                Line::from(Span::styled(" ".repeat(width * 5 / 6), bar)),
                Line::from(""),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(format!(" {} Loading ", spinner_char(app.tick))),
    );
    f.render_widget(list, area);
}

fn render_cards(f: &mut Frame, app: &App, area: Rect, cards: &[PaperCard<'_>]) {
    let theme = &app.theme;
    // Borders plus the two-column gutter.
    let text_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| ListItem::new(card_text(card, theme, text_width)))
        .collect();

    let title = format!(
        " Results {}/{} ",
        (app.paper_cursor + 1).min(cards.len()),
        cards.len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(title),
        )
        .highlight_style(theme.highlight_style())
        .highlight_symbol("\u{258C} ");

    let mut state = ListState::default();
    state.select(Some(app.paper_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn card_text<'a>(card: &PaperCard<'a>, theme: &Theme, width: usize) -> Text<'a> {
    let mut lines = Vec::new();

    for line in wrap_text(&card.paper.title, width) {
        lines.push(Line::from(Span::styled(
            line,
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(Span::styled(
        truncate(&card.byline(), width),
        Style::default().fg(theme.dim),
    )));

    if !card.paper.categories.is_empty() {
        let mut tags = Vec::new();
        for cat in &card.paper.categories {
            tags.push(Span::styled(format!("[{cat}]"), Style::default().fg(theme.tag)));
            tags.push(Span::raw(" "));
        }
        lines.push(Line::from(tags));
    }

    for line in wrap_text(&card.abstract_text, width) {
        lines.push(Line::from(Span::styled(line, Style::default().fg(theme.text))));
    }
    if let Some(toggle) = card.toggle {
        lines.push(Line::from(Span::styled(
            format!("[Space] {}", toggle.text()),
            Style::default().fg(theme.active),
        )));
    }

    if !card.paper.summary.is_empty() {
        lines.push(Line::from(Span::styled(
            "AI Summary",
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
        )));
        for line in wrap_text(&card.paper.summary, width) {
            lines.push(Line::from(Span::styled(line, Style::default().fg(theme.dim))));
        }
    }

    lines.push(Line::from(Span::styled(
        truncate(&card.link, width),
        Style::default()
            .fg(theme.link)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines.push(Line::from(""));

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use papersum_core::Paper;

    use super::*;
    use crate::tui_event::BackendEvent;

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_in(f, app, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    fn loaded_app(papers: Vec<Paper>) -> App {
        let mut app = App::new(Theme::hacker());
        let ticket = app.search.begin("q").unwrap();
        app.handle_backend_event(BackendEvent::SearchFinished {
            id: ticket.id,
            result: Ok(papers),
        });
        app
    }

    #[test]
    fn idle_shows_prompt() {
        let app = App::new(Theme::hacker());
        assert!(render_to_string(&app).contains("press Enter to search"));
    }

    #[test]
    fn empty_result_shows_no_papers_message() {
        let app = loaded_app(vec![]);
        assert!(render_to_string(&app).contains("No papers found"));
    }

    #[test]
    fn card_shows_byline_tags_and_link() {
        let app = loaded_app(vec![Paper {
            id: "1".into(),
            arxiv_id: "2101.0001".into(),
            title: "T".into(),
            authors: vec!["A".into(), "B".into()],
            abstract_text: "short".into(),
            summary: "S".into(),
            categories: vec!["cs.LG".into()],
            published_date: "2021-01-01".into(),
        }]);
        let screen = render_to_string(&app);
        assert!(screen.contains("A, B"));
        assert!(screen.contains("1/1/2021"));
        assert!(screen.contains("[cs.LG]"));
        assert!(screen.contains("https://arxiv.org/abs/2101.0001"));
        assert!(!screen.contains("Show More"));
    }

    #[test]
    fn long_abstract_offers_show_more() {
        let app = loaded_app(vec![Paper {
            id: "1".into(),
            title: "T".into(),
            abstract_text: "word ".repeat(60),
            ..Default::default()
        }]);
        assert!(render_to_string(&app).contains("Show More"));
    }
}
