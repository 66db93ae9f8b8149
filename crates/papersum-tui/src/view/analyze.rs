use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use papersum_core::present::AnalysisView;

use crate::app::{App, InputMode, ResultTab};
use crate::view::{spinner_char, wrap_text};

/// Render the analyze tab: text buffer on the left, results on the right.
///
/// Takes `&mut App` to clamp the result scroll offset to the content.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let [input_area, result_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    render_buffer(f, app, input_area);
    render_result(f, app, result_area);
}

fn render_buffer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::EditingMultiline;

    let [text_area, hint_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let inner_width = text_area.width.saturating_sub(2) as usize;
    let inner_height = text_area.height.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = if app.analysis.text().is_empty() && !editing {
        vec![Line::from(Span::styled(
            "Enter text to analyze, or press Ctrl+O to load a .txt/.md file...",
            Style::default().fg(theme.dim),
        ))]
    } else {
        wrap_text(app.analysis.text(), inner_width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(theme.text))))
            .collect()
    };
    if editing {
        let cursor = Span::styled("\u{2588}", Style::default().fg(theme.active));
        match lines.last_mut() {
            Some(last) => last.spans.push(cursor),
            None => lines.push(Line::from(cursor)),
        }
    }
    // Keep the end of the buffer (where typing happens) in view.
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let border = if editing {
        theme.focus_border_style()
    } else {
        theme.border_style()
    };
    let chars = app.analysis.text().chars().count();
    let paragraph = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Text to Analyze ")
            .title_bottom(Line::from(format!(" {chars} chars ")).right_aligned()),
    );
    f.render_widget(paragraph, text_area);

    let hint_style = if app.analysis.can_submit() {
        Style::default().fg(theme.active).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim)
    };
    let hint = if app.analysis.is_loading() {
        format!(" {} Analyzing...", spinner_char(app.tick))
    } else {
        " [Ctrl+S] Analyze Text".to_string()
    };
    f.render_widget(Paragraph::new(Span::styled(hint, hint_style)), hint_area);
}

fn render_result(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(" Analysis Results ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [tabs_area, content_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);

    let Some(view) = AnalysisView::build(app.analysis.result()) else {
        let message = if app.analysis.is_loading() {
            format!("{} Analyzing...", spinner_char(app.tick))
        } else {
            "Results will appear here after analysis.".to_string()
        };
        f.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(app.theme.dim))),
            content_area,
        );
        return;
    };

    let theme = &app.theme;
    let selected = match app.result_tab {
        ResultTab::Summary => 0,
        ResultTab::Insights => 1,
    };
    let tabs = Tabs::new([ResultTab::Summary.title(), ResultTab::Insights.title()])
        .select(selected)
        .style(Style::default().fg(theme.dim))
        .highlight_style(
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, tabs_area);

    let width = content_area.width.saturating_sub(1) as usize;
    let text_style = Style::default().fg(theme.text);
    let lines: Vec<Line> = match app.result_tab {
        ResultTab::Summary => wrap_text(view.summary, width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, text_style)))
            .collect(),
        ResultTab::Insights => {
            let mut lines = Vec::new();
            for (i, insight) in view.insights.iter().enumerate() {
                let prefix = format!("{}. ", i + 1);
                let body_width = width.saturating_sub(prefix.len());
                for (j, l) in wrap_text(insight, body_width).into_iter().enumerate() {
                    let lead = if j == 0 {
                        Span::styled(prefix.clone(), Style::default().fg(theme.active))
                    } else {
                        Span::raw(" ".repeat(prefix.len()))
                    };
                    lines.push(Line::from(vec![lead, Span::styled(l, text_style)]));
                }
            }
            lines
        }
    };

    let max_scroll = lines.len().saturating_sub(content_area.height as usize) as u16;
    let scroll = app.result_scroll.min(max_scroll);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), content_area);
    app.result_scroll = scroll;
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use papersum_core::AnalysisResult;

    use super::*;
    use crate::action::Action;
    use crate::theme::Theme;
    use crate::tui_event::BackendEvent;

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_in(f, app, f.area())).unwrap();
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

    fn analyzed_app() -> App {
        let mut app = App::new(Theme::hacker());
        app.analysis.set_text("hello world");
        let ticket = app.analysis.begin().unwrap();
        app.handle_backend_event(BackendEvent::AnalysisFinished {
            id: ticket.id,
            result: Ok(AnalysisResult {
                summary: "short summary".into(),
                insights: vec!["first insight".into(), "second insight".into()],
                sentiment: "neutral".into(),
                topics: vec!["hidden-topic".into()],
            }),
        });
        app
    }

    #[test]
    fn no_result_shows_placeholder() {
        let mut app = App::new(Theme::hacker());
        assert!(screen(&mut app).contains("Results will appear here"));
    }

    #[test]
    fn summary_tab_shows_summary_only() {
        let mut app = analyzed_app();
        let s = screen(&mut app);
        assert!(s.contains("short summary"));
        assert!(!s.contains("first insight"));
        assert!(!s.contains("hidden-topic"));
    }

    #[test]
    fn insights_tab_numbers_in_order() {
        let mut app = analyzed_app();
        app.tab = crate::app::Tab::Analyze;
        app.update(Action::NextResultTab);
        let s = screen(&mut app);
        let first = s.find("1. first insight").unwrap();
        let second = s.find("2. second insight").unwrap();
        assert!(first < second);
    }

    #[test]
    fn result_scroll_is_clamped() {
        let mut app = analyzed_app();
        app.result_scroll = 500;
        screen(&mut app);
        assert_eq!(app.result_scroll, 0);
    }
}
