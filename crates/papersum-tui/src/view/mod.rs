pub mod analyze;
pub mod file_picker;
pub mod help;
pub mod search;
pub mod toast;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, InputMode, Screen, Tab};

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Greedy word wrap. Words longer than `width` are split; existing newlines
/// are kept.
pub fn wrap_text(s: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for para in s.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in para.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if len > 0 {
                    out.push(std::mem::take(&mut line));
                    len = 0;
                }
                out.push(word.drain(..width).collect());
            }
            let wlen = word.len();
            if len > 0 && len + 1 + wlen > width {
                out.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.extend(word);
            len += wlen;
        }
        out.push(line);
    }
    out
}

/// One-row tab bar.
pub fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(" papersum ", theme.header_style()), Span::raw(" ")];
    for tab in Tab::ALL {
        let style = if tab == app.tab {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::raw(" "));
    }
    if app.search.is_loading() || app.analysis.is_loading() {
        spans.push(Span::styled(
            format!("{} ", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Context-sensitive key hints.
pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints = match (app.screen, &app.input_mode, app.tab) {
        (Screen::FilePicker, _, _) => " j/k:move  Enter:open/load  Esc:cancel  ?:help",
        (_, InputMode::Editing, _) => " Enter:search  Esc:done  Ctrl+L:clear  Tab:switch",
        (_, InputMode::EditingMultiline, _) => {
            " Ctrl+S:analyze  Enter:newline  Ctrl+O:open file  Ctrl+L:clear  Esc:done"
        }
        (_, InputMode::Normal, Tab::Search) => {
            " /:edit  j/k:move  Space:show more/less  o:link  Tab:switch  ?:help  q:quit"
        }
        (_, InputMode::Normal, Tab::Analyze) => {
            " i:edit  Ctrl+S:analyze  Ctrl+O:open file  [/]:summary/insights  ?:help  q:quit"
        }
    };
    let line = Line::from(Span::styled(
        truncate(hints, area.width as usize),
        app.theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn wrap_splits_long_words_and_keeps_newlines() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn truncate_marks_cut_with_ellipsis() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 6), "hello\u{2026}");
        assert_eq!(truncate("x", 0), "");
    }
}
