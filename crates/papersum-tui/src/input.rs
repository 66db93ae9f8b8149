use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::Editing => map_key_editing(key),
                InputMode::EditingMultiline => map_key_editing_multiline(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::MoveDown,
        MouseEventKind::ScrollUp => Action::MoveUp,
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Char('d') if ctrl => Action::PageDown,
        KeyCode::Char('u') if ctrl => Action::PageUp,
        KeyCode::Char('o') if ctrl => Action::OpenFilePicker,
        KeyCode::Char('s') if ctrl => Action::Submit,
        KeyCode::Char('l') if ctrl => Action::ClearInput,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Char('i') | KeyCode::Char('/') => Action::StartEditing,
        KeyCode::Char(' ') => Action::ToggleExpand,
        KeyCode::Enter => Action::DrillIn,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('o') => Action::ShowLink,
        KeyCode::Char('[') => Action::PrevResultTab,
        KeyCode::Char(']') => Action::NextResultTab,
        KeyCode::Char('?') | KeyCode::F(1) => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Single-line input (search box): Enter submits.
fn map_key_editing(key: &KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::StopEditing,
        KeyCode::Enter => Action::Submit,
        KeyCode::Tab => Action::NextTab,
        KeyCode::BackTab => Action::PrevTab,
        KeyCode::Char('l') if ctrl => Action::ClearInput,
        KeyCode::Char('u') if ctrl => Action::ClearInput,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::Backspace,
        _ => Action::None,
    }
}

/// Multi-line input (analysis buffer): Enter inserts a newline, Ctrl+S submits.
fn map_key_editing_multiline(key: &KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Action::StopEditing,
        KeyCode::Enter if ctrl => Action::Submit,
        KeyCode::Enter => Action::Newline,
        KeyCode::Char('s') if ctrl => Action::Submit,
        KeyCode::Char('o') if ctrl => Action::OpenFilePicker,
        KeyCode::Char('l') if ctrl => Action::ClearInput,
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Tab => Action::InputChar('\t'),
        _ => Action::None,
    }
}
