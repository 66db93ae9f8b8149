use papersum_core::Notification;
use papersum_core::present::{arxiv_url, is_truncatable};

use super::{App, InputMode, Screen, Tab};
use crate::action::Action;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                self.notifier.tick();
                return false;
            }
            Action::Resize(_w, h) => {
                self.visible_rows = Self::body_rows(h);
                return false;
            }
            _ => {}
        }

        // Help overlay swallows everything except its own dismissal
        if self.show_help {
            if matches!(action, Action::ToggleHelp | Action::NavigateBack) {
                self.show_help = false;
            }
            return false;
        }

        if self.screen == Screen::FilePicker {
            self.handle_file_picker_action(action);
            return false;
        }

        match action {
            Action::ToggleHelp => self.show_help = true,
            Action::NextTab | Action::PrevTab => self.switch_tab(self.tab.next()),
            Action::StartEditing => self.start_editing(),
            Action::StopEditing => self.input_mode = InputMode::Normal,
            Action::InputChar(ch) => match self.tab {
                Tab::Search => self.search.query.push(ch),
                Tab::Analyze => self.analysis.insert_char(ch),
            },
            Action::Backspace => match self.tab {
                Tab::Search => {
                    self.search.query.pop();
                }
                Tab::Analyze => self.analysis.delete_char(),
            },
            Action::Newline => {
                if self.tab == Tab::Analyze {
                    self.analysis.insert_char('\n');
                }
            }
            Action::ClearInput => match self.tab {
                Tab::Search => self.search.query.clear(),
                Tab::Analyze => self.analysis.clear_text(),
            },
            Action::Submit => match self.tab {
                Tab::Search => self.submit_search(),
                Tab::Analyze => self.submit_analysis(),
            },
            Action::OpenFilePicker => {
                self.tab = Tab::Analyze;
                let dir = self.file_picker.current_dir.clone();
                self.open_file_picker_at(&dir);
            }
            Action::NextResultTab | Action::PrevResultTab => {
                if self.tab == Tab::Analyze {
                    self.result_tab = self.result_tab.toggle();
                    self.result_scroll = 0;
                }
            }
            Action::MoveDown => self.move_cursor(1),
            Action::MoveUp => self.move_cursor(-1),
            Action::PageDown => self.move_cursor(self.page_size() as isize),
            Action::PageUp => self.move_cursor(-(self.page_size() as isize)),
            Action::GoTop => match self.tab {
                Tab::Search => self.paper_cursor = 0,
                Tab::Analyze => self.result_scroll = 0,
            },
            Action::GoBottom => match self.tab {
                Tab::Search => self.paper_cursor = self.paper_count().saturating_sub(1),
                Tab::Analyze => self.result_scroll = u16::MAX / 2,
            },
            Action::ToggleExpand => self.toggle_selected_abstract(),
            Action::DrillIn => {
                if self.tab == Tab::Search && self.paper_count() > 0 {
                    self.toggle_selected_abstract();
                } else {
                    self.start_editing();
                }
            }
            Action::ShowLink => self.show_selected_link(),
            Action::NavigateBack
            | Action::None
            | Action::Quit
            | Action::Tick
            | Action::Resize(..) => {}
        }
        false
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.input_mode = InputMode::Normal;
    }

    fn start_editing(&mut self) {
        self.input_mode = match self.tab {
            Tab::Search => InputMode::Editing,
            Tab::Analyze => InputMode::EditingMultiline,
        };
    }

    fn page_size(&self) -> usize {
        // Paper cards are several rows tall.
        match self.tab {
            Tab::Search => (self.visible_rows / 6).max(1),
            Tab::Analyze => self.visible_rows.max(1),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.tab {
            Tab::Search => {
                let max = self.paper_count().saturating_sub(1);
                self.paper_cursor = self.paper_cursor.saturating_add_signed(delta).min(max);
            }
            Tab::Analyze => {
                let delta = delta.clamp(i16::MIN as isize, i16::MAX as isize) as i16;
                self.result_scroll = self.result_scroll.saturating_add_signed(delta);
            }
        }
    }

    pub(super) fn submit_search(&mut self) {
        let Some(ticket) = self.search.begin_current() else {
            return;
        };
        self.input_mode = InputMode::Normal;
        self.send_command(BackendCommand::Search(ticket));
    }

    pub(super) fn submit_analysis(&mut self) {
        let Some(ticket) = self.analysis.begin() else {
            return;
        };
        self.result_scroll = 0;
        self.send_command(BackendCommand::Analyze(ticket));
    }

    fn toggle_selected_abstract(&mut self) {
        if self.tab != Tab::Search || self.search.is_loading() {
            return;
        }
        let Some(paper) = self
            .search
            .papers()
            .and_then(|papers| papers.get(self.paper_cursor))
        else {
            return;
        };
        if is_truncatable(&paper.abstract_text) {
            self.expansion.toggle(&paper.id);
        }
    }

    fn show_selected_link(&mut self) {
        if self.tab != Tab::Search {
            return;
        }
        let Some(paper) = self
            .search
            .papers()
            .and_then(|papers| papers.get(self.paper_cursor))
        else {
            return;
        };
        let url = arxiv_url(&paper.arxiv_id);
        self.notifier.push(Notification::success("View on arXiv", url));
    }
}
