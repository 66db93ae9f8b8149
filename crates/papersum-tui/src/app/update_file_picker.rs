use papersum_core::FileCandidate;

use super::{App, InputMode, Screen};
use crate::action::Action;
use crate::tui_event::BackendCommand;

impl App {
    /// Handle input while on the file picker screen.
    pub(super) fn handle_file_picker_action(&mut self, action: Action) {
        match action {
            Action::NavigateBack | Action::OpenFilePicker => {
                self.close_file_picker();
            }
            Action::MoveDown => {
                let max = self.file_picker.entries.len().saturating_sub(1);
                if self.file_picker.cursor < max {
                    self.file_picker.cursor += 1;
                }
            }
            Action::MoveUp => {
                self.file_picker.cursor = self.file_picker.cursor.saturating_sub(1);
            }
            Action::PageDown => {
                let page = self.visible_rows.max(1);
                let max = self.file_picker.entries.len().saturating_sub(1);
                self.file_picker.cursor = (self.file_picker.cursor + page).min(max);
            }
            Action::PageUp => {
                let page = self.visible_rows.max(1);
                self.file_picker.cursor = self.file_picker.cursor.saturating_sub(page);
            }
            Action::GoTop => {
                self.file_picker.cursor = 0;
            }
            Action::GoBottom => {
                self.file_picker.cursor = self.file_picker.entries.len().saturating_sub(1);
            }
            Action::DrillIn | Action::ToggleExpand => {
                if self.file_picker.enter_directory() {
                    return;
                }
                if let Some(entry) = self.file_picker.current() {
                    let candidate = FileCandidate::from_path(&entry.path);
                    self.load_file(candidate);
                }
            }
            Action::ToggleHelp => self.show_help = true,
            _ => {}
        }
    }

    fn close_file_picker(&mut self) {
        self.screen = Screen::Main;
        self.input_mode = InputMode::Normal;
    }

    /// Gate `candidate` and, if accepted, ask the backend to read it.
    ///
    /// The picker closes either way; a rejected file leaves the buffer alone
    /// and shows an error toast.
    pub(crate) fn load_file(&mut self, candidate: FileCandidate) {
        self.close_file_picker();
        if self.analysis.check_file(&candidate, &mut self.notifier) {
            self.send_command(BackendCommand::ReadFile(candidate));
        }
    }
}
