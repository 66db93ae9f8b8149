mod backend;
mod update;
mod update_file_picker;


use std::path::{Path, PathBuf};

use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use papersum_core::present::ExpansionMap;
use papersum_core::{AnalysisController, FileCandidate, Notifier, SearchController, ingest};

use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    Analyze,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Search, Tab::Analyze];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Search => "Search Papers",
            Tab::Analyze => "Analyze Text",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Search => Tab::Analyze,
            Tab::Analyze => Tab::Search,
        }
    }
}

/// Sub-tabs of the analysis result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    Summary,
    Insights,
}

impl ResultTab {
    pub fn title(self) -> &'static str {
        match self {
            ResultTab::Summary => "Summary",
            ResultTab::Insights => "Insights",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ResultTab::Summary => ResultTab::Insights,
            ResultTab::Insights => ResultTab::Summary,
        }
    }
}

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    FilePicker,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Single-line query input.
    Editing,
    /// Multi-line analysis buffer.
    EditingMultiline,
}

/// State for the file picker screen.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then files).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
}

/// A single entry in the file picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// Passes the text-file gate and can be loaded.
    pub is_text: bool,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::in_dir(current_dir)
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let mut state = Self {
            current_dir: dir.into(),
            entries: Vec::new(),
            cursor: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_text: false,
            });
        }

        match std::fs::read_dir(&self.current_dir) {
            Ok(read_dir) => {
                let mut dirs = Vec::new();
                let mut files = Vec::new();

                for entry in read_dir.flatten() {
                    let path = entry.path();
                    let name = entry.file_name().to_string_lossy().to_string();

                    if name.starts_with('.') {
                        continue;
                    }

                    if path.is_dir() {
                        dirs.push(FileEntry {
                            name,
                            path,
                            is_dir: true,
                            is_text: false,
                        });
                    } else {
                        let is_text = ingest::is_accepted(&FileCandidate::from_path(&path));
                        files.push(FileEntry {
                            name,
                            path,
                            is_dir: false,
                            is_text,
                        });
                    }
                }

                dirs.sort_by_key(|e| e.name.to_lowercase());
                files.sort_by_key(|e| e.name.to_lowercase());

                entries.extend(dirs);
                entries.extend(files);
            }
            Err(e) => {
                tracing::warn!(dir = %self.current_dir.display(), error = %e, "cannot list directory");
            }
        }

        self.entries = entries;
        self.cursor = 0;
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    pub fn text_file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_text).count()
    }
}

impl Default for FilePickerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    pub show_help: bool,
    /// Height of the body area (set on resize, used for page up/down).
    pub visible_rows: usize,

    pub search: SearchController,
    pub expansion: ExpansionMap,
    /// Selected row in the paper list.
    pub paper_cursor: usize,

    pub analysis: AnalysisController,
    pub result_tab: ResultTab,
    pub result_scroll: u16,

    pub notifier: Notifier,
    pub file_picker: FilePickerState,

    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            screen: Screen::Main,
            tab: Tab::Search,
            input_mode: InputMode::Editing,
            theme,
            tick: 0,
            should_quit: false,
            show_help: false,
            visible_rows: 20,
            search: SearchController::new(),
            expansion: ExpansionMap::new(),
            paper_cursor: 0,
            analysis: AnalysisController::new(),
            result_tab: ResultTab::Summary,
            result_scroll: 0,
            notifier: Notifier::default(),
            file_picker: FilePickerState::new(),
            backend_cmd_tx: None,
        }
    }

    /// Hand a command to the backend task. Without a backend (tests, or after
    /// shutdown) the command is dropped and logged.
    pub(crate) fn send_command(&self, cmd: BackendCommand) {
        match &self.backend_cmd_tx {
            Some(tx) => {
                if let Err(e) = tx.send(cmd) {
                    tracing::warn!(command = ?e.0, "backend channel closed");
                }
            }
            None => tracing::debug!(command = ?cmd, "no backend attached"),
        }
    }

    /// Number of papers in the current result list.
    pub fn paper_count(&self) -> usize {
        self.search.papers().map_or(0, <[_]>::len)
    }

    /// Open the picker rooted at `dir`.
    pub fn open_file_picker_at(&mut self, dir: &Path) {
        self.file_picker = FilePickerState::in_dir(dir);
        self.screen = Screen::FilePicker;
        self.input_mode = InputMode::Normal;
    }

    /// Render the entire UI.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        crate::view::render_header(f, self, header_area);

        match self.screen {
            Screen::FilePicker => crate::view::file_picker::render_in(f, self, body_area),
            Screen::Main => match self.tab {
                Tab::Search => crate::view::search::render_in(f, self, body_area),
                Tab::Analyze => crate::view::analyze::render_in(f, self, body_area),
            },
        }

        crate::view::render_footer(f, self, footer_area);
        crate::view::toast::render(f, self, body_area);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
    }

    /// Body height excluding header and footer for a terminal of `height` rows.
    pub(crate) fn body_rows(height: u16) -> usize {
        (height as usize).saturating_sub(2)
    }
}
