/// User-level intents produced by [`crate::input::map_event`] and consumed by
/// [`crate::app::App::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Tick,
    Resize(u16, u16),

    // Navigation
    NextTab,
    PrevTab,
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,
    NavigateBack,
    DrillIn,

    // Text input
    StartEditing,
    StopEditing,
    InputChar(char),
    Backspace,
    Newline,
    ClearInput,
    Submit,

    // Results
    ToggleExpand,
    ShowLink,
    NextResultTab,
    PrevResultTab,

    // Files
    OpenFilePicker,
    ToggleHelp,
}
