use sheet_records::Record;

/// Action enum - represents all possible actions in the application
/// Actions are dispatched to the reducer to update state
#[derive(Debug, Clone)]
pub enum Action {
    // Data loading
    Bootstrap,
    Retry, // Only honored after a failed load

    // Search
    SetQuery(String),
    SearchInput(char),
    SearchBackspace,
    ClearQuery,
    FocusSearch,
    BlurSearch,

    // Table navigation
    NavigateToNextRow,
    NavigateToPreviousRow,
    NavigateToFirstRow,
    NavigateToLastRow,

    // Presentation
    ToggleTheme,
    ToggleShortcuts,
    ScrollShortcutsUp,
    ScrollShortcutsDown,
    TickSpinner, // Increment spinner animation frame

    // Background task completion notifications
    RecordsLoaded(u64, Result<Vec<Record>, String>), // request_id, result

    // Debug console (Quake-style drop-down)
    ToggleDebugConsole,
    ScrollDebugConsoleUp,
    ScrollDebugConsoleDown,
    PageDebugConsoleDown,
    ToggleDebugAutoScroll,
    ClearDebugLogs,

    // Viewport height updates (for page down scrolling)
    UpdateDebugConsoleViewport(usize),

    Quit,
    None,
}
