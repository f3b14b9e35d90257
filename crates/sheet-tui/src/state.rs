use ratatui::widgets::TableState;
use sheet_records::{Record, filter_records};

use crate::{
    config::Config,
    theme::{Theme, ThemeMode},
};

/// Root application state following Redux pattern
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
    pub table: TableViewState,
    pub debug_console: DebugConsoleState,
    pub config: Config,
    pub theme_mode: ThemeMode,
    pub theme: Theme,
}

impl AppState {
    /// Initial state for a given config (theme follows the configured mode)
    pub fn from_config(config: Config) -> Self {
        let theme_mode = config.theme;
        Self {
            config,
            theme_mode,
            theme: Theme::for_mode(theme_mode),
            ..Self::default()
        }
    }
}

/// Where typed characters go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keystrokes edit the search query
    Search,
}

/// UI-specific state (shortcuts panel, spinner, input focus, quit flag)
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub show_shortcuts: bool,
    pub shortcuts_scroll: usize,
    pub shortcuts_max_scroll: usize,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

/// Lifecycle of the record fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

/// Records, query and the derived filtered set
///
/// `filtered` is only ever written by `refilter`, so it always equals
/// `filter_records(&records, &query)`.
#[derive(Debug, Clone, Default)]
pub struct TableViewState {
    pub load_status: LoadStatus,
    pub records: Vec<Record>,
    pub query: String,
    filtered: Vec<Record>,
    /// Id of the most recently issued fetch; older results are stale
    pub request_seq: u64,
    pub table_state: TableState,
}

impl TableViewState {
    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn result_count(&self) -> usize {
        self.filtered.len()
    }

    /// Replace the data set and re-apply the current query
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.refilter();
        let first = if self.filtered.is_empty() { None } else { Some(0) };
        self.table_state.select(first);
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
        self.refilter();
    }

    /// Start a new fetch cycle and return its request id
    pub fn begin_request(&mut self) -> u64 {
        self.request_seq += 1;
        self.load_status = LoadStatus::Pending;
        self.request_seq
    }

    pub fn is_latest_request(&self, request_id: u64) -> bool {
        request_id == self.request_seq
    }

    fn refilter(&mut self) {
        self.filtered = filter_records(&self.records, &self.query);

        // Keep the row cursor inside the new result set
        let len = self.filtered.len();
        let selected = match self.table_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }
}

/// Debug console state (Quake-style drop-down console)
#[derive(Debug, Clone)]
pub struct DebugConsoleState {
    pub is_open: bool,
    pub scroll_offset: usize,
    pub auto_scroll: bool,   // Follow new logs as they arrive
    pub height_percent: u16, // Height as percentage of screen
    pub logs: crate::log_capture::LogBuffer,
    pub viewport_height: usize, // Updated during rendering for page down
}

impl Default for DebugConsoleState {
    fn default() -> Self {
        Self {
            is_open: false,
            scroll_offset: 0,
            auto_scroll: true,
            height_percent: 50,
            logs: crate::log_capture::LogBuffer::default(),
            viewport_height: 20,
        }
    }
}
