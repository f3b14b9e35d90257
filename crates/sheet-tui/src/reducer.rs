use ::log::debug;

use crate::{actions::Action, effect::Effect, state::*, theme::Theme};

/// Root reducer that delegates to sub-reducers based on action type
/// Pure function: takes state and action, returns new state and effects to run
pub fn reduce(mut state: AppState, action: &Action) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    state.ui = ui_reducer(state.ui, action);
    state.table = table_reducer(state.table, action, &mut effects);
    state = theme_reducer(state, action);
    state.debug_console = debug_console_reducer(state.debug_console, action);
    state = input_focus_reducer(state);

    (state, effects)
}

/// The search box is only drawn for a loaded table; anywhere else keys
/// must reach the shortcuts (`r` on the failure panel)
fn input_focus_reducer(mut state: AppState) -> AppState {
    if state.ui.input_mode == InputMode::Search && state.table.load_status != LoadStatus::Ready {
        state.ui.input_mode = InputMode::Normal;
    }
    state
}

/// UI state reducer - handles UI-related actions
fn ui_reducer(mut state: UiState, action: &Action) -> UiState {
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleShortcuts => {
            state.show_shortcuts = !state.show_shortcuts;
            state.shortcuts_scroll = 0;
        }
        Action::ScrollShortcutsUp => {
            state.shortcuts_scroll = state.shortcuts_scroll.saturating_sub(1);
        }
        Action::ScrollShortcutsDown => {
            if state.shortcuts_scroll < state.shortcuts_max_scroll {
                state.shortcuts_scroll += 1;
            }
        }
        Action::FocusSearch => {
            state.input_mode = InputMode::Search;
        }
        Action::BlurSearch => {
            state.input_mode = InputMode::Normal;
        }
        Action::TickSpinner => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
        }
        _ => {}
    }

    state
}

/// Records, query and load status
///
/// Every branch that touches the records or the query goes through
/// `TableViewState` so the filtered set is recomputed.
fn table_reducer(
    mut state: TableViewState,
    action: &Action,
    effects: &mut Vec<Effect>,
) -> TableViewState {
    match action {
        Action::Bootstrap => {
            let request_id = state.begin_request();
            effects.push(Effect::batch(vec![
                Effect::LoadEnvFile,
                Effect::InitializeSource,
                Effect::FetchRecords { request_id },
            ]));
        }
        Action::Retry => {
            // Retry is only offered from the failure panel
            if matches!(state.load_status, LoadStatus::Failed(_)) {
                let request_id = state.begin_request();
                effects.push(Effect::FetchRecords { request_id });
            }
        }
        Action::RecordsLoaded(request_id, result) => {
            if !state.is_latest_request(*request_id) {
                debug!(
                    "Ignoring stale fetch #{} (latest is #{})",
                    request_id, state.request_seq
                );
                return state;
            }
            match result {
                Ok(records) => {
                    state.set_records(records.clone());
                    state.load_status = LoadStatus::Ready;
                }
                Err(message) => {
                    // Keep whatever data set was loaded before
                    state.load_status = LoadStatus::Failed(message.clone());
                }
            }
        }
        Action::SetQuery(query) => {
            state.set_query(query.clone());
        }
        Action::SearchInput(c) => {
            let mut query = state.query.clone();
            query.push(*c);
            state.set_query(query);
        }
        Action::SearchBackspace => {
            let mut query = state.query.clone();
            if query.pop().is_some() {
                state.set_query(query);
            }
        }
        Action::ClearQuery => {
            if !state.query.is_empty() {
                state.set_query(String::new());
            }
        }
        Action::NavigateToNextRow => {
            let len = state.result_count();
            if len > 0 {
                let i = match state.table_state.selected() {
                    Some(i) if i + 1 < len => i + 1,
                    _ => 0,
                };
                state.table_state.select(Some(i));
            }
        }
        Action::NavigateToPreviousRow => {
            let len = state.result_count();
            if len > 0 {
                let i = match state.table_state.selected() {
                    Some(i) if i > 0 => i - 1,
                    _ => len - 1,
                };
                state.table_state.select(Some(i));
            }
        }
        Action::NavigateToFirstRow => {
            if state.result_count() > 0 {
                state.table_state.select(Some(0));
            }
        }
        Action::NavigateToLastRow => {
            let len = state.result_count();
            if len > 0 {
                state.table_state.select(Some(len - 1));
            }
        }
        _ => {}
    }

    state
}

/// Theme reducer - the mode and the derived palette change together
fn theme_reducer(mut state: AppState, action: &Action) -> AppState {
    if let Action::ToggleTheme = action {
        state.theme_mode = state.theme_mode.toggled();
        state.theme = Theme::for_mode(state.theme_mode);
    }
    state
}

/// Debug console reducer - handles debug console actions
fn debug_console_reducer(mut state: DebugConsoleState, action: &Action) -> DebugConsoleState {
    match action {
        Action::ToggleDebugConsole => {
            state.is_open = !state.is_open;
        }
        Action::ScrollDebugConsoleUp => {
            state.auto_scroll = false;
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
        }
        Action::ScrollDebugConsoleDown => {
            state.auto_scroll = false;
            state.scroll_offset = state.scroll_offset.saturating_add(1);
        }
        Action::PageDebugConsoleDown => {
            state.auto_scroll = false;
            state.scroll_offset = state.scroll_offset.saturating_add(state.viewport_height);
        }
        Action::ToggleDebugAutoScroll => {
            state.auto_scroll = !state.auto_scroll;
        }
        Action::ClearDebugLogs => {
            state.logs.clear();
            state.scroll_offset = 0;
        }
        Action::UpdateDebugConsoleViewport(height) => {
            state.viewport_height = *height;
        }
        _ => {}
    }

    state
}
