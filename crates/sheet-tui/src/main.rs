use anyhow::{Context, Result};
use ratatui::{
    crossterm::{
        self,
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    },
    prelude::*,
    widgets::*,
};
use sheet_source::RecordSource;
use std::{collections::VecDeque, sync::Arc, time::Duration};
use tokio::sync::mpsc;

use ::log::{debug, error, info};

use crate::actions::Action;
use crate::config::Config;
use crate::effect::execute_effect;
use crate::state::*;
use crate::store::Store;
use crate::task::{BackgroundTask, TaskResult, start_task_worker};
use crate::view_models::table::TableViewModel;

mod actions;
mod config;
mod effect;
mod log_capture;
mod reducer;
mod shortcuts;
mod state;
mod store;
mod task;
mod theme;
mod view_models;
mod views;

pub struct App {
    // Redux store - centralized state management
    pub store: Store,
    // Communication channels
    pub action_tx: mpsc::UnboundedSender<Action>,
    pub task_tx: mpsc::UnboundedSender<BackgroundTask>,
    // Created during bootstrap, after .env is loaded
    pub source: Option<Arc<dyn RecordSource>>,
}

impl App {
    fn new(
        action_tx: mpsc::UnboundedSender<Action>,
        task_tx: mpsc::UnboundedSender<BackgroundTask>,
        initial_state: AppState,
    ) -> App {
        App {
            store: Store::new(initial_state),
            action_tx,
            task_tx,
            source: None,
        }
    }
}

pub fn initialize_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best effort, the original hook still has to print the panic
        let _ = shutdown();
        original_hook(panic_info);
    }));
}

// The TUI draws on stderr, so log echo is muted while it owns the screen
fn startup() -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stderr(), crossterm::terminal::EnterAlternateScreen)?;
    log_capture::set_terminal_echo(false);
    Ok(())
}

fn shutdown() -> Result<()> {
    crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen)?;
    crossterm::terminal::disable_raw_mode()?;
    log_capture::set_terminal_echo(true);
    Ok(())
}

async fn update(app: &mut App, msg: Action) -> Result<()> {
    // While the help panel is open, navigation scrolls it
    let msg = if app.store.state().ui.show_shortcuts {
        match msg {
            Action::NavigateToNextRow => Action::ScrollShortcutsDown,
            Action::NavigateToPreviousRow => Action::ScrollShortcutsUp,
            Action::Quit => Action::ToggleShortcuts,
            Action::ToggleShortcuts
            | Action::ToggleDebugConsole
            | Action::RecordsLoaded(..)
            | Action::TickSpinner => msg,
            _ => return Ok(()),
        }
    } else {
        msg
    };

    // Action -> effects -> follow-up actions, until nothing is left
    let mut queue = VecDeque::from([msg]);
    while let Some(action) = queue.pop_front() {
        for effect in app.store.dispatch(action) {
            queue.extend(execute_effect(app, effect).await?);
        }
    }

    Ok(())
}

/// What the UI looks like when a key is mapped to an action
#[derive(Debug, Clone, Copy, Default)]
struct KeyEventContext {
    input_mode: InputMode,
    debug_console_open: bool,
    show_shortcuts: bool,
}

impl KeyEventContext {
    fn from_state(state: &AppState) -> Self {
        Self {
            input_mode: state.ui.input_mode,
            debug_console_open: state.debug_console.is_open,
            show_shortcuts: state.ui.show_shortcuts,
        }
    }
}

/// Forward key presses to the main loop
///
/// Keys are mapped to actions there, against the state left by every
/// earlier key, so a key typed right after `/` already lands in the query.
fn start_event_handler(tx: mpsc::UnboundedSender<KeyEvent>) -> tokio::task::JoinHandle<()> {
    let tick_rate = Duration::from_millis(250);

    tokio::spawn(async move {
        loop {
            if !event::poll(tick_rate).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }

            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(key).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(err) => debug!("Failed to read terminal event: {}", err),
            }
        }
    })
}

fn key_to_action(state: &AppState, key: KeyEvent) -> Action {
    handle_key_event(key, &KeyEventContext::from_state(state))
}

fn handle_key_event(key: KeyEvent, ctx: &KeyEventContext) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Debug console captures keys while open
    if ctx.debug_console_open {
        return match key.code {
            KeyCode::Char('`') | KeyCode::Esc => Action::ToggleDebugConsole,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDebugConsoleDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollDebugConsoleUp,
            KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDebugConsoleDown,
            KeyCode::Char('a') => Action::ToggleDebugAutoScroll,
            KeyCode::Char('c') => Action::ClearDebugLogs,
            _ => Action::None,
        };
    }

    if ctx.show_shortcuts && key.code == KeyCode::Esc {
        return Action::ToggleShortcuts;
    }

    // Search box has focus: every printable key edits the query
    if ctx.input_mode == InputMode::Search {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::BlurSearch,
            KeyCode::Backspace => Action::SearchBackspace,
            KeyCode::Char('u') if ctrl => Action::ClearQuery,
            KeyCode::Char(c) if !ctrl => Action::SearchInput(c),
            _ => Action::None,
        };
    }

    shortcuts::find_action_for_key(&key)
}

/// Convert TaskResult to Action - the single place where task results become actions
fn result_to_action(result: TaskResult) -> Action {
    match result {
        TaskResult::RecordsLoaded(request_id, result) => Action::RecordsLoaded(request_id, result),
    }
}

async fn run_with_log_buffer(config: Config, log_buffer: log_capture::LogBuffer) -> Result<()> {
    let mut t = Terminal::new(CrosstermBackend::new(std::io::stderr()))?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel();
    let (task_tx, task_rx) = mpsc::unbounded_channel();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel();

    let initial_state = AppState {
        debug_console: DebugConsoleState {
            logs: log_buffer,
            ..DebugConsoleState::default()
        },
        ..AppState::from_config(config)
    };
    let mut app = App::new(action_tx.clone(), task_tx, initial_state);

    let (key_tx, mut key_rx) = mpsc::unbounded_channel();
    let event_task = start_event_handler(key_tx);
    let worker_task = start_task_worker(task_rx, result_tx);

    info!("Starting up");
    app.action_tx
        .send(Action::Bootstrap)
        .context("Failed to send bootstrap action")?;

    loop {
        t.draw(|f| ui(f, &mut app))?;

        // Results first so a finished fetch is never starved by key repeat
        let maybe_action = tokio::time::timeout(Duration::from_millis(100), async {
            tokio::select! {
                biased;
                Some(result) = result_rx.recv() => Some(result_to_action(result)),
                Some(key) = key_rx.recv() => Some(key_to_action(app.store.state(), key)),
                Some(action) = action_rx.recv() => Some(action),
                else => None
            }
        })
        .await;

        match maybe_action {
            Ok(Some(action)) => {
                if let Err(err) = update(&mut app, action).await {
                    error!("Error updating app: {:#}", err);
                    app.store.state_mut().ui.should_quit = true;
                }
            }
            Ok(None) => break, // Channel closed
            Err(_) => {
                let _ = app.action_tx.send(Action::TickSpinner);
            }
        }

        if app.store.state().ui.should_quit {
            debug!("Quit requested");
            break;
        }
    }

    event_task.abort();
    worker_task.abort();

    Ok(())
}

fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let theme = app.store.state().theme.clone();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.bg_primary)),
        area,
    );

    let vm = {
        let state = app.store.state();
        TableViewModel::from_state(&state.table, state.ui.input_mode, state.theme_mode)
    };

    match &vm.status {
        LoadStatus::Pending => {
            let frame = app.store.state().ui.spinner_frame;
            views::splash_screen::render_loading(f, area, &theme, frame);
        }
        LoadStatus::Failed(message) => {
            views::splash_screen::render_error(f, area, &theme, message);
        }
        LoadStatus::Ready => {
            views::table::render_table_screen(f, area, app, &vm);
        }
    }

    if app.store.state().ui.show_shortcuts {
        let max_scroll = views::help::render_shortcuts_panel(
            f,
            area,
            app.store.state().ui.shortcuts_scroll,
            &theme,
        );
        app.store.state_mut().ui.shortcuts_max_scroll = max_scroll;
    }

    if app.store.state().debug_console.is_open {
        let viewport_height =
            views::debug_console::render_debug_console(f, area, &app.store.state().debug_console, &theme);
        if viewport_height != app.store.state().debug_console.viewport_height {
            app.store
                .dispatch(Action::UpdateDebugConsoleViewport(viewport_height));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger first so config loading is captured in the debug console
    let log_buffer = log_capture::init_logger();
    let config = Config::load();

    initialize_panic_handler();
    startup().context("Failed to initialize terminal")?;
    let result = run_with_log_buffer(config, log_buffer).await;
    shutdown().context("Failed to restore terminal")?;
    result
}
