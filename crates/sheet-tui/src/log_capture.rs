//! Log capture for the debug console
//!
//! Records accepted by the capture filter go into a bounded ring that the
//! drop-down console renders. Terminal echo goes through `env_logger` and is
//! switched off while the alternate screen is up, since the TUI draws on the
//! same stderr.

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lines kept for the console; older ones are dropped
const CAPACITY: usize = 1000;

/// Crates whose Debug output is captured when RUST_LOG is unset
const CAPTURED_MODULES: [&str; 3] = ["sheet_tui", "sheet_source", "sheet_records"];

static TERMINAL_ECHO: AtomicBool = AtomicBool::new(true);

/// A captured log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            timestamp: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        }
    }
}

/// Bounded ring of log lines shared by the logger and the console view
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    // A panic while holding the lock leaves the ring itself intact
    fn entries(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries();
        if entries.len() >= CAPACITY {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Copy of up to `count` entries starting at `start`, oldest first
    pub fn window(&self, start: usize, count: usize) -> Vec<LogEntry> {
        self.entries().iter().skip(start).take(count).cloned().collect()
    }
}

/// Enable or silence terminal output of log records
pub fn set_terminal_echo(enabled: bool) {
    TERMINAL_ECHO.store(enabled, Ordering::Relaxed);
}

fn terminal_echo() -> bool {
    TERMINAL_ECHO.load(Ordering::Relaxed)
}

/// Logger feeding the console ring, with optional terminal echo
struct CaptureLogger {
    buffer: LogBuffer,
    capture: env_logger::Logger,
    terminal: env_logger::Logger,
}

impl CaptureLogger {
    fn new(buffer: LogBuffer) -> Self {
        // RUST_LOG replaces the default capture filter entirely
        let capture = if std::env::var_os("RUST_LOG").is_some() {
            env_logger::Builder::from_default_env().build()
        } else {
            let mut builder = env_logger::Builder::new();
            for module in CAPTURED_MODULES {
                builder.filter_module(module, LevelFilter::Debug);
            }
            builder.build()
        };

        // Only reaches the screen before startup and after shutdown
        let terminal = env_logger::Builder::new()
            .filter_level(LevelFilter::Warn)
            .build();

        Self {
            buffer,
            capture,
            terminal,
        }
    }

    fn echoes(&self, metadata: &Metadata) -> bool {
        terminal_echo() && self.terminal.enabled(metadata)
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.capture.enabled(metadata) || self.echoes(metadata)
    }

    fn log(&self, record: &Record) {
        if self.capture.matches(record) {
            self.buffer.push(LogEntry::from_record(record));
        }
        if self.echoes(record.metadata()) && self.terminal.matches(record) {
            self.terminal.log(record);
        }
    }

    fn flush(&self) {
        self.terminal.flush();
    }
}

/// Install the capture logger and return the ring the console reads
///
/// Call once, before anything logs. Without RUST_LOG the console shows
/// this workspace's crates at Debug; `RUST_LOG=debug` also brings in
/// dependencies, `RUST_LOG=sheet_tui::task=debug` narrows to one module.
pub fn init_logger() -> LogBuffer {
    let buffer = LogBuffer::default();

    if log::set_boxed_logger(Box::new(CaptureLogger::new(buffer.clone()))).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
    log::info!("Debug console ready, press ` to open it");

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: Level::Info,
            target: "sheet_tui".into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_buffer_drops_oldest_when_full() {
        let buffer = LogBuffer::default();
        for i in 0..CAPACITY + 5 {
            buffer.push(entry(&format!("line {i}")));
        }

        assert_eq!(buffer.len(), CAPACITY);
        let edges = buffer.window(0, 1);
        assert_eq!(edges[0].message, "line 5");
        let last = buffer.window(CAPACITY - 1, 10);
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].message, format!("line {}", CAPACITY + 4));
    }

    #[test]
    fn test_clear_empties_shared_clones() {
        let buffer = LogBuffer::default();
        let view = buffer.clone();
        buffer.push(entry("a"));
        assert_eq!(view.len(), 1);

        view.clear();
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_records_from_workspace_are_captured() {
        // An explicit RUST_LOG replaces the default capture filter
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let buffer = LogBuffer::default();
        let logger = CaptureLogger::new(buffer.clone());

        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("sheet_tui::task")
                .args(format_args!("Fetch #1 started"))
                .build(),
        );

        let entries = buffer.window(0, 10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "Fetch #1 started");
        assert_eq!(entries[0].target, "sheet_tui::task");
    }

    #[test]
    fn test_terminal_echo_is_silenced_while_tui_runs() {
        let logger = CaptureLogger::new(LogBuffer::default());
        let metadata = Metadata::builder()
            .level(Level::Error)
            .target("sheet_tui::task")
            .build();

        set_terminal_echo(false);
        let silenced = !logger.echoes(&metadata);
        set_terminal_echo(true);
        let restored = logger.echoes(&metadata);

        assert!(silenced);
        assert!(restored);
    }
}
