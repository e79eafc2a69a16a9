//! Logging through the [`log`] facade.
//!
//! The library only emits log records; nothing is printed unless the host application installs
//! a logger. The command-line binary installs [`Logger`].
use std::{
    io::{self, IsTerminal},
    sync::atomic::{AtomicBool, Ordering},
};

use crossterm::style::{Color, Stylize};
pub use log::{Level, LevelFilter, debug, error, info, warn};
use log::{Log, Metadata, Record};

/// Set once an error record has been written.
static ERROR_LOGGED: AtomicBool = AtomicBool::new(false);

/// Writes `LEVEL message` lines to stderr, coloured if stderr is a terminal.
pub struct Logger;

/// The label and colour with which a level is written.
fn label(level: Level) -> (&'static str, Color) {
    match level {
        Level::Error => ("ERROR", Color::Red),
        Level::Warn => ("WARNING", Color::Yellow),
        Level::Info => ("INFO", Color::Blue),
        Level::Debug => ("DEBUG", Color::Magenta),
        Level::Trace => ("TRACE", Color::Green),
    }
}

impl Logger {
    /// Install the logger with the given maximum level.
    pub fn init(max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
        static LOGGER: Logger = Logger;
        log::set_logger(&LOGGER)?;
        log::set_max_level(max_level);
        Ok(())
    }

    /// Whether an error has been logged since the logger was installed.
    pub fn has_error() -> bool {
        ERROR_LOGGED.load(Ordering::Relaxed)
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level = record.level();
        if level == Level::Error {
            ERROR_LOGGED.store(true, Ordering::Relaxed);
        }

        let (label, colour) = label(level);
        if io::stderr().is_terminal() {
            eprintln!("{} {}", label.with(colour), record.args());
        } else {
            eprintln!("{label} {}", record.args());
        }
    }

    fn flush(&self) {}
}
