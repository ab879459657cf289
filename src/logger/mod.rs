//! In-crate logger used by the library and the `myschool` binary.
//!
//! Cargo features gate what can ever be printed: `log-info`, `log-debug`,
//! `verbose` and `file-logging`. Within those limits the level, debug and
//! verbose switches are set at runtime from CLI flags or the config file.

use std::fmt::Arguments;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Mutex;

/// Logging levels, most severe first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Always shown
    Error = 1,
    /// Always shown
    Warn = 2,
    /// Needs the `log-info` feature
    Info = 3,
    /// Needs the `log-debug` feature and [`enable_debug`]
    Debug = 4,
}

impl Level {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }

    const fn compiled_in(self) -> bool {
        match self {
            Self::Error | Self::Warn => true,
            Self::Info => cfg!(feature = "log-info"),
            Self::Debug => cfg!(feature = "log-debug"),
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// Runtime switches shared by every logging call
struct LoggerState {
    level: AtomicU8,
    debug: AtomicBool,
    verbose: AtomicBool,
    file: Mutex<Option<File>>,
}

const fn initial_level() -> Level {
    if cfg!(feature = "log-debug") {
        Level::Debug
    } else if cfg!(feature = "log-info") {
        Level::Info
    } else {
        Level::Warn
    }
}

static STATE: LoggerState = LoggerState {
    level: AtomicU8::new(initial_level() as u8),
    debug: AtomicBool::new(true),
    verbose: AtomicBool::new(false),
    file: Mutex::new(None),
};

/// Set the global log level.
pub fn set_level(level: Level) {
    STATE.level.store(level as u8, Ordering::SeqCst);
}

/// Current global log level.
#[must_use]
pub fn level() -> Level {
    Level::from_u8(STATE.level.load(Ordering::SeqCst))
}

/// Parse a level name (case-insensitive); accepts `err` and `warning` aliases.
#[must_use]
pub fn parse_level(level: &str) -> Option<Level> {
    match level.trim().to_ascii_lowercase().as_str() {
        "error" | "err" => Some(Level::Error),
        "warn" | "warning" => Some(Level::Warn),
        "info" => Some(Level::Info),
        "debug" => Some(Level::Debug),
        _ => None,
    }
}

/// Parse level from string and set it. Returns `true` on success.
#[must_use]
pub fn set_level_from_str(level: &str) -> bool {
    parse_level(level).map(set_level).is_some()
}

/// Allow debug messages at runtime (still needs the `log-debug` feature).
pub fn enable_debug() {
    STATE.debug.store(true, Ordering::SeqCst);
}

/// Whether debug messages can currently be printed.
#[must_use]
pub fn is_debug_enabled() -> bool {
    cfg!(feature = "log-debug") && STATE.debug.load(Ordering::SeqCst)
}

/// Turn on [`verbose!`](crate::verbose) output (still needs the `verbose` feature).
pub fn enable_verbose() {
    STATE.verbose.store(true, Ordering::SeqCst);
}

/// Whether verbose output is currently on.
#[must_use]
pub fn is_verbose_enabled() -> bool {
    cfg!(feature = "verbose") && STATE.verbose.load(Ordering::SeqCst)
}

/// Send log lines to `path` instead of the terminal.
///
/// The file is appended to and its parent directories are created. Returns
/// `false` when the file cannot be opened or `file-logging` is disabled.
#[must_use]
pub fn init_file_logging(path: &Path) -> bool {
    if !cfg!(feature = "file-logging") {
        return false;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return false;
    };
    STATE.file.lock().is_ok_and(|mut slot| {
        *slot = Some(file);
        true
    })
}

/// Returns whether the line went to the log file
fn write_to_file(prefix: &str, msg: &str) -> bool {
    let Ok(mut slot) = STATE.file.lock() else {
        return false;
    };
    let Some(file) = slot.as_mut() else {
        return false;
    };
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let _ = writeln!(file, "{stamp} {prefix} {msg}");
    let _ = file.flush();
    true
}

fn should_log(level: Level) -> bool {
    level.compiled_in()
        && level <= self::level()
        && (level != Level::Debug || is_debug_enabled())
}

/// Internal logging dispatcher used by the exported macros.
pub fn log_impl(level: Level, args: Arguments) {
    if !should_log(level) {
        return;
    }
    let prefix = level.prefix();
    let msg = args.to_string();
    if write_to_file(prefix, &msg) {
        return;
    }
    match level {
        Level::Error | Level::Warn => eprintln!("{prefix} {msg}"),
        Level::Info | Level::Debug => println!("{prefix} {msg}"),
    }
}

#[macro_export]
/// Logs an error-level message.
macro_rules! error { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message.
macro_rules! warn  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message.
macro_rules! info  { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message.
macro_rules! debug { ($($arg:tt)*) => { $crate::logger::log_impl($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints to stdout when verbose output is on. Never written to log files.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose_enabled() { println!($($arg)*); }
    }
}
