// src/util/log.rs

//! File logger. The TUI owns the terminal, so diagnostics go to one file per severity.
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::{LazyLock, OnceLock};
use chrono::Local;

/// Directory used when `MACROPAD_LOG_DIR` is not set.
pub const DEFAULT_LOG_DIR: &str = "./logs";

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Global logger instance
pub static LOGGER: LazyLock<Logger> = LazyLock::new(|| {
    Logger::new(log_dir()).expect("Failed to initialize logger")
});

/// The log directory: `MACROPAD_LOG_DIR`, else `./logs`.
pub fn log_dir() -> PathBuf {
    std::env::var_os("MACROPAD_LOG_DIR")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Log severity levels
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    fn as_str(&self) -> &str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn filename(&self) -> &str {
        match self {
            LogLevel::Error => "error.log",
            LogLevel::Warn => "warn.log",
            LogLevel::Info => "info.log",
            LogLevel::Debug => "debug.log",
        }
    }
}

/// Logger that writes to separate files by severity
pub struct Logger {
    log_dir: PathBuf,
    error_file: Mutex<File>,
    warn_file: Mutex<File>,
    info_file: Mutex<File>,
    debug_file: Mutex<File>,
}

impl Logger {
    /// Create a new logger in `log_dir`, truncating any previous session's files
    pub fn new(log_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        DEBUG_ENABLED.get_or_init(|| {
            std::env::var("DEBUG").unwrap_or_default() == "true"
        });

        let log_dir = log_dir.as_ref().to_path_buf();
        create_dir_all(&log_dir)?;

        let open = |level: LogLevel| File::create(log_dir.join(level.filename()));

        Ok(Self {
            error_file: Mutex::new(open(LogLevel::Error)?),
            warn_file: Mutex::new(open(LogLevel::Warn)?),
            info_file: Mutex::new(open(LogLevel::Info)?),
            debug_file: Mutex::new(open(LogLevel::Debug)?),
            log_dir,
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Write a log entry to the appropriate file
    fn write_log(&self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let formatted = format!("[{}] [{}] {}\n", timestamp, level.as_str(), message);

        let file = match level {
            LogLevel::Error => &self.error_file,
            LogLevel::Warn => &self.warn_file,
            LogLevel::Info => &self.info_file,
            LogLevel::Debug => &self.debug_file,
        };

        if let Ok(mut file) = file.lock() {
            let _ = file.write_all(formatted.as_bytes());
            let _ = file.flush();
        }
    }

    pub fn error(&self, message: &str) {
        self.write_log(LogLevel::Error, message);
    }

    pub fn warn(&self, message: &str) {
        self.write_log(LogLevel::Warn, message);
    }

    pub fn info(&self, message: &str) {
        self.write_log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.write_log(LogLevel::Debug, message);
    }
}

/// Convenience macro for error logging with formatting
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.error(&message);
    }};
}

/// Convenience macro for warning logging with formatting
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.warn(&message);
    }};
}

/// Convenience macro for info logging with formatting
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::util::log::LOGGER.info(&message);
    }};
}

/// Debug entries are only written when `DEBUG=true`
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if *$crate::util::log::DEBUG_ENABLED.get().unwrap_or(&false) {
            let message = format!($($arg)*);
            $crate::util::log::LOGGER.debug(&message);
        }
    }};
}
