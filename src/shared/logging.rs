//! Logging setup
//!
//! All code logs through the `log` facade. With a log file configured the
//! records go to a timestamped, append-only file; otherwise `env_logger`
//! writes to stderr and honours `RUST_LOG`.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use log::{LevelFilter, Log, Metadata, Record};
use thiserror::Error;

use super::config::Config;

/// Logging initialization error
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Cannot open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger already initialized")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Simple file-based logger
pub struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
}

impl FileLogger {
    /// Open (or create) `path` for appending
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self, std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{}] {:<5} {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Global file logger instance
static FILE_LOGGER: OnceLock<FileLogger> = OnceLock::new();

/// Parse a level name, falling back to `info`
pub fn level_filter(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Install the process-wide logger described by `config`
pub fn init(config: &Config) -> Result<(), LoggingError> {
    let level = level_filter(&config.log_level);

    match &config.log_file {
        Some(path) => {
            let logger = FileLogger::open(path, level)?;
            let logger = FILE_LOGGER.get_or_init(|| logger);
            log::set_logger(logger)?;
            log::set_max_level(level);
        }
        None => {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(level.as_str().to_lowercase()),
            )
            .try_init()?;
        }
    }

    log::debug!("=== appdeck log started ===");
    Ok(())
}
