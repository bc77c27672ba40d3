//! File logging
//!
//! The terminal belongs to the UI, so `tracing` output goes to a log file
//! instead: either the path given on the command line or `weatherview.log`
//! in the platform data directory.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Name of the log file inside the data directory
const LOG_FILE_NAME: &str = "weatherview.log";

/// Errors that can occur while setting up logging
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log directory or file could not be created
    #[error("Cannot open log file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The level filter did not parse
    #[error("Invalid log level '{0}'")]
    InvalidLevel(String),

    /// A global subscriber was already installed
    #[error("Logging was already initialized")]
    AlreadyInitialized,
}

/// Default log file location, if a data directory can be determined
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "weatherview")
        .map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Picks the log file: the explicit path, else the default location
pub fn resolve_log_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(default_log_path)
}

/// Builds the level filter from a directive such as `info` or `weatherview=debug`
pub fn level_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(level).map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}

/// Opens (creating parent directories) the log file for appending
pub fn open_log_file(path: &Path) -> Result<fs::File, LoggingError> {
    let io_error = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)
}

/// Installs the global tracing subscriber writing to the log file
///
/// # Returns
/// * `Ok(Some(path))` with the file being written to
/// * `Ok(None)` if no log location could be determined (logging disabled)
/// * `Err(LoggingError)` if the file or filter is unusable
pub fn init(explicit: Option<&Path>, level: &str) -> Result<Option<PathBuf>, LoggingError> {
    let Some(path) = resolve_log_path(explicit) else {
        return Ok(None);
    };

    let filter = level_filter(level)?;
    let file = open_log_file(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;

    Ok(Some(path))
}
