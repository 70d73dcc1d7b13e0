//! Error types shared by the parsers, the estimator and the config loader.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Lines that do not match the log grammar are not errors; they come back as
/// `None` from the parsers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to spawn pi worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("pi worker {0} panicked")]
    WorkerPanicked(usize),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// A `key = value` config text failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid config line {line_number}: '{line}' (expected 'key = value')")]
    MissingEquals { line_number: usize, line: String },

    #[error("empty key in config line {line_number}: '{line}'")]
    EmptyKey { line_number: usize, line: String },
}

impl ConfigError {
    /// 1-based line number of the offending line.
    pub fn line_number(&self) -> usize {
        match self {
            ConfigError::MissingEquals { line_number, .. }
            | ConfigError::EmptyKey { line_number, .. } => *line_number,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
