//! Domain error type shared by the three desk tools
//!
//! Library functions return `DeskError`; the CLI layer wraps it in
//! `anyhow::Error` with extra context.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results carrying a [`DeskError`]
pub type DeskResult<T> = Result<T, DeskError>;

#[derive(Debug, Error)]
pub enum DeskError {
    /// User-supplied value failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// A dataset file could not be parsed
    #[error("cannot load {path}: line {line}: {message}")]
    Dataset {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Linear regression is undefined for the given points
    #[error("regression failed: {0}")]
    Regression(String),

    /// Chart backend reported an error
    #[error("render failed: {0}")]
    Render(String),

    /// No ticket with this card id exists
    #[error("ticket '{0}' does not exist")]
    UnknownTicket(String),

    /// A line of the tasks file is not `text|priority`
    #[error("malformed task on line {line}: {message}")]
    MalformedTask { line: usize, message: String },

    /// Task index outside the list
    #[error("no task at position {0}")]
    NoSuchTask(usize),

    #[error(transparent)]
    Sql(#[from] rusqlite::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl DeskError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
