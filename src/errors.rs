//! Error types
//!
//! The simulation engine itself never fails: every odd line has a defined
//! outcome. [`SimError`] covers the surfaces around it, namely command-line
//! configuration, loading the source file, and navigating tick history.

use std::path::PathBuf;
use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// No source file on the command line
    #[error("No input file provided")]
    MissingSource,

    #[error("File '{}' not found", .0.display())]
    SourceNotFound(PathBuf),

    /// Unknown flag or bad flag value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tick history would grow past its memory budget
    #[error("Snapshot memory limit exceeded: {current} + {requested} > {limit}")]
    SnapshotLimitExceeded {
        current: usize,
        requested: usize,
        limit: usize,
    },

    /// Stepping outside the recorded history, or before `start`
    #[error("{0}")]
    History(String),
}

impl SimError {
    /// Errors that only mean "nothing more to do here"
    pub fn is_history(&self) -> bool {
        matches!(self, SimError::History(_))
    }
}
