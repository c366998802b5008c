//! Error taxonomy of a delineation run.

use std::path::PathBuf;

use thiserror::Error;

use crate::infrastructure::json_writer::WriteError;

/// Errors that abort a run. Missing data during traversal is never an error.
#[derive(Debug, Error)]
pub enum DelineateError {
    /// The output location could not be created.
    #[error("could not create output directory {path}: {source}")]
    Setup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output stream could not be opened.
    #[error("could not open stream {path}: {source}")]
    Stream {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The frontend could not provide a syntax tree.
    #[error("frontend error: {0}")]
    Frontend(String),

    /// The configuration file is missing or malformed.
    #[error("configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Two batch inputs would write to the same unit directory.
    #[error("inputs {first} and {second} both write to {directory}")]
    Batch {
        directory: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    /// The worker pool for a batch run could not be built.
    #[error("thread pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Writing a stream failed.
    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DelineateError {
    pub fn frontend(message: impl Into<String>) -> Self {
        Self::Frontend(message.into())
    }
}

pub type Result<T> = std::result::Result<T, DelineateError>;
