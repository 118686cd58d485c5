use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a single input line could not be turned into a video record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing key '{0}'")]
    MissingField(&'static str),
    #[error("unterminated string for key '{0}'")]
    Unterminated(&'static str),
    #[error("play count '{0}' is not a non-negative integer")]
    InvalidCount(String),
}

/// Error type for argument, file and record failures.
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("expected <INPUT> <OUTPUT> <MODE>\n{0}")]
    ArgumentCount(String),
    #[error(transparent)]
    Arguments(#[from] clap::Error),
    #[error("cannot open '{}': {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: RecordError,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("serializing report failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrendError {
    pub fn file_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TrendError::FileOpen {
            path: path.into(),
            source,
        }
    }
}
