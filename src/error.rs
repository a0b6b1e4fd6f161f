use std::io;

use thiserror::Error;

/// Failures that end a session before (or instead of) the edit loop.
///
/// Save failures are not in here: they are reported in the status line and
/// the session carries on.
#[derive(Debug, Error)]
pub enum BitflipError {
    #[error("error opening file: {0}")]
    Open(#[source] io::Error),

    #[error("error while reading contents of file: {0}")]
    Read(#[source] io::Error),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, BitflipError>;
