use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure inside the file dialog, before a selection reaches the session.
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("cannot list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while a command moves text between the session and disk.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid UTF-8 text", path.display())]
    NotUtf8 { path: PathBuf },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
