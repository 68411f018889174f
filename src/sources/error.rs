//! Backend scan errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while scanning one location's backing medium.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to walk directory `{}`", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read zip archive `{}`", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("location path is not a directory: `{}`", path.display())]
    NotADirectory { path: PathBuf },
}

impl BackendError {
    /// The path on disk the error relates to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            BackendError::Io { path, .. }
            | BackendError::Walk { path, .. }
            | BackendError::Zip { path, .. }
            | BackendError::NotADirectory { path } => path,
        }
    }
}
