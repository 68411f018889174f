//! Aggregator error types.

use thiserror::Error;

use crate::core::Location;
use crate::sources::BackendError;

/// Error while building or querying a scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to scan location `{location}`")]
    Backend {
        location: Location,
        #[source]
        source: BackendError,
    },

    #[error("at least one suffix is required to filter resources")]
    EmptySuffixes,
}

impl ScanError {
    /// The location that failed, if the error came from a backend.
    pub fn location(&self) -> Option<&Location> {
        match self {
            ScanError::Backend { location, .. } => Some(location),
            ScanError::EmptySuffixes => None,
        }
    }
}
