//! Error taxonomy for dataset inspection.
//!
//! Every failure is terminal for the invocation and carries the dataset path
//! together with the underlying cause. Callers that only care about the broad
//! category can match on [`InspectError::kind`].

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use snafu::Snafu;

pub type InspectResult<T> = std::result::Result<T, InspectError>;

/// Broad failure category, independent of the backing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Access,
    Format,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum InspectError {
    #[snafu(display("Dataset file not found: {}: {source}", path.display()))]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Dataset file not accessible: {}: {source}", path.display()))]
    Access {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Not a valid parquet file: {}: {source}", path.display()))]
    Footer {
        path: PathBuf,
        source: ParquetError,
    },

    #[snafu(display("Failed to decode row data from {}: {source}", path.display()))]
    Decode {
        path: PathBuf,
        source: ArrowError,
    },

    #[snafu(display("Invalid parquet metadata in {}: {detail}", path.display()))]
    Metadata { path: PathBuf, detail: String },
}

impl InspectError {
    /// Classify an I/O failure raised while opening `path`.
    pub(crate) fn from_open(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => InspectError::NotFound { path, source },
            _ => InspectError::Access { path, source },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InspectError::NotFound { .. } => ErrorKind::NotFound,
            InspectError::Access { .. } => ErrorKind::Access,
            InspectError::Footer { .. }
            | InspectError::Decode { .. }
            | InspectError::Metadata { .. } => ErrorKind::Format,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            InspectError::NotFound { path, .. }
            | InspectError::Access { path, .. }
            | InspectError::Footer { path, .. }
            | InspectError::Decode { path, .. }
            | InspectError::Metadata { path, .. } => path,
        }
    }
}
