//! Error types for cuebuild operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating, reading, rebuilding, or writing a
/// presentation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid presentation data: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("No presentation payload found inside {}", .0.display())]
    MissingDocument(PathBuf),

    #[error("Failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
