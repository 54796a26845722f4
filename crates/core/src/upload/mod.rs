//! Upload control: pick one template file, validate it, confirm it.
//!
//! Nothing here touches the network. A confirmed file is handed to the
//! caller, which passes it on to the workflow orchestrator.

mod control;
mod file;

pub use control::{SelectionSource, UploadControl};
pub use file::CandidateFile;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while selecting a file.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// File name does not carry the required extension.
    #[error("Invalid file type: {file_name} (expected a {expected} file)")]
    InvalidExtension { file_name: String, expected: String },

    /// File could not be read from disk.
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path has no usable file name.
    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),
}
