//! Documentation backend abstraction.
//!
//! The backend parses the uploaded template, generates documentation and
//! publishes it. This side only sees two operations: accept an upload and
//! hand back a generated artifact.

mod http;
mod types;

pub use http::HttpBackend;
pub use types::UploadReceipt;

use async_trait::async_trait;
use thiserror::Error;

use crate::artifact::ArtifactFormat;
use crate::upload::CandidateFile;

/// Path of the upload endpoint.
pub const UPLOAD_PATH: &str = "/upload";

/// Path of the download endpoint for `format`.
pub fn download_path(format: ArtifactFormat) -> String {
    format!("/download/{}", format.extension())
}

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// Request did not finish within the configured timeout.
    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Backend could not be reached.
    #[error("Could not connect to backend: {0}")]
    ConnectionFailed(String),

    /// Any other transport failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Client not configured (bad base URL, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl BackendError {
    /// True when the backend was reached and rejected the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, BackendError::Status { .. })
    }
}

/// Trait for documentation backends.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Upload a template for processing.
    async fn upload(&self, file: &CandidateFile) -> Result<UploadReceipt, BackendError>;

    /// Fetch a generated artifact.
    async fn download(&self, format: ArtifactFormat) -> Result<Vec<u8>, BackendError>;
}
