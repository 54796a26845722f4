//! Types for backend responses.

use serde::Serialize;

/// What the backend said when it accepted an upload.
///
/// The body is not interpreted beyond being kept for logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReceipt {
    /// HTTP status of the accepted upload.
    pub status: u16,
    /// Response body, when it was JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl UploadReceipt {
    /// Build a receipt from a raw body, tolerating empty or non-JSON bodies.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let body = if body.is_empty() {
            None
        } else {
            serde_json::from_slice(body).ok()
        };
        Self { status, body }
    }
}
