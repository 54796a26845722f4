//! Mock documentation backend for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::artifact::ArtifactFormat;
use crate::backend::{download_path, BackendError, DocumentBackend, UploadReceipt, UPLOAD_PATH};
use crate::upload::CandidateFile;

/// A recorded backend call for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Upload { file_name: String, size_bytes: u64 },
    Download { format: ArtifactFormat },
}

/// Mock implementation of the DocumentBackend trait.
///
/// Provides controllable behavior for testing:
/// - Configurable upload/download status codes
/// - Configurable artifact bodies
/// - Simulated latency
/// - Call recording
///
/// Clones share the same state, so a test can keep one handle while the
/// orchestrator owns another.
///
/// # Example
///
/// ```rust,ignore
/// use docpilot_core::testing::MockBackend;
///
/// let backend = MockBackend::new();
/// backend.set_upload_status(500).await;
///
/// // ... submit through an orchestrator ...
/// assert_eq!(backend.upload_count().await, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    /// Status returned by uploads.
    upload_status: Arc<RwLock<u16>>,
    /// Status returned by downloads, per format (200 when missing).
    download_status: Arc<RwLock<HashMap<ArtifactFormat, u16>>>,
    /// Artifact bodies.
    artifacts: Arc<RwLock<HashMap<ArtifactFormat, Vec<u8>>>>,
    /// Delay applied to every call before answering.
    latency: Arc<RwLock<Duration>>,
    /// If set, the next call fails with this error.
    next_error: Arc<RwLock<Option<BackendError>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a mock that accepts uploads and serves placeholder artifacts.
    pub fn new() -> Self {
        let mut artifacts = HashMap::new();
        for format in ArtifactFormat::ALL {
            artifacts.insert(format, format!("mock {} body", format.label()).into_bytes());
        }

        Self {
            upload_status: Arc::new(RwLock::new(200)),
            download_status: Arc::new(RwLock::new(HashMap::new())),
            artifacts: Arc::new(RwLock::new(artifacts)),
            latency: Arc::new(RwLock::new(Duration::ZERO)),
            next_error: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub async fn set_upload_status(&self, status: u16) {
        *self.upload_status.write().await = status;
    }

    pub async fn set_download_status(&self, format: ArtifactFormat, status: u16) {
        self.download_status.write().await.insert(format, status);
    }

    pub async fn set_artifact(&self, format: ArtifactFormat, bytes: Vec<u8>) {
        self.artifacts.write().await.insert(format, bytes);
    }

    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = latency;
    }

    /// Configure the next call to fail with the given error.
    pub async fn fail_next_with(&self, error: BackendError) {
        *self.next_error.write().await = Some(error);
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn upload_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedCall::Upload { .. }))
            .count()
    }

    pub async fn download_count(&self, format: ArtifactFormat) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(c, RecordedCall::Download { format: f } if *f == format))
            .count()
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.read().await;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl DocumentBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn upload(&self, file: &CandidateFile) -> Result<UploadReceipt, BackendError> {
        self.calls.write().await.push(RecordedCall::Upload {
            file_name: file.name().to_string(),
            size_bytes: file.size_bytes(),
        });
        self.simulate_latency().await;

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let status = *self.upload_status.read().await;
        if !(200..300).contains(&status) {
            return Err(BackendError::Status {
                endpoint: UPLOAD_PATH.to_string(),
                status,
            });
        }

        Ok(UploadReceipt::from_body(
            status,
            br#"{"message": "File processed successfully"}"#,
        ))
    }

    async fn download(&self, format: ArtifactFormat) -> Result<Vec<u8>, BackendError> {
        self.calls
            .write()
            .await
            .push(RecordedCall::Download { format });
        self.simulate_latency().await;

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let status = self
            .download_status
            .read()
            .await
            .get(&format)
            .copied()
            .unwrap_or(200);
        if !(200..300).contains(&status) {
            return Err(BackendError::Status {
                endpoint: download_path(format),
                status,
            });
        }

        Ok(self
            .artifacts
            .read()
            .await
            .get(&format)
            .cloned()
            .unwrap_or_default())
    }
}
