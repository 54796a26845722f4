//! HTTP documentation backend.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use tracing::{debug, warn};

use crate::artifact::ArtifactFormat;
use crate::config::BackendConfig;
use crate::upload::CandidateFile;

use super::{download_path, BackendError, DocumentBackend, UploadReceipt, UPLOAD_PATH};

/// Backend reached over plain HTTP.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a new HTTP backend client.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        if config.base_url.trim().is_empty() {
            return Err(BackendError::NotConfigured(
                "backend base URL is required".to_string(),
            ));
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn map_transport(endpoint: &str, e: reqwest::Error) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout {
            endpoint: endpoint.to_string(),
        }
    } else if e.is_connect() {
        BackendError::ConnectionFailed(e.to_string())
    } else {
        BackendError::Http(e)
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn upload(&self, file: &CandidateFile) -> Result<UploadReceipt, BackendError> {
        debug!(
            "Uploading {} ({} bytes) to {}",
            file.name(),
            file.size_bytes(),
            self.url(UPLOAD_PATH)
        );

        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_transport(UPLOAD_PATH, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upload rejected with {}: {}", status, body);
            return Err(BackendError::Status {
                endpoint: UPLOAD_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport(UPLOAD_PATH, e))?;

        Ok(UploadReceipt::from_body(status.as_u16(), &body))
    }

    async fn download(&self, format: ArtifactFormat) -> Result<Vec<u8>, BackendError> {
        let endpoint = download_path(format);

        debug!("Downloading {} from {}", format.label(), self.url(&endpoint));

        let response = self
            .client
            .get(self.url(&endpoint))
            .send()
            .await
            .map_err(|e| map_transport(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Download of {} failed with {}", format.label(), status);
            return Err(BackendError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| map_transport(&endpoint, e))?;

        Ok(body.to_vec())
    }
}
