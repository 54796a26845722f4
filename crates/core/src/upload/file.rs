use std::path::Path;

use super::ValidationError;

/// A local file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    name: String,
    bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, keeping only its file name.
    pub async fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ValidationError::NoFileName(path.to_path_buf()))?
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ValidationError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size in megabytes (1 MB = 1024 * 1024 bytes).
    pub fn size_mb(&self) -> f64 {
        self.size_bytes() as f64 / 1024.0 / 1024.0
    }

    /// Size formatted with two decimals, e.g. `"1.50 MB"`.
    pub fn display_size(&self) -> String {
        format!("{:.2} MB", self.size_mb())
    }

    /// Case-sensitive suffix check against `extension` (e.g. ".pbit").
    pub fn has_extension(&self, extension: &str) -> bool {
        self.name.ends_with(extension)
    }
}
