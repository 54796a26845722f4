use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

/// Destination for downloaded artifacts (the "save as" step).
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Persist `bytes` under `file_name` and return where it went.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf>;
}

/// Saves artifacts into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ArtifactSink for DirectorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        debug!("Saved {} bytes to {:?}", bytes.len(), path);
        Ok(path)
    }
}
