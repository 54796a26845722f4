//! In-memory artifact sink.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::artifact::ArtifactSink;

/// Keeps saved artifacts in memory, in save order.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: RwLock<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every save, including repeated saves of the same name.
    pub async fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.read().await.clone()
    }

    /// Latest bytes saved under `file_name`.
    pub async fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.saved
            .read()
            .await
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, bytes)| bytes.clone())
    }
}

#[async_trait]
impl ArtifactSink for MemorySink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        self.saved
            .write()
            .await
            .push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
