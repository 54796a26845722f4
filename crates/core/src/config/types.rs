use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Documentation backend connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Backend origin (e.g., "http://localhost:5000")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. Generation can take minutes.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout() -> u64 {
    300
}

/// Client-side upload validation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    #[serde(default = "default_extension")]
    pub required_extension: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            required_extension: default_extension(),
        }
    }
}

fn default_extension() -> String {
    ".pbit".to_string()
}

/// Stage progression timing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Delays before entering extracting, generating, uploading-result
    /// and complete, in that order.
    #[serde(default = "default_stage_delays")]
    pub stage_delays_ms: Vec<u64>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            stage_delays_ms: default_stage_delays(),
        }
    }
}

impl WorkflowConfig {
    pub fn stage_delays(&self) -> Vec<Duration> {
        self.stage_delays_ms
            .iter()
            .copied()
            .map(Duration::from_millis)
            .collect()
    }
}

fn default_stage_delays() -> Vec<u64> {
    vec![1000, 2000, 3000, 2000]
}

/// Where downloaded artifacts land
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File name without extension; the format supplies the extension.
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_stem: default_file_stem(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_stem() -> String {
    "documentation".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.timeout_secs, 300);
        assert_eq!(config.upload.required_extension, ".pbit");
        assert_eq!(config.workflow.stage_delays_ms, vec![1000, 2000, 3000, 2000]);
        assert_eq!(config.download.output_dir.to_str().unwrap(), ".");
        assert_eq!(config.download.file_stem, "documentation");
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
[backend]
base_url = "https://docs.example.com"
timeout_secs = 30

[upload]
required_extension = ".pbix"

[workflow]
stage_delays_ms = [10, 20, 30, 20]

[download]
output_dir = "/srv/out"
file_stem = "report"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.base_url, "https://docs.example.com");
        assert_eq!(config.backend.timeout(), Duration::from_secs(30));
        assert_eq!(config.upload.required_extension, ".pbix");
        assert_eq!(
            config.workflow.stage_delays(),
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(30),
                Duration::from_millis(20),
            ]
        );
        assert_eq!(config.download.file_stem, "report");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml = r#"
[backend]
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.backend.timeout_secs, 5);
    }
}
