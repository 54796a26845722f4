use super::{types::Config, ConfigError};

/// Number of timed transitions between a successful upload and completion.
const STAGE_DELAY_COUNT: usize = 4;

/// Validate configuration
/// Currently validates:
/// - Backend URL is http(s) and timeout is not 0
/// - Required extension looks like ".ext"
/// - Exactly four stage delays
/// - Download file stem is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = &config.backend.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "backend.base_url must be an http(s) URL, got '{}'",
            base_url
        )));
    }

    if config.backend.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "backend.timeout_secs cannot be 0".to_string(),
        ));
    }

    let ext = &config.upload.required_extension;
    if !ext.starts_with('.') || ext.len() < 2 {
        return Err(ConfigError::ValidationError(format!(
            "upload.required_extension must look like '.ext', got '{}'",
            ext
        )));
    }

    if config.workflow.stage_delays_ms.len() != STAGE_DELAY_COUNT {
        return Err(ConfigError::ValidationError(format!(
            "workflow.stage_delays_ms needs {} entries, got {}",
            STAGE_DELAY_COUNT,
            config.workflow.stage_delays_ms.len()
        )));
    }

    if config.download.file_stem.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "download.file_stem cannot be empty".to_string(),
        ));
    }

    Ok(())
}
