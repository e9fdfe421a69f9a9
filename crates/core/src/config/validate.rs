use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - ffmpeg path is not empty
/// - Transcoder timeout is not 0
/// - Copy buffer size is not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.transcoder.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "transcoder.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if config.transcoder.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "transcoder.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.copier.buffer_size == 0 {
        return Err(ConfigError::ValidationError(
            "copier.buffer_size cannot be 0".to_string(),
        ));
    }

    Ok(())
}
