use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "audiomirror.toml";

/// Environment variable prefix, e.g. `AUDIOMIRROR_TRANSCODER__FFMPEG_PATH`
const ENV_PREFIX: &str = "AUDIOMIRROR_";

fn base_figment() -> Figment {
    Figment::from(Serialized::defaults(Config::default()))
}

fn extract(figment: Figment) -> Result<Config, ConfigError> {
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    extract(base_figment().merge(Toml::file(path)))
}

/// Load `audiomirror.toml` if present, otherwise defaults, plus environment overrides
pub fn load_default_config() -> Result<Config, ConfigError> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() {
        load_config(path)
    } else {
        extract(base_figment())
    }
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[transcoder]
timeout_secs = 30
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.transcoder.timeout_secs, 30);
    }

    #[test]
    fn test_load_config_from_str_invalid() {
        let result = load_config_from_str("[transcoder\ntimeout_secs = 30");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/audiomirror.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[transcoder]
ffmpeg_path = "/usr/bin/ffmpeg"

[copier]
buffer_size = 4096
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.transcoder.ffmpeg_path.to_str().unwrap(), "/usr/bin/ffmpeg");
        assert_eq!(config.transcoder.timeout_secs, 3600);
        assert_eq!(config.copier.buffer_size, 4096);
    }
}
