//! Configuration validation.

use crate::error::ConfigError;
use crate::filter::FilterTable;

use super::Config;

impl Config {
    /// Check that the level names and the filter spec parse.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        FilterTable::parse(&self.filters.channels, &self.filters.default_level).map_err(|e| {
            ConfigError::ValidationError(format!("filters: {e}"))
        })?;

        if self.output.files.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(ConfigError::ValidationError(
                "output.files must not contain empty paths".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_default_level() {
        let mut config = Config::default();
        config.filters.default_level = "loud".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_validate_rejects_bad_channel_spec() {
        let mut config = Config::default();
        config.filters.channels = "APP:info,DB".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("filters"));
    }

    #[test]
    fn test_validate_rejects_empty_file_path() {
        let mut config = Config::default();
        config.output.files = vec![PathBuf::new()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.files"));
    }
}
