use std::{env, path::PathBuf};
use tracing::{debug, warn};

use crate::config::ConfigError;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded images are written to and served from.
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl UploadConfig {
    /// Expected environment variables:
    /// - UPLOAD_DIR: upload directory (defaults to `uploads`)
    /// - UPLOAD_MAX_BYTES: largest accepted file (defaults to 5 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        let dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        debug!("Upload directory: {}", dir);

        let max_bytes = match env::var("UPLOAD_MAX_BYTES") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue(format!("Invalid UPLOAD_MAX_BYTES value '{}'", raw)))?,
            Err(_) => {
                warn!("UPLOAD_MAX_BYTES not set, using default: {}", DEFAULT_MAX_UPLOAD_BYTES);
                DEFAULT_MAX_UPLOAD_BYTES
            }
        };

        let config = UploadConfig { dir: PathBuf::from(dir), max_bytes };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("UPLOAD_DIR cannot be empty".to_string()));
        }
        if self.max_bytes == 0 {
            return Err(ConfigError::ValidationError("UPLOAD_MAX_BYTES must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            dir: PathBuf::from("uploads"),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = UploadConfig::default();
        assert_eq!(config.dir, PathBuf::from("uploads"));
        assert_eq!(config.max_bytes, 5 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_limit() {
        let config = UploadConfig { max_bytes: 0, ..UploadConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_dir() {
        let config = UploadConfig { dir: PathBuf::new(), ..UploadConfig::default() };
        assert!(config.validate().is_err());
    }
}
