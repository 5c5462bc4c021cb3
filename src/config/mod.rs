pub mod app_conf;
pub mod mongo_conf;
pub mod policy_conf;
pub mod upload_conf;

pub use app_conf::AppConfig;
pub use mongo_conf::MongoConfig;
pub use policy_conf::PolicyConfig;
pub use upload_conf::UploadConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Read a boolean flag; accepts true/false, 1/0, yes/no, on/off.
pub(crate) fn parse_flag(name: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!("{} must be a boolean, got '{}'", name, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "true").unwrap());
        assert!(parse_flag("X", "ON").unwrap());
        assert!(parse_flag("X", "1").unwrap());
        assert!(!parse_flag("X", "no").unwrap());
        assert!(!parse_flag("X", "").unwrap());
        assert!(parse_flag("X", "maybe").is_err());
    }
}
