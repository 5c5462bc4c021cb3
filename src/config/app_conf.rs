use std::env;

use crate::config::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// `PORT` wins over `APP_PORT`; both are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT").or_else(|_| env::var("APP_PORT")) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("Invalid port '{}'", raw)))?,
            Err(_) => 3000,
        };
        Ok(AppConfig { host, port })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
