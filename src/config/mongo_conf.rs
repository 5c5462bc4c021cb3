use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// MongoDB configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name; falls back to the URI's default database
    pub database: Option<String>,
    /// Username for authentication (optional)
    pub username: Option<String>,
    /// Password for authentication (optional)
    pub password: Option<String>,
    /// Connection pool size
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    pub const FALLBACK_DATABASE: &'static str = "agora";

    /// Load MongoDB configuration from environment variables
    ///
    /// Expected environment variables:
    /// - MONGODB_URI (or MONGO_URI): MongoDB connection URI (required)
    /// - MONGO_DATABASE: Database name (optional)
    /// - MONGO_USERNAME / MONGO_PASSWORD: credentials (optional)
    /// - MONGO_POOL_SIZE: Connection pool size (defaults to 10)
    /// - MONGO_CONNECTION_TIMEOUT: Connection timeout in seconds (defaults to 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let uri = env::var("MONGODB_URI")
            .or_else(|_| env::var("MONGO_URI"))
            .map_err(|_| {
                error!("MONGODB_URI environment variable not found");
                ConfigError::EnvVarNotFound("MONGODB_URI".to_string())
            })?;

        let database = env::var("MONGO_DATABASE").ok();
        match database {
            Some(ref db) => debug!("MongoDB database: {}", db),
            None => debug!("No MONGO_DATABASE set, using the URI default"),
        }

        let username = env::var("MONGO_USERNAME").ok();
        let password = env::var("MONGO_PASSWORD").ok();

        let pool_size = env::var("MONGO_POOL_SIZE")
            .unwrap_or_else(|_| {
                warn!("MONGO_POOL_SIZE not set, using default: 10");
                "10".to_string()
            })
            .parse::<u32>()
            .map_err(|_| {
                error!("Invalid MONGO_POOL_SIZE value");
                ConfigError::InvalidValue("Invalid MONGO_POOL_SIZE value".to_string())
            })?;
        debug!("MongoDB pool size: {}", pool_size);

        let connection_timeout_secs = env::var("MONGO_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| {
                warn!("MONGO_CONNECTION_TIMEOUT not set, using default: 5 seconds");
                "5".to_string()
            })
            .parse::<u64>()
            .map_err(|_| {
                error!("Invalid MONGO_CONNECTION_TIMEOUT value");
                ConfigError::InvalidValue("Invalid MONGO_CONNECTION_TIMEOUT value".to_string())
            })?;
        debug!("MongoDB connection timeout: {} seconds", connection_timeout_secs);

        let config = MongoConfig {
            uri,
            database,
            username,
            password,
            pool_size,
            connection_timeout_secs,
        };

        config.validate()?;
        info!("MongoDB configuration loaded successfully");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.is_empty() {
            return Err(ConfigError::ValidationError("MongoDB URI cannot be empty".to_string()));
        }

        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            return Err(ConfigError::ValidationError(
                "MongoDB URI must start with mongodb:// or mongodb+srv://".to_string(),
            ));
        }

        if let Some(ref db) = self.database {
            if db.is_empty() {
                return Err(ConfigError::ValidationError("MongoDB database cannot be empty if set".to_string()));
            }
        }

        if self.pool_size == 0 {
            return Err(ConfigError::ValidationError("MongoDB pool size must be greater than 0".to_string()));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError("MongoDB connection timeout must be greater than 0".to_string()));
        }

        if self.username.is_some() != self.password.is_some() {
            return Err(ConfigError::ValidationError(
                "MONGO_USERNAME and MONGO_PASSWORD must be set together".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: None,
            username: None,
            password: None,
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MongoConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, None);
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.connection_timeout_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_scheme() {
        let config = MongoConfig { uri: "http://localhost".to_string(), ..MongoConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_database() {
        let config = MongoConfig { database: Some(String::new()), ..MongoConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_pool_size() {
        let config = MongoConfig { pool_size: 0, ..MongoConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_half_credentials() {
        let config = MongoConfig { username: Some("admin".to_string()), ..MongoConfig::default() };
        assert!(config.validate().is_err());
        let config = MongoConfig {
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            ..MongoConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
