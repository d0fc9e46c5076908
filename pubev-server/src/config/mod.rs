//! Configuration module for pubev-server.
//!
//! Handles loading configuration from a TOML file with CLI argument
//! overrides. The database URL is environment-only and never written to
//! the config file.

pub mod file;

use crate::config::file::FileConfig;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, falling back to defaults if it is absent
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<FileConfig, ConfigError> {
        let mut config = if self.config_path.exists() {
            let config_content = std::fs::read_to_string(&self.config_path)?;
            toml::from_str(&config_content)?
        } else {
            tracing::warn!(
                path = %self.config_path.display(),
                "Config file not found, using defaults"
            );
            FileConfig::default()
        };

        // Apply CLI overrides
        if let Some(listen) = self.listen_override {
            config.server.listen = listen;
        }

        // Validate the configuration
        self.validate(&config)?;

        Ok(config)
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let loader = ConfigLoader::new("/nonexistent/pubev-config.toml", None);
        let config = loader.load().unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn listen_override_wins() {
        let listen: SocketAddr = "127.0.0.1:9999".parse().unwrap();
        let loader = ConfigLoader::new("/nonexistent/pubev-config.toml", Some(listen));
        let config = loader.load().unwrap();
        assert_eq!(config.server.listen, listen);
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let loader = ConfigLoader::new("/nonexistent/pubev-config.toml", None);
        let mut config = FileConfig::default();
        config.database.max_connections = 0;
        let err = loader.validate(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
