//! TOML file configuration structures.
//!
//! These structs directly map to the `pubev-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Database configuration section.
///
/// The connection URL itself comes from the `DATABASE_URL` environment
/// variable; only pool sizing lives in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[database]
max_connections = 4
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.database.max_connections, 4);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let config: FileConfig = toml::from_str("[server]\n").unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
    }
}
