//! Application configuration.
//!
//! All configuration is read once at startup and kept immutable afterwards;
//! nothing in the application mutates or re-registers configuration per
//! request (the Google OAuth settings included).

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session configuration.
    pub session: SessionConfig,
    /// Photo upload configuration.
    #[serde(default)]
    pub uploads: UploadConfig,
    /// Google OAuth configuration (optional; federated login is disabled
    /// when absent).
    #[serde(default)]
    pub google: Option<GoogleConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frontend base URL, used for CORS and OAuth redirects.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Session token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session tokens. Must be non-empty.
    pub secret: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_max_age")]
    pub max_age_secs: u64,
}

/// Photo upload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory where uploaded photos are stored.
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_bytes: default_max_upload_bytes(),
        }
    }
}

/// Google OAuth client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Redirect URI registered with Google.
    pub redirect_uri: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_session_max_age() -> u64 {
    // 7 days
    60 * 60 * 24 * 7
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

const fn default_max_upload_bytes() -> u64 {
    2 * 1024 * 1024
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `PETGALLERY_ENV`)
    /// 3. Environment variables with `PETGALLERY_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("PETGALLERY_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PETGALLERY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("PETGALLERY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_bind_defaults() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]

                [database]
                url = "postgres://localhost/petgallery"

                [session]
                secret = "test-secret"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.frontend_url, "http://localhost:5173");
        assert!(config.google.is_none());
    }
}
