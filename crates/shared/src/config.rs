//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// CORS configuration.
    #[serde(default)]
    pub cors: CorsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// External booking platform integrations.
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// CORS configuration.
///
/// An empty origin list allows any origin.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins, e.g. `http://localhost:3000`.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of the human readable format.
    #[serde(default)]
    pub json: bool,
}

/// Credentials for one external booking platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformApiConfig {
    /// Base URL of the platform API.
    pub api_url: Option<String>,
    /// API key. The platform sync is disabled while this is unset.
    pub api_key: Option<String>,
}

impl PlatformApiConfig {
    /// Returns true if an API key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// External integrations configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegrationsConfig {
    /// Airbnb API settings.
    #[serde(default)]
    pub airbnb: PlatformApiConfig,
    /// Booking.com API settings.
    #[serde(default)]
    pub booking: PlatformApiConfig,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STAYBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
