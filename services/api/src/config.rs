//! Service configuration

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// HTTP service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Socket address to listen on
    pub server_addr: String,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl AppConfig {
    /// Create a new AppConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SERVER_ADDR`: Listen address (default: "0.0.0.0:3000")
    /// - `LOG_LEVEL`: Log filter (default: "info")
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server_addr", "0.0.0.0:3000")?
            .set_default("log_level", "info")?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }
}
