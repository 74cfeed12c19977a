// --- File: crates/bookify_config/src/lib.rs ---
//! Typed configuration for the Bookify service.
//!
//! Configuration is layered: an optional YAML file (`config/default.yml`,
//! overridable via `BOOKIFY_CONFIG`) first, then environment variables with
//! the `BOOKIFY` prefix (`BOOKIFY__SERVER__PORT=8080`). A `.env` file is
//! loaded before either so local development secrets stay out of the shell.

pub mod models;

use config::{Config, ConfigError, Environment, File};
use std::sync::Once;

pub use models::{AppConfig, BookingConfig, OAuthConfig, ServerConfig};

static DOTENV: Once = Once::new();

/// Load `.env` once per process. Missing files are fine.
pub fn ensure_dotenv_loaded() {
    DOTENV.call_once(|| {
        let _ = dotenv::dotenv();
    });
}

/// Loads the application configuration.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_path =
        std::env::var("BOOKIFY_CONFIG").unwrap_or_else(|_| "config/default".to_string());

    Config::builder()
        .add_source(File::with_name(&config_path).required(false))
        .add_source(Environment::with_prefix("BOOKIFY").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_yield_defaults() {
        // No config file, no env vars: everything falls back to defaults.
        let config: AppConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.oauth.is_none());
        assert!(config.booking.webhook_url.is_none());
        assert_eq!(config.base_url(), "http://localhost:3000");
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = AppConfig {
            server: ServerConfig::default(),
            base_url: Some("https://booking.example.com/".to_string()),
            oauth: None,
            booking: BookingConfig::default(),
        };
        assert_eq!(config.base_url(), "https://booking.example.com");
    }
}
