// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

// --- Google OAuth Config ---
// Holds the app-level OAuth client registration. The client secret may also
// be supplied via BOOKIFY__OAUTH__CLIENT_SECRET instead of the config file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Defaults to `{base_url}/auth/callback` when absent.
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

// --- Booking Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    /// Central webhook notified on every successful booking. Optional:
    /// without it bookings still succeed, nothing is broadcast.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// IANA zone all slots are generated and displayed in.
    /// Defaults to Asia/Jerusalem.
    #[serde(default)]
    pub time_zone: Option<String>,
    /// Path of the advisor store file. Defaults to `advisors.json`.
    #[serde(default)]
    pub advisors_file: Option<String>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// External base URL used to build setup/booking/callback links.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Absent until the operator registers a Google OAuth client; the
    /// advisor connect flow refuses to start without it.
    #[serde(default)]
    pub oauth: Option<OAuthConfig>,

    #[serde(default)]
    pub booking: BookingConfig,
}

impl AppConfig {
    /// The base URL links are built against, falling back to localhost on
    /// the configured port for development.
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.server.port),
        }
    }
}
