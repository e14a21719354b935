// --- File: crates/datepoll_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/datepoll.db, via DATEPOLL__DATABASE__URL
}

// --- Email relay Config ---
// Holds the relay endpoint and template ids. The public key may be set to
// "secret_from_env" and is then read from NOTIFY_PUBLIC_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotifyConfig {
    pub endpoint: String, // Mandatory
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

// --- Link shortener Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShortenerConfig {
    pub endpoint: String, // e.g. https://tinyurl.com/api-create.php
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    /// Base address of the single-page UI; share links are built on top of it.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_database: bool,
    #[serde(default)]
    pub use_notify: bool,
    #[serde(default)]
    pub use_shortener: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub notify: Option<NotifyConfig>,
    #[serde(default)]
    pub shortener: Option<ShortenerConfig>,
}

fn default_public_base_url() -> String {
    "http://127.0.0.1:8080/".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            public_base_url: default_public_base_url(),
            use_database: false,
            use_notify: false,
            use_shortener: false,
            database: None,
            notify: None,
            shortener: None,
        }
    }
}
