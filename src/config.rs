//! Configuration loading and shared application state.
//!
//! Settings are layered: built-in defaults, then an optional `config.*`
//! file, then `GATEWAY_`-prefixed environment variables. The upstream
//! OAuth credentials are stricter: they come only from `TINK_CLIENT_ID`
//! and `TINK_CLIENT_SECRET`, and the process refuses to start without
//! them.

use serde::Deserialize;
use std::net::SocketAddr;

/// Environment variable holding the OAuth client identifier.
pub const CLIENT_ID_VAR: &str = "TINK_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_VAR: &str = "TINK_CLIENT_SECRET";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub oauth: OAuthConfig,
    pub resources: ResourcesConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Upstream API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
}

/// OAuth application credentials, environment-only
#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// Local asset locations
#[derive(Debug, Deserialize, Clone)]
pub struct ResourcesConfig {
    pub static_dir: String,
    pub index_file: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    /// Load configuration from the default "config" file path.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let client_id = require_env(CLIENT_ID_VAR)?;
        let client_secret = require_env(CLIENT_SECRET_VAR)?;

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("GATEWAY").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("upstream.base_url", "https://api.tink.com")?
            .set_default("resources.static_dir", "static")?
            .set_default("resources.index_file", "index.html")?
            .set_default("logging.access_log", true)?
            .set_override("oauth.client_id", client_id)?
            .set_override("oauth.client_secret", client_secret)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Read a required environment variable, treating empty values as absent.
fn require_env(name: &str) -> Result<String, config::ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| config::ConfigError::Message(format!("Missing \"{name}\"")))
}

/// Process-wide immutable state shared across connections.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared outbound client; reqwest pools connections per client.
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}
