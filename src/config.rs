//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub stub: StubConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Assistant backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent as `X-CSRFToken` on state-changing requests
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// Raw `Cookie` header value carrying the authenticated session
    #[serde(default)]
    pub session_cookie: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: None,
            session_cookie: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Polling and alert timing
#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_notification_interval")]
    pub notification_interval_secs: u64,

    #[serde(default = "default_message_interval")]
    pub message_interval_secs: u64,

    #[serde(default = "default_alert_dismiss")]
    pub alert_dismiss_secs: u64,
}

fn default_notification_interval() -> u64 {
    30
}

fn default_message_interval() -> u64 {
    5
}

fn default_alert_dismiss() -> u64 {
    5
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            notification_interval_secs: default_notification_interval(),
            message_interval_secs: default_message_interval(),
            alert_dismiss_secs: default_alert_dismiss(),
        }
    }
}

impl PollingConfig {
    pub fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notification_interval_secs.max(1))
    }

    pub fn message_interval(&self) -> Duration {
        Duration::from_secs(self.message_interval_secs.max(1))
    }

    /// How long alerts stay on the page
    pub fn alert_ttl(&self) -> Duration {
        Duration::from_secs(self.alert_dismiss_secs)
    }
}

/// Contract stub server
#[derive(Debug, Clone, Deserialize)]
pub struct StubConfig {
    #[serde(default = "default_stub_host")]
    pub host: String,

    #[serde(default = "default_stub_port")]
    pub port: u16,

    /// When set, `POST /monitor` requires this `X-CSRFToken`
    #[serde(default)]
    pub csrf_token: Option<String>,
}

fn default_stub_host() -> String {
    "127.0.0.1".to_string()
}

fn default_stub_port() -> u16 {
    5000
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            host: default_stub_host(),
            port: default_stub_port(),
            csrf_token: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("wingman").join("config.toml")),
            Some(PathBuf::from("/etc/wingman/config.toml")),
            Some(PathBuf::from("./wingman.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(url) = lookup("WINGMAN_BASE_URL") {
            self.server.base_url = url;
        }
        if let Some(token) = lookup("WINGMAN_CSRF_TOKEN") {
            self.server.csrf_token = Some(token);
        }
        if let Some(cookie) = lookup("WINGMAN_SESSION_COOKIE") {
            self.server.session_cookie = Some(cookie);
        }

        // Polling overrides
        if let Some(interval) = lookup("WINGMAN_NOTIFICATION_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.polling.notification_interval_secs = secs;
            }
        }

        // Logging overrides
        if let Some(level) = lookup("WINGMAN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("WINGMAN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Wingman Configuration
#
# Environment variables override these settings:
# - WINGMAN_BASE_URL
# - WINGMAN_CSRF_TOKEN
# - WINGMAN_SESSION_COOKIE
# - WINGMAN_NOTIFICATION_INTERVAL
# - WINGMAN_LOG_LEVEL
# - WINGMAN_LOG_FORMAT

[server]
# Assistant backend URL
base_url = "http://localhost:5000"

# CSRF token sent as X-CSRFToken on monitor requests
# csrf_token = ""

# Session cookie of an authenticated browser session
# session_cookie = "session=..."

# Request timeout in seconds
request_timeout_secs = 10

[polling]
# How often to check notifications (seconds)
notification_interval_secs = 30

# How often `follow` checks a conversation for new messages (seconds)
message_interval_secs = 5

# How long alert banners stay visible (seconds)
alert_dismiss_secs = 5

[stub]
# Contract stub server address
host = "127.0.0.1"
port = 5000

# Require this X-CSRFToken on monitor requests
# csrf_token = ""

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
