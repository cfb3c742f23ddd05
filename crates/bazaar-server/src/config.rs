//! Server configuration.
//!
//! Configuration can be loaded from:
//! - Environment variables (BAZAAR_HOST, BAZAAR_PORT, PORT)
//! - TOML configuration file

use anyhow::{Context, Result};
use bazaar_core::{ReregistrationPolicy, RouterConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Transport configuration.
    #[serde(default)]
    pub transport: TransportConfig,

    /// Cross-origin policy for browser dashboards.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Resource limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Roster behavior.
    #[serde(default)]
    pub presence: PresenceConfig,

    /// Heartbeat configuration.
    #[serde(default)]
    pub heartbeat: HeartbeatConfig,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Path for the WebSocket endpoint.
    #[serde(default = "default_ws_path")]
    pub websocket_path: String,
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the HTTP API and open sockets.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// Resource limits configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Maximum inbound message size in bytes.
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,

    /// Maximum actor id length.
    #[serde(default = "default_max_actor_id_length")]
    pub max_actor_id_length: usize,
}

/// Roster behavior configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// What a repeated registration of a known actor does.
    #[serde(default)]
    pub reregistration: ReregistrationPolicy,
}

/// Heartbeat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatConfig {
    /// Heartbeat interval in milliseconds.
    #[serde(default = "default_heartbeat_interval")]
    pub interval_ms: u64,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_heartbeat_timeout")]
    pub timeout_ms: u64,
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable metrics export.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Metrics port.
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default value functions
fn default_host() -> String {
    std::env::var("BAZAAR_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
}

fn default_port() -> u16 {
    ["BAZAAR_PORT", "PORT"]
        .iter()
        .find_map(|key| std::env::var(key).ok().and_then(|p| p.parse().ok()))
        .unwrap_or(5000)
}

fn default_true() -> bool {
    true
}

fn default_ws_path() -> String {
    "/socket".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:3001".to_string(),
        "https://critical-hitters-ai-seller-dashboard.netlify.app".to_string(),
    ]
}

fn default_max_connections() -> usize {
    10_000
}

fn default_max_message_size() -> usize {
    64 * 1024 // 64 KB
}

fn default_max_actor_id_length() -> usize {
    bazaar_core::router::MAX_ACTOR_ID_LENGTH
}

fn default_heartbeat_interval() -> u64 {
    25_000 // 25 seconds
}

fn default_heartbeat_timeout() -> u64 {
    60_000 // 60 seconds
}

fn default_metrics_port() -> u16 {
    9090
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            transport: TransportConfig::default(),
            cors: CorsConfig::default(),
            limits: LimitsConfig::default(),
            presence: PresenceConfig::default(),
            heartbeat: HeartbeatConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            websocket_path: default_ws_path(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            max_message_size: default_max_message_size(),
            max_actor_id_length: default_max_actor_id_length(),
        }
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_heartbeat_interval(),
            timeout_ms: default_heartbeat_timeout(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_metrics_port(),
        }
    }
}

impl Config {
    /// Load configuration from file or defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_paths = [
            "bazaar.toml",
            "/etc/bazaar/bazaar.toml",
            "~/.config/bazaar/bazaar.toml",
        ];

        for path in &config_paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::from_file(expanded.as_ref());
            }
        }

        // Fall back to defaults with environment overrides
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Get the socket address to bind to.
    ///
    /// # Errors
    ///
    /// Returns an error if host and port do not form a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    /// Router settings derived from this configuration.
    #[must_use]
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            reregistration: self.presence.reregistration,
            max_actor_id_length: self.limits.max_actor_id_length,
        }
    }

    /// Whether a browser origin may connect.
    #[must_use]
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.cors.allowed_origins.iter().any(|o| o == origin)
    }
}
