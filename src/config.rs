use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::cors::CorsConfig;
use crate::utils::get_env_with_prefix;

/// Main configuration for a signalhub server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub relay: RelayConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json")]
    pub json: bool,
}

/// Tuning for the broadcast relay's channels
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    /// Capacity of the shared intake queue feeding the dispatch task.
    /// When full, producing receive loops block rather than drop.
    #[serde(default = "default_intake_capacity")]
    pub intake_capacity: usize,
    /// Per-connection outbound buffer between the relay and the
    /// connection's writer task.
    #[serde(default = "default_outbound_capacity")]
    pub outbound_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            relay: RelayConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            intake_capacity: default_intake_capacity(),
            outbound_capacity: default_outbound_capacity(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json() -> bool {
    false
}

fn default_intake_capacity() -> usize {
    256
}

fn default_outbound_capacity() -> usize {
    64
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Builder for Config with environment variable support
#[must_use = "builder does nothing until you call build()"]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.server.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.config.logging.json = enabled;
        self
    }

    pub fn with_intake_capacity(mut self, capacity: usize) -> Self {
        self.config.relay.intake_capacity = capacity;
        self
    }

    pub fn with_outbound_capacity(mut self, capacity: usize) -> Self {
        self.config.relay.outbound_capacity = capacity;
        self
    }

    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.config.cors = cors;
        self
    }

    /// Load configuration from environment variables with SIGNALHUB_ prefix
    pub fn from_env(mut self) -> Self {
        if let Some(host) = get_env_with_prefix("HOST") {
            self.config.server.host = host;
        }
        // Checks SIGNALHUB_PORT first, falls back to PORT (for Railway/Heroku)
        if let Some(port) = get_env_with_prefix("PORT") {
            if let Ok(p) = port.parse() {
                self.config.server.port = p;
            }
        }
        if let Some(level) = get_env_with_prefix("LOG_LEVEL") {
            self.config.logging.level = level;
        }
        if let Some(json) = get_env_with_prefix("LOG_JSON") {
            self.config.logging.json = json.parse().unwrap_or(false);
        }
        if let Some(capacity) = get_env_with_prefix("RELAY_INTAKE_CAPACITY") {
            if let Ok(c) = capacity.parse() {
                self.config.relay.intake_capacity = c;
            }
        }
        if let Some(capacity) = get_env_with_prefix("RELAY_OUTBOUND_CAPACITY") {
            if let Ok(c) = capacity.parse() {
                self.config.relay.outbound_capacity = c;
            }
        }

        self.config.cors = CorsConfig::from_env();

        self
    }

    /// Build the configuration, validating all settings
    ///
    /// # Errors
    ///
    /// Returns an error if any setting is invalid: unparseable server
    /// address, unknown log level, zero port, or zero channel capacity.
    pub fn build(self) -> crate::error::Result<Config> {
        self.config.server.addr().map_err(|e| {
            crate::error::SignalHubError::bad_request(format!(
                "Invalid server address {}:{} - {}",
                self.config.server.host, self.config.server.port, e
            ))
        })?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.config.logging.level.to_lowercase().as_str()) {
            return Err(crate::error::SignalHubError::bad_request(format!(
                "Invalid log level: {}. Must be one of: {}",
                self.config.logging.level,
                valid_log_levels.join(", ")
            )));
        }

        if self.config.server.port == 0 {
            return Err(crate::error::SignalHubError::bad_request(
                "Server port must be greater than 0",
            ));
        }

        if self.config.relay.intake_capacity == 0 {
            return Err(crate::error::SignalHubError::bad_request(
                "Relay intake capacity must be greater than 0",
            ));
        }

        if self.config.relay.outbound_capacity == 0 {
            return Err(crate::error::SignalHubError::bad_request(
                "Relay outbound capacity must be greater than 0",
            ));
        }

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.relay.intake_capacity, 256);
        assert_eq!(config.relay.outbound_capacity, 64);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_host("127.0.0.1")
            .with_port(9100)
            .with_log_level("debug")
            .with_intake_capacity(512)
            .with_outbound_capacity(32)
            .build()
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.relay.intake_capacity, 512);
        assert_eq!(config.relay.outbound_capacity, 32);
    }

    #[test]
    fn test_addr_parses() {
        let config = ConfigBuilder::new()
            .with_host("127.0.0.1")
            .with_port(9100)
            .build()
            .unwrap();
        assert_eq!(config.server.addr().unwrap().port(), 9100);
    }

    #[test]
    fn test_invalid_host_rejected() {
        let result = ConfigBuilder::new().with_host("not a host").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = ConfigBuilder::new().with_log_level("verbose").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let result = ConfigBuilder::new().with_port(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_intake_capacity_rejected() {
        let result = ConfigBuilder::new().with_intake_capacity(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_outbound_capacity_rejected() {
        let result = ConfigBuilder::new().with_outbound_capacity(0).build();
        assert!(result.is_err());
    }
}
