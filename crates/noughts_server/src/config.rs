//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `NOUGHTS_*` environment variables, command-line flags.

use crate::error::ConfigError;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`ServerConfig::host`].
pub const HOST_VAR: &str = "NOUGHTS_HOST";
/// Environment variable overriding [`ServerConfig::port`].
pub const PORT_VAR: &str = "NOUGHTS_PORT";
/// Environment variable overriding [`ServerConfig::read_timeout_secs`].
pub const READ_TIMEOUT_VAR: &str = "NOUGHTS_READ_TIMEOUT_SECS";

/// Listener and session settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on.
    #[setters(into)]
    host: String,

    /// Port to listen on.
    port: u16,

    /// Seconds to wait for a move before aborting the session.
    ///
    /// Absent means wait forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    read_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8888,
            read_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Applies `NOUGHTS_*` overrides looked up through `lookup`.
    #[instrument(skip(self, lookup))]
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(HOST_VAR) {
            debug!(%host, "Host overridden from environment");
            self.host = host;
        }

        if let Some(port) = lookup(PORT_VAR) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {}: {}", PORT_VAR, e)))?;
        }

        if let Some(secs) = lookup(READ_TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| ConfigError::new(format!("Invalid {}: {}", READ_TIMEOUT_VAR, e)))?;
            self.read_timeout_secs = Some(secs);
        }

        Ok(self)
    }

    /// Per-move read timeout, if configured. Zero is treated as unset.
    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// `host:port`, ready for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8888");
        assert_eq!(config.read_timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9000").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.port(), 9000);
        assert_eq!(config.host(), "0.0.0.0");
    }

    #[test]
    fn test_read_timeout_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"127.0.0.1\"\nread_timeout_secs = 30").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.bind_address(), "127.0.0.1:8888");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prot = 9000").unwrap();
        assert!(ServerConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(err.message.contains("Failed to read config file"));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "7000"),
            (READ_TIMEOUT_VAR, "5"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::default()
            .with_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:7000");
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_port_in_environment() {
        let result = ServerConfig::default().with_env(|key| {
            (key == PORT_VAR).then(|| "eighty".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_means_unlimited() {
        let config = ServerConfig::default().with_read_timeout_secs(Some(0));
        assert_eq!(config.read_timeout(), None);
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = ServerConfig::default()
            .with_host("127.0.0.1")
            .with_read_timeout_secs(Some(12));
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("read_timeout_secs = 12"));
        assert_eq!(toml::from_str::<ServerConfig>(&rendered).unwrap(), config);
    }
}
