//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines the constants
//! for the HTTP surface, upload limits, logging format and default paths.
//! `AppConfig` is the root configuration struct; every section is optional and
//! falls back to built-in defaults.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Surface
// =============================================================================

/// Default bind host
pub const DEFAULT_HOST: &str = "localhost";

/// Default bind port
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address, for help text and logs
pub const DEFAULT_BIND: &str = formatcp!("{}:{}", DEFAULT_HOST, DEFAULT_PORT);

/// Seconds to wait for in-flight requests after a shutdown signal
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Fixed acknowledgment body returned by the liveness probe
pub const PING_RESPONSE: &str = "Test 1 2 3";

/// Multipart form field carrying the uploaded file
pub const PREDICT_FILE_FIELD: &str = "file";

/// Neither route may be cached by intermediaries
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Response header echoing the per-request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Upload Limits
// =============================================================================

/// Default maximum request body size (100 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "predict_api=debug,tower_http=debug";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Request body limits
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    /// Port to bind; 0 lets the OS pick one
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Connection drain period on SIGTERM/SIGINT
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_PORT
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }

    /// `host:port` string suitable for DNS resolution
    pub fn bind_target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted request body size in bytes
    #[serde(default = "UploadConfig::default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: Self::default_max_body_bytes(),
        }
    }
}

impl UploadConfig {
    fn default_max_body_bytes() -> usize {
        DEFAULT_MAX_BODY_BYTES
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load configuration from an explicit path, or from the default path if
    /// present, or fall back to built-in defaults.
    ///
    /// An explicitly requested file must exist; the default file may not.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded file.
    ///
    /// Validation only reruns when something was overridden.
    pub fn apply_overrides(
        &mut self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<(), ConfigError> {
        if host.is_none() && port.is_none() {
            return Ok(());
        }
        if let Some(host) = host {
            self.http.host = host;
        }
        if let Some(port) = port {
            self.http.port = port;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "http.host must not be empty".to_string(),
            ));
        }

        if self.upload.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "upload.max_body_bytes must be greater than zero".to_string(),
            ));
        }

        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                other
            ))),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config.http.host, "localhost");
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.http.shutdown_grace_seconds, 30);
        assert_eq!(config.upload.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_default_bind_matches_defaults() {
        assert_eq!(DEFAULT_BIND, "localhost:8000");
        assert_eq!(HttpServerConfig::default().bind_target(), DEFAULT_BIND);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = AppConfig::parse("[http]\nport = 9100\n").unwrap();
        assert_eq!(config.http.host, "localhost");
        assert_eq!(config.http.port, 9100);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [http]
            host = "0.0.0.0"
            port = 0
            shutdown_grace_seconds = 5

            [upload]
            max_body_bytes = 1024

            [logging]
            format = "json"
        "#;
        let config = AppConfig::parse(toml).unwrap();
        assert_eq!(config.http.bind_target(), "0.0.0.0:0");
        assert_eq!(config.http.shutdown_grace_seconds, 5);
        assert_eq!(config.upload.max_body_bytes, 1024);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_rejects_empty_host() {
        let err = AppConfig::parse("[http]\nhost = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_zero_body_limit() {
        let err = AppConfig::parse("[upload]\nmax_body_bytes = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let err = AppConfig::parse("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AppConfig::parse("[http\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nport = 8123").unwrap();

        let path = file.path().to_str().unwrap();
        let config = AppConfig::load_or_default(Some(path)).unwrap();
        assert_eq!(config.http.port, 8123);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = AppConfig::load_or_default(Some(path.to_str().unwrap())).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AppConfig::parse("[http]\nhost = \"0.0.0.0\"\nport = 9000\n").unwrap();
        config
            .apply_overrides(Some("127.0.0.1".to_string()), Some(0))
            .unwrap();
        assert_eq!(config.http.bind_target(), "127.0.0.1:0");
    }

    #[test]
    fn test_port_override_keeps_file_host() {
        let mut config = AppConfig::parse("[http]\nhost = \"0.0.0.0\"\n").unwrap();
        config.apply_overrides(None, Some(8123)).unwrap();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 8123);
    }

    #[test]
    fn test_no_overrides_is_noop() {
        let mut config = AppConfig::default();
        config.apply_overrides(None, None).unwrap();
        assert_eq!(config.http.bind_target(), DEFAULT_BIND);
    }

    #[test]
    fn test_empty_host_override_fails_validation() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(Some(String::new()), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
