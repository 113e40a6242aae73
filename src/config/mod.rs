//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `TRIAD_*` environment variables.
//! The provider API key is required and has no default.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

/// Default base URL of the provider REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for candidate generation.
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-1.5-pro-latest";

/// Default model used for document and query embeddings.
pub const DEFAULT_EMBEDDING_MODEL: &str = "embedding-001";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `TRIAD_*` overrides on top of defaults.
/// The loaded value is immutable and passed by reference into the provider
/// clients; nothing reads the environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Provider API key sent with every outbound call. Required.
    pub api_key: String,

    /// Base URL of the provider REST API.
    pub api_base_url: String,

    /// Model used for candidate generation.
    pub generation_model: String,

    /// Model used for document and query embeddings.
    pub embedding_model: String,

    /// Timeout applied to each outbound provider call. Default: `60` seconds.
    pub call_timeout_secs: u64,

    /// Deadline for one whole ranking request. Default: `300` seconds.
    pub request_deadline_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            api_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            call_timeout_secs: 60,
            request_deadline_secs: 300,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "TRIAD_PORT";
    const ENV_BIND_ADDR: &'static str = "TRIAD_BIND_ADDR";
    const ENV_API_KEY: &'static str = "TRIAD_API_KEY";
    const ENV_API_BASE_URL: &'static str = "TRIAD_API_BASE_URL";
    const ENV_GENERATION_MODEL: &'static str = "TRIAD_GENERATION_MODEL";
    const ENV_EMBEDDING_MODEL: &'static str = "TRIAD_EMBEDDING_MODEL";
    const ENV_CALL_TIMEOUT: &'static str = "TRIAD_CALL_TIMEOUT_SECS";
    const ENV_REQUEST_DEADLINE: &'static str = "TRIAD_REQUEST_DEADLINE_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let api_key = Self::parse_required_from_env(Self::ENV_API_KEY)?;
        let api_base_url =
            Self::parse_string_from_env(Self::ENV_API_BASE_URL, defaults.api_base_url);
        let generation_model =
            Self::parse_string_from_env(Self::ENV_GENERATION_MODEL, defaults.generation_model);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let call_timeout_secs =
            Self::parse_secs_from_env(Self::ENV_CALL_TIMEOUT, defaults.call_timeout_secs)?;
        let request_deadline_secs = Self::parse_secs_from_env(
            Self::ENV_REQUEST_DEADLINE,
            defaults.request_deadline_secs,
        )?;

        Ok(Self {
            port,
            bind_addr,
            api_key,
            api_base_url,
            generation_model,
            embedding_model,
            call_timeout_secs,
            request_deadline_secs,
        })
    }

    /// Validates basic invariants for configs built outside [`Config::from_env`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_API_KEY,
            });
        }

        if self.call_timeout_secs == 0 {
            return Err(ConfigError::InvalidDuration {
                name: Self::ENV_CALL_TIMEOUT,
                value: "0".to_string(),
            });
        }

        if self.request_deadline_secs == 0 {
            return Err(ConfigError::InvalidDuration {
                name: Self::ENV_REQUEST_DEADLINE,
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Timeout applied to each outbound provider call.
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }

    /// Deadline covering one whole ranking request.
    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_secs)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_required_from_env(var_name: &'static str) -> Result<String, ConfigError> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingEnvVar { name: var_name })
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_secs_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.parse::<u64>() {
                Ok(0) => Err(ConfigError::InvalidDuration {
                    name: var_name,
                    value,
                }),
                Ok(secs) => Ok(secs),
                Err(_) => Ok(default),
            },
            Err(_) => Ok(default),
        }
    }
}
