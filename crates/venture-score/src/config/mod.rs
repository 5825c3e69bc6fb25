use crate::assessment::oracle::ProviderKind;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_CALL_DELAY_MS: u64 = 100;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub oracle: OracleSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            oracle: OracleSettings::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Controls whether answers are delegated to a completion provider.
#[derive(Debug, Clone)]
pub struct OracleSettings {
    pub enabled: bool,
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: Option<String>,
    /// Replaces the provider's catalog endpoint, mostly for proxies and tests.
    pub endpoint: Option<String>,
    pub call_delay: Duration,
    pub timeout: Option<Duration>,
}

impl OracleSettings {
    /// Oracle scoring runs only when switched on and a credential is present.
    pub fn is_active(&self) -> bool {
        self.enabled
            && self
                .api_key
                .as_deref()
                .map(|key| !key.trim().is_empty())
                .unwrap_or(false)
    }

    pub fn disabled() -> Self {
        let provider = ProviderKind::OpenAi;
        Self {
            enabled: false,
            provider,
            model: provider.default_model().id.to_string(),
            api_key: None,
            endpoint: None,
            call_delay: Duration::from_millis(DEFAULT_CALL_DELAY_MS),
            timeout: None,
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let enabled = env::var("ORACLE_ENABLED")
            .map(|value| !value.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let provider = match env::var("ORACLE_PROVIDER") {
            Ok(raw) => ProviderKind::parse(&raw).ok_or(ConfigError::UnknownProvider(raw))?,
            Err(_) => ProviderKind::OpenAi,
        };

        let model = match env::var("ORACLE_MODEL") {
            Ok(raw) => {
                let raw = raw.trim().to_string();
                if provider.model(&raw).is_none() {
                    return Err(ConfigError::UnknownModel {
                        provider: provider.label(),
                        model: raw,
                    });
                }
                raw
            }
            Err(_) => provider.default_model().id.to_string(),
        };

        let api_key = env::var("ORACLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let endpoint = env::var("ORACLE_ENDPOINT")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let call_delay = match env::var("ORACLE_CALL_DELAY_MS") {
            Ok(raw) => Duration::from_millis(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidDelay)?,
            ),
            Err(_) => Duration::from_millis(DEFAULT_CALL_DELAY_MS),
        };

        let timeout = match env::var("ORACLE_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout)?,
            )),
            Err(_) => None,
        };

        Ok(Self {
            enabled,
            provider,
            model,
            api_key,
            endpoint,
            call_delay,
            timeout,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownProvider(String),
    UnknownModel { provider: &'static str, model: String },
    InvalidDelay,
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownProvider(raw) => {
                write!(f, "ORACLE_PROVIDER '{raw}' is not a supported provider")
            }
            ConfigError::UnknownModel { provider, model } => {
                write!(f, "ORACLE_MODEL '{model}' is not offered by {provider}")
            }
            ConfigError::InvalidDelay => {
                write!(f, "ORACLE_CALL_DELAY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "ORACLE_TIMEOUT_SECS must be a whole number of seconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
