use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

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

const DEFAULT_PORT: &str = "5000";
const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 5;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub notifications: NotificationConfig,
    pub rates: RateSourceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let webhook_url = non_blank_var("MAKE_WEBHOOK_URL");
        if let Some(url) = webhook_url.as_deref() {
            validate_webhook_url(url)?;
        }
        let webhook_timeout = match non_blank_var("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidWebhookTimeout),
            },
            None => Duration::from_secs(DEFAULT_WEBHOOK_TIMEOUT_SECS),
        };

        let base_rates_csv = non_blank_var("APP_BASE_RATES_CSV").map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            notifications: NotificationConfig {
                webhook_url,
                webhook_timeout,
            },
            rates: RateSourceConfig { base_rates_csv },
        })
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn validate_webhook_url(raw: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(raw).map_err(|source| ConfigError::InvalidWebhookUrl {
        value: raw.to_string(),
        reason: source.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidWebhookUrl {
            value: raw.to_string(),
            reason: format!("scheme '{other}' is not http or https"),
        }),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Outbound notification of computed results.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
}

/// Where the static rate tables come from.
#[derive(Debug, Clone, Default)]
pub struct RateSourceConfig {
    pub base_rates_csv: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidWebhookUrl { value: String, reason: String },
    InvalidWebhookTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT (or PORT) must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidWebhookUrl { value, reason } => {
                write!(f, "MAKE_WEBHOOK_URL '{value}' is not usable: {reason}")
            }
            ConfigError::InvalidWebhookTimeout => {
                write!(f, "WEBHOOK_TIMEOUT_SECS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidWebhookUrl { .. }
            | ConfigError::InvalidWebhookTimeout => None,
        }
    }
}
