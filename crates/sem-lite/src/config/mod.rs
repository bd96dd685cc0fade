use crate::ads::CustomerId;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_API_VERSION: &str = "v18";
const DEFAULT_BASE_URL: &str = "https://googleads.googleapis.com";

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
    pub google_ads: GoogleAdsConfig,
    pub demo_mode: bool,
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

        let developer_token = env::var("GOOGLE_ADS_DEVELOPER_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        let api_version = env::var("GOOGLE_ADS_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        let base_url = env::var("GOOGLE_ADS_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let default_customer_id = match env::var("GOOGLE_ADS_CUSTOMER_ID") {
            Ok(raw) if !raw.trim().is_empty() => {
                Some(CustomerId::parse(&raw).ok_or(ConfigError::InvalidCustomerId)?)
            }
            _ => None,
        };
        let timeout_secs = env::var("GOOGLE_ADS_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let demo_mode = env::var("SEM_DEMO_MODE")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            google_ads: GoogleAdsConfig {
                developer_token,
                api_version,
                base_url,
                default_customer_id,
                timeout: Duration::from_secs(timeout_secs),
            },
            demo_mode,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
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

/// Connection settings for the advertising platform's reporting API.
///
/// The per-user OAuth access token is deliberately absent: it arrives with each
/// request as [`crate::ads::Credentials`].
#[derive(Clone)]
pub struct GoogleAdsConfig {
    pub developer_token: Option<String>,
    pub api_version: String,
    pub base_url: String,
    pub default_customer_id: Option<CustomerId>,
    pub timeout: Duration,
}

impl Default for GoogleAdsConfig {
    fn default() -> Self {
        Self {
            developer_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_customer_id: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl fmt::Debug for GoogleAdsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleAdsConfig")
            .field(
                "developer_token",
                &self.developer_token.as_ref().map(|_| "<redacted>"),
            )
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("default_customer_id", &self.default_customer_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCustomerId,
    InvalidTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCustomerId => {
                write!(f, "GOOGLE_ADS_CUSTOMER_ID must contain a numeric customer id")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "GOOGLE_ADS_TIMEOUT_SECS must be a whole number of seconds")
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
