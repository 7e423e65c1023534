use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::ranking::{ScoringConfig, WeightParseError, WeightTable, DEFAULT_MAX_CGPA, DEFAULT_TOP_N};

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
    pub ranking: RankingSettings,
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
            ranking: RankingSettings::from_env()?,
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

/// Scoring scale, weight overrides and data locations.
#[derive(Debug, Clone)]
pub struct RankingSettings {
    pub max_cgpa: f64,
    pub top_n: usize,
    pub weights: WeightTable,
    pub applicants_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

impl RankingSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let max_cgpa = match env::var("SCHOLAR_MAX_CGPA") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value > 0.0)
                .ok_or(ConfigError::InvalidMaxCgpa(raw))?,
            Err(_) => DEFAULT_MAX_CGPA,
        };

        let top_n = match env::var("SCHOLAR_TOP_N") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidTopN(raw))?,
            Err(_) => DEFAULT_TOP_N,
        };

        let weights = match env::var("SCHOLAR_WEIGHTS") {
            Ok(raw) => raw.parse::<WeightTable>().map_err(ConfigError::InvalidWeights)?,
            Err(_) => WeightTable::standard(),
        };

        Ok(Self {
            max_cgpa,
            top_n,
            weights,
            applicants_path: non_empty_path("SCHOLAR_APPLICANTS_PATH"),
            catalog_path: non_empty_path("SCHOLAR_CATALOG_PATH"),
        })
    }

    pub fn scoring_config(&self) -> ScoringConfig {
        ScoringConfig::default()
            .with_max_cgpa(self.max_cgpa)
            .with_weights(self.weights.clone())
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            max_cgpa: DEFAULT_MAX_CGPA,
            top_n: DEFAULT_TOP_N,
            weights: WeightTable::standard(),
            applicants_path: None,
            catalog_path: None,
        }
    }
}

fn non_empty_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMaxCgpa(String),
    InvalidTopN(String),
    InvalidWeights(WeightParseError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMaxCgpa(raw) => {
                write!(f, "SCHOLAR_MAX_CGPA must be a positive number, got '{raw}'")
            }
            ConfigError::InvalidTopN(raw) => {
                write!(f, "SCHOLAR_TOP_N must be a positive integer, got '{raw}'")
            }
            ConfigError::InvalidWeights(err) => write!(f, "SCHOLAR_WEIGHTS is invalid: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidWeights(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidMaxCgpa(_)
            | ConfigError::InvalidTopN(_) => None,
        }
    }
}
