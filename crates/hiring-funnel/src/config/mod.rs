use crate::funnel::{AlignmentMode, StageMap, StageMapError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_HARVEST_BASE_URL: &str = "https://harvest.greenhouse.io/v1";
pub const DEFAULT_DEPARTMENT: &str = "tech";

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
    pub harvest: HarvestConfig,
    pub funnel: FunnelConfig,
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

        let base_url = env::var("HARVEST_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_HARVEST_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let api_token = env::var("HARVEST_API_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());
        let per_page = env::var("HARVEST_PER_PAGE")
            .unwrap_or_else(|_| "500".to_string())
            .parse::<u32>()
            .ok()
            .filter(|value| (1..=500).contains(value))
            .ok_or(ConfigError::InvalidPageSize)?;
        let max_attempts = env::var("HARVEST_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<u32>()
            .ok()
            .filter(|value| *value > 0)
            .ok_or(ConfigError::InvalidMaxAttempts)?;
        let data_dir =
            PathBuf::from(env::var("FUNNEL_DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        let department =
            env::var("FUNNEL_DEPARTMENT").unwrap_or_else(|_| DEFAULT_DEPARTMENT.to_string());
        let stage_map = match env::var("FUNNEL_STAGE_MAP") {
            Ok(path) if !path.trim().is_empty() => FunnelConfig::stage_map_from_path(path)?,
            _ => StageMap::standard(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            harvest: HarvestConfig {
                base_url,
                api_token,
                per_page,
                max_attempts,
                data_dir,
                refresh: false,
            },
            funnel: FunnelConfig {
                department,
                stage_map,
                alignment: AlignmentMode::default(),
            },
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

/// Where and how the Harvest collections are fetched and cached.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub per_page: u32,
    pub max_attempts: u32,
    pub data_dir: PathBuf,
    /// Ignore cached collections and fetch everything again.
    pub refresh: bool,
}

/// Analysis inputs: which department to study and how interviews map onto stages.
#[derive(Debug, Clone)]
pub struct FunnelConfig {
    pub department: String,
    pub stage_map: StageMap,
    pub alignment: AlignmentMode,
}

impl FunnelConfig {
    pub fn new(department: impl Into<String>, stage_map: StageMap) -> Self {
        Self {
            department: department.into(),
            stage_map,
            alignment: AlignmentMode::default(),
        }
    }

    pub fn stage_map_from_path(path: impl Into<PathBuf>) -> Result<StageMap, ConfigError> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::StageMapRead {
            path: path.clone(),
            source,
        })?;
        StageMap::from_json(&raw).map_err(|source| ConfigError::StageMap { path, source })
    }
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DEPARTMENT, StageMap::standard())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidPageSize,
    InvalidMaxAttempts,
    StageMapRead {
        path: PathBuf,
        source: std::io::Error,
    },
    StageMap {
        path: PathBuf,
        source: StageMapError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPageSize => {
                write!(f, "HARVEST_PER_PAGE must be an integer between 1 and 500")
            }
            ConfigError::InvalidMaxAttempts => {
                write!(f, "HARVEST_MAX_ATTEMPTS must be a positive integer")
            }
            ConfigError::StageMapRead { path, .. } => {
                write!(f, "could not read stage map {}", path.display())
            }
            ConfigError::StageMap { path, source } => {
                write!(f, "invalid stage map {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidPageSize
            | ConfigError::InvalidMaxAttempts => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::StageMapRead { source, .. } => Some(source),
            ConfigError::StageMap { source, .. } => Some(source),
        }
    }
}
