use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::access::RedirectTargets;
use crate::status::Locale;

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
    pub locale: Locale,
    pub access: RedirectTargets,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(&var_or("APP_ENV", "development"));

        let host = var_or("APP_HOST", "127.0.0.1");
        let port = var_or("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = var_or("APP_LOG_LEVEL", "info");
        let format = LogFormat::parse(&var_or("APP_LOG_FORMAT", "compact"))?;

        let raw_locale = var_or("APP_LOCALE", "en");
        let locale =
            Locale::parse(&raw_locale).ok_or(ConfigError::UnsupportedLocale(raw_locale))?;

        let defaults = RedirectTargets::default();
        let access = RedirectTargets {
            login_path: path_var("APP_LOGIN_PATH", &defaults.login_path)?,
            return_param: var_or("APP_RETURN_PARAM", &defaults.return_param),
            pro_app_path: path_var("APP_PRO_APP_PATH", &defaults.pro_app_path)?,
            client_home_path: path_var("APP_CLIENT_HOME_PATH", &defaults.client_home_path)?,
        };

        if access.return_param.trim().is_empty() {
            return Err(ConfigError::EmptyReturnParam);
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, format },
            locale,
            access,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn path_var(key: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = var_or(key, default);
    if value.starts_with('/') {
        Ok(value)
    } else {
        Err(ConfigError::RelativePath { key, value })
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

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            other => Err(ConfigError::UnsupportedLogFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_PORT must be a valid u16")]
    InvalidPort,
    #[error("APP_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("APP_LOCALE '{0}' is not supported (expected 'en' or 'pt-BR')")]
    UnsupportedLocale(String),
    #[error("APP_LOG_FORMAT '{0}' is not supported (expected 'compact' or 'pretty')")]
    UnsupportedLogFormat(String),
    #[error("{key} must be an absolute path, found '{value}'")]
    RelativePath { key: &'static str, value: String },
    #[error("APP_RETURN_PARAM must not be empty")]
    EmptyReturnParam,
}
