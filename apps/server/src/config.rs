//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// HTTP header carrying the GitHub token when credentials are sent separately.
pub const GITHUB_TOKEN_HEADER: &str = "X-GitHub-Token";

/// HTTP header carrying the Vercel token when credentials are sent separately.
pub const VERCEL_TOKEN_HEADER: &str = "X-Vercel-Token";

/// Default values used when a variable is not set.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const GITHUB_API_URL: &str = "https://api.github.com";
    pub const GITHUB_HOST: &str = "github.com";
    pub const VERCEL_API_URL: &str = "https://api.vercel.com";
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Upstream API settings shared by the GitHub and Vercel clients.
#[derive(Debug, Clone)]
pub struct UpstreamSettings {
    /// GitHub REST API base URL
    pub github_api_url: String,
    /// GitHub web host accepted in repository URLs
    pub github_host: String,
    /// Vercel REST API base URL
    pub vercel_api_url: String,
    /// Vercel team scope appended to every Vercel call when set
    pub vercel_team_id: Option<String>,
    /// Connect timeout for upstream calls
    pub connect_timeout: Duration,
    /// Total request timeout for upstream calls
    pub request_timeout: Duration,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            github_api_url: defaults::GITHUB_API_URL.to_string(),
            github_host: defaults::GITHUB_HOST.to_string(),
            vercel_api_url: defaults::VERCEL_API_URL.to_string(),
            vercel_team_id: None,
            connect_timeout: Duration::from_secs(defaults::HTTP_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(defaults::HTTP_TIMEOUT_SECS),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// GitHub and Vercel endpoints
    pub upstream: UpstreamSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `DEPLOYER_HOST`: Server host (default: 127.0.0.1)
    /// - `DEPLOYER_PORT`: Server port (default: 8080)
    /// - `DEPLOYER_GITHUB_API_URL`: GitHub API base URL (default: https://api.github.com)
    /// - `DEPLOYER_GITHUB_HOST`: GitHub web host for repository URLs (default: github.com)
    /// - `DEPLOYER_VERCEL_API_URL`: Vercel API base URL (default: https://api.vercel.com)
    /// - `DEPLOYER_VERCEL_TEAM_ID`: Vercel team scope (optional)
    /// - `DEPLOYER_HTTP_CONNECT_TIMEOUT_SECS`: Upstream connect timeout (default: 5)
    /// - `DEPLOYER_HTTP_TIMEOUT_SECS`: Upstream request timeout (default: 30)
    ///
    /// In production, upstream URLs must use HTTPS.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("DEPLOYER_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("DEPLOYER_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("DEPLOYER_PORT must be a valid port number"))?;

        let connect_timeout_secs = env::var("DEPLOYER_HTTP_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults::HTTP_CONNECT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue("DEPLOYER_HTTP_CONNECT_TIMEOUT_SECS must be a valid number")
            })?;

        let request_timeout_secs = env::var("DEPLOYER_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults::HTTP_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("DEPLOYER_HTTP_TIMEOUT_SECS must be a valid number"))?;

        let upstream = UpstreamSettings {
            github_api_url: env::var("DEPLOYER_GITHUB_API_URL")
                .unwrap_or_else(|_| defaults::GITHUB_API_URL.to_string()),
            github_host: env::var("DEPLOYER_GITHUB_HOST")
                .unwrap_or_else(|_| defaults::GITHUB_HOST.to_string()),
            vercel_api_url: env::var("DEPLOYER_VERCEL_API_URL")
                .unwrap_or_else(|_| defaults::VERCEL_API_URL.to_string()),
            vercel_team_id: env::var("DEPLOYER_VERCEL_TEAM_ID")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
        };

        if upstream.github_host.trim().is_empty() {
            return Err(ConfigError::InvalidValue("DEPLOYER_GITHUB_HOST must not be empty"));
        }

        let config = Config {
            environment,
            host,
            port,
            upstream,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate that production configuration only talks to upstreams over HTTPS.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !self.upstream.github_api_url.starts_with("https://") {
            errors.push(format!(
                "DEPLOYER_GITHUB_API_URL must use https:// in production (got '{}')",
                self.upstream.github_api_url
            ));
        }

        if !self.upstream.vercel_api_url.starts_with("https://") {
            errors.push(format!(
                "DEPLOYER_VERCEL_API_URL must use https:// in production (got '{}')",
                self.upstream.vercel_api_url
            ));
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}
