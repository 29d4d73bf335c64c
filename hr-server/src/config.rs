//! Server configuration

use std::time::Duration;

use shared::error::{AppError, ErrorCode};

/// Minimum JWT secret length outside development
const MIN_SECRET_LEN: usize = 32;

/// Server configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// SQLite connection URL (`sqlite:hr.db`, `sqlite::memory:`)
    pub database_url: String,
    /// Pool size (forced to 1 for in-memory databases)
    pub db_max_connections: u32,
    /// HTTP listen port
    pub http_port: u16,
    /// HS256 signing secret; `None` in development means "generate one"
    pub jwt_secret: Option<String>,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Access token lifetime (minutes)
    pub access_token_minutes: i64,
    /// Refresh token lifetime (minutes)
    pub refresh_token_minutes: i64,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty means permissive
    pub cors_allowed_origins: Vec<String>,
    pub log_level: String,
    pub log_json: bool,
    /// Directory for rolling log files (console only when unset)
    pub log_dir: Option<String>,
    /// Bootstrap admin, created at startup when the users table is empty
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Require a secret env var: must be set, non-empty and long enough in
    /// non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<Option<String>, AppError> {
        let val = std::env::var(name).ok().filter(|v| !v.is_empty());
        if environment == "development" {
            return Ok(val);
        }
        match val {
            None => Err(AppError::with_message(
                ErrorCode::ConfigError,
                format!("{name} must be set in {environment} environment"),
            )),
            Some(v) if v.len() < MIN_SECRET_LEN => Err(AppError::with_message(
                ErrorCode::ConfigError,
                format!(
                    "{name} must be at least {MIN_SECRET_LEN} characters in {environment} environment"
                ),
            )),
            Some(v) => Ok(Some(v)),
        }
    }

    fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:hr.db".into()),
            db_max_connections: Self::parse_env("DB_MAX_CONNECTIONS", 5),
            http_port: Self::parse_env("HTTP_PORT", 8000),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "hr-server".into()),
            jwt_audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "hr-clients".into()),
            access_token_minutes: Self::parse_env("ACCESS_TOKEN_MINUTES", 60),
            refresh_token_minutes: Self::parse_env("REFRESH_TOKEN_MINUTES", 1440),
            request_timeout: Duration::from_millis(Self::parse_env("REQUEST_TIMEOUT_MS", 30_000)),
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: Self::parse_env("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            admin_email: std::env::var("ADMIN_EMAIL").ok().filter(|s| !s.is_empty()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Configuration for tests: in-memory database, fixed secret, no file logs
    pub fn for_tests() -> Self {
        Self {
            environment: "test".into(),
            database_url: "sqlite::memory:".into(),
            db_max_connections: 1,
            http_port: 0,
            jwt_secret: Some("test-secret-test-secret-test-secret-0123".into()),
            jwt_issuer: "hr-server".into(),
            jwt_audience: "hr-clients".into(),
            access_token_minutes: 60,
            refresh_token_minutes: 1440,
            request_timeout: Duration::from_secs(30),
            cors_allowed_origins: Vec::new(),
            log_level: "warn".into(),
            log_json: false,
            log_dir: None,
            admin_email: None,
            admin_password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_development_allows_missing() {
        let val = Config::require_secret("HR_TEST_SECRET_NEVER_SET", "development").unwrap();
        assert!(val.is_none());
    }

    #[test]
    fn test_require_secret_production_rejects_missing() {
        let err = Config::require_secret("HR_TEST_SECRET_NEVER_SET", "production").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(err.message.contains("must be set"));
    }

    #[test]
    fn test_for_tests_uses_memory_database() {
        let config = Config::for_tests();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.environment, "test");
        assert!(config.jwt_secret.as_ref().unwrap().len() >= MIN_SECRET_LEN);
    }
}
