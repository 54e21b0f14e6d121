//! Storefront server configuration

use super::BoxError;
use crate::auth::JwtConfig;

const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    /// Daily rolling log files go here when the directory exists
    pub log_dir: Option<String>,
    pub log_json: bool,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub jwt_issuer: String,
    /// SES sender; confirmations are only logged when unset
    pub ses_from_email: Option<String>,
    pub ses_region: Option<String>,
    pub store_name: String,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:storefront.db".into(),
            http_port: 3000,
            environment: "development".into(),
            log_level: "info".into(),
            log_dir: None,
            log_json: false,
            jwt_secret: "dev-JWT_SECRET-not-for-production".into(),
            jwt_expiration_minutes: 1440,
            jwt_issuer: "storefront".into(),
            ses_from_email: None,
            ses_region: None,
            store_name: "Storefront".into(),
            currency: "EGP".into(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let defaults = Self::default();
        let environment = std::env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = Self::require_secret("JWT_SECRET", &environment)?;
        if environment != "development" && jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(format!("JWT_SECRET must be at least {MIN_JWT_SECRET_LEN} characters").into());
        }

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL").unwrap_or(defaults.database_url),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.http_port),
            log_level: non_empty_var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: non_empty_var("LOG_DIR"),
            log_json: std::env::var("LOG_JSON").is_ok_and(|v| v == "1" || v == "true"),
            jwt_secret,
            jwt_expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(defaults.jwt_expiration_minutes),
            jwt_issuer: non_empty_var("JWT_ISSUER").unwrap_or(defaults.jwt_issuer),
            ses_from_email: non_empty_var("SES_FROM_EMAIL"),
            ses_region: non_empty_var("SES_REGION"),
            store_name: non_empty_var("STORE_NAME").unwrap_or(defaults.store_name),
            currency: non_empty_var("CURRENCY").unwrap_or(defaults.currency),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            expiration_minutes: self.jwt_expiration_minutes,
            issuer: self.jwt_issuer.clone(),
        }
    }
}
