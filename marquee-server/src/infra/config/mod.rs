//! Server configuration: TOML file, `.env` and process environment,
//! composed by [`ConfigLoader`].

pub mod loader;
pub mod sources;

use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use sources::{EnvConfig, FileConfig};

/// Pepper used when none is configured. Fine for local runs, flagged at
/// startup everywhere else.
pub const DEFAULT_PASSWORD_PEPPER: &str = "marquee-default-pepper";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub tmdb: TmdbConfig,
    pub cors: CorsConfig,
    pub dev_mode: bool,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `None` selects the in-memory stores.
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub password_pepper: String,
}

impl AuthConfig {
    pub fn is_default_pepper(&self) -> bool {
        self.password_pepper == DEFAULT_PASSWORD_PEPPER
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct TmdbConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard_included(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*")
    }

    pub fn origin_header_values(
        &self,
    ) -> Result<Vec<HeaderValue>, ConfigGuardRailError> {
        self.allowed_origins
            .iter()
            .filter(|origin| origin.trim() != "*")
            .map(|origin| {
                HeaderValue::from_str(origin.trim()).map_err(|_| {
                    ConfigGuardRailError::InvalidCorsConfig {
                        reason: format!("invalid origin '{origin}'"),
                    }
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("CORS wildcard origins are not allowed when DEV_MODE is false")]
    DangerousCorsWildcard,
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
    #[error("authentication secret {field} {reason}")]
    WeakSecret { field: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

/// Reject configurations that are unsafe outside development and collect
/// warnings for the merely questionable ones.
pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.auth.password_pepper.trim().is_empty() {
        return Err(ConfigGuardRailError::WeakSecret {
            field: "AUTH_PASSWORD_PEPPER",
            reason: "must not be empty".into(),
        });
    }

    if config.auth.is_default_pepper() {
        warnings.push_with_hint(
            "AUTH_PASSWORD_PEPPER is using the built-in default",
            "Set AUTH_PASSWORD_PEPPER to a long random value before storing real accounts",
        );
    }

    if !config.dev_mode && config.cors.is_wildcard_included() {
        return Err(ConfigGuardRailError::DangerousCorsWildcard);
    }
    config.cors.origin_header_values()?;

    if config.database.url.is_none() {
        warnings.push_with_hint(
            "DATABASE_URL not configured; catalog and accounts are kept in memory",
            "Set DATABASE_URL to persist data across restarts",
        );
    }

    if config.tmdb.api_key.is_none() {
        warnings.push_with_hint(
            "TMDB_API_KEY not configured; metadata routes will return 503",
            "Set TMDB_API_KEY to enable director, title and top-rated lookups",
        );
    }

    Ok(warnings)
}
