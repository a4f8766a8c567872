use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use marquee_core::providers::tmdb::TMDB_V3_BASE;

use super::{
    AuthConfig, Config, ConfigGuardRailError, ConfigMetadata, ConfigWarnings,
    CorsConfig, DEFAULT_PASSWORD_PEPPER, DatabaseConfig, ServerConfig,
    TmdbConfig, apply_guard_rails,
    sources::{EnvConfig, FileConfig},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("marquee.toml"),
        PathBuf::from("config/marquee.toml"),
    ]
});

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to load env file")]
    EnvFile(#[from] dotenvy::Error),
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
}

/// Where the config file path came from. Only an explicitly requested file
/// is required to exist.
enum PathProvenance {
    Explicit,
    Env,
    Default,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    /// Load `.env`, then compose file and process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_with_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Compose from an already gathered environment. Does not touch `.env`
    /// or the process environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) = compose_config(file_config, env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn resolve_path(&self, env: &EnvConfig) -> Option<(PathBuf, PathProvenance)> {
        if let Some(explicit) = &self.options.config_path {
            return Some((explicit.clone(), PathProvenance::Explicit));
        }
        if let Some(from_env) = &env.config_path {
            return Some((from_env.clone(), PathProvenance::Env));
        }
        DEFAULT_CONFIG_LOCATIONS
            .iter()
            .find(|candidate| candidate.exists())
            .map(|path| (path.clone(), PathProvenance::Default))
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let Some((path, provenance)) = self.resolve_path(env) else {
            return Ok((None, None));
        };

        if !path.exists() {
            return match provenance {
                PathProvenance::Explicit | PathProvenance::Env => {
                    Err(ConfigLoadError::MissingConfig { path })
                }
                PathProvenance::Default => Ok((None, None)),
            };
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

fn compose_config(
    file_config: Option<FileConfig>,
    env: EnvConfig,
    config_path: Option<PathBuf>,
) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
    let mut warnings = ConfigWarnings::default();

    if file_config.is_none() {
        warnings.push_with_hint(
            "No marquee.toml detected; falling back to environment variables",
            "Create marquee.toml or pass --config to pin server settings",
        );
    }

    let FileConfig {
        server: file_server,
        database: file_database,
        auth: file_auth,
        tmdb: file_tmdb,
        cors: file_cors,
        dev_mode: file_dev_mode,
    } = file_config.unwrap_or_default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
    };

    let database = DatabaseConfig {
        url: env.database_url.or(file_database.url),
        max_connections: env
            .database_max_connections
            .or(file_database.max_connections)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS),
    };

    let auth = AuthConfig {
        password_pepper: env
            .auth_password_pepper
            .or(file_auth.password_pepper)
            .unwrap_or_else(|| DEFAULT_PASSWORD_PEPPER.to_string()),
    };

    let tmdb = TmdbConfig {
        api_key: env.tmdb_api_key.or(file_tmdb.api_key),
        base_url: env
            .tmdb_base_url
            .or(file_tmdb.base_url)
            .unwrap_or_else(|| TMDB_V3_BASE.to_string()),
    };

    let cors = CorsConfig {
        allowed_origins: env
            .cors_allowed_origins
            .or(file_cors.allowed_origins)
            .unwrap_or_default(),
    };

    let config = Config {
        server,
        database,
        auth,
        tmdb,
        cors,
        dev_mode: env.dev_mode.or(file_dev_mode).unwrap_or(false),
        metadata: ConfigMetadata {
            config_path,
            env_file_loaded: false,
        },
    };

    warnings.extend(apply_guard_rails(&config)?);
    Ok((config, warnings))
}
