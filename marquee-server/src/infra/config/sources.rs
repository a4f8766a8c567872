use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub database: FileDatabaseConfig,
    pub auth: FileAuthConfig,
    pub tmdb: FileTmdbConfig,
    pub cors: FileCorsConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileAuthConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_pepper: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

/// Settings read from the process environment. Every field is optional;
/// set values take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub auth_password_pepper: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: Option<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub dev_mode: Option<bool>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            config_path: var("MARQUEE_CONFIG").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: var("SERVER_PORT").and_then(|s| s.parse().ok()),
            database_url: var("DATABASE_URL"),
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok()),
            auth_password_pepper: var("AUTH_PASSWORD_PEPPER"),
            tmdb_api_key: var("TMDB_API_KEY"),
            tmdb_base_url: var("TMDB_BASE_URL"),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_csv(&raw)),
            dev_mode: var("DEV_MODE").and_then(|raw| parse_bool(&raw)),
        }
    }
}

fn parse_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn parses_typed_values() {
        let env = env(&[
            ("SERVER_PORT", "8080"),
            ("DEV_MODE", "Yes"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
        ]);
        assert_eq!(env.server_port, Some(8080));
        assert_eq!(env.dev_mode, Some(true));
        assert_eq!(
            env.cors_allowed_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
    }

    #[test]
    fn blank_and_malformed_values_are_ignored() {
        let env = env(&[
            ("SERVER_PORT", "not-a-port"),
            ("DATABASE_URL", "   "),
            ("DEV_MODE", "maybe"),
        ]);
        assert_eq!(env.server_port, None);
        assert_eq!(env.database_url, None);
        assert_eq!(env.dev_mode, None);
    }

    #[test]
    fn file_config_sections_are_optional() {
        let file: FileConfig = toml::from_str(
            r#"
            dev_mode = true

            [server]
            port = 4000
            "#,
        )
        .unwrap();
        assert_eq!(file.server.port, Some(4000));
        assert_eq!(file.server.host, None);
        assert_eq!(file.dev_mode, Some(true));
        assert!(file.tmdb.api_key.is_none());
    }
}
