use std::sync::Arc;

use argon2::Params;
use axum_test::TestServer;
use marquee_core::catalog::InMemoryCatalog;
use marquee_core::providers::TmdbProvider;
use marquee_core::users::{InMemoryUserRepository, PasswordHasher, UserService};
use marquee_server::create_app;
use marquee_server::infra::app_state::AppState;
use marquee_server::infra::config::{
    AuthConfig, Config, ConfigMetadata, CorsConfig, DatabaseConfig,
    ServerConfig, TmdbConfig,
};
use serde_json::{Value, json};

// Used by a subset of the test binaries
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub catalog: Arc<InMemoryCatalog>,
}

pub fn test_config(tmdb_base_url: &str, tmdb_api_key: Option<&str>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
        },
        auth: AuthConfig {
            password_pepper: "integration-test-pepper".into(),
        },
        tmdb: TmdbConfig {
            api_key: tmdb_api_key.map(str::to_string),
            base_url: tmdb_base_url.into(),
        },
        cors: CorsConfig::default(),
        dev_mode: true,
        metadata: ConfigMetadata::default(),
    }
}

pub fn fast_hasher() -> Arc<PasswordHasher> {
    let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap();
    Arc::new(PasswordHasher::with_params("integration-test-pepper", params).unwrap())
}

/// App on in-memory stores with TMDB disabled.
#[allow(unused)]
pub fn build_test_app() -> TestApp {
    build_test_app_with_tmdb("http://127.0.0.1:9", None)
}

pub fn build_test_app_with_tmdb(base_url: &str, api_key: Option<&str>) -> TestApp {
    let config = test_config(base_url, api_key);
    let catalog = Arc::new(InMemoryCatalog::new());
    let users = UserService::new(Arc::new(InMemoryUserRepository::new()), fast_hasher());
    let metadata = TmdbProvider::new(
        config.tmdb.api_key.clone(),
        config.tmdb.base_url.clone(),
    )
    .unwrap();

    let state = AppState::new(config, catalog.clone(), users, metadata);
    let server = TestServer::new(create_app(state.clone())).unwrap();

    TestApp {
        server,
        state,
        catalog,
    }
}

#[allow(unused)]
pub fn movie_json(director: &str, title: &str, year: i32, duration: i32, rating: f64) -> Value {
    json!({
        "director": director,
        "title": title,
        "year": year,
        "genre": "Drama",
        "duration": duration,
        "rating": rating,
    })
}

#[allow(unused)]
pub fn key_json(director: &str, title: &str, year: i32) -> Value {
    json!({ "director": director, "title": title, "year": year })
}
